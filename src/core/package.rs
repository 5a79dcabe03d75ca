//! Package descriptors
//!
//! A descriptor names one third-party library: where its archives live and
//! how their file names are derived from the version.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::catalog::PackageSpec;
use crate::config::defaults::VERSION_PLACEHOLDER;
use crate::core::archive::ArchiveKind;
use crate::core::url::resolve;
use crate::error::{CatalogError, UrlError};

/// One library to provision
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageDescriptor {
    /// Display name, also the vendor subdirectory name
    pub name: String,
    /// Directory URL the archives are published under
    pub base_url: String,
    /// Runtime archive file name template
    pub dll_name: String,
    /// Development archive file name template
    pub dev_name: String,
    /// Name of the directory the development archive expands to
    pub expanded_dev_name: String,
    /// Version substituted into the templates
    pub version: String,
}

/// Rendered names and URLs for one package
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageFiles {
    pub dll_archive: String,
    pub dev_archive: String,
    pub expanded_dir: String,
    pub dll_url: Url,
    pub dev_url: Url,
}

impl PackageDescriptor {
    /// Substitute the version into a template
    pub fn render(&self, template: &str) -> String {
        template.replace(VERSION_PLACEHOLDER, &self.version)
    }

    /// Rendered runtime archive name
    pub fn dll_archive(&self) -> String {
        self.render(&self.dll_name)
    }

    /// Rendered development archive name
    pub fn dev_archive(&self) -> String {
        self.render(&self.dev_name)
    }

    /// Rendered expanded directory name
    pub fn expanded_dir(&self) -> String {
        self.render(&self.expanded_dev_name)
    }

    /// Render all names and resolve both download URLs
    pub fn files(&self) -> Result<PackageFiles, UrlError> {
        let dll_archive = self.dll_archive();
        let dev_archive = self.dev_archive();
        let dll_url = resolve(&self.base_url, &dll_archive)?;
        let dev_url = resolve(&self.base_url, &dev_archive)?;

        Ok(PackageFiles {
            dll_archive,
            dev_archive,
            expanded_dir: self.expanded_dir(),
            dll_url,
            dev_url,
        })
    }

    /// Check the descriptor invariants
    ///
    /// Name, base URL and version must be non-empty and both archive
    /// templates must render to a recognized archive type.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let required = [
            ("name", &self.name),
            ("base_url", &self.base_url),
            ("version", &self.version),
            ("expanded_dev_name", &self.expanded_dev_name),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(CatalogError::EmptyField {
                    package: self.name.clone(),
                    field: field.to_string(),
                });
            }
        }

        for (field, rendered) in [("dll_name", self.dll_archive()), ("dev_name", self.dev_archive())] {
            if ArchiveKind::from_file_name(&rendered).is_err() {
                return Err(CatalogError::NotAnArchive {
                    package: self.name.clone(),
                    field: field.to_string(),
                    rendered,
                });
            }
        }

        Ok(())
    }
}

impl From<&PackageSpec> for PackageDescriptor {
    fn from(spec: &PackageSpec) -> Self {
        Self {
            name: spec.name.to_string(),
            base_url: spec.base_url.to_string(),
            dll_name: spec.dll_name.to_string(),
            dev_name: spec.dev_name.to_string(),
            expanded_dev_name: spec.expanded_dev_name.to_string(),
            version: spec.version.to_string(),
        }
    }
}
