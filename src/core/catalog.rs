//! Package catalog
//!
//! The ordered list of packages to provision. Either the built-in list or a
//! TOML file of `[[package]]` tables:
//!
//! ```toml
//! [[package]]
//! name = "SDL"
//! base_url = "https://www.libsdl.org/release/"
//! dll_name = "SDL2-%s-win32-x64.zip"
//! dev_name = "SDL2-devel-%s-mingw.tar.gz"
//! expanded_dev_name = "SDL2-%s"
//! version = "2.0.8"
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::catalog::BUILTIN_PACKAGES;
use crate::core::package::PackageDescriptor;
use crate::error::CatalogError;
use crate::infra::filesystem;

/// Ordered, read-only list of package descriptors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(rename = "package", default)]
    pub packages: Vec<PackageDescriptor>,
}

impl Catalog {
    /// The built-in SDL catalog
    pub fn builtin() -> Self {
        Self {
            packages: BUILTIN_PACKAGES.iter().map(PackageDescriptor::from).collect(),
        }
    }

    /// Parse a catalog from TOML
    pub fn from_toml(content: &str) -> Result<Self, CatalogError> {
        toml::from_str(content).map_err(|e| CatalogError::Parse(e.to_string()))
    }

    /// Load a catalog file
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = filesystem::read_file(path).map_err(|e| CatalogError::Read {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;
        Self::from_toml(&content)
    }

    /// Load `path` if given, otherwise use the built-in catalog
    pub fn load_or_builtin(path: Option<&Path>) -> Result<Self, CatalogError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::builtin()),
        }
    }

    /// Check every descriptor, plus name uniqueness
    ///
    /// Names double as vendor directory names, so two packages sharing one
    /// would overwrite each other's archives.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.packages.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        for package in &self.packages {
            package.validate()?;
            if !seen.insert(package.name.as_str()) {
                return Err(CatalogError::Duplicate {
                    name: package.name.clone(),
                });
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PackageDescriptor> {
        self.packages.iter()
    }
}
