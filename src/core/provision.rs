//! Provisioning pipeline
//!
//! Runs the per-package sequence over a catalog:
//!
//! 1. fetch the runtime archive, then the development archive
//! 2. expand both
//! 3. copy the runtime DLLs into the output directory
//! 4. copy the development subtrees into the cross-compiler prefix
//!
//! Each package works inside its own vendor subdirectory. The pipeline never
//! changes the process working directory.

use std::path::PathBuf;

use tracing::{error, info};

use crate::config::defaults;
use crate::core::archive::{expand, Extractor};
use crate::core::catalog::Catalog;
use crate::core::fetch::{fetch_if_absent, Downloader, FetchOutcome};
use crate::core::package::PackageDescriptor;
use crate::core::place::{place_dev_tree, place_dlls, Copier, PlacedSubdir};
use crate::core::workspace::PathContext;
use crate::error::ProvisionError;

/// Where the pipeline reads and writes
#[derive(Debug, Clone)]
pub struct ProvisionOptions {
    /// Project root; relative directories below are resolved against it
    pub root: PathBuf,
    /// Output directory for runtime DLLs
    pub out_dir: PathBuf,
    /// Vendor cache for archives and expansions
    pub vendor_dir: PathBuf,
    /// Cross-compiler prefix for development files; a relative prefix is
    /// taken relative to `root` like the other directories
    pub prefix: PathBuf,
    /// Copy development files into the prefix
    pub place_dev: bool,
    /// Continue with the next package after a failure
    pub keep_going: bool,
}

impl ProvisionOptions {
    /// Defaults rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            out_dir: PathBuf::from(defaults::OUT_DIR),
            vendor_dir: PathBuf::from(defaults::VENDOR_DIR),
            prefix: PathBuf::from(defaults::MINGW_PREFIX),
            place_dev: true,
            keep_going: false,
        }
    }
}

/// Result of provisioning one package
#[derive(Debug, Clone, Default)]
pub struct PackageReport {
    /// Package name
    pub name: String,
    /// Package version
    pub version: String,
    /// Archives downloaded in this run
    pub downloaded: Vec<String>,
    /// Archives that were already present
    pub present: Vec<String>,
    /// DLLs copied into the output directory
    pub dlls: Vec<String>,
    /// Development subtrees copied into the prefix
    pub dev: Vec<PlacedSubdir>,
}

/// Result of a whole run
#[derive(Debug, Default)]
pub struct ProvisionReport {
    /// Packages that completed
    pub packages: Vec<PackageReport>,
    /// Packages that failed (only populated with `keep_going`)
    pub failed: Vec<(String, ProvisionError)>,
}

impl ProvisionReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn downloaded_count(&self) -> usize {
        self.packages.iter().map(|p| p.downloaded.len()).sum()
    }
}

/// Which steps of the per-package sequence to run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Fetch and expand only
    Fetch,
    /// Fetch, expand and place
    Install,
}

/// Pipeline over a downloader, an extractor and a copier
pub struct Provisioner<D, E, C> {
    downloader: D,
    extractor: E,
    copier: C,
    options: ProvisionOptions,
}

impl<D: Downloader, E: Extractor, C: Copier> Provisioner<D, E, C> {
    pub fn new(downloader: D, extractor: E, copier: C, options: ProvisionOptions) -> Self {
        Self {
            downloader,
            extractor,
            copier,
            options,
        }
    }

    /// Fetch, expand and place every package in the catalog
    pub async fn install(&self, catalog: &Catalog) -> Result<ProvisionReport, ProvisionError> {
        self.run(catalog, Mode::Install).await
    }

    /// Fetch and expand every package without writing outside the vendor cache
    pub async fn fetch(&self, catalog: &Catalog) -> Result<ProvisionReport, ProvisionError> {
        self.run(catalog, Mode::Fetch).await
    }

    async fn run(&self, catalog: &Catalog, mode: Mode) -> Result<ProvisionReport, ProvisionError> {
        catalog.validate()?;

        let root = PathContext::new(&self.options.root);
        let out = if mode == Mode::Install {
            Some(root.enter(&self.options.out_dir)?)
        } else {
            None
        };
        let vendor = root.enter(&self.options.vendor_dir)?;

        let mut report = ProvisionReport::default();
        for package in catalog.iter() {
            match self.provision_package(&vendor, out.as_ref(), package).await {
                Ok(package_report) => report.packages.push(package_report),
                Err(e) if self.options.keep_going => {
                    error!("Package '{}' failed: {e}", package.name);
                    report.failed.push((package.name.clone(), e));
                }
                Err(e) => return Err(e.in_package(&package.name)),
            }
        }

        Ok(report)
    }

    async fn provision_package(
        &self,
        vendor: &PathContext,
        out: Option<&PathContext>,
        package: &PackageDescriptor,
    ) -> Result<PackageReport, ProvisionError> {
        info!("Provisioning {} {}", package.name, package.version);

        let ctx = vendor.enter(&package.name)?;
        let files = package.files()?;

        let mut report = PackageReport {
            name: package.name.clone(),
            version: package.version.clone(),
            ..PackageReport::default()
        };

        for (archive, url) in [
            (&files.dll_archive, &files.dll_url),
            (&files.dev_archive, &files.dev_url),
        ] {
            match fetch_if_absent(&self.downloader, &ctx, archive, url).await? {
                FetchOutcome::Downloaded => report.downloaded.push(archive.clone()),
                FetchOutcome::Present => report.present.push(archive.clone()),
            }
        }

        expand(&self.extractor, &ctx, &files.dll_archive, &files.expanded_dir)?;
        expand(&self.extractor, &ctx, &files.dev_archive, &files.expanded_dir)?;

        if let Some(out) = out {
            report.dlls = place_dlls(&self.copier, &ctx, out.dir())?;

            if self.options.place_dev {
                let prefix = self.options.root.join(&self.options.prefix);
                report.dev = place_dev_tree(&self.copier, &ctx, &files.expanded_dir, &prefix)?;
            }
        }

        Ok(report)
    }
}
