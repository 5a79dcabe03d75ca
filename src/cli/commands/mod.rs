//! CLI command implementations
//!
//! Each command is implemented in its own submodule.

pub mod doctor;
pub mod fetch;
pub mod install;
pub mod list;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Args, Subcommand, ValueEnum};

use crate::cli::output::create_download_bar;
use crate::config::defaults;
use crate::core::provision::{PackageReport, ProvisionReport};
use crate::infra::download::HttpDownloader;

/// How downloads, extraction and copies are carried out
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    /// Shell out to wget, unzip, tar and cp
    #[default]
    Tools,
    /// Use the built-in HTTP client, archive readers and file copies
    Native,
}

/// Options for `install`
#[derive(Args, Debug, Clone)]
pub struct InstallArgs {
    /// Output directory for runtime DLLs, relative to the root
    #[arg(long, default_value = defaults::OUT_DIR)]
    pub out_dir: PathBuf,

    /// Vendor directory for archives, relative to the root
    #[arg(long, default_value = defaults::VENDOR_DIR)]
    pub vendor_dir: PathBuf,

    /// Cross-compiler prefix receiving development files
    #[arg(long, default_value = defaults::MINGW_PREFIX)]
    pub prefix: PathBuf,

    /// Implementation used for each step
    #[arg(long, value_enum, default_value_t = Backend::Tools)]
    pub backend: Backend,

    /// Do not prefix prefix writes with sudo (tools backend)
    #[arg(long)]
    pub no_sudo: bool,

    /// Only place runtime DLLs
    #[arg(long)]
    pub skip_dev: bool,

    /// Continue with the next package after a failure
    #[arg(long)]
    pub keep_going: bool,
}

/// Options for `fetch`
#[derive(Args, Debug, Clone)]
pub struct FetchArgs {
    /// Vendor directory for archives, relative to the root
    #[arg(long, default_value = defaults::VENDOR_DIR)]
    pub vendor_dir: PathBuf,

    /// Implementation used for each step
    #[arg(long, value_enum, default_value_t = Backend::Tools)]
    pub backend: Backend,

    /// Continue with the next package after a failure
    #[arg(long)]
    pub keep_going: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Download, expand and place every package
    Install(InstallArgs),

    /// Download and expand packages without placing them
    Fetch(FetchArgs),

    /// Show the package catalog
    List,

    /// Check system dependencies
    Doctor {
        /// Cross-compiler prefix to check
        #[arg(long, default_value = defaults::MINGW_PREFIX)]
        prefix: PathBuf,
    },
}

impl Commands {
    /// Execute the command
    pub async fn run(self, root: &Path, catalog: Option<&Path>) -> Result<()> {
        match self {
            Self::Install(args) => install::execute(root, catalog, args).await,
            Self::Fetch(args) => fetch::execute(root, catalog, args).await,
            Self::List => list::execute(catalog),
            Self::Doctor { prefix } => doctor::execute(root, &prefix),
        }
    }
}

/// HTTP downloader reporting through a progress bar
///
/// The returned bar should be cleared once the run is over.
pub(crate) fn native_downloader() -> (HttpDownloader, indicatif::ProgressBar) {
    let bar = create_download_bar(0);
    let handle = bar.clone();
    let downloader = HttpDownloader::new().with_progress(Box::new(move |downloaded, total| {
        if total > 0 {
            handle.set_length(total);
        }
        handle.set_position(downloaded);
    }));
    (downloader, bar)
}

pub(crate) fn package_json(package: &PackageReport) -> serde_json::Value {
    serde_json::json!({
        "name": package.name,
        "version": package.version,
        "downloaded": package.downloaded,
        "present": package.present,
        "dlls": package.dlls,
        "dev": package.dev.iter().map(|d| serde_json::json!({
            "subdir": d.name,
            "entries": d.entries,
        })).collect::<Vec<_>>(),
    })
}

pub(crate) fn report_json(report: &ProvisionReport) -> serde_json::Value {
    serde_json::json!({
        "status": if report.is_success() { "success" } else { "error" },
        "packages": report.packages.iter().map(package_json).collect::<Vec<_>>(),
        "failed": report.failed.iter().map(|(name, e)| serde_json::json!({
            "name": name,
            "error": e.to_string(),
        })).collect::<Vec<_>>(),
    })
}

/// Turn recorded `--keep-going` failures into the command's error
pub(crate) fn check_failures(report: &ProvisionReport) -> Result<()> {
    if report.is_success() {
        return Ok(());
    }
    let names: Vec<&str> = report.failed.iter().map(|(n, _)| n.as_str()).collect();
    Err(anyhow::anyhow!(
        "{} package(s) failed: {}",
        names.len(),
        names.join(", ")
    ))
}
