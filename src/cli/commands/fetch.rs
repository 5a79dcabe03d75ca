//! CLI command for `grab-win64 fetch`
//!
//! Downloads and expands archives into the vendor directory. Nothing is
//! written to the output directory or the prefix.

use std::path::Path;

use anyhow::{Context, Result};

use super::{check_failures, native_downloader, report_json, Backend, FetchArgs};
use crate::cli::output::{is_json, print_detail, print_info, print_success, print_warning};
use crate::core::catalog::Catalog;
use crate::core::provision::{ProvisionOptions, Provisioner};
use crate::infra::copy::NativeCopier;
use crate::infra::download::WgetDownloader;
use crate::infra::extract::{NativeExtractor, ToolExtractor};

/// Execute the fetch command
pub async fn execute(root: &Path, catalog: Option<&Path>, args: FetchArgs) -> Result<()> {
    let catalog = Catalog::load_or_builtin(catalog)?;
    let options = ProvisionOptions {
        vendor_dir: args.vendor_dir.clone(),
        keep_going: args.keep_going,
        ..ProvisionOptions::new(root)
    };

    // The copier is never used in fetch mode
    let report = match args.backend {
        Backend::Tools => {
            Provisioner::new(WgetDownloader, ToolExtractor, NativeCopier, options)
                .fetch(&catalog)
                .await
        }
        Backend::Native => {
            let (downloader, bar) = native_downloader();
            let result = Provisioner::new(downloader, NativeExtractor, NativeCopier, options)
                .fetch(&catalog)
                .await;
            bar.finish_and_clear();
            result
        }
    }
    .context("Fetch failed")?;

    if is_json() {
        println!(
            "{}",
            serde_json::to_string_pretty(&report_json(&report)).unwrap_or_default()
        );
    } else {
        for package in &report.packages {
            print_success(&format!("{} {}", package.name, package.version));
            for archive in &package.downloaded {
                print_detail(&format!("downloaded {archive}"));
            }
            for archive in &package.present {
                print_detail(&format!("already present {archive}"));
            }
        }
        for (name, error) in &report.failed {
            print_warning(&format!("{name}: {error}"));
        }
        print_info(&format!(
            "Archives are in {}",
            root.join(&args.vendor_dir).display()
        ));
    }

    check_failures(&report)
}
