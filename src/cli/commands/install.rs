//! CLI command for `grab-win64 install`

use std::path::Path;

use anyhow::{Context, Result};

use super::{check_failures, native_downloader, report_json, Backend, InstallArgs};
use crate::cli::output::{is_json, print_detail, print_success, print_warning};
use crate::core::catalog::Catalog;
use crate::core::provision::{ProvisionOptions, ProvisionReport, Provisioner};
use crate::infra::copy::{CommandCopier, NativeCopier};
use crate::infra::download::WgetDownloader;
use crate::infra::extract::{NativeExtractor, ToolExtractor};

/// Build provisioning options for `install`
pub fn options(root: &Path, args: &InstallArgs) -> ProvisionOptions {
    ProvisionOptions {
        out_dir: args.out_dir.clone(),
        vendor_dir: args.vendor_dir.clone(),
        prefix: args.prefix.clone(),
        place_dev: !args.skip_dev,
        keep_going: args.keep_going,
        ..ProvisionOptions::new(root)
    }
}

/// Execute the install command
pub async fn execute(root: &Path, catalog: Option<&Path>, args: InstallArgs) -> Result<()> {
    let catalog = Catalog::load_or_builtin(catalog)?;
    let options = options(root, &args);

    let report = match args.backend {
        Backend::Tools => {
            Provisioner::new(
                WgetDownloader,
                ToolExtractor,
                CommandCopier::new(!args.no_sudo),
                options,
            )
            .install(&catalog)
            .await
        }
        Backend::Native => {
            let (downloader, bar) = native_downloader();
            let result = Provisioner::new(downloader, NativeExtractor, NativeCopier, options)
                .install(&catalog)
                .await;
            bar.finish_and_clear();
            result
        }
    }
    .context("Install failed")?;

    print_report(root, &report, &args);
    check_failures(&report)
}

fn print_report(root: &Path, report: &ProvisionReport, args: &InstallArgs) {
    if is_json() {
        println!(
            "{}",
            serde_json::to_string_pretty(&report_json(report)).unwrap_or_default()
        );
        return;
    }

    for package in &report.packages {
        print_success(&format!("{} {}", package.name, package.version));
        if !package.downloaded.is_empty() {
            print_detail(&format!("downloaded: {}", package.downloaded.join(", ")));
        }
        if package.dlls.is_empty() {
            print_warning(&format!("{}: no DLLs found", package.name));
        } else {
            print_detail(&format!(
                "{} -> {}",
                package.dlls.join(", "),
                args.out_dir.display()
            ));
        }
        let dev_entries: usize = package.dev.iter().map(|d| d.entries.len()).sum();
        if !package.dev.is_empty() {
            print_detail(&format!(
                "{dev_entries} development entries -> {}",
                root.join(&args.prefix).display()
            ));
        }
    }

    for (name, error) in &report.failed {
        print_warning(&format!("{name}: {error}"));
    }
}
