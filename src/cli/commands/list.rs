//! CLI command for `grab-win64 list`
//!
//! Shows each catalog package with its rendered archive names and the URLs
//! they would be downloaded from. Nothing is fetched.

use std::path::Path;

use anyhow::{Context, Result};

use crate::cli::output::{is_json, is_quiet, print_detail, print_info};
use crate::core::catalog::Catalog;
use crate::core::package::{PackageDescriptor, PackageFiles};

/// A catalog entry with everything derived from it
#[derive(Debug, serde::Serialize)]
pub struct ListedPackage<'a> {
    pub name: &'a str,
    pub version: &'a str,
    #[serde(flatten)]
    pub files: PackageFiles,
}

/// Resolve every package in the catalog
pub fn resolve_all(catalog: &Catalog) -> Result<Vec<ListedPackage<'_>>> {
    catalog.validate()?;
    catalog
        .iter()
        .map(|package: &PackageDescriptor| {
            let files = package
                .files()
                .with_context(|| format!("Package '{}'", package.name))?;
            Ok(ListedPackage {
                name: &package.name,
                version: &package.version,
                files,
            })
        })
        .collect()
}

/// Execute the list command
pub fn execute(catalog: Option<&Path>) -> Result<()> {
    let catalog = Catalog::load_or_builtin(catalog)?;
    let packages = resolve_all(&catalog)?;

    if is_json() {
        let json = serde_json::json!({ "packages": packages });
        println!("{}", serde_json::to_string_pretty(&json)?);
        return Ok(());
    }

    if is_quiet() {
        for package in &packages {
            println!("{} {}", package.name, package.version);
        }
        return Ok(());
    }

    print_info(&format!("{} package(s)", packages.len()));
    for package in &packages {
        println!();
        println!("{} {}", package.name, package.version);
        print_detail(&format!("runtime:   {}", package.files.dll_url));
        print_detail(&format!("devel:     {}", package.files.dev_url));
        print_detail(&format!("expands:   {}", package.files.expanded_dir));
    }

    Ok(())
}
