//! Placement of expanded files
//!
//! Runtime DLLs go flat into the build output directory. Development files
//! go into the cross-compiler prefix, one top-level entry at a time, for each
//! of the `bin`, `include`, `lib` and `share` subtrees.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::defaults::{DEV_SUBDIRS, DLL_EXTENSION, MINGW_TRIPLE};
use crate::core::workspace::PathContext;
use crate::error::PlaceError;
use crate::infra::filesystem;

/// Something that can copy files and trees into a destination directory
pub trait Copier {
    /// Make sure `dir` exists
    fn ensure_dir(&self, dir: &Path) -> Result<(), PlaceError>;

    /// Copy plain files into `dest_dir`, overwriting same-named files
    fn copy_files(&self, files: &[PathBuf], dest_dir: &Path) -> Result<(), PlaceError>;

    /// Copy a file or directory tree into `dest_dir/<entry name>`
    ///
    /// An existing directory at the destination is merged into, not replaced.
    fn copy_entry(&self, entry: &Path, dest_dir: &Path) -> Result<(), PlaceError>;
}

/// Files placed for one development subtree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedSubdir {
    /// Subtree name (`bin`, `include`, ...)
    pub name: String,
    /// Top-level entries copied, empty when the archive lacks the subtree
    pub entries: Vec<String>,
}

fn file_names(paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .filter_map(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .collect()
}

/// Copy every `*.dll` in `ctx` into `out_dir`
///
/// Returns the names of the copied files. Finding none is not an error.
pub fn place_dlls<C: Copier>(
    copier: &C,
    ctx: &PathContext,
    out_dir: &Path,
) -> Result<Vec<String>, PlaceError> {
    info!("Copying dlls to output directory...");

    let dlls = filesystem::glob_files(ctx.dir(), DLL_EXTENSION)?;
    if dlls.is_empty() {
        warn!("No .{DLL_EXTENSION} files found in {}", ctx.dir().display());
        return Ok(Vec::new());
    }

    copier.copy_files(&dlls, out_dir)?;
    Ok(file_names(&dlls))
}

/// Copy the development subtrees of `ctx/expanded_dir` into `prefix`
///
/// The source root is `<expanded_dir>/x86_64-w64-mingw32`. Every
/// destination subdirectory is created even when the archive does not ship
/// the matching source subtree.
pub fn place_dev_tree<C: Copier>(
    copier: &C,
    ctx: &PathContext,
    expanded_dir: &str,
    prefix: &Path,
) -> Result<Vec<PlacedSubdir>, PlaceError> {
    info!(
        "Placing development files into {} subdirs...",
        prefix.display()
    );

    let dev_root = ctx.child(expanded_dir).child(MINGW_TRIPLE);
    if !dev_root.dir().is_dir() {
        return Err(PlaceError::MissingDevRoot {
            path: dev_root.dir().to_path_buf(),
        });
    }

    let mut placed = Vec::with_capacity(DEV_SUBDIRS.len());
    for subdir in DEV_SUBDIRS {
        let destination = prefix.join(subdir);
        if !destination.is_dir() {
            copier.ensure_dir(&destination)?;
        }

        let source = dev_root.child(subdir);
        let mut entries = Vec::new();
        if source.dir().is_dir() {
            for entry in filesystem::list_entries(source.dir())? {
                debug!("{} -> {}", entry.display(), destination.display());
                copier.copy_entry(&entry, &destination)?;
                entries.push(entry);
            }
        } else {
            debug!("{} not shipped, skipping", source.dir().display());
        }

        placed.push(PlacedSubdir {
            name: (*subdir).to_string(),
            entries: file_names(&entries),
        });
    }

    Ok(placed)
}
