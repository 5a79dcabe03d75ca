//! Archive expansion
//!
//! Picks the archive format from the file name and expands it in place.
//! The two formats follow different cleanup policies:
//!
//! - `.zip` is extracted over whatever is already there, overwriting files
//!   of the same name and leaving everything else alone;
//! - `.tar.gz` first removes the directory it is expected to expand to, so
//!   the result holds exactly the archive contents.

use std::path::Path;

use tracing::{debug, info};

use crate::core::workspace::PathContext;
use crate::error::ArchiveError;
use crate::infra::filesystem;

/// Archive formats the expander understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveKind {
    /// ZIP archive (.zip)
    Zip,
    /// Gzip-compressed tar archive (.tar.gz)
    TarGz,
}

impl ArchiveKind {
    /// Infer the format from a file name suffix (case-sensitive)
    pub fn from_file_name(file_name: &str) -> Result<Self, ArchiveError> {
        if file_name.ends_with(".zip") {
            Ok(Self::Zip)
        } else if file_name.ends_with(".tar.gz") {
            Ok(Self::TarGz)
        } else {
            Err(ArchiveError::UnknownType {
                file: file_name.to_string(),
            })
        }
    }
}

/// Something that can unpack an archive into a directory
pub trait Extractor {
    /// Unpack `archive` into `dest_dir`, overwriting existing files
    fn extract(&self, kind: ArchiveKind, archive: &Path, dest_dir: &Path)
        -> Result<(), ArchiveError>;
}

/// Expand `ctx/file_name` into `ctx`
///
/// For `.tar.gz` archives `ctx/expected_dir` is removed first if present.
/// An unrecognized suffix fails before anything on disk is touched.
pub fn expand<E: Extractor>(
    extractor: &E,
    ctx: &PathContext,
    file_name: &str,
    expected_dir: &str,
) -> Result<ArchiveKind, ArchiveError> {
    let kind = ArchiveKind::from_file_name(file_name)?;
    let archive = ctx.join(file_name);

    info!("Expanding {file_name}");

    if kind == ArchiveKind::TarGz {
        let stale = ctx.join(expected_dir);
        if stale.exists() {
            debug!("Removing previous expansion {}", stale.display());
            filesystem::remove_dir_all(&stale)?;
        }
    }

    extractor.extract(kind, &archive, ctx.dir())?;
    Ok(kind)
}
