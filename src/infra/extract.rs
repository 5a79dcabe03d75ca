//! Archive extraction backends
//!
//! [`NativeExtractor`] reads archives in-process with the `zip`, `tar` and
//! `flate2` crates. [`ToolExtractor`] runs `unzip -o` and `tar -xzf`.
//! Both overwrite existing files and leave unrelated files alone.

use std::fs::{self, File};
use std::io::{self, BufReader, Read};
use std::path::{Component, Path};

use tracing::{debug, warn};

use crate::config::defaults;
use crate::core::archive::{ArchiveKind, Extractor};
use crate::error::ArchiveError;
use crate::infra::process;

/// In-process extractor
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeExtractor;

impl Extractor for NativeExtractor {
    fn extract(
        &self,
        kind: ArchiveKind,
        archive: &Path,
        dest_dir: &Path,
    ) -> Result<(), ArchiveError> {
        let corrupt = |e: io::Error| ArchiveError::Corrupt {
            path: archive.to_path_buf(),
            error: e.to_string(),
        };

        match kind {
            ArchiveKind::Zip => extract_zip(archive, dest_dir).map_err(corrupt),
            ArchiveKind::TarGz => {
                let file = File::open(archive).map_err(corrupt)?;
                let decoder = flate2::read::GzDecoder::new(BufReader::new(file));
                extract_tar(decoder, dest_dir).map_err(corrupt)
            }
        }
    }
}

fn extract_zip(archive_path: &Path, dest_dir: &Path) -> io::Result<()> {
    let file = File::open(archive_path)?;
    let mut archive = zip::ZipArchive::new(file).map_err(io::Error::other)?;

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).map_err(io::Error::other)?;
        let Some(entry_path) = entry.enclosed_name().map(|p| p.to_path_buf()) else {
            warn!("Skipping unsafe path in zip: {}", entry.name());
            continue;
        };

        let dest_path = dest_dir.join(entry_path);

        if entry.is_dir() {
            fs::create_dir_all(&dest_path)?;
            continue;
        }

        if let Some(parent) = dest_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut outfile = File::create(&dest_path)?;
        io::copy(&mut entry, &mut outfile)?;

        #[cfg(unix)]
        set_unix_permissions(&dest_path, entry.unix_mode())?;
    }

    debug!("ZIP extraction complete");
    Ok(())
}

fn is_unsafe(path: &Path) -> bool {
    path.is_absolute() || path.components().any(|c| c == Component::ParentDir)
}

fn extract_tar<R: Read>(reader: R, dest_dir: &Path) -> io::Result<()> {
    let mut archive = tar::Archive::new(reader);

    for entry_result in archive.entries()? {
        let mut entry = entry_result?;
        let entry_type = entry.header().entry_type();

        if entry_type.is_symlink() || entry_type.is_hard_link() {
            warn!("Skipping link in tar archive: {}", entry.path()?.display());
            continue;
        }

        let path = entry.path()?.into_owned();
        if is_unsafe(&path) {
            warn!("Skipping unsafe path in tar: {}", path.display());
            continue;
        }

        let dest_path = dest_dir.join(&path);

        if entry_type.is_dir() {
            fs::create_dir_all(&dest_path)?;
        } else if entry_type.is_file() {
            if let Some(parent) = dest_path.parent() {
                fs::create_dir_all(parent)?;
            }
            let mut outfile = File::create(&dest_path)?;
            io::copy(&mut entry, &mut outfile)?;

            #[cfg(unix)]
            {
                if let Ok(mode) = entry.header().mode() {
                    set_unix_permissions(&dest_path, Some(mode))?;
                }
            }
        } else {
            debug!("Skipping {:?} entry {}", entry_type, path.display());
        }
    }

    debug!("TAR extraction complete");
    Ok(())
}

#[cfg(unix)]
fn set_unix_permissions(path: &Path, mode: Option<u32>) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    if let Some(mode) = mode {
        fs::set_permissions(path, fs::Permissions::from_mode(mode & 0o777))?;
    }
    Ok(())
}

/// Extractor that shells out to `unzip` and `tar`
#[derive(Debug, Clone, Copy, Default)]
pub struct ToolExtractor;

impl ToolExtractor {
    fn command(kind: ArchiveKind, archive: &Path, dest_dir: &Path) -> (&'static str, Vec<String>) {
        let archive = archive.display().to_string();
        let dest = dest_dir.display().to_string();
        match kind {
            ArchiveKind::Zip => (
                defaults::UNZIP,
                vec!["-o".to_string(), "-q".to_string(), archive, "-d".to_string(), dest],
            ),
            ArchiveKind::TarGz => (
                defaults::TAR,
                vec!["-xzf".to_string(), archive, "-C".to_string(), dest],
            ),
        }
    }
}

impl Extractor for ToolExtractor {
    fn extract(
        &self,
        kind: ArchiveKind,
        archive: &Path,
        dest_dir: &Path,
    ) -> Result<(), ArchiveError> {
        let (program, args) = Self::command(kind, archive, dest_dir);
        process::run(program, &args).map_err(|source| ArchiveError::ToolFailed {
            path: archive.to_path_buf(),
            source,
        })?;
        Ok(())
    }
}
