//! Copy backends
//!
//! [`NativeCopier`] copies with `std::fs` and `walkdir`. [`CommandCopier`]
//! runs `cp`, optionally through `sudo` for prefixes the user cannot write.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::defaults;
use crate::core::place::Copier;
use crate::error::PlaceError;
use crate::infra::{filesystem, process};

/// In-process copier
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeCopier;

fn copy_error(from: &Path, to: &Path, error: impl ToString) -> PlaceError {
    PlaceError::Copy {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        error: error.to_string(),
    }
}

fn copy_file(from: &Path, to: &Path) -> Result<(), PlaceError> {
    fs::copy(from, to).map_err(|e| copy_error(from, to, e))?;
    Ok(())
}

#[cfg(unix)]
fn copy_symlink(from: &Path, to: &Path) -> Result<(), PlaceError> {
    let target = fs::read_link(from).map_err(|e| copy_error(from, to, e))?;
    if fs::symlink_metadata(to).is_ok() {
        fs::remove_file(to).map_err(|e| copy_error(from, to, e))?;
    }
    std::os::unix::fs::symlink(&target, to).map_err(|e| copy_error(from, to, e))
}

#[cfg(not(unix))]
fn copy_symlink(from: &Path, to: &Path) -> Result<(), PlaceError> {
    copy_file(from, to)
}

impl Copier for NativeCopier {
    fn ensure_dir(&self, dir: &Path) -> Result<(), PlaceError> {
        filesystem::create_dir_all(dir)?;
        Ok(())
    }

    fn copy_files(&self, files: &[PathBuf], dest_dir: &Path) -> Result<(), PlaceError> {
        for file in files {
            let Some(name) = file.file_name() else {
                continue;
            };
            copy_file(file, &dest_dir.join(name))?;
        }
        Ok(())
    }

    fn copy_entry(&self, entry: &Path, dest_dir: &Path) -> Result<(), PlaceError> {
        let Some(name) = entry.file_name() else {
            return Err(copy_error(entry, dest_dir, "entry has no file name"));
        };
        let target_root = dest_dir.join(name);

        for item in WalkDir::new(entry).follow_root_links(false) {
            let item = item.map_err(|e| copy_error(entry, &target_root, e))?;
            let relative = item
                .path()
                .strip_prefix(entry)
                .map_err(|e| copy_error(item.path(), &target_root, e))?;
            // The walk yields `entry` itself first, with an empty relative path
            let target = if relative.as_os_str().is_empty() {
                target_root.clone()
            } else {
                target_root.join(relative)
            };
            let file_type = item.file_type();

            if file_type.is_dir() {
                if !target.is_dir() {
                    filesystem::create_dir_all(&target)?;
                }
            } else if file_type.is_symlink() {
                copy_symlink(item.path(), &target)?;
            } else {
                copy_file(item.path(), &target)?;
            }
        }
        Ok(())
    }
}

/// Copier that runs `cp`, with `sudo` in front when `elevate` is set
///
/// DLLs always go through plain `cp -f` since the output directory lives
/// in the project.
#[derive(Debug, Clone, Copy)]
pub struct CommandCopier {
    /// Prefix privileged commands with `sudo`
    pub elevate: bool,
}

impl CommandCopier {
    pub fn new(elevate: bool) -> Self {
        Self { elevate }
    }

    fn privileged(&self, program: &str, args: Vec<String>) -> (String, Vec<String>) {
        if self.elevate {
            let mut full = vec![program.to_string()];
            full.extend(args);
            (defaults::SUDO.to_string(), full)
        } else {
            (program.to_string(), args)
        }
    }

    fn run(&self, program: &str, args: &[String], to: &Path) -> Result<(), PlaceError> {
        process::run(program, args).map_err(|source| PlaceError::ToolFailed {
            to: to.to_path_buf(),
            source,
        })?;
        Ok(())
    }
}

impl Default for CommandCopier {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Copier for CommandCopier {
    fn ensure_dir(&self, dir: &Path) -> Result<(), PlaceError> {
        let (program, args) =
            self.privileged("mkdir", vec!["-p".to_string(), dir.display().to_string()]);
        self.run(&program, &args, dir)
    }

    fn copy_files(&self, files: &[PathBuf], dest_dir: &Path) -> Result<(), PlaceError> {
        if files.is_empty() {
            return Ok(());
        }
        let mut args = vec!["-f".to_string()];
        args.extend(files.iter().map(|f| f.display().to_string()));
        args.push(dest_dir.display().to_string());
        self.run(defaults::CP, &args, dest_dir)
    }

    fn copy_entry(&self, entry: &Path, dest_dir: &Path) -> Result<(), PlaceError> {
        let (program, args) = self.privileged(
            defaults::CP,
            vec![
                "-r".to_string(),
                entry.display().to_string(),
                dest_dir.display().to_string(),
            ],
        );
        self.run(&program, &args, dest_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn tree(root: &Path) -> PathBuf {
        let src = root.join("src/SDL2");
        fs::create_dir_all(src.join("nested")).unwrap();
        fs::write(src.join("SDL.h"), "new").unwrap();
        fs::write(src.join("nested/SDL_config.h"), "cfg").unwrap();
        src
    }

    #[test]
    fn test_native_copy_files_overwrites() {
        let temp = TempDir::new().unwrap();
        let a = temp.path().join("SDL2.dll");
        let b = temp.path().join("SDL2_ttf.dll");
        fs::write(&a, "a").unwrap();
        fs::write(&b, "b").unwrap();
        let out = temp.path().join("out");
        fs::create_dir(&out).unwrap();
        fs::write(out.join("SDL2.dll"), "stale").unwrap();

        NativeCopier.copy_files(&[a, b], &out).unwrap();

        assert_eq!(fs::read_to_string(out.join("SDL2.dll")).unwrap(), "a");
        assert_eq!(fs::read_to_string(out.join("SDL2_ttf.dll")).unwrap(), "b");
    }

    #[test]
    fn test_native_copy_files_missing_destination() {
        let temp = TempDir::new().unwrap();
        let a = temp.path().join("SDL2.dll");
        fs::write(&a, "a").unwrap();

        let err = NativeCopier
            .copy_files(&[a], &temp.path().join("absent"))
            .unwrap_err();

        assert!(matches!(err, PlaceError::Copy { .. }));
    }

    #[test]
    fn test_native_copy_entry_merges_into_existing_dir() {
        let temp = TempDir::new().unwrap();
        let src = tree(temp.path());
        let dest = temp.path().join("prefix/include");
        fs::create_dir_all(dest.join("SDL2")).unwrap();
        fs::write(dest.join("SDL2/SDL.h"), "old").unwrap();
        fs::write(dest.join("SDL2/SDL_image.h"), "other package").unwrap();

        NativeCopier.copy_entry(&src, &dest).unwrap();

        assert_eq!(fs::read_to_string(dest.join("SDL2/SDL.h")).unwrap(), "new");
        assert_eq!(
            fs::read_to_string(dest.join("SDL2/SDL_image.h")).unwrap(),
            "other package"
        );
        assert!(dest.join("SDL2/nested/SDL_config.h").is_file());
    }

    #[test]
    fn test_native_copy_entry_single_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("libSDL2.a");
        fs::write(&file, "ar").unwrap();
        let dest = temp.path().join("lib");
        fs::create_dir(&dest).unwrap();

        NativeCopier.copy_entry(&file, &dest).unwrap();

        assert_eq!(fs::read_to_string(dest.join("libSDL2.a")).unwrap(), "ar");
    }

    #[test]
    fn test_native_copy_entry_file_overwrites_existing() {
        let temp = TempDir::new().unwrap();
        let bin = temp.path().join("bin");
        fs::create_dir(&bin).unwrap();
        fs::write(bin.join("SDL2.dll"), "fresh").unwrap();
        let dest = temp.path().join("prefix/bin");
        fs::create_dir_all(&dest).unwrap();
        fs::write(dest.join("SDL2.dll"), "stale").unwrap();

        NativeCopier.copy_entry(&bin.join("SDL2.dll"), &dest).unwrap();

        assert_eq!(fs::read_to_string(dest.join("SDL2.dll")).unwrap(), "fresh");
        assert!(!dest.join("SDL2.dll").is_dir());
    }

    #[cfg(unix)]
    #[test]
    fn test_native_copy_entry_top_level_symlink() {
        let temp = TempDir::new().unwrap();
        let lib = temp.path().join("lib");
        fs::create_dir(&lib).unwrap();
        fs::write(lib.join("libSDL2-2.0.so.0"), "so").unwrap();
        std::os::unix::fs::symlink("libSDL2-2.0.so.0", lib.join("libSDL2.so")).unwrap();
        let dest = temp.path().join("prefix/lib");
        fs::create_dir_all(&dest).unwrap();

        NativeCopier.copy_entry(&lib.join("libSDL2.so"), &dest).unwrap();

        let link = dest.join("libSDL2.so");
        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(
            fs::read_link(&link).unwrap(),
            PathBuf::from("libSDL2-2.0.so.0")
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_native_copy_entry_recreates_symlinks() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("lib");
        fs::create_dir(&src).unwrap();
        fs::write(src.join("libSDL2-2.0.so.0.8.0"), "so").unwrap();
        std::os::unix::fs::symlink("libSDL2-2.0.so.0.8.0", src.join("libSDL2.so")).unwrap();
        let dest = temp.path().join("prefix");
        fs::create_dir(&dest).unwrap();

        NativeCopier.copy_entry(&src, &dest).unwrap();

        let link = dest.join("lib/libSDL2.so");
        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(fs::read_to_string(link).unwrap(), "so");
    }

    #[test]
    fn test_command_copier_elevation() {
        let copier = CommandCopier::new(true);
        let (program, args) = copier.privileged("cp", vec!["-r".to_string(), "a".to_string()]);
        assert_eq!(program, "sudo");
        assert_eq!(args, vec!["cp", "-r", "a"]);

        let copier = CommandCopier::new(false);
        let (program, args) = copier.privileged("cp", vec!["-r".to_string()]);
        assert_eq!(program, "cp");
        assert_eq!(args, vec!["-r"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_command_copier_without_sudo() {
        let temp = TempDir::new().unwrap();
        let src = tree(temp.path());
        let dest = temp.path().join("prefix/include");
        let copier = CommandCopier::new(false);

        copier.ensure_dir(&dest).unwrap();
        copier.copy_entry(&src, &dest).unwrap();

        assert!(dest.join("SDL2/SDL.h").is_file());
        assert!(dest.join("SDL2/nested/SDL_config.h").is_file());
    }

    #[cfg(unix)]
    #[test]
    fn test_command_copier_failure() {
        let temp = TempDir::new().unwrap();
        let err = CommandCopier::new(false)
            .copy_entry(&temp.path().join("absent"), temp.path())
            .unwrap_err();
        assert!(matches!(err, PlaceError::ToolFailed { .. }));
    }
}
