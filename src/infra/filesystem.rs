//! Filesystem operations
//!
//! Handles file and directory operations.

use std::path::{Path, PathBuf};

use crate::config::defaults;
use crate::error::FilesystemError;

/// Create a directory and all parent directories
///
/// New directories get [`defaults::DIR_MODE`] on Unix (the process umask
/// still applies). Existing directories are left untouched.
pub fn create_dir_all(path: &Path) -> Result<(), FilesystemError> {
    let mut builder = std::fs::DirBuilder::new();
    builder.recursive(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(defaults::DIR_MODE);
    }

    builder.create(path).map_err(|e| FilesystemError::CreateDir {
        path: path.to_path_buf(),
        error: e.to_string(),
    })
}

/// Remove a directory and all its contents
pub fn remove_dir_all(path: &Path) -> Result<(), FilesystemError> {
    if path.exists() {
        std::fs::remove_dir_all(path).map_err(|e| FilesystemError::RemoveDir {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;
    }
    Ok(())
}

/// Read content from a file
pub fn read_file(path: &Path) -> Result<String, FilesystemError> {
    std::fs::read_to_string(path).map_err(|e| FilesystemError::ReadFile {
        path: path.to_path_buf(),
        error: e.to_string(),
    })
}

/// Find regular files directly inside `dir` with the given extension
///
/// Matching is case-sensitive, like a shell glob. Results are sorted.
pub fn glob_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, FilesystemError> {
    let pattern = format!(
        "{}/*.{extension}",
        glob::Pattern::escape(&dir.to_string_lossy())
    );

    let paths = glob::glob(&pattern).map_err(|e| FilesystemError::Pattern {
        pattern: pattern.clone(),
        error: e.to_string(),
    })?;

    let mut files: Vec<PathBuf> = paths
        .filter_map(Result::ok)
        .filter(|p| p.is_file())
        .collect();
    files.sort();
    Ok(files)
}

/// List the entries of a directory, sorted by file name
pub fn list_entries(dir: &Path) -> Result<Vec<PathBuf>, FilesystemError> {
    let read_dir = std::fs::read_dir(dir).map_err(|e| FilesystemError::ReadDir {
        path: dir.to_path_buf(),
        error: e.to_string(),
    })?;

    let mut entries = Vec::new();
    for entry in read_dir {
        let entry = entry.map_err(|e| FilesystemError::ReadDir {
            path: dir.to_path_buf(),
            error: e.to_string(),
        })?;
        entries.push(entry.path());
    }
    entries.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_create_dir_all_nested_and_idempotent() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("vendor/sdl/SDL");

        create_dir_all(&nested).unwrap();
        assert!(nested.is_dir());

        create_dir_all(&nested).unwrap();
        assert!(nested.is_dir());
    }

    #[test]
    fn test_create_dir_all_fails_on_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("occupied");
        std::fs::write(&file, "x").unwrap();

        let err = create_dir_all(&file.join("child")).unwrap_err();
        assert!(matches!(err, FilesystemError::CreateDir { .. }));
    }

    #[test]
    fn test_remove_dir_all_missing_is_ok() {
        let temp = TempDir::new().unwrap();
        remove_dir_all(&temp.path().join("absent")).unwrap();
    }

    #[test]
    fn test_glob_files_matches_extension_only() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("SDL2.dll"), "a").unwrap();
        std::fs::write(temp.path().join("zlib1.dll"), "b").unwrap();
        std::fs::write(temp.path().join("README-SDL.txt"), "c").unwrap();
        std::fs::create_dir(temp.path().join("dir.dll")).unwrap();

        let files = glob_files(temp.path(), "dll").unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["SDL2.dll", "zlib1.dll"]);
    }

    #[test]
    fn test_glob_files_escapes_directory_name() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("pkg[1]");
        std::fs::create_dir(&dir).unwrap();
        std::fs::write(dir.join("a.dll"), "a").unwrap();

        assert_eq!(glob_files(&dir, "dll").unwrap().len(), 1);
    }

    #[test]
    fn test_list_entries_sorted() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("b.h"), "").unwrap();
        std::fs::create_dir(temp.path().join("SDL2")).unwrap();
        std::fs::write(temp.path().join("a.h"), "").unwrap();

        let entries = list_entries(temp.path()).unwrap();
        let names: Vec<_> = entries
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["SDL2", "a.h", "b.h"]);
    }
}
