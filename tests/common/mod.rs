//! Common test utilities and helpers
//!
//! This module provides shared utilities for integration tests: a scratch
//! project directory, a way to run the binary, and builders for the
//! archives an SDL-style release publishes.

#![allow(dead_code)]

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// Test project context
///
/// Creates a temporary directory for test projects and provides
/// utilities for setting up test scenarios.
pub struct TestProject {
    /// Temporary directory for the test project
    pub dir: TempDir,
}

impl TestProject {
    /// Create a new test project in a temporary directory
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Get the path to the test project directory
    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Create a file in the test project
    pub fn create_file(&self, name: &str, content: &str) {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(path, content).expect("Failed to write file");
    }

    /// Check if a file exists in the test project
    pub fn file_exists(&self, name: &str) -> bool {
        self.dir.path().join(name).exists()
    }

    /// Read a file from the test project
    pub fn read_file(&self, name: &str) -> String {
        std::fs::read_to_string(self.dir.path().join(name)).expect("Failed to read file")
    }

    /// Run the binary with `--root` pointing at this project
    pub fn run(&self, args: &[&str]) -> Output {
        run_in(&self.path(), args)
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

/// Run the binary from `dir`
pub fn run_in(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_grab-win64"))
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .env_remove("GRAB_WIN64_ROOT")
        .env_remove("GRAB_WIN64_CATALOG")
        .arg("--root")
        .arg(dir)
        .args(args)
        .output()
        .expect("Failed to execute grab-win64")
}

/// Run the binary without `--root`
pub fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_grab-win64"))
        .env_remove("RUST_LOG")
        .env_remove("GRAB_WIN64_CATALOG")
        .args(args)
        .output()
        .expect("Failed to execute grab-win64")
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// Zip archive bytes with the given `(path, content)` entries
pub fn zip_bytes(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut zip = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated);
    for (name, content) in entries {
        zip.start_file(*name, options).expect("Failed to start zip entry");
        zip.write_all(content.as_bytes()).expect("Failed to write zip entry");
    }
    zip.finish().expect("Failed to finish zip").into_inner()
}

/// Tar.gz archive bytes with the given `(path, content)` file entries
pub fn tar_gz_bytes(entries: &[(&str, &str)]) -> Vec<u8> {
    let encoder = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
    let mut builder = tar::Builder::new(encoder);
    for (name, content) in entries {
        let mut header = tar::Header::new_gnu();
        header.set_path(name).expect("Failed to set tar path");
        header.set_size(content.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder
            .append(&header, content.as_bytes())
            .expect("Failed to append tar entry");
    }
    builder
        .into_inner()
        .expect("Failed to finish tar")
        .finish()
        .expect("Failed to finish gzip")
}

/// A small test library published the way SDL publishes its releases
pub struct FakeRelease {
    pub name: &'static str,
    pub stem: &'static str,
    pub version: &'static str,
}

pub const SDL: FakeRelease = FakeRelease {
    name: "SDL",
    stem: "SDL2",
    version: "2.0.8",
};

pub const SDL_TTF: FakeRelease = FakeRelease {
    name: "SDL_ttf",
    stem: "SDL2_ttf",
    version: "2.0.14",
};

impl FakeRelease {
    pub fn dll_archive(&self) -> String {
        format!("{}-{}-win32-x64.zip", self.stem, self.version)
    }

    pub fn dev_archive(&self) -> String {
        format!("{}-devel-{}-mingw.tar.gz", self.stem, self.version)
    }

    pub fn expanded_dir(&self) -> String {
        format!("{}-{}", self.stem, self.version)
    }

    pub fn dll_bytes(&self) -> Vec<u8> {
        let dll = format!("{}.dll", self.stem);
        let readme = format!("README-{}.txt", self.stem);
        zip_bytes(&[(dll.as_str(), "MZ"), (readme.as_str(), "readme")])
    }

    pub fn dev_bytes(&self) -> Vec<u8> {
        let base = format!("{}/x86_64-w64-mingw32", self.expanded_dir());
        let paths = [
            (format!("{base}/bin/{}.dll", self.stem), "MZ"),
            (format!("{base}/include/SDL2/{}.h", self.stem), "/* header */"),
            (format!("{base}/lib/lib{}.dll.a", self.stem), "!<arch>"),
            (format!("{base}/share/aclocal/{}.m4", self.stem.to_lowercase()), "dnl"),
        ];
        let entries: Vec<(&str, &str)> = paths.iter().map(|(p, c)| (p.as_str(), *c)).collect();
        tar_gz_bytes(&entries)
    }

    /// `[[package]]` table pointing at `base_url`
    pub fn catalog_entry(&self, base_url: &str) -> String {
        format!(
            r#"
[[package]]
name = "{name}"
base_url = "{base_url}"
dll_name = "{stem}-%s-win32-x64.zip"
dev_name = "{stem}-devel-%s-mingw.tar.gz"
expanded_dev_name = "{stem}-%s"
version = "{version}"
"#,
            name = self.name,
            stem = self.stem,
            version = self.version,
        )
    }
}

/// Catalog TOML for `releases`, all served from `base_url`
pub fn catalog_toml(base_url: &str, releases: &[&FakeRelease]) -> String {
    releases
        .iter()
        .map(|r| r.catalog_entry(base_url))
        .collect::<Vec<_>>()
        .join("\n")
}
