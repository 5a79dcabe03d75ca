//! Error types for grab-win64
//!
//! Domain-specific error types using thiserror. Every pipeline step returns
//! one of these; the top-level [`ProvisionError`] wraps them and attributes
//! failures to the package being processed.

use std::path::PathBuf;
use thiserror::Error;

/// Filesystem errors
#[derive(Error, Debug)]
pub enum FilesystemError {
    /// Failed to create directory
    #[error("Failed to create directory '{path}': {error}")]
    CreateDir { path: PathBuf, error: String },

    /// Failed to remove directory
    #[error("Failed to remove directory '{path}': {error}")]
    RemoveDir { path: PathBuf, error: String },

    /// Failed to read file
    #[error("Failed to read file '{path}': {error}")]
    ReadFile { path: PathBuf, error: String },

    /// Failed to list directory entries
    #[error("Failed to list directory '{path}': {error}")]
    ReadDir { path: PathBuf, error: String },

    /// Invalid glob pattern
    #[error("Invalid file pattern '{pattern}': {error}")]
    Pattern { pattern: String, error: String },
}

/// External tool invocation errors
#[derive(Error, Debug)]
pub enum ToolError {
    /// The program could not be started
    #[error("Failed to run '{program}': {error}")]
    Spawn { program: String, error: String },

    /// The program ran and exited unsuccessfully
    #[error("'{command}' failed with {status}{}", stderr_suffix(.stderr))]
    Failed {
        command: String,
        status: String,
        stderr: String,
    },
}

fn stderr_suffix(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {trimmed}")
    }
}

/// URL resolution errors
#[derive(Error, Debug)]
pub enum UrlError {
    /// Base URL could not be parsed
    #[error("Could not parse base URL '{url}': {error}")]
    InvalidBase { url: String, error: String },

    /// Relative reference could not be resolved against the base
    #[error("Could not resolve '{reference}' against '{base}': {error}")]
    InvalidReference {
        base: String,
        reference: String,
        error: String,
    },
}

/// Download errors
#[derive(Error, Debug)]
pub enum DownloadError {
    /// Network error
    #[error("Network error downloading '{url}': {error}")]
    NetworkError { url: String, error: String },

    /// Server answered with a non-success status
    #[error("Downloading '{url}' returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    /// Download tool failed
    #[error("Downloading '{url}': {source}")]
    ToolFailed {
        url: String,
        #[source]
        source: ToolError,
    },

    /// IO error
    #[error("IO error for '{path}': {error}")]
    IoError { path: PathBuf, error: String },
}

/// Archive expansion errors
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// File name has no recognized archive suffix
    #[error("Don't know how to expand archive '{file}' (expected .zip or .tar.gz)")]
    UnknownType { file: String },

    /// Archive could not be read or written out
    #[error("Failed to extract '{path}': {error}")]
    Corrupt { path: PathBuf, error: String },

    /// Extraction tool failed
    #[error("Extracting '{path}': {source}")]
    ToolFailed {
        path: PathBuf,
        #[source]
        source: ToolError,
    },

    /// Pre-extraction cleanup failed
    #[error(transparent)]
    Filesystem(#[from] FilesystemError),
}

/// Placement errors
#[derive(Error, Debug)]
pub enum PlaceError {
    /// Expanded development archive lacks the target triple directory
    #[error("Development root '{path}' does not exist")]
    MissingDevRoot { path: PathBuf },

    /// Copy failed
    #[error("Copying '{from}' to '{to}': {error}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        error: String,
    },

    /// Copy tool failed
    #[error("Copying into '{to}': {source}")]
    ToolFailed {
        to: PathBuf,
        #[source]
        source: ToolError,
    },

    /// Filesystem error while preparing placement
    #[error(transparent)]
    Filesystem(#[from] FilesystemError),
}

/// Catalog errors
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Catalog file could not be read
    #[error("Failed to read catalog '{path}': {error}")]
    Read { path: PathBuf, error: String },

    /// Catalog TOML could not be parsed
    #[error("Failed to parse catalog: {0}")]
    Parse(String),

    /// Catalog has no packages
    #[error("Catalog contains no packages")]
    Empty,

    /// Missing required field
    #[error("Package '{package}' has an empty '{field}'")]
    EmptyField { package: String, field: String },

    /// A template renders to a name that cannot be expanded
    #[error("Package '{package}' field '{field}' renders to '{rendered}', which is not a .zip or .tar.gz archive")]
    NotAnArchive {
        package: String,
        field: String,
        rendered: String,
    },

    /// Duplicate package name
    #[error("Package '{name}' appears more than once")]
    Duplicate { name: String },
}

/// Top-level provisioning error
#[derive(Error, Debug)]
pub enum ProvisionError {
    /// Catalog error
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Filesystem error
    #[error("Filesystem error: {0}")]
    Filesystem(#[from] FilesystemError),

    /// URL error
    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    /// Download error
    #[error("Download error: {0}")]
    Download(#[from] DownloadError),

    /// Archive error
    #[error("Archive error: {0}")]
    Archive(#[from] ArchiveError),

    /// Placement error
    #[error("Placement error: {0}")]
    Place(#[from] PlaceError),

    /// Failure attributed to one package
    #[error("Package '{name}': {source}")]
    Package {
        name: String,
        source: Box<ProvisionError>,
    },
}

impl ProvisionError {
    /// Attribute this error to a package
    pub fn in_package(self, name: &str) -> Self {
        Self::Package {
            name: name.to_string(),
            source: Box::new(self),
        }
    }
}
