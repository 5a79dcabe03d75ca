//! grab-win64 - SDL2 provisioning for win64 cross builds
//!
//! Downloads prebuilt SDL2 runtime and MinGW development archives, expands
//! them under a vendor directory, copies the runtime DLLs into the build
//! output directory and the development files into the cross-compiler
//! prefix.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`cli`] - Command-line interface parsing and output formatting
//! - [`core`] - Pipeline logic behind capability traits
//! - [`infra`] - Infrastructure layer (network, filesystem, processes)
//! - [`config`] - Built-in catalog and constants
//! - [`error`] - Error types and handling

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod infra;

#[cfg(test)]
pub mod test_utils;
