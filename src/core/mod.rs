//! Core business logic module
//!
//! Each pipeline step lives in its own submodule and reaches the outside
//! world only through the capability traits ([`fetch::Downloader`],
//! [`archive::Extractor`], [`place::Copier`]) implemented in
//! [`crate::infra`].
//!
//! # Submodules
//!
//! - [`workspace`] - Explicit working-directory context
//! - [`url`] - Base URL plus file name resolution
//! - [`package`] - Package descriptors and template rendering
//! - [`catalog`] - Ordered package catalog, built-in or from TOML
//! - [`fetch`] - Download-if-absent
//! - [`archive`] - Archive expansion by suffix
//! - [`place`] - DLL and development tree placement
//! - [`provision`] - The per-package pipeline
//! - [`doctor`] - System dependency checks

pub mod archive;
pub mod catalog;
pub mod doctor;
pub mod fetch;
pub mod package;
pub mod place;
pub mod provision;
pub mod url;
pub mod workspace;
