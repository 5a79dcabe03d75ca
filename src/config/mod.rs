//! Configuration and constants
//!
//! Default paths, external tool names, and the built-in package catalog.

pub mod catalog;
pub mod defaults;
pub mod urls;
