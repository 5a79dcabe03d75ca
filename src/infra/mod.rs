//! Infrastructure layer
//!
//! Handles all I/O operations: network, filesystem, and external processes.
//! The capability traits defined in [`crate::core`] are implemented here.

pub mod copy;
pub mod download;
pub mod extract;
pub mod filesystem;
pub mod process;
