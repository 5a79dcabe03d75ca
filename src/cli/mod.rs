//! Command-line interface module
//!
//! This module handles argument parsing and output formatting.
//! It contains no business logic - that belongs in the [`crate::core`] module.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use commands::Commands;

/// grab-win64 - Fetch SDL2 for win64 cross builds
///
/// Downloads the SDL2 runtime and MinGW development archives, copies the
/// DLLs into the build output directory and the development files into the
/// cross-compiler prefix.
#[derive(Parser, Debug)]
#[command(name = "grab-win64")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output in JSON format for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Project root that relative directories are resolved against
    #[arg(long, global = true, env = "GRAB_WIN64_ROOT", value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Package catalog (TOML) to use instead of the built-in SDL2 set
    #[arg(long, global = true, env = "GRAB_WIN64_CATALOG", value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Execute the CLI command
    pub async fn run(self) -> Result<()> {
        let root = match self.root {
            Some(root) => root,
            None => std::env::current_dir()?,
        };

        if let Some(cmd) = self.command {
            cmd.run(&root, self.catalog.as_deref()).await
        } else {
            // No subcommand provided, show help
            use clap::CommandFactory;
            let mut cmd = Self::command();
            cmd.print_help()?;
            Ok(())
        }
    }
}
