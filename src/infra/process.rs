//! External process execution
//!
//! Thin wrappers that run a tool to completion and turn spawn failures and
//! non-zero exits into [`ToolError`]s.

use std::process::{Output, Stdio};

use crate::error::ToolError;

/// Render a command line for logs and error messages
pub fn describe(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}

fn check(program: &str, args: &[String], output: &Output) -> Result<(), ToolError> {
    if output.status.success() {
        return Ok(());
    }
    Err(ToolError::Failed {
        command: describe(program, args),
        status: output.status.to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}

/// Run a tool and wait for it
///
/// Stdin is inherited so tools such as `sudo` can prompt. Stdout and stderr
/// are captured; stderr ends up in the error on failure.
pub fn run(program: &str, args: &[String]) -> Result<Output, ToolError> {
    tracing::debug!("Running: {}", describe(program, args));

    let output = std::process::Command::new(program)
        .args(args)
        .stdin(Stdio::inherit())
        .output()
        .map_err(|e| ToolError::Spawn {
            program: program.to_string(),
            error: e.to_string(),
        })?;

    check(program, args, &output)?;
    Ok(output)
}

/// Async variant of [`run`] for tools awaited on the runtime
pub async fn run_async(program: &str, args: &[String]) -> Result<Output, ToolError> {
    tracing::debug!("Running: {}", describe(program, args));

    let output = tokio::process::Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .output()
        .await
        .map_err(|e| ToolError::Spawn {
            program: program.to_string(),
            error: e.to_string(),
        })?;

    check(program, args, &output)?;
    Ok(output)
}
