//! Doctor command logic
//!
//! Checks that the external tools used by the `tools` backend are on
//! `PATH`, and that the cross-compiler prefix is usable.

use std::path::Path;

use crate::config::defaults;

/// Result of a single dependency check
#[derive(Debug, Clone)]
pub struct CheckResult {
    /// Name of the dependency being checked
    pub name: String,
    /// Whether the check passed
    pub passed: bool,
    /// Version if available
    pub version: Option<String>,
    /// Resolved location on `PATH`
    pub path: Option<String>,
    /// Error message if check failed
    pub error: Option<String>,
    /// Suggestion for fixing the issue
    pub suggestion: Option<String>,
    /// Whether this is a required or optional dependency
    pub required: bool,
}

impl CheckResult {
    /// Create a passing check result
    pub fn pass(name: &str, version: Option<String>, required: bool) -> Self {
        Self {
            name: name.to_string(),
            passed: true,
            version,
            path: None,
            error: None,
            suggestion: None,
            required,
        }
    }

    /// Create a failing check result
    pub fn fail(name: &str, error: &str, suggestion: Option<&str>, required: bool) -> Self {
        Self {
            name: name.to_string(),
            passed: false,
            version: None,
            path: None,
            error: Some(error.to_string()),
            suggestion: suggestion.map(String::from),
            required,
        }
    }
}

/// Overall doctor report
#[derive(Debug, Default)]
pub struct DoctorReport {
    /// Individual check results
    pub checks: Vec<CheckResult>,
    /// Problems with the install destinations
    pub config_issues: Vec<String>,
}

impl DoctorReport {
    /// Create a new empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a check result
    pub fn add_check(&mut self, result: CheckResult) {
        self.checks.push(result);
    }

    /// Add a configuration issue
    pub fn add_config_issue(&mut self, issue: String) {
        self.config_issues.push(issue);
    }

    /// Check if all required checks passed
    pub fn all_required_passed(&self) -> bool {
        self.checks.iter().filter(|c| c.required).all(|c| c.passed)
    }

    /// Check if all checks passed (including optional)
    pub fn all_passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed) && self.config_issues.is_empty()
    }

    /// Count passed checks
    pub fn passed_count(&self) -> usize {
        self.checks.iter().filter(|c| c.passed).count()
    }

    /// Count failed checks
    pub fn failed_count(&self) -> usize {
        self.checks.iter().filter(|c| !c.passed).count()
    }

    /// Get all failed required checks
    pub fn failed_required(&self) -> Vec<&CheckResult> {
        self.checks
            .iter()
            .filter(|c| c.required && !c.passed)
            .collect()
    }
}

/// Query `command --version`, returning the version it reports
pub fn command_version(command: &str) -> Option<String> {
    std::process::Command::new(command)
        .arg("--version")
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| {
            let stdout = String::from_utf8_lossy(&output.stdout);
            let stderr = String::from_utf8_lossy(&output.stderr);
            extract_version(&format!("{stdout}{stderr}"))
        })
}

/// Extract version string from command output
fn extract_version(output: &str) -> Option<String> {
    let version_regex = regex::Regex::new(r"v?(\d+\.\d+(?:\.\d+)?(?:-\w+)?)").ok()?;
    version_regex
        .captures(output)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Check that `command` is on `PATH`
pub fn check_tool(command: &str, purpose: &str, required: bool) -> CheckResult {
    let name = format!("{command} ({purpose})");
    match which::which(command) {
        Ok(path) => {
            let mut result = CheckResult::pass(&name, command_version(command), required);
            result.path = Some(path.display().to_string());
            result
        }
        Err(_) => {
            let suggestion = format!("Install {command} with your package manager");
            CheckResult::fail(
                &name,
                &format!("{command} not found in PATH"),
                Some(&suggestion),
                required,
            )
        }
    }
}

/// Check the cross-compiler prefix
///
/// A missing prefix usually means the MinGW toolchain is not installed.
pub fn check_prefix(prefix: &Path) -> Vec<String> {
    let mut issues = Vec::new();

    if !prefix.is_dir() {
        issues.push(format!(
            "Cross-compiler prefix {} does not exist (is {} installed?)",
            prefix.display(),
            defaults::MINGW_TRIPLE
        ));
        return issues;
    }

    for subdir in defaults::DEV_SUBDIRS {
        let path = prefix.join(subdir);
        if path.exists() && !path.is_dir() {
            issues.push(format!("{} exists but is not a directory", path.display()));
        }
    }

    issues
}

/// Run all doctor checks
pub fn run_doctor(prefix: &Path) -> DoctorReport {
    let mut report = DoctorReport::new();

    report.add_check(check_tool(defaults::WGET, "downloads", true));
    report.add_check(check_tool(defaults::UNZIP, "runtime archives", true));
    report.add_check(check_tool(defaults::TAR, "development archives", true));
    report.add_check(check_tool(defaults::CP, "placement", true));
    report.add_check(check_tool(
        defaults::SUDO,
        "writing the cross-compiler prefix",
        false,
    ));

    for issue in check_prefix(prefix) {
        report.add_config_issue(issue);
    }

    report
}
