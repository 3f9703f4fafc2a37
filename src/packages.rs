//! Package operations against a resolved pip target.
//!
//! Listing uses pip's freeze format (`name==version`, one per line). Lines
//! that do not follow it, such as editable installs or direct URL
//! references, are skipped.

use crate::error::{Error, Result};
use crate::process::{program_label, Invocation, ToolRunner};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// One installed package
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageRecord {
    pub name: String,
    pub version: String,
}

/// Why a freeze line could not be read as a package
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FreezeLineError {
    #[error("missing '==' separator")]
    MissingSeparator,
    #[error("empty package name")]
    EmptyName,
    #[error("empty version")]
    EmptyVersion,
}

/// Parse a single `name==version` line
///
/// Arbitrary-equality pins (`name===version`) are accepted as well.
pub fn parse_freeze_line(line: &str) -> Result<PackageRecord, FreezeLineError> {
    let line = line.trim();
    let (name, version) = line
        .split_once("===")
        .or_else(|| line.split_once("=="))
        .ok_or(FreezeLineError::MissingSeparator)?;

    let name = name.trim();
    let version = version.trim();
    if name.is_empty() {
        return Err(FreezeLineError::EmptyName);
    }
    if version.is_empty() {
        return Err(FreezeLineError::EmptyVersion);
    }

    Ok(PackageRecord {
        name: name.to_string(),
        version: version.to_string(),
    })
}

/// Parse a full freeze listing, skipping blank, comment and malformed lines
///
/// The first record for a given name wins.
pub fn parse_freeze(output: &str) -> Vec<PackageRecord> {
    let mut seen = HashSet::new();
    let mut records = Vec::new();

    for line in output.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        match parse_freeze_line(trimmed) {
            Ok(record) => {
                if seen.insert(record.name.clone()) {
                    records.push(record);
                } else {
                    debug!(package = %record.name, "duplicate package in listing");
                }
            }
            Err(err) => debug!(line = trimmed, error = %err, "skipping listing line"),
        }
    }

    records
}

/// Which pip a package operation runs against
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipTarget {
    /// The pip executable inside a virtual environment
    Environment(PathBuf),
    /// `<python> -m pip` for the system interpreter
    System(String),
}

impl PipTarget {
    fn command(&self) -> Invocation {
        match self {
            PipTarget::Environment(pip) => Invocation::new(pip),
            PipTarget::System(python) => Invocation::new(python).args(["-m", "pip"]),
        }
    }

    fn label(&self) -> String {
        match self {
            PipTarget::Environment(pip) => program_label(pip),
            PipTarget::System(python) => format!("{} -m pip", program_label(Path::new(python))),
        }
    }
}

impl fmt::Display for PipTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipTarget::Environment(pip) => write!(f, "{}", pip.display()),
            PipTarget::System(python) => write!(f, "{python} -m pip (system)"),
        }
    }
}

/// List, install, uninstall and upgrade packages through pip
pub struct PackageManager<'a> {
    target: PipTarget,
    runner: &'a dyn ToolRunner,
}

impl<'a> PackageManager<'a> {
    pub fn new(target: PipTarget, runner: &'a dyn ToolRunner) -> Self {
        Self { target, runner }
    }

    pub fn target(&self) -> &PipTarget {
        &self.target
    }

    /// Installed packages, as reported by `pip list --format=freeze`
    pub fn list(&self) -> Result<Vec<PackageRecord>> {
        let stdout = self.run(["list", "--format=freeze"])?;
        Ok(parse_freeze(&stdout))
    }

    pub fn install(&self, package: &str) -> Result<()> {
        check_package_arg(package)?;
        self.run(["install", package])?;
        info!(package, target = %self.target, "installed");
        Ok(())
    }

    pub fn uninstall(&self, package: &str) -> Result<()> {
        check_package_arg(package)?;
        self.run(["uninstall", "-y", package])?;
        info!(package, target = %self.target, "uninstalled");
        Ok(())
    }

    pub fn upgrade(&self, package: &str) -> Result<()> {
        check_package_arg(package)?;
        self.run(["install", "--upgrade", package])?;
        info!(package, target = %self.target, "upgraded");
        Ok(())
    }

    fn run<const N: usize>(&self, args: [&str; N]) -> Result<String> {
        let invocation = self.target.command().args(args);
        let output = self.runner.run(&invocation).map_err(|err| Error::Operation {
            tool: self.target.label(),
            code: None,
            stderr: err.to_string(),
        })?;

        if !output.success() {
            return Err(Error::Operation {
                tool: self.target.label(),
                code: output.code,
                stderr: output.stderr,
            });
        }

        Ok(output.stdout)
    }
}

// A leading dash would be read by pip as an option.
fn check_package_arg(package: &str) -> Result<()> {
    let trimmed = package.trim();
    if trimmed.is_empty() || trimmed.starts_with('-') {
        return Err(Error::InvalidArgument(package.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::testing::FakeRunner;
    use rstest::rstest;
    use std::io;

    fn env_target() -> PipTarget {
        PipTarget::Environment(PathBuf::from("/envs/web/bin/pip"))
    }

    #[test]
    fn test_parse_freeze_line() {
        assert_eq!(
            parse_freeze_line("requests==2.31.0").unwrap(),
            PackageRecord {
                name: "requests".to_string(),
                version: "2.31.0".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_freeze_line_arbitrary_equality() {
        let record = parse_freeze_line("legacy-pkg===1.0-custom").unwrap();
        assert_eq!(record.name, "legacy-pkg");
        assert_eq!(record.version, "1.0-custom");
    }

    #[rstest]
    #[case("requests", FreezeLineError::MissingSeparator)]
    #[case("pkg===", FreezeLineError::EmptyVersion)]
    #[case("-e git+https://github.com/psf/requests@abc#egg=requests", FreezeLineError::MissingSeparator)]
    #[case("mypkg @ file:///tmp/mypkg", FreezeLineError::MissingSeparator)]
    #[case("==1.0", FreezeLineError::EmptyName)]
    #[case("requests==", FreezeLineError::EmptyVersion)]
    fn test_parse_freeze_line_rejects(#[case] line: &str, #[case] expected: FreezeLineError) {
        assert_eq!(parse_freeze_line(line).unwrap_err(), expected);
    }

    #[test]
    fn test_parse_freeze_skips_malformed_lines() {
        let output = "\
certifi==2024.2.2
# a comment
-e git+https://example.com/repo.git#egg=local
broken line

idna==3.6
requests==2.31.0
";
        let records = parse_freeze(output);
        let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["certifi", "idna", "requests"]);
        assert_eq!(records[2].version, "2.31.0");
    }

    #[test]
    fn test_parse_freeze_keeps_first_duplicate() {
        let records = parse_freeze("six==1.16.0\nsix==1.15.0\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].version, "1.16.0");
    }

    #[test]
    fn test_parse_freeze_empty_output() {
        assert!(parse_freeze("").is_empty());
    }

    #[test]
    fn test_list_invokes_freeze_format() {
        let runner = FakeRunner::new();
        runner.push(0, "pip==24.0\nsetuptools==69.1.0\n", "");

        let packages = PackageManager::new(env_target(), &runner).list().unwrap();
        assert_eq!(packages.len(), 2);

        let calls = runner.calls();
        assert_eq!(calls[0].program, PathBuf::from("/envs/web/bin/pip"));
        assert_eq!(runner.call_args(0), ["list", "--format=freeze"]);
    }

    #[test]
    fn test_system_target_uses_module_invocation() {
        let runner = FakeRunner::new();
        let manager = PackageManager::new(PipTarget::System("python3".to_string()), &runner);
        manager.install("requests").unwrap();

        let calls = runner.calls();
        assert_eq!(calls[0].program, PathBuf::from("python3"));
        assert_eq!(runner.call_args(0), ["-m", "pip", "install", "requests"]);
    }

    #[test]
    fn test_uninstall_is_non_interactive() {
        let runner = FakeRunner::new();
        PackageManager::new(env_target(), &runner)
            .uninstall("requests")
            .unwrap();
        assert_eq!(runner.call_args(0), ["uninstall", "-y", "requests"]);
    }

    #[test]
    fn test_upgrade_passes_upgrade_flag() {
        let runner = FakeRunner::new();
        PackageManager::new(env_target(), &runner)
            .upgrade("requests")
            .unwrap();
        assert_eq!(runner.call_args(0), ["install", "--upgrade", "requests"]);
    }

    #[test]
    fn test_failure_reports_code_and_stderr() {
        let runner = FakeRunner::new();
        runner.push(1, "", "ERROR: No matching distribution found for nope\n");

        let err = PackageManager::new(env_target(), &runner)
            .install("nope")
            .unwrap_err();
        match err {
            Error::Operation { tool, code, stderr } => {
                assert_eq!(tool, "pip");
                assert_eq!(code, Some(1));
                assert!(stderr.contains("No matching distribution"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_launch_failure_is_operation_error() {
        let runner = FakeRunner::new();
        runner.push_error(io::ErrorKind::NotFound);

        let err = PackageManager::new(env_target(), &runner).list().unwrap_err();
        assert!(matches!(err, Error::Operation { code: None, .. }));
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("--index-url=http://evil")]
    fn test_rejects_bad_package_argument(#[case] package: &str) {
        let runner = FakeRunner::new();
        let err = PackageManager::new(env_target(), &runner)
            .install(package)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn test_target_display() {
        assert_eq!(env_target().to_string(), "/envs/web/bin/pip");
        assert_eq!(
            PipTarget::System("python3".to_string()).to_string(),
            "python3 -m pip (system)"
        );
    }
}
