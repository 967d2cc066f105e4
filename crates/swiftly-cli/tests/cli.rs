//! Integration tests for the swiftly CLI.

#![allow(deprecated)] // cargo_bin is deprecated but the replacement requires macros
#![cfg(unix)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::os::unix::fs::symlink;
use std::path::PathBuf;
use tempfile::TempDir;

struct Sandbox {
    temp: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        Self {
            temp: TempDir::new().unwrap(),
        }
    }

    fn home(&self) -> PathBuf {
        self.temp.path().join("home")
    }

    fn bin(&self) -> PathBuf {
        self.temp.path().join("bin")
    }

    fn swiftly(&self) -> Command {
        let mut cmd = Command::cargo_bin("swiftly").unwrap();
        cmd.env("SWIFTLY_HOME_DIR", self.home())
            .env("SWIFTLY_BIN_DIR", self.bin())
            .env("SWIFTLY_CONFIG_FILE", self.temp.path().join("missing-config.toml"))
            .env("NO_COLOR", "1")
            .env_remove("SWIFTLY_PLATFORM")
            .env_remove("SWIFTLY_VERBOSE")
            .env_remove("SWIFTLY_QUIET");
        cmd
    }

    /// Lay out an extracted toolchain without going through `install`.
    fn toolchain(&self, version: &str, executables: &[&str]) -> PathBuf {
        let bin = self.home().join("toolchains").join(version).join("usr/bin");
        fs::create_dir_all(&bin).unwrap();
        for name in executables {
            fs::write(bin.join(name), "#!/bin/sh\n").unwrap();
        }
        bin
    }

    fn manifest(&self, in_use: Option<&str>, installed: &[&str]) {
        let entries: Vec<String> = installed
            .iter()
            .map(|v| format!(r#"{{"version":"{}","installed_at":"2024-03-01T12:00:00Z"}}"#, v))
            .collect();
        let in_use = in_use
            .map(|v| format!("\"{}\"", v))
            .unwrap_or_else(|| "null".to_string());
        let json = format!(
            r#"{{"schema_version":1,"platform":null,"in_use":{},"installed":[{}]}}"#,
            in_use,
            entries.join(",")
        );
        fs::create_dir_all(self.home()).unwrap();
        fs::write(self.home().join("manifest.json"), json).unwrap();
    }
}

#[test]
fn test_help() {
    Sandbox::new()
        .swiftly()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Swift toolchains"))
        .stdout(predicate::str::contains("install"))
        .stdout(predicate::str::contains("use"))
        .stdout(predicate::str::contains("doctor"));
}

#[test]
fn test_version() {
    Sandbox::new()
        .swiftly()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("swiftly"))
        .stdout(predicate::str::is_match(r"\d+\.\d+\.\d+").unwrap());
}

#[test]
fn test_subcommand_help_shows_version_argument() {
    for command in ["install", "use", "uninstall"] {
        Sandbox::new()
            .swiftly()
            .args([command, "--help"])
            .assert()
            .success()
            .stdout(predicate::str::contains("VERSION"));
    }
}

#[test]
fn test_use_not_installed() {
    Sandbox::new()
        .swiftly()
        .args(["use", "5.10.1"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("not installed"))
        .stderr(predicate::str::contains("swiftly install 5.10.1"));
}

#[test]
fn test_use_links_executables() {
    let sandbox = Sandbox::new();
    let source = sandbox.toolchain("5.10.1", &["swift", "swiftc"]);
    sandbox.manifest(None, &["5.10.1"]);

    sandbox.swiftly().args(["use", "5.10.1"]).assert().success();

    for name in ["swift", "swiftc"] {
        let link = sandbox.bin().join(name);
        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(fs::read_link(&link).unwrap(), source.join(name));
    }

    sandbox
        .swiftly()
        .arg("use")
        .assert()
        .success()
        .stdout(predicate::str::contains("5.10.1"));
}

#[test]
fn test_use_switches_toolchains() {
    let sandbox = Sandbox::new();
    sandbox.toolchain("5.9.2", &["swift", "swift-old-only"]);
    let newer = sandbox.toolchain("5.10.1", &["swift"]);
    sandbox.manifest(None, &["5.9.2", "5.10.1"]);

    sandbox.swiftly().args(["use", "5.9.2"]).assert().success();
    assert!(sandbox.bin().join("swift-old-only").exists());

    sandbox.swiftly().args(["use", "5.10.1"]).assert().success();
    assert!(fs::symlink_metadata(sandbox.bin().join("swift-old-only")).is_err());
    assert_eq!(
        fs::read_link(sandbox.bin().join("swift")).unwrap(),
        newer.join("swift")
    );
}

#[test]
fn test_use_declined_leaves_foreign_executable() {
    let sandbox = Sandbox::new();
    sandbox.toolchain("5.10.1", &["swift"]);
    sandbox.manifest(None, &["5.10.1"]);
    fs::create_dir_all(sandbox.bin()).unwrap();
    fs::write(sandbox.bin().join("swift"), "mine").unwrap();

    sandbox
        .swiftly()
        .args(["use", "5.10.1"])
        .write_stdin("n\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Aborting use"));

    assert_eq!(fs::read_to_string(sandbox.bin().join("swift")).unwrap(), "mine");
}

#[test]
fn test_use_assume_yes_overwrites_foreign_executable() {
    let sandbox = Sandbox::new();
    let source = sandbox.toolchain("5.10.1", &["swift"]);
    sandbox.manifest(None, &["5.10.1"]);
    fs::create_dir_all(sandbox.bin()).unwrap();
    fs::write(sandbox.bin().join("swift"), "mine").unwrap();

    sandbox
        .swiftly()
        .args(["-y", "use", "5.10.1"])
        .assert()
        .success();

    assert_eq!(fs::read_link(sandbox.bin().join("swift")).unwrap(), source.join("swift"));
}

#[test]
fn test_switch_refuses_foreign_link() {
    let sandbox = Sandbox::new();
    sandbox.toolchain("5.9.2", &["swift"]);
    sandbox.toolchain("5.10.1", &["swift"]);
    sandbox.manifest(Some("5.9.2"), &["5.9.2", "5.10.1"]);
    fs::create_dir_all(sandbox.bin()).unwrap();
    symlink("/usr/bin/true", sandbox.bin().join("swift")).unwrap();

    sandbox
        .swiftly()
        .args(["use", "5.10.1"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("non-swiftly-managed"));

    assert_eq!(
        fs::read_link(sandbox.bin().join("swift")).unwrap(),
        PathBuf::from("/usr/bin/true")
    );
}

#[test]
fn test_list_marks_in_use() {
    let sandbox = Sandbox::new();
    sandbox.manifest(Some("5.10.1"), &["5.9.2", "5.10.1"]);

    sandbox
        .swiftly()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("5.9.2"))
        .stdout(predicate::str::contains("5.10.1 (in use)"));
}

#[test]
fn test_list_empty() {
    Sandbox::new()
        .swiftly()
        .arg("list")
        .assert()
        .success()
        .stderr(predicate::str::contains("No toolchains installed"));
}

#[test]
fn test_install_unknown_platform_hint() {
    Sandbox::new()
        .swiftly()
        .args(["install", "5.10.1", "--platform", "debian12"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("Unrecognized platform"));
}

#[test]
fn test_invalid_version() {
    Sandbox::new()
        .swiftly()
        .args(["use", "not-a-version"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("invalid toolchain version"));
}

#[test]
fn test_uninstall_not_installed() {
    Sandbox::new()
        .swiftly()
        .args(["uninstall", "5.10.1"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("not installed"));
}

#[test]
fn test_uninstall_in_use_unlinks() {
    let sandbox = Sandbox::new();
    sandbox.toolchain("5.10.1", &["swift"]);
    sandbox.manifest(None, &["5.10.1"]);
    sandbox.swiftly().args(["use", "5.10.1"]).assert().success();

    sandbox.swiftly().args(["uninstall", "5.10.1"]).assert().success();

    assert!(fs::symlink_metadata(sandbox.bin().join("swift")).is_err());
    assert!(!sandbox.home().join("toolchains/5.10.1").exists());
    sandbox
        .swiftly()
        .arg("use")
        .assert()
        .success()
        .stderr(predicate::str::contains("No toolchain is in use"));
}
