//! Integration tests for the hostpack binary.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn hostpack(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_hostpack"))
        .args(args)
        .current_dir(dir)
        .env_remove("HOSTPACK_OS")
        .env_remove("HOSTPACK_ARCH")
        .env_remove("HOSTPACK_FRAMEWORK")
        .env("NO_COLOR", "1")
        .output()
        .expect("failed to run hostpack")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

// ────────────────────────────────────────────────────────────────────────────
// target
// ────────────────────────────────────────────────────────────────────────────

#[test]
fn test_target_windows_net6() {
    let dir = TempDir::new().unwrap();
    let out = hostpack(
        dir.path(),
        &["target", "--os", "win", "--arch", "x64", "--framework", "6.0"],
    );
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.starts_with("OS: win Arch: x64 FrameworkVersion: 6.0"));
    assert!(text.contains("Bundle version:     6"));
    assert!(text.contains("Assembly alignment: 4096"));
    assert!(text.contains("hostfxr.dll, hostpolicy.dll"));
}

#[test]
fn test_target_json_from_rid() {
    let dir = TempDir::new().unwrap();
    let out = hostpack(
        dir.path(),
        &["target", "--rid", "linux-loongarch64", "--framework", "netcoreapp3.1", "--json"],
    );
    assert!(out.status.success());
    let json: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    assert_eq!(json["os"], "linux");
    assert_eq!(json["arch"], "loongarch64");
    assert_eq!(json["bundle_major_version"], 1);
    assert_eq!(json["default_options"], 3);
    assert_eq!(json["assembly_alignment"], 16384);
}

#[test]
fn test_target_reads_config_file() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("hostpack.toml"),
        "[target]\nos = \"osx\"\narch = \"arm64\"\nframework = \"5.0\"\n",
    )
    .unwrap();
    let out = hostpack(dir.path(), &["target"]);
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.starts_with("OS: osx Arch: arm64 FrameworkVersion: 5.0"));
    assert!(text.contains("Bundle version:     2"));
}

#[test]
fn test_target_config_accepts_flag_aliases() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("hostpack.toml"),
        "[target]\nos = \"Windows\"\narch = \"x86_64\"\nframework = \"net8.0\"\n",
    )
    .unwrap();
    let out = hostpack(dir.path(), &["target"]);
    assert!(out.status.success());
    assert!(stdout(&out).starts_with("OS: win Arch: x64 FrameworkVersion: 8.0"));
}

#[test]
fn test_target_env_overrides_config() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("hostpack.toml"), "[target]\nrid = \"win-x86\"\n").unwrap();
    let out = Command::new(env!("CARGO_BIN_EXE_hostpack"))
        .args(["target", "--framework", "7.0"])
        .current_dir(dir.path())
        .env("HOSTPACK_OS", "linux")
        .env_remove("HOSTPACK_ARCH")
        .env_remove("HOSTPACK_FRAMEWORK")
        .output()
        .unwrap();
    assert!(out.status.success());
    assert!(stdout(&out).starts_with("OS: linux Arch: x86 FrameworkVersion: 7.0"));
}

#[test]
fn test_target_unsupported_framework_fails() {
    let dir = TempDir::new().unwrap();
    let out = hostpack(dir.path(), &["target", "--os", "linux", "--framework", "4.0"]);
    assert!(!out.status.success());
    let err = String::from_utf8_lossy(&out.stderr);
    assert!(err.contains("Unsupported target framework version"));
}

#[test]
fn test_target_legacy_moniker_rejected() {
    let dir = TempDir::new().unwrap();
    for moniker in ["net48", "net472"] {
        let out = hostpack(dir.path(), &["target", "--os", "win", "--framework", moniker]);
        assert!(!out.status.success(), "{} was accepted", moniker);
    }
}

#[test]
fn test_target_unknown_os_rejected() {
    let dir = TempDir::new().unwrap();
    let out = hostpack(dir.path(), &["target", "--os", "beos"]);
    assert!(!out.status.success());
}

// ────────────────────────────────────────────────────────────────────────────
// classify
// ────────────────────────────────────────────────────────────────────────────

#[test]
fn test_classify_directory() {
    let dir = TempDir::new().unwrap();
    let publish = dir.path().join("publish");
    fs::create_dir_all(&publish).unwrap();
    fs::write(publish.join("libhostpolicy.so"), b"\x7fELF\x02\x01\x01\x00").unwrap();
    fs::write(publish.join("libnative.so"), b"\x7fELF\x02\x01\x01\x00").unwrap();
    fs::write(publish.join("app.dll"), b"MZ").unwrap();

    let out = hostpack(
        dir.path(),
        &["classify", "publish", "--os", "linux", "--arch", "arm64", "-f", "8.0", "-j", "2"],
    );
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.contains("other    app.dll"));
    assert!(text.contains("excluded libhostpolicy.so"));
    assert!(text.contains("native   libnative.so"));
    assert!(text.contains("3 files: 1 native, 1 other, 1 excluded (alignment 4096)"));
}

#[test]
fn test_classify_missing_path_fails() {
    let dir = TempDir::new().unwrap();
    let out = hostpack(dir.path(), &["classify", "nowhere", "--os", "linux", "-f", "8.0"]);
    assert!(!out.status.success());
}

// ────────────────────────────────────────────────────────────────────────────
// info
// ────────────────────────────────────────────────────────────────────────────

#[test]
fn test_info() {
    let dir = TempDir::new().unwrap();
    let out = hostpack(dir.path(), &["info"]);
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.contains("Hostpack v"));
    assert!(text.contains("HOSTPACK_LOG"));
}
