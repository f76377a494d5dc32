//! Permission bit integration tests for bcp CLI.
//!
//! A destination the copy creates gets mode 0644 regardless of the source's
//! mode or the umask. An existing destination keeps whatever it had.

#![cfg(unix)]

use crate::common::{TestFixture, mode_of};
use assert_cmd::cargo::cargo_bin_cmd;
use std::fs;
use std::os::unix::fs::PermissionsExt;

#[test]
fn test_new_destination_is_0644() {
    let fx = TestFixture::new();
    let src = fx.write("src.txt", "content");
    fs::set_permissions(&src, fs::Permissions::from_mode(0o600)).unwrap();
    let dst = fx.path("dst.txt");

    let mut cmd = cargo_bin_cmd!("bcp");
    cmd.arg(&src).arg(&dst).assert().success();

    assert_eq!(mode_of(&dst), 0o644);
}

#[test]
fn test_executable_source_does_not_make_executable_copy() {
    let fx = TestFixture::new();
    let src = fx.write("script.sh", "#!/bin/sh\necho hi\n");
    fs::set_permissions(&src, fs::Permissions::from_mode(0o755)).unwrap();
    let dst = fx.path("script.copy");

    let mut cmd = cargo_bin_cmd!("bcp");
    cmd.arg(&src).arg(&dst).assert().success();

    assert_eq!(mode_of(&dst), 0o644);
}

#[test]
fn test_existing_destination_keeps_mode() {
    let fx = TestFixture::new();
    let src = fx.write("src.txt", "new content");
    let dst = fx.write("dst.txt", "old content");
    fs::set_permissions(&dst, fs::Permissions::from_mode(0o600)).unwrap();

    let mut cmd = cargo_bin_cmd!("bcp");
    cmd.arg(&src).arg(&dst).assert().success();

    assert_eq!(mode_of(&dst), 0o600);
    assert_eq!(fs::read_to_string(&dst).unwrap(), "new content");
}

#[test]
fn test_existing_executable_destination_keeps_mode() {
    let fx = TestFixture::new();
    let src = fx.write("src.txt", "new content");
    let dst = fx.write("dst.txt", "old content");
    fs::set_permissions(&dst, fs::Permissions::from_mode(0o750)).unwrap();

    let mut cmd = cargo_bin_cmd!("bcp");
    cmd.arg(&src).arg(&dst).assert().success();

    assert_eq!(mode_of(&dst), 0o750);
}
