//! Warning tier integration tests for bcp CLI.
//!
//! Post-copy problems (permission bits, fsync, close) are printed as
//! `warning: ...` on stderr and never change the exit status.

#![cfg(target_os = "linux")]

use crate::common::TestFixture;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

/// `/dev/null` accepts the data but rejects fsync with EINVAL.
#[test]
fn test_sync_failure_warns_and_succeeds() {
    let fx = TestFixture::new();
    let src = fx.write_pattern("src.bin", 8192);

    let mut cmd = cargo_bin_cmd!("bcp");
    cmd.arg(&src)
        .arg("/dev/null")
        .assert()
        .success()
        .stderr(predicate::str::contains("warning: fsync failed on '/dev/null'"))
        .stderr(predicate::str::contains("error[").not());
}

#[test]
fn test_sync_warning_counted_in_verbose_summary() {
    let fx = TestFixture::new();
    let src = fx.write("src.txt", "content");

    let mut cmd = cargo_bin_cmd!("bcp");
    cmd.arg("-v")
        .arg(&src)
        .arg("/dev/null")
        .assert()
        .success()
        .stderr(predicate::str::contains("warning: fsync failed"))
        .stderr(predicate::str::contains("Warnings:       1"));
}

#[test]
fn test_no_sync_suppresses_warning() {
    let fx = TestFixture::new();
    let src = fx.write("src.txt", "content");

    let mut cmd = cargo_bin_cmd!("bcp");
    cmd.arg("--no-sync")
        .arg(&src)
        .arg("/dev/null")
        .assert()
        .success()
        .stderr(predicate::str::contains("warning:").not());
}
