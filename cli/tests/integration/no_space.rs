//! No-space error integration tests for bcp CLI.
//!
//! These tests simulate "no space left on device" errors partway through a
//! copy.
//!
//! # Running these tests
//!
//! The `/dev/full` tests run unprivileged on Linux. The tmpfs test needs to
//! mount a filesystem:
//!
//! **Option 1: Run with sudo**
//! ```bash
//! sudo cargo test --test no_space
//! ```
//!
//! **Option 2: Use Docker**
//! ```bash
//! docker run --privileged -v $(pwd):/workspace -w /workspace rust:latest \
//!   cargo test --package bufcopy-cli --test no_space
//! ```
//!
//! If run without privileges, the tmpfs test is gracefully skipped.

#[path = "../common/mod.rs"]
mod common;

#[cfg(target_os = "linux")]
mod linux_tests {
    use super::common::{TestFixture, command_exists, has_root_privileges};
    use assert_cmd::cargo::cargo_bin_cmd;
    use predicates::prelude::*;
    use std::fs;
    use std::path::Path;
    use std::process::Command as StdCommand;
    use tempfile::TempDir;

    /// `/dev/full` accepts the open but fails every write with ENOSPC.
    #[test]
    fn test_write_to_full_device_fails() {
        if !Path::new("/dev/full").exists() {
            eprintln!("SKIP: /dev/full not available");
            return;
        }

        let fx = TestFixture::new();
        let src = fx.write_pattern("src.bin", 64 * 1024);

        let mut cmd = cargo_bin_cmd!("bcp");
        cmd.arg("-b")
            .arg("4096")
            .arg(&src)
            .arg("/dev/full")
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("error[no_space]"))
            .stderr(predicate::str::contains("Write error to '/dev/full'"))
            .stderr(predicate::str::contains("No space left on device"));
    }

    /// A size-limited tmpfs fills up after part of the file was written.
    #[test]
    fn test_no_space_partway_through() {
        if !has_root_privileges() {
            eprintln!("SKIP: Test requires root privileges");
            eprintln!("      Run with: sudo cargo test test_no_space_partway_through");
            return;
        }
        if !command_exists("mount") {
            eprintln!("SKIP: mount not available");
            return;
        }

        let mount_point = TempDir::new().expect("Failed to create temp dir");
        let fx = TestFixture::new();

        // Create 1MB tmpfs
        let mount_result = StdCommand::new("mount")
            .args(["-t", "tmpfs", "-o", "size=1M", "tmpfs"])
            .arg(mount_point.path())
            .output();

        match mount_result {
            Ok(output) if output.status.success() => {
                eprintln!("Created 1MB tmpfs at {:?}", mount_point.path());
            }
            Ok(output) => {
                eprintln!(
                    "SKIP: Failed to mount tmpfs: {}",
                    String::from_utf8_lossy(&output.stderr)
                );
                return;
            }
            Err(e) => {
                eprintln!("SKIP: Failed to execute mount: {}", e);
                return;
            }
        }

        // Ensure cleanup
        let _guard = scopeguard::guard(mount_point.path(), |path| {
            let _ = StdCommand::new("umount").arg(path).output();
        });

        // 2MB source, twice the space available
        let src = fx.write_pattern("big.bin", 2 * 1024 * 1024);
        let dst = mount_point.path().join("big.bin");

        let mut cmd = cargo_bin_cmd!("bcp");
        cmd.arg("-b")
            .arg("65536")
            .arg(&src)
            .arg(&dst)
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("No space left on device"));

        // The partially written destination is left behind
        let written = fs::metadata(&dst).map(|m| m.len()).unwrap_or(0);
        assert!(written < 2 * 1024 * 1024);
    }
}
