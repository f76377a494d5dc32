//! Common test utilities for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A test fixture that provides a scratch directory for sources and
/// destinations.
pub struct TestFixture {
    pub dir: TempDir,
}

impl TestFixture {
    /// Create a new test fixture with a fresh directory.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// Path of `name` inside the fixture directory.
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Write `content` to `name` and return its path.
    pub fn write(&self, name: &str, content: impl AsRef<[u8]>) -> PathBuf {
        let path = self.path(name);
        fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Write `len` bytes of non-repeating-looking data to `name`.
    pub fn write_pattern(&self, name: &str, len: usize) -> PathBuf {
        self.write(name, pattern_bytes(len))
    }

    /// Check if a file exists and has the expected content.
    pub fn assert_same_content(&self, a: &Path, b: &Path) {
        assert!(b.exists(), "File does not exist: {:?}", b);
        let expected = fs::read(a).expect("Failed to read file");
        let actual = fs::read(b).expect("Failed to read file");
        assert!(actual == expected, "File content mismatch: {:?} vs {:?}", a, b);
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Deterministic pseudo-random bytes (xorshift).
pub fn pattern_bytes(len: usize) -> Vec<u8> {
    let mut state: u32 = 0x9e37_79b9;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state >> 24) as u8
        })
        .collect()
}

/// Permission bits of `path` (Unix only).
#[cfg(unix)]
pub fn mode_of(path: &Path) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    fs::metadata(path)
        .expect("Failed to stat file")
        .permissions()
        .mode()
        & 0o777
}

/// Check if we have root privileges.
#[cfg(unix)]
pub fn has_root_privileges() -> bool {
    unsafe { libc::geteuid() == 0 }
}

#[cfg(not(unix))]
pub fn has_root_privileges() -> bool {
    false
}

/// Check if a command is available on the system.
pub fn command_exists(cmd: &str) -> bool {
    std::process::Command::new("which")
        .arg(cmd)
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}
