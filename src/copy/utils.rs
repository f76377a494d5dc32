//! Filesystem helpers for the copy engine: file identity, opening the
//! destination, applying permission bits and closing handles with error
//! reporting.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;

// =============================================================================
// File identity
// =============================================================================

/// What `stat` says about a path, as far as precondition checks care.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct FileIdentity {
    pub device_id: u64,
    pub inode_id: u64,
    pub is_directory: bool,
    pub exists: bool,
}

impl FileIdentity {
    /// Stat `path`, following symlinks.
    pub(crate) fn query(path: &Path) -> io::Result<Self> {
        let meta = fs::metadata(path)?;
        let (device_id, inode_id) = identity_key(path, &meta)?;
        Ok(Self {
            device_id,
            inode_id,
            is_directory: meta.is_dir(),
            exists: true,
        })
    }

    /// Like [`query`](Self::query), but any failure just means "absent".
    pub(crate) fn probe(path: &Path) -> Self {
        match Self::query(path) {
            Ok(identity) => identity,
            Err(_e) => {
                debug_event!(path = %path.display(), error = %_e, "destination not present");
                Self::default()
            }
        }
    }

    /// Whether both identities name the same underlying file.
    pub(crate) fn is_same_file(&self, other: &Self) -> bool {
        self.exists
            && other.exists
            && self.device_id == other.device_id
            && self.inode_id == other.inode_id
    }
}

#[cfg(unix)]
fn identity_key(_path: &Path, meta: &fs::Metadata) -> io::Result<(u64, u64)> {
    use std::os::unix::fs::MetadataExt;
    Ok((meta.dev(), meta.ino()))
}

#[cfg(not(unix))]
fn identity_key(path: &Path, _meta: &fs::Metadata) -> io::Result<(u64, u64)> {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};
    // No inode numbers here; a canonical path identifies the file instead
    let canonical = path.canonicalize()?;
    let mut hasher = DefaultHasher::new();
    canonical.hash(&mut hasher);
    Ok((0, hasher.finish()))
}

// =============================================================================
// Opening and permissions
// =============================================================================

/// Open `path` for writing, creating it with `mode` or truncating it.
pub(crate) fn open_destination(path: &Path, mode: u32) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;
    options.open(path)
}

/// Set permission bits on an open file, bypassing the umask.
#[cfg(unix)]
pub(crate) fn set_mode(file: &File, mode: u32) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
pub(crate) fn set_mode(_file: &File, _mode: u32) -> io::Result<()> {
    Ok(())
}

// =============================================================================
// Closing
// =============================================================================

/// Close a handle and report the result.
///
/// Dropping a `File` discards close errors, so the success path closes
/// explicitly. Error paths still rely on drop.
#[cfg(unix)]
pub(crate) fn close_file(file: File) -> io::Result<()> {
    use std::os::unix::io::IntoRawFd;

    let fd = file.into_raw_fd();
    // SAFETY: `fd` was just released by `into_raw_fd`, so we own it and
    // nothing else will close it.
    let result = unsafe { libc::close(fd) };
    if result < 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

#[cfg(not(unix))]
pub(crate) fn close_file(file: File) -> io::Result<()> {
    drop(file);
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
