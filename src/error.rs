//! Error and warning types for bufcopy.
//!
//! Copy failures come in two tiers:
//!
//! | Tier | Type | Effect |
//! |------|------|--------|
//! | Fatal | [`Error`] | Copy aborted, handles released, `Err` returned |
//! | Warning | [`Warning`] | Reported, recorded in [`CopyStats`](crate::CopyStats), copy still succeeds |
//!
//! # Fatal error categories
//!
//! | Category | Errors |
//! |----------|--------|
//! | Input | [`Error::InvalidBufferSize`] |
//! | Setup | [`Error::BufferAllocFailed`] |
//! | Validation | [`Error::SourceUnreadable`], [`Error::SourceIsDirectory`], [`Error::DestinationIsDirectory`], [`Error::SameFile`] |
//! | Open | [`Error::SourceOpenFailed`], [`Error::DestinationOpenFailed`] |
//! | Transfer | [`Error::ReadFailed`], [`Error::WriteFailed`], [`Error::ShortWriteStalled`] |

use std::collections::TryReserveError;
use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for bufcopy operations.
///
/// This is a type alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

/// Check if an IO error indicates "no space left on device".
///
/// # Platform Support
///
/// | Platform | Error Detection |
/// |----------|-----------------|
/// | Unix | `ENOSPC` |
/// | Windows | `ERROR_DISK_FULL` (0x70) |
///
/// # Example
///
/// ```
/// use std::io;
/// use bufcopy::is_no_space_error;
///
/// let error = io::Error::new(io::ErrorKind::StorageFull, "disk full");
/// assert!(is_no_space_error(&error));
/// ```
pub fn is_no_space_error(error: &io::Error) -> bool {
    if error.kind() == io::ErrorKind::StorageFull {
        return true;
    }

    #[cfg(unix)]
    {
        if let Some(raw_error) = error.raw_os_error() {
            return raw_error == libc::ENOSPC;
        }
    }

    #[cfg(windows)]
    {
        if let Some(raw_error) = error.raw_os_error() {
            const ERROR_DISK_FULL: i32 = 112;
            return raw_error == ERROR_DISK_FULL;
        }
    }

    false
}

/// Stable, machine-readable category of an [`Error`].
///
/// The CLI prints this as the `error[code]:` prefix and derives its exit
/// status from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorCode {
    /// Caller supplied an unusable argument (e.g. a zero buffer size)
    InvalidInput,
    /// Source path does not exist
    SourceNotFound,
    /// Access to a path was denied
    PermissionDenied,
    /// A path that must be a regular file is a directory
    IsADirectory,
    /// Source and destination are the same file
    SameFile,
    /// The destination ran out of space
    NoSpace,
    /// The transfer buffer could not be allocated
    OutOfMemory,
    /// Any other I/O failure
    IoError,
}

impl ErrorCode {
    /// Short snake_case name of the code.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InvalidInput => "invalid_input",
            Self::SourceNotFound => "source_not_found",
            Self::PermissionDenied => "permission_denied",
            Self::IsADirectory => "is_a_directory",
            Self::SameFile => "same_file",
            Self::NoSpace => "no_space",
            Self::OutOfMemory => "out_of_memory",
            Self::IoError => "io_error",
        }
    }

    fn from_io(error: &io::Error) -> Self {
        if is_no_space_error(error) {
            return Self::NoSpace;
        }
        match error.kind() {
            io::ErrorKind::NotFound => Self::SourceNotFound,
            io::ErrorKind::PermissionDenied => Self::PermissionDenied,
            _ => Self::IoError,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fatal errors that abort a copy.
///
/// Every variant carries the offending path and, where an OS call failed,
/// the underlying [`io::Error`] as its source. By the time one of these is
/// returned, every file handle the copy opened has been released.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Buffer size is not a positive integer
    #[error("Invalid buffer size: '{value}' - {reason}")]
    InvalidBufferSize {
        /// The rejected input, as supplied
        value: String,
        /// Why it was rejected
        reason: &'static str,
    },

    /// The transfer buffer could not be allocated
    ///
    /// Raised before either file is opened, so the destination is untouched.
    #[error("Failed to allocate buffer of size {size} bytes: {source}")]
    BufferAllocFailed {
        /// Requested buffer length
        size: usize,
        /// Underlying error
        source: TryReserveError,
    },

    /// Source metadata could not be queried (missing, permission denied, ...)
    #[error("Cannot stat source '{path}': {source}")]
    SourceUnreadable {
        /// Source path
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// Source is a directory
    #[error("Source '{0}' is a directory. Expected a regular file.")]
    SourceIsDirectory(PathBuf),

    /// Destination exists and is a directory
    #[error("Destination '{0}' is a directory. Provide a file path.")]
    DestinationIsDirectory(PathBuf),

    /// Source and destination resolve to the same (device, inode) pair
    #[error("Source and destination refer to the same file ('{source_path}' and '{destination_path}').")]
    SameFile {
        /// Source path
        source_path: PathBuf,
        /// Destination path
        destination_path: PathBuf,
    },

    /// Source could not be opened for reading
    #[error("Failed to open source '{path}': {source}")]
    SourceOpenFailed {
        /// Source path
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// Destination could not be opened or created for writing
    #[error("Failed to open/create destination '{path}': {source}")]
    DestinationOpenFailed {
        /// Destination path
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// Reading from the source failed
    #[error("Read error from '{path}': {source}")]
    ReadFailed {
        /// Source path
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// Writing to the destination failed
    ///
    /// The destination has already been truncated at this point and may
    /// hold a partial copy.
    #[error("Write error to '{path}': {source}")]
    WriteFailed {
        /// Destination path
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// A write accepted zero bytes without reporting an error
    #[error("Unexpected short write to '{path}': {remaining} bytes could not be written")]
    ShortWriteStalled {
        /// Destination path
        path: PathBuf,
        /// Bytes of the current chunk still pending
        remaining: usize,
    },
}

impl Error {
    /// Machine-readable category of this error.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidBufferSize { .. } => ErrorCode::InvalidInput,
            Self::BufferAllocFailed { .. } => ErrorCode::OutOfMemory,
            Self::SourceUnreadable { source, .. } | Self::SourceOpenFailed { source, .. } => {
                ErrorCode::from_io(source)
            }
            Self::SourceIsDirectory(_) | Self::DestinationIsDirectory(_) => {
                ErrorCode::IsADirectory
            }
            Self::SameFile { .. } => ErrorCode::SameFile,
            Self::DestinationOpenFailed { source, .. }
            | Self::ReadFailed { source, .. }
            | Self::WriteFailed { source, .. } => match ErrorCode::from_io(source) {
                // A missing path here is the destination's parent, not the source
                ErrorCode::SourceNotFound => ErrorCode::IoError,
                code => code,
            },
            Self::ShortWriteStalled { .. } => ErrorCode::IoError,
        }
    }

    /// Whether the destination ran out of space.
    #[must_use]
    pub fn is_no_space(&self) -> bool {
        self.code() == ErrorCode::NoSpace
    }
}

/// Non-fatal conditions reported during an otherwise successful copy.
///
/// All application-level bytes were transferred when one of these is
/// raised; only a post-condition (permission bits, durability, handle
/// release) is weaker than requested.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Warning {
    /// Default permission bits could not be applied to a new destination
    #[error("chmod {path} failed: {source}")]
    SetPermissions {
        /// Destination path
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// Flushing buffered writes failed
    #[error("flush failed on '{path}': {source}")]
    Flush {
        /// Destination path
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// Durability sync failed
    #[error("fsync failed on '{path}': {source}")]
    Sync {
        /// Destination path
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// Closing the source handle failed
    #[error("closing source '{path}' failed: {source}")]
    CloseSource {
        /// Source path
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// Closing the destination handle failed
    #[error("closing destination '{path}' failed: {source}")]
    CloseDestination {
        /// Destination path
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },
}
