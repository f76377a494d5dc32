//! Copy requests and buffer sizes.
//!
//! A [`CopyRequest`] names one source, one destination and the size of the
//! transfer buffer. It is immutable once built; the buffer size is validated
//! up front by [`BufferSize`], so an invalid size is rejected before any file
//! is touched.
//!
//! # Example
//!
//! ```
//! use bufcopy::{BufferSize, CopyRequest};
//!
//! let size: BufferSize = "512".parse()?;
//! let request = CopyRequest::new("in.bin", "out.bin").with_buffer_size(size);
//! assert_eq!(request.buffer_size().get(), 512);
//! # Ok::<(), bufcopy::Error>(())
//! ```

use crate::error::{Error, Result};
use std::fmt;
use std::num::{IntErrorKind, NonZeroUsize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

const POSITIVE_INTEGER: &str = "must be a positive integer";
const OUT_OF_RANGE: &str = "out of range for this platform";

/// Largest length a single allocation may request.
const MAX_LEN: usize = isize::MAX as usize;

/// A validated, strictly positive transfer buffer length in bytes.
///
/// Parsing accepts a plain decimal integer with an optional sign and nothing
/// else: no whitespace, no trailing characters. Zero, negative numbers,
/// non-numeric text and values above `isize::MAX` (the largest possible
/// allocation) are rejected with [`Error::InvalidBufferSize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "usize", into = "usize"))]
pub struct BufferSize(NonZeroUsize);

impl BufferSize {
    /// 4 KiB, used when no size is given.
    pub const DEFAULT: Self = match NonZeroUsize::new(4096) {
        Some(n) => Self(n),
        None => unreachable!(),
    };

    /// Create a buffer size, rejecting zero.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBufferSize`] if `bytes` is zero or larger
    /// than `isize::MAX`.
    pub fn new(bytes: usize) -> Result<Self> {
        let invalid = |reason| Error::InvalidBufferSize {
            value: bytes.to_string(),
            reason,
        };
        if bytes > MAX_LEN {
            return Err(invalid(OUT_OF_RANGE));
        }
        NonZeroUsize::new(bytes)
            .map(Self)
            .ok_or_else(|| invalid(POSITIVE_INTEGER))
    }

    /// Buffer length in bytes.
    #[must_use]
    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl Default for BufferSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for BufferSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<NonZeroUsize> for BufferSize {
    fn from(value: NonZeroUsize) -> Self {
        Self(value)
    }
}

impl From<BufferSize> for usize {
    fn from(value: BufferSize) -> Self {
        value.get()
    }
}

impl TryFrom<usize> for BufferSize {
    type Error = Error;

    fn try_from(value: usize) -> Result<Self> {
        Self::new(value)
    }
}

impl FromStr for BufferSize {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = |reason| Error::InvalidBufferSize {
            value: s.to_owned(),
            reason,
        };

        // i128 so that negative input is classified as "not positive"
        // rather than as a parse failure.
        let parsed = match s.parse::<i128>() {
            Ok(v) => v,
            Err(e) => {
                return Err(match e.kind() {
                    IntErrorKind::PosOverflow => invalid(OUT_OF_RANGE),
                    _ => invalid(POSITIVE_INTEGER),
                });
            }
        };

        if parsed <= 0 {
            return Err(invalid(POSITIVE_INTEGER));
        }

        usize::try_from(parsed)
            .ok()
            .filter(|&n| n <= MAX_LEN)
            .and_then(NonZeroUsize::new)
            .map(Self)
            .ok_or_else(|| invalid(OUT_OF_RANGE))
    }
}

/// One single-file copy: source, destination and buffer size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyRequest {
    source: PathBuf,
    destination: PathBuf,
    buffer_size: BufferSize,
}

impl CopyRequest {
    /// Create a request with the default 4 KiB buffer.
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(source: P, destination: Q) -> Self {
        Self {
            source: source.as_ref().to_path_buf(),
            destination: destination.as_ref().to_path_buf(),
            buffer_size: BufferSize::DEFAULT,
        }
    }

    /// Replace the buffer size.
    #[must_use]
    pub fn with_buffer_size(mut self, buffer_size: BufferSize) -> Self {
        self.buffer_size = buffer_size;
        self
    }

    /// Path read from.
    #[must_use]
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Path written to.
    #[must_use]
    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Transfer buffer length.
    #[must_use]
    pub fn buffer_size(&self) -> BufferSize {
        self.buffer_size
    }
}
