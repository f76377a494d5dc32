//! Builder API for ergonomic copying.
//!
//! The builder pattern provides a fluent interface for configuring and
//! executing a copy. This is often more convenient than constructing a
//! [`CopyRequest`] and [`CopyOptions`] by hand.
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```no_run
//! use bufcopy::CopyBuilder;
//!
//! let stats = CopyBuilder::new("in.bin", "out.bin").run()?;
//! println!("Copied {} bytes", stats.bytes_copied);
//! # Ok::<(), bufcopy::Error>(())
//! ```
//!
//! ## With Options
//!
//! ```no_run
//! use bufcopy::CopyBuilder;
//!
//! let stats = CopyBuilder::new("in.bin", "out.bin")
//!     .try_buffer_size(64 * 1024)?   // 64 KiB reads
//!     .no_fsync()                    // Skip the durability sync
//!     .run()?;
//! # Ok::<(), bufcopy::Error>(())
//! ```

use crate::copy::{CopyStats, copy_file};
use crate::error::Result;
use crate::options::CopyOptions;
use crate::request::{BufferSize, CopyRequest};
use std::path::Path;

/// A builder for configuring and executing a copy.
///
/// # Example
///
/// ```no_run
/// use bufcopy::CopyBuilder;
///
/// let stats = CopyBuilder::new("/data/archive.tar", "/backup/archive.tar")
///     .try_buffer_size(1 << 20)?
///     .warn_handler(|msg| eprintln!("warning: {msg}"))
///     .run()?;
/// # Ok::<(), bufcopy::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct CopyBuilder {
    request: CopyRequest,
    options: CopyOptions,
}

impl CopyBuilder {
    /// Create a new `CopyBuilder` with the given source and destination paths.
    ///
    /// Uses a 4 KiB buffer and default options (fsync on, `0644` for new files).
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(src: P, dst: Q) -> Self {
        Self {
            request: CopyRequest::new(src, dst),
            options: CopyOptions::default(),
        }
    }

    /// Set the transfer buffer size.
    #[must_use]
    pub fn buffer_size(mut self, size: BufferSize) -> Self {
        self.request = self.request.with_buffer_size(size);
        self
    }

    /// Set the transfer buffer size from a raw byte count.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBufferSize`](crate::Error::InvalidBufferSize)
    /// if `bytes` is zero.
    pub fn try_buffer_size(self, bytes: usize) -> Result<Self> {
        Ok(self.buffer_size(BufferSize::new(bytes)?))
    }

    /// Disable fsync after writing.
    ///
    /// This improves performance but reduces durability guarantees.
    /// Data may be lost if the system crashes before the OS flushes buffers.
    #[must_use]
    pub fn no_fsync(mut self) -> Self {
        self.options = self.options.without_fsync();
        self
    }

    /// Set the permission bits for a newly created destination.
    #[must_use]
    pub fn create_mode(mut self, mode: u32) -> Self {
        self.options = self.options.with_create_mode(mode);
        self
    }

    /// Set a handler to receive warning messages.
    #[must_use]
    pub fn warn_handler(mut self, handler: fn(&str)) -> Self {
        self.options = self.options.with_warn_handler(handler);
        self
    }

    /// The request this builder will execute.
    #[must_use]
    pub fn request(&self) -> &CopyRequest {
        &self.request
    }

    /// The options this builder will use.
    #[must_use]
    pub fn options(&self) -> &CopyOptions {
        &self.options
    }

    /// Execute the copy.
    ///
    /// # Errors
    ///
    /// Any fatal [`Error`](crate::Error) from [`copy_file`].
    pub fn run(self) -> Result<CopyStats> {
        copy_file(&self.request, &self.options)
    }
}
