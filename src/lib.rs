//! # bufcopy
//!
//! Copy one regular file to another path through a buffer of configurable
//! size, with the precondition checks and failure reporting of `cp`.
//!
//! ## Core Features
//!
//! - **Precondition checks first**: missing sources, directories on either
//!   side and same-file copies (including hard and symbolic links) are
//!   rejected before any file is opened
//! - **Configurable buffer**: a single buffer of exactly the requested size
//!   is reused for the whole transfer
//! - **Short-write safe**: partial writes are re-issued; a write that makes
//!   no progress is an error, never an endless loop
//! - **Two-tier failures**: fatal [`Error`]s abort the copy, while problems
//!   with permission bits, fsync or closing handles are [`Warning`]s
//! - **No leaks**: both handles are released on every exit path
//!
//! ## Quick Start with Builder API
//!
//! ```no_run
//! use bufcopy::CopyBuilder;
//!
//! let stats = CopyBuilder::new("in.bin", "out.bin")
//!     .try_buffer_size(8192)?
//!     .run()?;
//! println!("Copied {} bytes in {} reads", stats.bytes_copied, stats.chunks_read);
//! # Ok::<(), bufcopy::Error>(())
//! ```
//!
//! ## Function API
//!
//! ```no_run
//! use bufcopy::{BufferSize, CopyOptions, CopyRequest, copy_file};
//!
//! let request = CopyRequest::new("in.bin", "out.bin")
//!     .with_buffer_size(BufferSize::new(512)?);
//! let options = CopyOptions::default().without_fsync();
//!
//! let stats = copy_file(&request, &options)?;
//! for warning in &stats.warnings {
//!     eprintln!("warning: {warning}");
//! }
//! # Ok::<(), bufcopy::Error>(())
//! ```
//!
//! ## Optional Features
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `tracing` | Structured logging with tracing crate |
//! | `serde` | Serialize/Deserialize for [`CopyOptions`] and [`BufferSize`] |
//! | `full` | Enable all optional features |

#![cfg_attr(docsrs, feature(doc_cfg))]

/// `tracing::debug!` when the `tracing` feature is enabled, nothing otherwise.
macro_rules! debug_event {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        tracing::debug!($($arg)*);
    };
}

mod builder;
mod copy;
mod error;
mod options;
mod request;

pub use builder::CopyBuilder;
pub use copy::{CopyStats, copy, copy_file};
pub use error::{Error, ErrorCode, Result, Warning, is_no_space_error};
pub use options::{CopyOptions, DEFAULT_CREATE_MODE};
pub use request::{BufferSize, CopyRequest};
