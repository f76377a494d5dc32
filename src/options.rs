//! Configuration options for copy operations.
//!
//! [`CopyOptions`] controls the best-effort parts of a copy: whether the
//! destination is synced to disk, which permission bits a newly created
//! destination receives, and where warnings go.
//!
//! # Example
//!
//! ```
//! use bufcopy::CopyOptions;
//!
//! let options = CopyOptions::default()
//!     .without_fsync()
//!     .with_create_mode(0o600);
//! assert!(!options.fsync);
//! ```

use crate::error::Warning;

/// Permission bits given to a destination the copy creates.
pub const DEFAULT_CREATE_MODE: u32 = 0o644;

/// Options for copy operations.
///
/// Use [`Default::default()`] to get sensible defaults, then customize
/// using the builder methods.
///
/// # Default Values
///
/// | Field | Default | Description |
/// |-------|---------|-------------|
/// | `fsync` | `true` | Sync the destination to disk after writing |
/// | `create_mode` | `0o644` | Permission bits for a newly created destination |
/// | `warn_handler` | `None` | Warnings go to `tracing` (if enabled) |
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CopyOptions {
    /// Whether to sync the destination to disk after writing (default: true)
    ///
    /// This ensures durability but may slow down copies. A failed sync is
    /// only ever a warning.
    pub fsync: bool,

    /// Permission bits for a destination that did not exist before the copy
    /// (default: `0o644`)
    ///
    /// Applied at creation time and then set explicitly, so the process
    /// umask does not narrow them. Existing destinations keep their bits.
    /// Ignored on non-Unix platforms.
    pub create_mode: u32,

    /// Callback for warnings (optional)
    ///
    /// If not set and `tracing` feature is enabled, warnings are logged via tracing.
    /// Otherwise, warnings are only recorded in [`CopyStats`](crate::CopyStats).
    #[cfg_attr(feature = "serde", serde(skip))]
    pub warn_handler: Option<fn(&str)>,
}

impl Default for CopyOptions {
    fn default() -> Self {
        Self {
            fsync: true,
            create_mode: DEFAULT_CREATE_MODE,
            warn_handler: None,
        }
    }
}

impl CopyOptions {
    /// Create options with a warning handler
    #[must_use]
    pub fn with_warn_handler(mut self, handler: fn(&str)) -> Self {
        self.warn_handler = Some(handler);
        self
    }

    /// Disable fsync for faster (but less durable) copies
    #[must_use]
    pub fn without_fsync(mut self) -> Self {
        self.fsync = false;
        self
    }

    /// Set the permission bits for newly created destinations
    ///
    /// Only the low 12 bits (`0o7777`) are kept.
    #[must_use]
    pub fn with_create_mode(mut self, mode: u32) -> Self {
        self.create_mode = mode & 0o7777;
        self
    }

    pub(crate) fn warn(&self, warning: &Warning) {
        if let Some(handler) = self.warn_handler {
            handler(&warning.to_string());
        } else {
            #[cfg(feature = "tracing")]
            tracing::warn!("{}", warning);
        }
    }
}
