//! Core copy operations.
//!
//! This module provides the single-file copy engine: precondition checks,
//! the buffered transfer loop and best-effort finalization.

mod file;
mod transfer;
mod utils;

// Re-export public API
pub use file::{CopyStats, copy, copy_file};
