//! Single file copy.
//!
//! The copy runs as a linear pipeline:
//!
//! 1. **Validate**: stat both paths and reject directories and same-file
//!    copies before anything is opened.
//! 2. **Allocate**: the transfer buffer, before any file is opened.
//! 3. **Open**: source read-only, destination created (mode `0644`) or
//!    truncated.
//! 4. **Transfer**: one buffer of exactly `buffer_size` bytes, reused until
//!    the source is exhausted.
//! 5. **Finalize**: flush and fsync the destination (best effort).
//! 6. **Release**: close both handles (best effort).
//!
//! Failures in steps 1-4 are fatal [`Error`]s. Failures in 5-6, and in
//! setting permission bits on a new destination, are [`Warning`]s: the copy
//! still succeeds because every byte reached the destination.

use crate::error::{Error, Result, Warning};
use crate::options::CopyOptions;
use crate::request::CopyRequest;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::time::{Duration, Instant};

use super::transfer::TransferState;
use super::utils::{FileIdentity, close_file, open_destination, set_mode};

/// Statistics from a completed copy.
#[derive(Debug, Default)]
pub struct CopyStats {
    /// Total bytes copied
    pub bytes_copied: u64,
    /// Number of reads that returned data
    pub chunks_read: u64,
    /// Number of write calls that transferred data (partial writes included)
    pub write_calls: u64,
    /// Whether the destination was created (it did not exist before)
    pub created: bool,
    /// Non-fatal problems encountered along the way
    pub warnings: Vec<Warning>,
    /// Duration of the copy operation
    pub duration: Duration,
}

/// Copy a file with default [`CopyOptions`].
///
/// # Example
///
/// ```no_run
/// use bufcopy::{CopyRequest, copy};
///
/// let stats = copy(&CopyRequest::new("in.bin", "out.bin"))?;
/// println!("{} bytes", stats.bytes_copied);
/// # Ok::<(), bufcopy::Error>(())
/// ```
///
/// # Errors
///
/// See [`copy_file`].
pub fn copy(request: &CopyRequest) -> Result<CopyStats> {
    copy_file(request, &CopyOptions::default())
}

/// Copy the contents of `request.source()` to `request.destination()`.
///
/// Existing destinations are truncated and keep their permission bits; new
/// ones are created with `options.create_mode`.
///
/// # Errors
///
/// Returns an error if:
/// - Source cannot be stat'ed ([`Error::SourceUnreadable`])
/// - Source is a directory ([`Error::SourceIsDirectory`])
/// - Destination is a directory ([`Error::DestinationIsDirectory`])
/// - Both paths are the same file, including via hard or symbolic links
///   ([`Error::SameFile`])
/// - The transfer buffer cannot be allocated ([`Error::BufferAllocFailed`])
/// - Either file fails to open ([`Error::SourceOpenFailed`],
///   [`Error::DestinationOpenFailed`])
/// - Reading or writing fails ([`Error::ReadFailed`], [`Error::WriteFailed`],
///   [`Error::ShortWriteStalled`])
///
/// Errors from opening onwards leave the destination created or truncated,
/// possibly with partial content.
pub fn copy_file(request: &CopyRequest, options: &CopyOptions) -> Result<CopyStats> {
    let start = Instant::now();
    let src = request.source();
    let dst = request.destination();

    let dst_existed = validate(src, dst)?;
    debug_event!(
        src = %src.display(),
        dst = %dst.display(),
        dst_existed,
        buffer_size = request.buffer_size().get(),
        "validated copy request"
    );

    // Allocate before opening: a failed allocation must not truncate dst
    let mut state =
        TransferState::new(request.buffer_size()).map_err(|source| Error::BufferAllocFailed {
            size: request.buffer_size().get(),
            source,
        })?;

    let src_file = File::open(src).map_err(|source| Error::SourceOpenFailed {
        path: src.to_path_buf(),
        source,
    })?;
    // On failure `src_file` is dropped, closing it
    let dst_file =
        open_destination(dst, options.create_mode).map_err(|source| {
            Error::DestinationOpenFailed {
                path: dst.to_path_buf(),
                source,
            }
        })?;

    debug_event!(dst = %dst.display(), created = !dst_existed, "opened both files");

    let mut warnings = Vec::new();

    if !dst_existed {
        if let Err(source) = set_mode(&dst_file, options.create_mode) {
            report(
                options,
                &mut warnings,
                Warning::SetPermissions {
                    path: dst.to_path_buf(),
                    source,
                },
            );
        }
    }

    state
        .run(&mut &src_file, &mut &dst_file)
        .map_err(|e| e.into_error(src, dst))?;
    let progress = state.finish();
    debug_event!(
        bytes = progress.bytes_copied,
        chunks = progress.chunks_read,
        writes = progress.write_calls,
        "transfer complete"
    );

    finalize(&dst_file, dst, options, &mut warnings);

    if let Err(source) = close_file(src_file) {
        report(
            options,
            &mut warnings,
            Warning::CloseSource {
                path: src.to_path_buf(),
                source,
            },
        );
    }
    if let Err(source) = close_file(dst_file) {
        report(
            options,
            &mut warnings,
            Warning::CloseDestination {
                path: dst.to_path_buf(),
                source,
            },
        );
    }

    Ok(CopyStats {
        bytes_copied: progress.bytes_copied,
        chunks_read: progress.chunks_read,
        write_calls: progress.write_calls,
        created: !dst_existed,
        warnings,
        duration: start.elapsed(),
    })
}

/// Run the precondition checks in order. Returns whether the destination
/// already exists.
fn validate(src: &Path, dst: &Path) -> Result<bool> {
    let src_id = FileIdentity::query(src).map_err(|source| Error::SourceUnreadable {
        path: src.to_path_buf(),
        source,
    })?;
    if src_id.is_directory {
        return Err(Error::SourceIsDirectory(src.to_path_buf()));
    }

    let dst_id = FileIdentity::probe(dst);
    if dst_id.exists {
        if dst_id.is_directory {
            return Err(Error::DestinationIsDirectory(dst.to_path_buf()));
        }
        if src_id.is_same_file(&dst_id) {
            return Err(Error::SameFile {
                source_path: src.to_path_buf(),
                destination_path: dst.to_path_buf(),
            });
        }
    }

    Ok(dst_id.exists)
}

/// Flush, then fsync. The sync is skipped if the flush fails.
fn finalize(file: &File, path: &Path, options: &CopyOptions, warnings: &mut Vec<Warning>) {
    let mut writer = file;
    if let Err(source) = writer.flush() {
        report(
            options,
            warnings,
            Warning::Flush {
                path: path.to_path_buf(),
                source,
            },
        );
        return;
    }

    if options.fsync {
        if let Err(source) = file.sync_all() {
            report(
                options,
                warnings,
                Warning::Sync {
                    path: path.to_path_buf(),
                    source,
                },
            );
            return;
        }
        debug_event!(path = %path.display(), "destination synced");
    }
}

fn report(options: &CopyOptions, warnings: &mut Vec<Warning>, warning: Warning) {
    options.warn(&warning);
    warnings.push(warning);
}

// =============================================================================
// Tests
// =============================================================================
