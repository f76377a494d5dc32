//! The bounded-buffer transfer loop.
//!
//! [`TransferState`] owns the single reusable buffer for one copy. The loop
//! reads at most one buffer's worth, writes all of it (re-issuing partial
//! writes), and repeats until a read returns zero bytes. It is generic over
//! [`Read`] and [`Write`] so the same code drives `std::fs::File` handles in
//! production and scripted readers/writers in tests.

use crate::error::Error;
use crate::request::BufferSize;
use std::collections::TryReserveError;
use std::io::{self, Read, Write};
use std::path::Path;

/// Counters collected while transferring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct TransferProgress {
    /// Bytes written to the destination
    pub bytes_copied: u64,
    /// Reads that returned data (the final zero-byte read is not counted)
    pub chunks_read: u64,
    /// Successful write calls, including partial ones
    pub write_calls: u64,
}

/// Why the loop stopped early.
#[derive(Debug)]
pub(crate) enum TransferError {
    Read(io::Error),
    Write(io::Error),
    /// A write accepted zero bytes without an error
    Stalled { remaining: usize },
}

impl TransferError {
    /// Attach the paths involved, producing the public error.
    pub(crate) fn into_error(self, src: &Path, dst: &Path) -> Error {
        match self {
            Self::Read(source) => Error::ReadFailed {
                path: src.to_path_buf(),
                source,
            },
            Self::Write(source) => Error::WriteFailed {
                path: dst.to_path_buf(),
                source,
            },
            Self::Stalled { remaining } => Error::ShortWriteStalled {
                path: dst.to_path_buf(),
                remaining,
            },
        }
    }
}

/// Buffer and counters for a single copy. Dropped when the loop ends.
pub(crate) struct TransferState {
    buf: Vec<u8>,
    progress: TransferProgress,
}

impl TransferState {
    /// Allocate the buffer. Fails instead of aborting when the memory is
    /// not available.
    pub(crate) fn new(size: BufferSize) -> Result<Self, TryReserveError> {
        let mut buf = Vec::new();
        buf.try_reserve_exact(size.get())?;
        buf.resize(size.get(), 0);
        Ok(Self {
            buf,
            progress: TransferProgress::default(),
        })
    }

    /// Copy everything `reader` yields into `writer`.
    pub(crate) fn run<R, W>(&mut self, reader: &mut R, writer: &mut W) -> Result<(), TransferError>
    where
        R: Read + ?Sized,
        W: Write + ?Sized,
    {
        loop {
            let n = match reader.read(&mut self.buf) {
                Ok(0) => return Ok(()),
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(TransferError::Read(e)),
            };
            self.progress.chunks_read += 1;

            let mut offset = 0;
            while offset < n {
                match writer.write(&self.buf[offset..n]) {
                    Ok(0) => {
                        return Err(TransferError::Stalled {
                            remaining: n - offset,
                        });
                    }
                    Ok(written) => {
                        self.progress.write_calls += 1;
                        self.progress.bytes_copied += written as u64;
                        offset += written;
                    }
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                    Err(e) => return Err(TransferError::Write(e)),
                }
            }
        }
    }

    /// Release the buffer and hand back the counters.
    pub(crate) fn finish(self) -> TransferProgress {
        self.progress
    }
}
