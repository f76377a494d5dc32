//! bcp - Buffered Copy
//!
//! Copies one file to another path through a buffer of configurable size,
//! powered by bufcopy.

use bufcopy::{
    BufferSize, CopyOptions, CopyRequest, CopyStats, Error as BufcopyError, ErrorCode, copy_file,
};
use clap::{CommandFactory, Parser};
use std::path::PathBuf;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// bcp - Copy a file through a fixed-size buffer
///
/// Copies SOURCE_FILE to DEST_FILE, refusing directories and copies of a
/// file onto itself. A new DEST_FILE is created with mode 0644; an existing
/// one is truncated and keeps its permissions.
#[derive(Parser, Debug)]
#[command(
    name = "bcp",
    version,
    about,
    long_about = None,
    override_usage = "bcp [-b BUF_SIZE] [-h] SOURCE_FILE DEST_FILE"
)]
struct Args {
    /// Source file followed by destination file
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Set buffer size in bytes (positive integer)
    #[arg(
        short = 'b',
        value_name = "BUF_SIZE",
        default_value = "4096",
        allow_hyphen_values = true,
        value_parser = parse_buffer_size
    )]
    buffer_size: BufferSize,

    /// Do not call fsync on the destination (faster but less safe)
    #[arg(long)]
    no_sync: bool,

    /// Verbose output (copy summary and debug logging on stderr)
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn parse_buffer_size(s: &str) -> Result<BufferSize, BufcopyError> {
    s.parse()
}

type CliResult<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
enum CliError {
    #[error("Missing source and/or destination file. Expecting 2 arguments, got {found}.")]
    MissingOperands { found: usize },

    #[error("Too many arguments. Expecting exactly 2 (source and destination), got {found}.")]
    TooManyOperands { found: usize },

    #[error(transparent)]
    Copy(#[from] BufcopyError),
}

impl CliError {
    fn code(&self) -> ErrorCode {
        match self {
            Self::MissingOperands { .. } | Self::TooManyOperands { .. } => ErrorCode::InvalidInput,
            Self::Copy(source) => source.code(),
        }
    }

    fn wants_usage(&self) -> bool {
        matches!(
            self,
            Self::MissingOperands { .. } | Self::TooManyOperands { .. }
        )
    }
}

fn exit_code_for(code: ErrorCode) -> i32 {
    match code {
        ErrorCode::InvalidInput => 2,
        _ => 1,
    }
}

fn main() {
    if let Err(error) = run() {
        eprintln!("error[{}]: {}", error.code(), error);
        if error.wants_usage() {
            eprintln!("{}", Args::command().render_usage());
        }
        std::process::exit(exit_code_for(error.code()));
    }
}

fn run() -> CliResult<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let (source, destination) = resolve_operands(&args.files)?;
    let request = CopyRequest::new(source, destination).with_buffer_size(args.buffer_size);

    let mut options = CopyOptions::default().with_warn_handler(|msg| {
        eprintln!("warning: {}", msg);
    });
    if args.no_sync {
        options = options.without_fsync();
    }

    tracing::debug!(
        src = %request.source().display(),
        dst = %request.destination().display(),
        buffer_size = %request.buffer_size(),
        fsync = options.fsync,
        "starting copy"
    );

    let stats = copy_file(&request, &options)?;

    if args.verbose {
        print_stats(&stats);
    }
    Ok(())
}

/// Log to stderr. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .ok();
}

fn resolve_operands(files: &[PathBuf]) -> CliResult<(PathBuf, PathBuf)> {
    match files {
        [source, destination] => Ok((source.clone(), destination.clone())),
        [] | [_] => Err(CliError::MissingOperands { found: files.len() }),
        _ => Err(CliError::TooManyOperands { found: files.len() }),
    }
}

fn print_stats(stats: &CopyStats) {
    eprintln!("Copy completed in {:?}", stats.duration);
    eprintln!(
        "  Copied:         {} ({} bytes)",
        format_bytes(stats.bytes_copied),
        stats.bytes_copied
    );
    eprintln!("  Reads:          {}", stats.chunks_read);
    eprintln!("  Writes:         {}", stats.write_calls);
    eprintln!(
        "  Destination:    {}",
        if stats.created { "created" } else { "overwritten" }
    );
    if !stats.warnings.is_empty() {
        eprintln!("  Warnings:       {}", stats.warnings.len());
    }

    if stats.duration.as_secs_f64() > 0.0 {
        let speed = stats.bytes_copied as f64 / stats.duration.as_secs_f64();
        eprintln!("  Speed:          {}/s", format_bytes(speed as u64));
    }
}

fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;
    const TB: u64 = GB * 1024;

    if bytes >= TB {
        format!("{:.2} TB", bytes as f64 / TB as f64)
    } else if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
