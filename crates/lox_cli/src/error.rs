//! Host-level failures and their process exit codes.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Exit code for a command-line usage error (sysexits `EX_USAGE`).
pub const EXIT_USAGE: i32 = 64;
/// Exit code when the scanned input contained errors (`EX_DATAERR`).
pub const EXIT_DATA_ERROR: i32 = 65;
/// Exit code when the script could not be opened (`EX_NOINPUT`).
pub const EXIT_NO_INPUT: i32 = 66;
/// Exit code for failures on stdin/stdout (`EX_IOERR`).
pub const EXIT_IO_ERROR: i32 = 74;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Usage: lox [script]")]
    Usage,

    #[error("could not read '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage => EXIT_USAGE,
            CliError::Read { .. } => EXIT_NO_INPUT,
            CliError::Io(_) => EXIT_IO_ERROR,
        }
    }
}
