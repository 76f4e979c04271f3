//! Error types

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::app::ConfigError;

/// Fatal errors. Unknown escape sequences are not errors; they are logged
/// and dropped by the dispatcher.
#[derive(Error, Debug)]
pub enum TypistError {
    #[error("Failed to open printer device {}: {source}", .path.display())]
    OpenDevice {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read from terminal: {0}")]
    Read(#[source] io::Error),

    #[error("Failed to write to printer: {0}")]
    Write(#[source] io::Error),

    #[error("Failed to set terminal attributes: {0}")]
    Termios(#[source] nix::Error),

    #[error("Failed to install signal handlers: {0}")]
    Signals(#[source] io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl TypistError {
    /// Process exit status for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            TypistError::Config(_) => 2,
            _ => 1,
        }
    }
}

/// Result type for typist operations
pub type Result<T> = std::result::Result<T, TypistError>;
