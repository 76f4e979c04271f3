//! Raw terminal mode
//!
//! Keystrokes must reach the dispatcher one byte at a time, without echo
//! and without the line discipline turning Ctrl+C into SIGINT. Raw mode is
//! only set up when stdin is a terminal, so piped input (for example
//! `TERM=dumb sh -i 2>&1 | typist`) works unchanged.

use std::io::{self, IsTerminal};

use nix::sys::termios::{self, SetArg, Termios};
use tracing::info;

use crate::error::{Result, TypistError};

/// RAII guard for raw terminal mode
///
/// Restores the saved terminal attributes when dropped, on every exit path.
#[derive(Debug)]
pub struct RawModeGuard {
    original: Option<Termios>,
}

impl RawModeGuard {
    /// Put stdin into raw mode if it is a terminal
    pub fn enable() -> Result<Self> {
        let stdin = io::stdin();
        if !stdin.is_terminal() {
            info!("stdin is not a terminal, leaving terminal mode alone");
            return Ok(Self { original: None });
        }

        let original = termios::tcgetattr(&stdin).map_err(TypistError::Termios)?;
        let mut raw = original.clone();
        termios::cfmakeraw(&mut raw);
        termios::tcsetattr(&stdin, SetArg::TCSANOW, &raw).map_err(TypistError::Termios)?;

        info!("stdin is a terminal, raw mode enabled");
        Ok(Self {
            original: Some(original),
        })
    }

    /// Whether raw mode was actually enabled
    pub fn is_active(&self) -> bool {
        self.original.is_some()
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Some(original) = self.original.take() {
            let _ = termios::tcsetattr(&io::stdin(), SetArg::TCSANOW, &original);
        }
    }
}
