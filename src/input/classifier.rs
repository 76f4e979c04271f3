//! Escape Sequence Classifier
//!
//! A three-state machine that turns raw keyboard bytes into key actions.
//! Terminals send cursor keys as three bytes (`ESC [ A` or `ESC O A`); the
//! byte after ESC is remembered but not checked, only the final byte decides
//! the action.
//!
//! States:
//! - Idle: Normal input, bytes are printable unless they are controls
//! - SawEsc: After ESC, waiting for the second byte
//! - SawEscPlusOne: After ESC and one more byte, waiting for the final byte
//!
//! ETX and CR are recognised in every state and drop a partial sequence. ESC
//! always restarts the sequence, whatever was collected before.

use tracing::trace;

use super::action::{Classification, KeyAction};
use crate::printer::ESC;

/// ETX, sent by Ctrl+C in raw mode
pub const CANCEL: u8 = 0x03;

/// CR, sent by the Enter key in raw mode
pub const ENTER: u8 = 0x0D;

/// Progress through an escape sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EscapeState {
    #[default]
    Idle,
    SawEsc,
    /// Holds the byte that followed ESC
    SawEscPlusOne(u8),
}

/// The keyboard byte classifier
#[derive(Debug, Default)]
pub struct Classifier {
    state: EscapeState,
}

impl Classifier {
    /// Create a classifier in the idle state
    pub fn new() -> Self {
        Self {
            state: EscapeState::Idle,
        }
    }

    /// Current escape sequence state
    pub fn state(&self) -> EscapeState {
        self.state
    }

    /// Drop any partial sequence
    pub fn reset(&mut self) {
        self.state = EscapeState::Idle;
    }

    /// Process a single byte
    pub fn feed(&mut self, byte: u8) -> Classification {
        match byte {
            CANCEL => return self.resolve(KeyAction::Cancel),
            ENTER => return self.resolve(KeyAction::Enter),
            ESC => {
                if self.state != EscapeState::Idle {
                    trace!("ESC restarts partial sequence {:?}", self.state);
                }
                self.state = EscapeState::SawEsc;
                return Classification::Pending;
            },
            _ => {},
        }

        match self.state {
            EscapeState::Idle => Classification::Resolved(KeyAction::Printable(byte)),
            EscapeState::SawEsc => {
                self.state = EscapeState::SawEscPlusOne(byte);
                Classification::Pending
            },
            EscapeState::SawEscPlusOne(second) => {
                let action = match byte {
                    b'A' => KeyAction::CursorUp,
                    b'B' => KeyAction::CursorDown,
                    b'C' => KeyAction::CursorRight,
                    b'D' => KeyAction::CursorLeft,
                    last => KeyAction::UnknownEscape { second, last },
                };
                self.resolve(action)
            },
        }
    }

    /// Process a chunk of bytes, returning the resolved actions
    pub fn feed_all(&mut self, data: &[u8]) -> Vec<KeyAction> {
        data.iter()
            .filter_map(|&byte| match self.feed(byte) {
                Classification::Resolved(action) => Some(action),
                Classification::Pending => None,
            })
            .collect()
    }

    fn resolve(&mut self, action: KeyAction) -> Classification {
        self.state = EscapeState::Idle;
        Classification::Resolved(action)
    }
}
