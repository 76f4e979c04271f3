//! Key actions produced by the classifier

use crate::printer::{PrinterCommand, LINE_FEED_STEP};

/// What a byte (or completed sequence) from the keyboard means
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// ESC ? A
    CursorUp,
    /// ESC ? B
    CursorDown,
    /// ESC ? D
    CursorLeft,
    /// ESC ? C
    CursorRight,
    /// A complete three-byte escape sequence with an unrecognised final byte
    UnknownEscape {
        /// Byte following ESC
        second: u8,
        /// Final byte
        last: u8,
    },
    /// Carriage return (0x0D)
    Enter,
    /// ETX / Ctrl+C (0x03)
    Cancel,
    /// Any other byte, printed as-is
    Printable(u8),
}

/// Result of feeding one byte to the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Part of an escape sequence that isn't complete yet
    Pending,
    /// A complete action; the classifier is idle again
    Resolved(KeyAction),
}

impl KeyAction {
    /// Printer commands for actions that bypass head reconciliation.
    ///
    /// `Printable` and `Cancel` are handled by the dispatcher and map to
    /// nothing here, as does an unknown escape sequence.
    pub fn direct_commands(&self) -> &'static [PrinterCommand] {
        const UP: &[PrinterCommand] = &[PrinterCommand::MicroReverseLineFeed(LINE_FEED_STEP)];
        const DOWN: &[PrinterCommand] = &[PrinterCommand::MicroLineFeed(LINE_FEED_STEP)];
        const LEFT: &[PrinterCommand] = &[PrinterCommand::Backspace];
        const RIGHT: &[PrinterCommand] = &[PrinterCommand::Space];
        const ENTER: &[PrinterCommand] = &[
            PrinterCommand::MicroLineFeed(LINE_FEED_STEP),
            PrinterCommand::CarriageReturn,
        ];

        match self {
            KeyAction::CursorUp => UP,
            KeyAction::CursorDown => DOWN,
            KeyAction::CursorLeft => LEFT,
            KeyAction::CursorRight => RIGHT,
            KeyAction::Enter => ENTER,
            KeyAction::UnknownEscape { .. } | KeyAction::Cancel | KeyAction::Printable(_) => &[],
        }
    }
}
