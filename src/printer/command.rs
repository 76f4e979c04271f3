//! ESC/P printer commands
//!
//! The small subset of the Epson ESC/P command set needed to drive a
//! dot-matrix printer as a teletype. Vertical motion uses micro line feeds
//! measured in 1/216 inch.
//!
//! # References
//!
//! - ESC J n: advance paper n/216 inch
//! - ESC j n: reverse paper feed n/216 inch
//! - <https://whitefiles.org/dta/pgs/c03c_prntr_cds.pdf>

use std::io::{self, Write};

/// Escape byte that introduces both terminal and printer sequences
pub const ESC: u8 = 0x1B;

/// Feed step for cursor keys and Enter (36/216 inch)
pub const LINE_FEED_STEP: u8 = 36;

/// Feed step used when parking the head for reading (216/216 inch)
pub const PARK_FEED_STEP: u8 = 216;

const MICRO_LINE_FEED: u8 = b'J';
const MICRO_REVERSE_LINE_FEED: u8 = b'j';

/// A single command for the printer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrinterCommand {
    /// A byte printed as-is
    RawByte(u8),
    /// Advance the paper by n/216 inch (`ESC J n`)
    MicroLineFeed(u8),
    /// Pull the paper back by n/216 inch (`ESC j n`)
    MicroReverseLineFeed(u8),
    /// Return the carriage to the left margin (0x0D)
    CarriageReturn,
    /// Move the head back one column (0x08)
    Backspace,
    /// Move the head forward one column by printing a blank (0x20)
    Space,
}

impl PrinterCommand {
    /// Encode the command into the bytes sent to the printer
    pub fn encode(&self) -> Vec<u8> {
        match *self {
            PrinterCommand::RawByte(b) => vec![b],
            PrinterCommand::MicroLineFeed(n) => vec![ESC, MICRO_LINE_FEED, n],
            PrinterCommand::MicroReverseLineFeed(n) => vec![ESC, MICRO_REVERSE_LINE_FEED, n],
            PrinterCommand::CarriageReturn => vec![0x0D],
            PrinterCommand::Backspace => vec![0x08],
            PrinterCommand::Space => vec![0x20],
        }
    }

    /// Issue the command as one write on `writer`
    pub fn write_to<W: Write + ?Sized>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(&self.encode())
    }

    /// Check if this command moves the paper
    pub fn is_feed(&self) -> bool {
        matches!(
            self,
            PrinterCommand::MicroLineFeed(_) | PrinterCommand::MicroReverseLineFeed(_)
        )
    }
}
