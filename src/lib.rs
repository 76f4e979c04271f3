//! Typist
//!
//! Turns an interactive keystroke stream into ESC/P commands so a dot-matrix
//! printer in Epson emulation can act as a teletype or typewriter.
//!
//! - `input`: classifies keyboard bytes and cursor escape sequences
//! - `printer`: ESC/P commands, head position tracking, the device file
//! - `dispatch`: the event loop that drives the printer
//! - `source`: reader thread feeding the event loop one byte at a time
//! - `terminal`: raw mode for the controlling terminal
//! - `signals`: signal-driven shutdown
//! - `app`: configuration and logging

pub mod app;
pub mod dispatch;
pub mod error;
pub mod input;
pub mod printer;
pub mod signals;
pub mod source;
pub mod terminal;

pub use dispatch::{Dispatcher, Shutdown};
pub use error::{Result, TypistError};
