//! Printer side of the teletype
//!
//! - `command`: ESC/P command encoding
//! - `head`: head position tracking and reconciliation
//! - `device`: the printer device file

mod command;
mod device;
mod head;

pub use command::{PrinterCommand, ESC, LINE_FEED_STEP, PARK_FEED_STEP};
pub use device::{PrinterDevice, DEFAULT_DEVICE_PATH};
pub use head::{HeadPosition, DEFAULT_IDLE_TIMEOUT};
