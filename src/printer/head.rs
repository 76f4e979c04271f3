//! Head position tracking
//!
//! Text that was just printed sits directly under the print head and can't
//! be read until the paper moves. After a period without input the paper is
//! advanced so the operator can read the last line ("scrolled up"), and it is
//! pulled back to the printing baseline before the next character is printed.

use std::time::Duration;

use super::command::{PrinterCommand, PARK_FEED_STEP};

/// Idle time after which the paper is advanced for reading
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(2);

/// Vertical position of the paper relative to the last printed line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadPosition {
    scrolled_up: bool,
}

impl Default for HeadPosition {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadPosition {
    /// Start out scrolled up so the first printed byte reconciles the paper
    pub fn new() -> Self {
        Self { scrolled_up: true }
    }

    /// Whether the paper is currently advanced for reading
    pub fn is_scrolled_up(&self) -> bool {
        self.scrolled_up
    }

    /// Advance the paper for reading after an idle period.
    ///
    /// Returns the feeds to issue, or `None` if the paper is already parked.
    pub fn park(&mut self) -> Option<[PrinterCommand; 2]> {
        if self.scrolled_up {
            return None;
        }
        self.scrolled_up = true;
        Some([PrinterCommand::MicroLineFeed(PARK_FEED_STEP); 2])
    }

    /// Pull the paper back to the printing baseline before printing.
    ///
    /// Returns the reverse feeds to issue ahead of the printed byte, or `None`
    /// if the paper is already at the baseline.
    pub fn unpark(&mut self) -> Option<[PrinterCommand; 2]> {
        if !self.scrolled_up {
            return None;
        }
        self.scrolled_up = false;
        Some([PrinterCommand::MicroReverseLineFeed(PARK_FEED_STEP); 2])
    }
}
