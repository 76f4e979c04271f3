//! Keyboard input classification
//!
//! Splits the raw byte stream from the terminal into printable bytes,
//! line-editing keys and cursor escape sequences.

mod action;
mod classifier;

pub use action::{Classification, KeyAction};
pub use classifier::{Classifier, EscapeState, CANCEL, ENTER};
