//! Command Dispatcher
//!
//! Ties the classifier and the head position together and is the only
//! writer to the printer. The loop waits for the next byte, a shutdown
//! signal, or the idle timeout, whichever comes first; the idle deadline
//! starts over on every wait.
//!
//! Each step writes its commands in order, one write per command, and
//! flushes before the next event is considered.

use std::io::Write;
use std::ops::ControlFlow;
use std::time::Duration;

use crossbeam_channel::{never, select, Receiver};
use tracing::{debug, info, trace, warn};

use crate::error::{Result, TypistError};
use crate::input::{Classification, Classifier, EscapeState, KeyAction};
use crate::printer::{HeadPosition, PrinterCommand};
use crate::signals::signal_name;
use crate::source::SourceEvent;

/// Why the dispatcher loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shutdown {
    /// Ctrl+C (ETX) was typed
    Cancelled,
    /// The input stream ended
    EndOfInput,
    /// A shutdown signal arrived
    Signal(i32),
}

/// Turns classified keyboard input into printer commands
#[derive(Debug)]
pub struct Dispatcher<W: Write> {
    classifier: Classifier,
    head: HeadPosition,
    sink: W,
}

impl<W: Write> Dispatcher<W> {
    /// Create a dispatcher writing to `sink`
    pub fn new(sink: W) -> Self {
        Self {
            classifier: Classifier::new(),
            head: HeadPosition::new(),
            sink,
        }
    }

    /// Current head position
    pub fn head(&self) -> HeadPosition {
        self.head
    }

    /// Current escape sequence state
    pub fn escape_state(&self) -> EscapeState {
        self.classifier.state()
    }

    pub fn sink(&self) -> &W {
        &self.sink
    }

    /// Give back the sink so it can be closed
    pub fn into_sink(self) -> W {
        self.sink
    }

    /// Handle one byte from the terminal.
    ///
    /// Returns `Break` when the byte ends the session.
    pub fn handle_byte(&mut self, byte: u8) -> Result<ControlFlow<Shutdown>> {
        debug!(
            "processing byte {:?}, dec {}, hex {:02x}, escape state {:?}",
            byte as char,
            byte,
            byte,
            self.classifier.state()
        );

        let action = match self.classifier.feed(byte) {
            Classification::Pending => return Ok(ControlFlow::Continue(())),
            Classification::Resolved(action) => action,
        };

        match action {
            KeyAction::Cancel => {
                info!("Got Ctrl+C, stopping");
                return Ok(ControlFlow::Break(Shutdown::Cancelled));
            },
            KeyAction::Printable(b) => {
                if let Some(feeds) = self.head.unpark() {
                    debug!("Scrolling back down before printing");
                    self.emit(&feeds)?;
                }
                self.emit(&[PrinterCommand::RawByte(b)])?;
            },
            KeyAction::UnknownEscape { second, last } => {
                warn!(
                    "Unknown escape sequence: ESC {:#04x} {:#04x}, ignoring",
                    second, last
                );
            },
            other => {
                debug!("{:?}", other);
                self.emit(other.direct_commands())?;
            },
        }

        self.flush()?;
        Ok(ControlFlow::Continue(()))
    }

    /// Handle the idle timeout: park the paper for reading if it isn't already
    pub fn handle_idle(&mut self) -> Result<()> {
        if let Some(feeds) = self.head.park() {
            debug!("Timed out, scrolling up");
            self.emit(&feeds)?;
            self.flush()?;
        }
        Ok(())
    }

    /// Run until the input ends, Ctrl+C is typed, or a signal arrives.
    ///
    /// Read and write failures are fatal and returned as errors.
    pub fn run(
        &mut self,
        input: &Receiver<SourceEvent>,
        signals: &Receiver<i32>,
        idle_timeout: Duration,
    ) -> Result<Shutdown> {
        let mut signals = signals.clone();

        loop {
            let mut signals_closed = false;
            select! {
                recv(input) -> event => match event {
                    Ok(SourceEvent::Byte(byte)) => {
                        if let ControlFlow::Break(shutdown) = self.handle_byte(byte)? {
                            return Ok(shutdown);
                        }
                    },
                    Ok(SourceEvent::Failed(e)) => return Err(TypistError::Read(e)),
                    Err(_) => {
                        info!("End of input, stopping");
                        return Ok(Shutdown::EndOfInput);
                    },
                },
                recv(signals) -> signal => match signal {
                    Ok(signal) => {
                        info!("Got {}, stopping", signal_name(signal));
                        return Ok(Shutdown::Signal(signal));
                    },
                    Err(_) => signals_closed = true,
                },
                default(idle_timeout) => self.handle_idle()?,
            }

            // Signal forwarding ended; keep serving input
            if signals_closed {
                signals = never();
            }
        }
    }

    fn emit(&mut self, commands: &[PrinterCommand]) -> Result<()> {
        for command in commands {
            trace!("writing {:?}", command);
            command.write_to(&mut self.sink).map_err(TypistError::Write)?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.sink.flush().map_err(TypistError::Write)
    }
}
