//! Signal-driven shutdown
//!
//! SIGINT, SIGTERM and SIGHUP are forwarded from a dedicated thread into
//! the dispatcher loop, which stops and lets the normal cleanup run
//! (device close, terminal restore).

use std::io;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{bounded, Receiver};
use signal_hook::consts::signal::{SIGHUP, SIGINT, SIGTERM};
use signal_hook::iterator::{Handle, Signals};
use tracing::debug;

/// Signals that end the session
pub const SHUTDOWN_SIGNALS: [i32; 3] = [SIGINT, SIGTERM, SIGHUP];

/// Owns the signal forwarding thread
pub struct SignalGuard {
    handle: Handle,
    thread: Option<JoinHandle<()>>,
    receiver: Receiver<i32>,
}

impl SignalGuard {
    /// Register the shutdown signals and start forwarding them
    pub fn install() -> io::Result<Self> {
        let mut signals = Signals::new(SHUTDOWN_SIGNALS)?;
        let handle = signals.handle();
        let (tx, receiver) = bounded(1);

        let thread = thread::Builder::new()
            .name("typist-signals".to_string())
            .spawn(move || {
                for signal in signals.forever() {
                    debug!("Received signal {}", signal);
                    // One pending shutdown request is enough
                    let _ = tx.try_send(signal);
                }
            })?;

        Ok(Self {
            handle,
            thread: Some(thread),
            receiver,
        })
    }

    /// Channel the received signal numbers arrive on
    pub fn receiver(&self) -> &Receiver<i32> {
        &self.receiver
    }
}

impl Drop for SignalGuard {
    fn drop(&mut self) {
        self.handle.close();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

/// Human-readable name for a signal number
pub fn signal_name(signal: i32) -> String {
    nix::sys::signal::Signal::try_from(signal)
        .map(|s| s.as_str().to_string())
        .unwrap_or_else(|_| format!("signal {}", signal))
}
