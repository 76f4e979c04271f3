//! Byte source
//!
//! Reads the terminal one byte at a time on a dedicated thread and hands
//! each byte to the dispatcher through a rendezvous channel. The reader
//! can't fetch byte N+1 until the dispatcher has taken byte N.
//!
//! The reader thread is not joined on shutdown. A blocking read can't be
//! interrupted portably, so the thread is left to finish its current read;
//! the following send fails because the dispatcher dropped its receiver,
//! and the thread exits.

use std::io::{self, Read};
use std::thread::{self, JoinHandle};

use crossbeam_channel::{bounded, Receiver, Sender};
use tracing::debug;

/// Event delivered by the reader thread
#[derive(Debug)]
pub enum SourceEvent {
    /// One byte from the terminal
    Byte(u8),
    /// The read failed; no more events follow
    Failed(io::Error),
}

/// Reader thread feeding the dispatcher
#[derive(Debug)]
pub struct ByteSource {
    receiver: Receiver<SourceEvent>,
    handle: JoinHandle<()>,
}

impl ByteSource {
    /// Spawn the reader thread over `reader`.
    ///
    /// End of input closes the channel.
    pub fn spawn<R>(reader: R) -> io::Result<Self>
    where
        R: Read + Send + 'static,
    {
        let (sender, receiver) = bounded(0);
        let handle = thread::Builder::new()
            .name("typist-reader".to_string())
            .spawn(move || read_bytes(reader, sender))?;

        Ok(Self { receiver, handle })
    }

    /// Channel the bytes arrive on
    pub fn receiver(&self) -> &Receiver<SourceEvent> {
        &self.receiver
    }

    /// Whether the reader thread has exited
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

fn read_bytes<R: Read>(mut reader: R, sender: Sender<SourceEvent>) {
    let mut buf = [0u8; 1];
    loop {
        let event = match reader.read(&mut buf) {
            Ok(0) => {
                debug!("End of input");
                return;
            },
            Ok(_) => {
                let byte = buf[0];
                debug!("read byte {:?}, dec {}, hex {:02x}", byte as char, byte, byte);
                SourceEvent::Byte(byte)
            },
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => SourceEvent::Failed(e),
        };

        let failed = matches!(event, SourceEvent::Failed(_));
        if sender.send(event).is_err() {
            debug!("Dispatcher is gone, reader exiting");
            return;
        }
        if failed {
            return;
        }
    }
}
