//! Integration tests for the dispatcher loop
//!
//! These tests drive `Dispatcher::run` through real channels, with short
//! idle timeouts standing in for the two-second default.

use std::io::{self, Cursor, Read};
use std::thread;
use std::time::Duration;

use crossbeam_channel::{bounded, never, Sender};

use typist::printer::PrinterCommand;
use typist::source::{ByteSource, SourceEvent};
use typist::{Dispatcher, Shutdown, TypistError};

const IDLE: Duration = Duration::from_millis(30);

fn encode(commands: &[PrinterCommand]) -> Vec<u8> {
    commands.iter().flat_map(|c| c.encode()).collect()
}

fn unpark() -> Vec<PrinterCommand> {
    vec![PrinterCommand::MicroReverseLineFeed(216); 2]
}

fn park() -> Vec<PrinterCommand> {
    vec![PrinterCommand::MicroLineFeed(216); 2]
}

/// Send bytes with a pause after each one
fn typist_thread(sender: Sender<SourceEvent>, keys: Vec<(u8, Duration)>) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        for (byte, pause) in keys {
            if sender.send(SourceEvent::Byte(byte)).is_err() {
                return;
            }
            thread::sleep(pause);
        }
    })
}

// ============================================================================
// Shutdown
// ============================================================================

#[test]
fn test_end_of_input() {
    let source = ByteSource::spawn(Cursor::new(b"hi".to_vec())).unwrap();
    let mut dispatcher = Dispatcher::new(Vec::new());

    let shutdown = dispatcher
        .run(source.receiver(), &never(), Duration::from_secs(60))
        .unwrap();

    assert_eq!(shutdown, Shutdown::EndOfInput);
    let mut expected = unpark();
    expected.extend([PrinterCommand::RawByte(b'h'), PrinterCommand::RawByte(b'i')]);
    assert_eq!(dispatcher.sink(), &encode(&expected));
}

#[test]
fn test_cancel_stops_before_remaining_input() {
    let source = ByteSource::spawn(Cursor::new(b"a\x03b".to_vec())).unwrap();
    let mut dispatcher = Dispatcher::new(Vec::new());

    let shutdown = dispatcher
        .run(source.receiver(), &never(), Duration::from_secs(60))
        .unwrap();

    assert_eq!(shutdown, Shutdown::Cancelled);
    let mut expected = unpark();
    expected.push(PrinterCommand::RawByte(b'a'));
    assert_eq!(dispatcher.sink(), &encode(&expected));
}

#[test]
fn test_cancel_mid_escape() {
    let source = ByteSource::spawn(Cursor::new(b"\x1b[\x03A".to_vec())).unwrap();
    let mut dispatcher = Dispatcher::new(Vec::new());

    let shutdown = dispatcher
        .run(source.receiver(), &never(), Duration::from_secs(60))
        .unwrap();

    assert_eq!(shutdown, Shutdown::Cancelled);
    assert!(dispatcher.sink().is_empty());
}

#[test]
fn test_reader_is_left_running_after_cancel() {
    // The reader is not joined: after Ctrl+C it stays blocked handing over
    // the byte it already read, until the receiver is dropped.
    let source = ByteSource::spawn(Cursor::new(b"\x03zz".to_vec())).unwrap();
    let mut dispatcher = Dispatcher::new(Vec::new());

    let shutdown = dispatcher
        .run(source.receiver(), &never(), Duration::from_secs(60))
        .unwrap();
    assert_eq!(shutdown, Shutdown::Cancelled);

    thread::sleep(Duration::from_millis(50));
    assert!(!source.is_finished());
}

#[test]
fn test_signal_stops_loop() {
    let (_input_tx, input_rx) = bounded::<SourceEvent>(0);
    let (signal_tx, signal_rx) = bounded(1);
    signal_tx.send(15).unwrap();

    let mut dispatcher = Dispatcher::new(Vec::new());
    let shutdown = dispatcher.run(&input_rx, &signal_rx, IDLE).unwrap();

    assert_eq!(shutdown, Shutdown::Signal(15));
    assert!(dispatcher.sink().is_empty());
}

#[test]
fn test_closed_signal_channel_is_ignored() {
    let (signal_tx, signal_rx) = bounded::<i32>(1);
    drop(signal_tx);

    let source = ByteSource::spawn(Cursor::new(b"\x1b[C\x03".to_vec())).unwrap();
    let mut dispatcher = Dispatcher::new(Vec::new());
    let shutdown = dispatcher.run(source.receiver(), &signal_rx, IDLE).unwrap();

    assert_eq!(shutdown, Shutdown::Cancelled);
    assert_eq!(dispatcher.sink(), &encode(&[PrinterCommand::Space]));
}

// ============================================================================
// Fatal errors
// ============================================================================

struct FailingReader;

impl Read for FailingReader {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::Other, "tty gone"))
    }
}

struct UnpluggedPrinter;

impl io::Write for UnpluggedPrinter {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "printer unplugged"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_read_failure_is_fatal() {
    let source = ByteSource::spawn(FailingReader).unwrap();
    let mut dispatcher = Dispatcher::new(Vec::new());

    let err = dispatcher
        .run(source.receiver(), &never(), Duration::from_secs(60))
        .unwrap_err();

    assert!(matches!(err, TypistError::Read(_)));
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn test_write_failure_is_fatal() {
    let source = ByteSource::spawn(Cursor::new(b"x".to_vec())).unwrap();
    let mut dispatcher = Dispatcher::new(UnpluggedPrinter);

    let err = dispatcher
        .run(source.receiver(), &never(), Duration::from_secs(60))
        .unwrap_err();

    assert!(matches!(err, TypistError::Write(_)));
}

// ============================================================================
// Idle timer
// ============================================================================

#[test]
fn test_idle_parks_after_typing() {
    let (tx, rx) = bounded(0);
    let typist = typist_thread(tx, vec![(b'a', IDLE * 5), (0x03, Duration::ZERO)]);

    let mut dispatcher = Dispatcher::new(Vec::new());
    let shutdown = dispatcher.run(&rx, &never(), IDLE).unwrap();
    typist.join().unwrap();

    assert_eq!(shutdown, Shutdown::Cancelled);
    // Several timeouts pass during the pause; only the first one feeds
    let mut expected = unpark();
    expected.push(PrinterCommand::RawByte(b'a'));
    expected.extend(park());
    assert_eq!(dispatcher.sink(), &encode(&expected));
    assert!(dispatcher.head().is_scrolled_up());
}

#[test]
fn test_typing_after_idle_reconciles() {
    let (tx, rx) = bounded(0);
    let typist = typist_thread(
        tx,
        vec![
            (b'a', IDLE * 5),
            (b'b', Duration::ZERO),
            (0x03, Duration::ZERO),
        ],
    );

    let mut dispatcher = Dispatcher::new(Vec::new());
    dispatcher.run(&rx, &never(), IDLE).unwrap();
    typist.join().unwrap();

    let mut expected = unpark();
    expected.push(PrinterCommand::RawByte(b'a'));
    expected.extend(park());
    expected.extend(unpark());
    expected.push(PrinterCommand::RawByte(b'b'));
    assert_eq!(dispatcher.sink(), &encode(&expected));
    assert!(!dispatcher.head().is_scrolled_up());
}

#[test]
fn test_idle_from_start_writes_nothing() {
    let (tx, rx) = bounded(0);
    let typist = typist_thread(tx, vec![(b'\r', IDLE * 4), (0x03, Duration::ZERO)]);

    let mut dispatcher = Dispatcher::new(Vec::new());
    dispatcher.run(&rx, &never(), IDLE).unwrap();
    typist.join().unwrap();

    // Starts scrolled up and Enter doesn't reconcile, so the timer has nothing to do
    assert_eq!(
        dispatcher.sink(),
        &encode(&[
            PrinterCommand::MicroLineFeed(36),
            PrinterCommand::CarriageReturn
        ])
    );
}

#[test]
fn test_steady_typing_never_parks() {
    let (tx, rx) = bounded(0);
    let keys = b"hello"
        .iter()
        .map(|&b| (b, IDLE / 3))
        .chain([(0x03, Duration::ZERO)])
        .collect();
    let typist = typist_thread(tx, keys);

    let mut dispatcher = Dispatcher::new(Vec::new());
    dispatcher.run(&rx, &never(), IDLE * 10).unwrap();
    typist.join().unwrap();

    let mut expected = unpark();
    expected.extend(b"hello".iter().map(|&b| PrinterCommand::RawByte(b)));
    assert_eq!(dispatcher.sink(), &encode(&expected));
}
