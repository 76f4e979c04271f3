//! Typist
//!
//! Reads keystrokes from the terminal and types them on a dot-matrix printer.
//!
//! # Usage
//!
//! ```bash
//! # Use the printer as a typewriter
//! typist
//!
//! # Use it as a teletype for a shell
//! TERM=dumb /bin/sh -i 2>&1 | typist --device /dev/usb/lp0
//! ```

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use typist::app::{self, Config};
use typist::printer::PrinterDevice;
use typist::signals::SignalGuard;
use typist::source::ByteSource;
use typist::terminal::RawModeGuard;
use typist::{Dispatcher, Shutdown, TypistError};

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "typist", version, about = "Type on a dot-matrix printer like a teletype")]
struct Cli {
    /// Printer device to write ESC/P commands to [default: /dev/usb/lp0]
    #[arg(short, long)]
    device: Option<PathBuf>,

    /// Idle time in milliseconds before the paper is advanced for reading [default: 2000]
    #[arg(short = 't', long)]
    idle_timeout_ms: Option<u64>,

    /// JSON configuration file [default: ~/.config/typist/config.json]
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl Cli {
    /// Build the effective configuration: defaults, then the file, then flags
    fn resolve(&self) -> Result<Config, TypistError> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::load_or_default(),
        };
        if let Some(device) = &self.device {
            config.device_path = device.clone();
        }
        if let Some(ms) = self.idle_timeout_ms {
            config.idle_timeout_ms = ms;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> ExitCode {
    app::logging::init("warn");

    let cli = Cli::parse();

    match run(&cli) {
        Ok(Shutdown::Signal(signal)) => ExitCode::from(128u8.wrapping_add(signal as u8)),
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Fatal error: {}", e);
            eprintln!("typist: {}", e);
            ExitCode::from(e.exit_code())
        },
    }
}

/// Set up the scoped resources and run the dispatcher.
///
/// Guards are dropped in reverse order on every return path, so the
/// terminal is restored after the device is closed.
fn run(cli: &Cli) -> Result<Shutdown, TypistError> {
    let config = cli.resolve()?;
    info!("Starting typist with {:?}", config);

    let _raw_mode = RawModeGuard::enable()?;
    let device = PrinterDevice::open(&config.device_path)?;
    let signals = SignalGuard::install().map_err(TypistError::Signals)?;
    let source = ByteSource::spawn(io::stdin()).map_err(TypistError::Read)?;

    let mut dispatcher = Dispatcher::new(device);
    let shutdown = dispatcher.run(source.receiver(), signals.receiver(), config.idle_timeout())?;

    dispatcher.into_sink().close()?;
    info!("Stopped: {:?}", shutdown);
    Ok(shutdown)
}
