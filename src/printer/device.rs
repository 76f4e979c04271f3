//! Printer device file

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{Result, TypistError};

/// Default printer device on Linux
pub const DEFAULT_DEVICE_PATH: &str = "/dev/usb/lp0";

/// An open printer device
///
/// The device is closed when this value is dropped; [`PrinterDevice::close`]
/// flushes first and reports a failure instead of swallowing it.
#[derive(Debug)]
pub struct PrinterDevice {
    file: File,
    path: PathBuf,
}

impl PrinterDevice {
    /// Open the device for writing
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)
            .map_err(|source| TypistError::OpenDevice {
                path: path.clone(),
                source,
            })?;

        info!("Opened printer device {}", path.display());
        Ok(Self { file, path })
    }

    /// Path the device was opened from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flush and close the device
    pub fn close(mut self) -> Result<()> {
        self.file.flush().map_err(TypistError::Write)?;
        debug!("Closed printer device {}", self.path.display());
        Ok(())
    }
}

impl Write for PrinterDevice {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}
