//! Serial-port transport
//!
//! Vauban terminals hang off an RS-232 line with firmware-fixed settings:
//! 19200 baud, 8 data bits, no parity, one stop bit.

use std::path::Path;

use tokio::io::{ReadHalf, WriteHalf};
use tokio_serial::{DataBits, Parity, SerialPortBuilderExt, SerialStream, StopBits};
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Line speed mandated by the terminal firmware
pub const BAUD_RATE: u32 = 19_200;

/// An open serial connection to one terminal.
pub struct SerialLink {
    path: String,
    stream: SerialStream,
}

impl SerialLink {
    /// Open `path` with the fixed Vauban line settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PortNotFound`] when the path does not exist and
    /// [`Error::PortBusy`] when it exists but cannot be opened (typically
    /// already held by another process).
    pub fn open(path: impl Into<String>) -> Result<Self> {
        let path = path.into();

        if !Path::new(&path).exists() {
            return Err(Error::PortNotFound(path));
        }

        debug!("Opening {} at {} baud", path, BAUD_RATE);

        let mut stream = tokio_serial::new(&path, BAUD_RATE)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .data_bits(DataBits::Eight)
            .open_native_async()
            .map_err(|source| Error::PortBusy {
                path: path.clone(),
                source,
            })?;

        #[cfg(unix)]
        if let Err(e) = stream.set_exclusive(false) {
            warn!("Unable to clear exclusive flag on {}: {}", path, e);
        }

        Ok(Self { path, stream })
    }

    /// Port path this link was opened on.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Split into reader and writer halves.
    ///
    /// The reader half feeds the read service; the writer half stays with
    /// the device owner for outbound commands.
    pub fn split(self) -> (ReadHalf<SerialStream>, WriteHalf<SerialStream>) {
        tokio::io::split(self.stream)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_missing_port() {
        let result = SerialLink::open("/dev/ttyVAUBAN99");
        assert!(matches!(result, Err(Error::PortNotFound(_))));
    }

    // Note: opening a real port requires hardware on the bench
    // #[test]
    // fn test_open_real_port() {
    //     let link = SerialLink::open("/dev/ttyUSB0").unwrap();
    //     assert_eq!(link.path(), "/dev/ttyUSB0");
    // }
}
