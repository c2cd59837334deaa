//! Transport errors

use std::io;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Port path does not exist on this host
    #[error("Invalid interface {0}: no such port")]
    PortNotFound(String),

    /// Port exists but could not be opened
    #[error("Could not open interface {path}, maybe busy? ({source})")]
    PortBusy {
        path: String,
        #[source]
        source: tokio_serial::Error,
    },

    /// Stream reached end of input
    #[error("Transport closed")]
    Closed,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
