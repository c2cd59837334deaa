//! High-level error types

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Core protocol error: {0}")]
    Core(#[from] vauban_core::Error),

    #[error("Transport error: {0}")]
    Transport(#[from] vauban_transport::Error),

    #[error("Type error: {0}")]
    Types(#[from] vauban_types::Error),

    #[error("Transport closed")]
    TransportClosed,

    #[error("Read service already running")]
    ReadServiceAlreadyRunning,
}
