//! Error types for vauban-core

/// Result type alias for vauban operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core protocol errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Frame or payload is too short to be valid
    #[error("Frame too short: expected at least {expected} bytes, got {actual} bytes")]
    FrameTooShort {
        expected: usize,
        actual: usize,
    },

    /// A wire byte that should be an ASCII hex digit is not one
    #[error("Invalid hex digit on the wire: 0x{0:02X}")]
    InvalidHexDigit(u8),

    /// Inbound opcode with no registered handler
    #[error("Unknown opcode: 0x{0:02X}")]
    UnknownOpcode(u8),

    /// Invalid link state transition
    #[error("Invalid link state: {0}")]
    InvalidLinkState(String),
}

impl Error {
    /// Check if the error only affects a single frame.
    ///
    /// Recoverable errors are handled by dropping the offending frame;
    /// the read loop keeps running.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::FrameTooShort { .. }
                | Self::InvalidHexDigit(_)
                | Self::UnknownOpcode(_)
        )
    }
}
