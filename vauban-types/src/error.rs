//! Type-level errors

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Device ids are strictly positive
    #[error("Invalid device id: {0}")]
    InvalidDeviceId(u16),
}
