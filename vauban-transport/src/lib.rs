//! Transport layer for Vauban terminals
//!
//! Provides the abstract duplex byte stream the protocol core runs over,
//! and its serial-port implementation.

pub mod error;
pub mod serial;

pub use error::{Error, Result};
pub use serial::SerialLink;

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::trace;

/// Reading half of a device transport.
///
/// Implemented for every async byte source, so tests can substitute an
/// in-memory pipe for the serial port.
#[async_trait]
pub trait TransportRead: Send {
    /// Pull one byte, waiting until it arrives.
    ///
    /// Fails with [`Error::Closed`] when the stream ends.
    async fn read_byte(&mut self) -> Result<u8>;
}

/// Writing half of a device transport.
#[async_trait]
pub trait TransportWrite: Send {
    /// Write the whole buffer and flush it out.
    async fn send(&mut self, data: &[u8]) -> Result<()>;
}

#[async_trait]
impl<T> TransportRead for T
where
    T: AsyncRead + Unpin + Send,
{
    async fn read_byte(&mut self) -> Result<u8> {
        let mut byte = [0u8; 1];
        let n = AsyncReadExt::read(self, &mut byte).await?;

        if n == 0 {
            return Err(Error::Closed);
        }

        Ok(byte[0])
    }
}

#[async_trait]
impl<T> TransportWrite for T
where
    T: AsyncWrite + Unpin + Send,
{
    async fn send(&mut self, data: &[u8]) -> Result<()> {
        trace!("Sending {} bytes: {:02X?}", data.len(), &data[..data.len().min(16)]);

        AsyncWriteExt::write_all(self, data).await?;
        AsyncWriteExt::flush(self).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_read_byte_from_pipe() {
        let (mut near, mut far) = tokio::io::duplex(16);

        TransportWrite::send(&mut near, &[0x02, 0x42]).await.unwrap();

        assert_eq!(far.read_byte().await.unwrap(), 0x02);
        assert_eq!(far.read_byte().await.unwrap(), 0x42);
    }

    #[tokio::test]
    async fn test_read_byte_closed_on_eof() {
        let (near, mut far) = tokio::io::duplex(16);
        drop(near);

        let result = far.read_byte().await;
        assert!(matches!(result, Err(Error::Closed)));
    }
}
