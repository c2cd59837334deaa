//! Byte-stream frame reassembly
//!
//! Terminals stream bytes with no length prefix; the only structure is the
//! STX/ETX delimiter pair. The accumulator turns that stream back into
//! discrete frames, one byte at a time.

use bytes::{BufMut, Bytes, BytesMut};
use tracing::trace;

use crate::constants::{ETX, STX};

/// Accumulation state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Between frames, discarding noise until STX
    Idle,

    /// Inside a frame, collecting until ETX
    Accumulating,
}

/// Reassembles STX..ETX frames from a continuous byte stream.
///
/// The accumulator owns its buffer exclusively; a finished frame is handed
/// to the caller and a fresh buffer takes its place. A stray ETX with no
/// preceding STX produces nothing.
///
/// # Examples
///
/// ```
/// use vauban_core::FrameAccumulator;
///
/// let mut acc = FrameAccumulator::new();
/// assert_eq!(acc.push(0x02), None);
/// assert_eq!(acc.push(b'A'), None);
/// let frame = acc.push(0x03).unwrap();
/// assert_eq!(&frame[..], &[0x02, b'A', 0x03]);
/// ```
#[derive(Debug)]
pub struct FrameAccumulator {
    state: State,
    buf: BytesMut,
}

impl FrameAccumulator {
    /// Create an accumulator in the idle state.
    pub fn new() -> Self {
        Self {
            state: State::Idle,
            buf: BytesMut::new(),
        }
    }

    /// Feed one byte from the stream.
    ///
    /// Returns the complete STX..ETX frame (delimiters included) when the
    /// byte finishes one, `None` otherwise.
    pub fn push(&mut self, byte: u8) -> Option<Bytes> {
        match self.state {
            State::Idle => {
                if byte == STX {
                    self.buf.put_u8(byte);
                    self.state = State::Accumulating;
                }
                // Anything else is inter-frame noise.
                None
            }
            State::Accumulating => {
                self.buf.put_u8(byte);
                if byte == ETX {
                    self.state = State::Idle;
                    let frame = self.buf.split().freeze();
                    trace!(len = frame.len(), "Frame complete");
                    Some(frame)
                } else {
                    None
                }
            }
        }
    }

    /// Number of bytes collected for the frame in flight.
    pub fn pending(&self) -> usize {
        self.buf.len()
    }
}

impl Default for FrameAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn feed(acc: &mut FrameAccumulator, bytes: &[u8]) -> Vec<Bytes> {
        bytes.iter().filter_map(|&b| acc.push(b)).collect()
    }

    #[test]
    fn test_single_frame() {
        let mut acc = FrameAccumulator::new();
        let frames = feed(&mut acc, &[0x02, b'0', b'0', b'0', b'1', b'P', 0x03]);

        assert_eq!(frames.len(), 1);
        assert_eq!(&frames[0][..], &[0x02, b'0', b'0', b'0', b'1', b'P', 0x03]);
    }

    #[test]
    fn test_stray_etx_ignored() {
        let mut acc = FrameAccumulator::new();
        let frames = feed(&mut acc, &[0x03, 0x03]);

        assert_eq!(frames.len(), 0);
        assert_eq!(acc.pending(), 0);
    }

    #[test]
    fn test_leading_noise_discarded() {
        let mut acc = FrameAccumulator::new();
        let frames = feed(&mut acc, &[0xAA, 0xBB, 0x03, 0x02, b'X', 0x03]);

        assert_eq!(frames.len(), 1);
        assert_eq!(&frames[0][..], &[0x02, b'X', 0x03]);
    }

    #[test]
    fn test_two_frames_back_to_back() {
        let mut acc = FrameAccumulator::new();
        let frames = feed(&mut acc, &[0x02, b'A', 0x03, 0x02, b'B', 0x03]);

        assert_eq!(frames.len(), 2);
        assert_eq!(&frames[0][..], &[0x02, b'A', 0x03]);
        assert_eq!(&frames[1][..], &[0x02, b'B', 0x03]);
    }

    #[test]
    fn test_partial_frame_stays_pending() {
        let mut acc = FrameAccumulator::new();
        let frames = feed(&mut acc, &[0x02, b'A', b'B']);

        assert_eq!(frames.len(), 0);
        assert_eq!(acc.pending(), 3);

        let frame = acc.push(0x03).unwrap();
        assert_eq!(&frame[..], &[0x02, b'A', b'B', 0x03]);
        assert_eq!(acc.pending(), 0);
    }

    #[test]
    fn test_repeated_stx_kept_in_frame() {
        // A second STX inside a frame is payload, not a restart.
        let mut acc = FrameAccumulator::new();
        let frames = feed(&mut acc, &[0x02, 0x02, b'A', 0x03]);

        assert_eq!(frames.len(), 1);
        assert_eq!(&frames[0][..], &[0x02, 0x02, b'A', 0x03]);
    }
}
