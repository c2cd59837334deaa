//! Vauban wire frame encoding and decoding

use bytes::{BufMut, Bytes, BytesMut};
use std::fmt;

use crate::{
    checksum,
    command::Command,
    constants::{DEVICE_ID_DIGITS, ETX, MIN_FRAME_LEN, STX},
    error::{Error, Result},
};

/// Declared width of a numeric frame field, in logical bytes.
///
/// Width only controls padding: a `Two` field shorter than two hex digits
/// is left-padded with one `'0'`. Values wider than the declared width are
/// transmitted in full; staying in range is the caller's contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldWidth {
    One,
    Two,
}

/// Decoded inbound frame
///
/// # Wire layout
///
/// ```text
/// ┌──────┬──────────────┬──────────┬──────────────┬───────────┬──────┐
/// │ STX  │  Device id   │  Opcode  │   Payload    │ Checksum  │ ETX  │
/// │ 0x02 │ 4 hex-ASCII  │ 1 raw    │ hex-ASCII    │ 2 hex-    │ 0x03 │
/// │      │ digits       │ byte     │ digits       │ ASCII     │      │
/// └──────┴──────────────┴──────────┴──────────────┴───────────┴──────┘
/// ```
///
/// Every numeric field travels as uppercase ASCII hex digits, one wire
/// byte per digit; only STX, ETX and the opcode are raw binary.
///
/// # Examples
///
/// ```
/// use vauban_core::{Command, Frame, FrameBuilder};
///
/// let wire = FrameBuilder::new(1, Command::Polling).finish();
/// let frame = Frame::decode(&wire).unwrap();
/// assert_eq!(frame.device_id, 1);
/// assert_eq!(frame.opcode, u8::from(Command::Polling));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Frame {
    /// Terminal the frame came from
    pub device_id: u16,

    /// Raw opcode byte (an ASCII letter code for inbound status frames)
    pub opcode: u8,

    /// Raw tail from offset 6 onward. The trailing checksum pair and ETX
    /// are part of this tail; trimming them is the consumer's concern.
    pub payload: Bytes,
}

impl Frame {
    /// Decode a complete STX..ETX wire frame.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Fewer than 5 bytes are present
    /// - A device id byte is not an ASCII hex digit
    ///
    /// The checksum is not re-verified here; see [`checksum::verify`].
    pub fn decode(buf: &[u8]) -> Result<Self> {
        if buf.len() < MIN_FRAME_LEN {
            return Err(Error::FrameTooShort {
                expected: MIN_FRAME_LEN,
                actual: buf.len(),
            });
        }

        let mut device_id: u16 = 0;
        for &digit in &buf[1..1 + DEVICE_ID_DIGITS] {
            device_id = (device_id << 4) | u16::from(hex_value(digit)?);
        }

        let opcode = buf.get(1 + DEVICE_ID_DIGITS).copied().ok_or(Error::FrameTooShort {
            expected: MIN_FRAME_LEN + 1,
            actual: buf.len(),
        })?;

        let payload = Bytes::copy_from_slice(buf.get(2 + DEVICE_ID_DIGITS..).unwrap_or_default());

        Ok(Self {
            device_id,
            opcode,
            payload,
        })
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frame")
            .field("device_id", &format!("0x{:04X}", self.device_id))
            .field("opcode", &format!("0x{:02X}", self.opcode))
            .field("payload_len", &self.payload.len())
            .finish()
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Frame[0x{:02X}](device={}, len={})",
            self.opcode,
            self.device_id,
            self.payload.len()
        )
    }
}

/// Outbound frame builder
///
/// Fields are serialized independently, in declaration order, then
/// assembled into a wire frame by [`finish`](Self::finish).
///
/// # Examples
///
/// ```
/// use vauban_core::{Command, FieldWidth, FrameBuilder};
///
/// let wire = FrameBuilder::new(1, Command::Bip)
///     .field(1, FieldWidth::One)
///     .field(500, FieldWidth::Two)
///     .field(1, FieldWidth::One)
///     .finish();
///
/// assert_eq!(wire[0], 0x02);
/// assert_eq!(*wire.last().unwrap(), 0x03);
/// ```
#[derive(Debug)]
pub struct FrameBuilder {
    device_id: u16,
    opcode: Command,
    body: BytesMut,
}

impl FrameBuilder {
    /// Start a frame for one device and opcode.
    pub fn new(device_id: u16, opcode: Command) -> Self {
        Self {
            device_id,
            opcode,
            body: BytesMut::new(),
        }
    }

    /// Append a numeric field as uppercase hex-ASCII digits.
    pub fn field(mut self, value: u16, width: FieldWidth) -> Self {
        let mut digits = format!("{value:X}");
        if width == FieldWidth::Two && digits.len() < 2 {
            digits.insert(0, '0');
        }
        self.body.put_slice(digits.as_bytes());
        self
    }

    /// Append raw bytes without hex expansion.
    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.body.put_slice(bytes);
        self
    }

    /// Assemble the complete wire frame.
    ///
    /// Layout: STX, device id as 4 zero-padded hex-ASCII digits, the raw
    /// opcode byte, the field payload, the checksum over everything since
    /// STX as 2 hex-ASCII digits, ETX.
    pub fn finish(self) -> BytesMut {
        let mut frame = BytesMut::with_capacity(self.body.len() + 9);

        frame.put_u8(STX);
        frame.put_slice(format!("{:04X}", self.device_id).as_bytes());
        frame.put_u8(self.opcode.into());
        frame.put_slice(&self.body);

        let control = checksum::calculate(&frame[1..]);
        frame.put_slice(&checksum::encode(control));
        frame.put_u8(ETX);

        frame
    }
}

fn hex_value(byte: u8) -> Result<u8> {
    match byte {
        b'0'..=b'9' => Ok(byte - b'0'),
        b'A'..=b'F' => Ok(byte - b'A' + 10),
        b'a'..=b'f' => Ok(byte - b'a' + 10),
        _ => Err(Error::InvalidHexDigit(byte)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn test_field_width_padding() {
        let wire = FrameBuilder::new(1, Command::Led)
            .field(5, FieldWidth::Two)
            .finish();

        // STX + "0001" + opcode, then the padded field
        assert_eq!(&wire[6..8], b"05");
    }

    #[test]
    fn test_field_width_one_no_truncation() {
        let wire = FrameBuilder::new(1, Command::Led)
            .field(255, FieldWidth::One)
            .finish();

        assert_eq!(&wire[6..8], b"FF");
    }

    #[test]
    fn test_field_three_digits() {
        let wire = FrameBuilder::new(1, Command::Led)
            .field(500, FieldWidth::Two)
            .finish();

        assert_eq!(&wire[6..9], b"1F4");
    }

    #[test]
    fn test_device_id_zero_padded() {
        let wire = FrameBuilder::new(0x0A2F, Command::Polling).finish();
        assert_eq!(&wire[1..5], b"0A2F");

        let wire = FrameBuilder::new(1, Command::Polling).finish();
        assert_eq!(&wire[1..5], b"0001");
    }

    #[test]
    fn test_opcode_raw_byte() {
        let wire = FrameBuilder::new(1, Command::Led).finish();
        assert_eq!(wire[5], 0x44);
    }

    #[test]
    fn test_led_frame_byte_exact() {
        // red=0, green=255, blue=0, duration=500, repeat=1
        let wire = FrameBuilder::new(1, Command::Led)
            .field(0, FieldWidth::Two)
            .field(255, FieldWidth::Two)
            .field(0, FieldWidth::Two)
            .field(500, FieldWidth::Two)
            .field(1, FieldWidth::One)
            .finish();

        let expected: &[u8] = &[
            0x02, // STX
            b'0', b'0', b'0', b'1', // device id
            0x44, // raw LED opcode
            b'0', b'0', b'F', b'F', b'0', b'0', b'1', b'F', b'4', b'1', // fields
            b'3', b'7', // XOR checksum, hex-ASCII
            0x03, // ETX
        ];
        assert_eq!(&wire[..], expected);

        // The round trip recovers the repeat field.
        let frame = Frame::decode(&wire).unwrap();
        assert_eq!(frame.device_id, 1);
        assert_eq!(frame.opcode, u8::from(Command::Led));
        assert_eq!(frame.payload[9], b'1');
    }

    #[test]
    fn test_checksum_invariant() {
        let wire = FrameBuilder::new(0x0203, Command::Bip)
            .field(1, FieldWidth::One)
            .field(200, FieldWidth::Two)
            .field(3, FieldWidth::One)
            .finish();

        let body = &wire[1..wire.len() - 3];
        let pair = &wire[wire.len() - 3..wire.len() - 1];
        assert_eq!(&checksum::encode(checksum::calculate(body))[..], pair);
    }

    #[test]
    fn test_raw_passthrough() {
        let wire = FrameBuilder::new(1, Command::Enrollment)
            .raw(b"\x10\x20")
            .finish();

        assert_eq!(&wire[6..8], &[0x10, 0x20]);
    }

    #[test]
    fn test_decode_too_short() {
        let result = Frame::decode(&[0x02, b'0', b'0']);
        assert!(matches!(result, Err(Error::FrameTooShort { .. })));
    }

    #[test]
    fn test_decode_invalid_hex_digit() {
        let result = Frame::decode(&[0x02, b'0', b'G', b'0', b'1', 0x44, 0x03]);
        assert!(matches!(result, Err(Error::InvalidHexDigit(b'G'))));
    }

    #[test]
    fn test_decode_payload_keeps_tail() {
        let wire = FrameBuilder::new(1, Command::Polling).finish();
        let frame = Frame::decode(&wire).unwrap();

        // The raw tail still carries the checksum pair and ETX.
        assert_eq!(frame.payload.len(), 3);
        assert_eq!(*frame.payload.last().unwrap(), ETX);
    }

    #[test]
    fn test_decode_lowercase_device_id() {
        let frame = Frame::decode(&[0x02, b'0', b'a', b'2', b'f', b'E', 0x03]).unwrap();
        assert_eq!(frame.device_id, 0x0A2F);
    }

    proptest! {
        #[test]
        fn roundtrip_device_id_and_opcode(id in 1u16.., value in 0u16..=0x0FFF) {
            let wire = FrameBuilder::new(id, Command::Led)
                .field(value, FieldWidth::Two)
                .finish();
            let frame = Frame::decode(&wire).unwrap();

            prop_assert_eq!(frame.device_id, id);
            prop_assert_eq!(frame.opcode, u8::from(Command::Led));
        }

        #[test]
        fn encoded_fields_are_ascii_hex(value in 0u16.., id in 1u16..) {
            let wire = FrameBuilder::new(id, Command::Bip)
                .field(value, FieldWidth::Two)
                .finish();

            // Everything between the opcode and ETX is ASCII hex digits.
            for &byte in &wire[6..wire.len() - 1] {
                prop_assert!(byte.is_ascii_hexdigit());
            }
        }
    }
}
