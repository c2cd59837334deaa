//! Vauban frame checksum
//!
//! The control frame is the XOR reduction of every byte between STX and
//! the checksum field itself: the 4 hex-ASCII device id bytes, the raw
//! opcode byte, and the hex-ASCII payload bytes. It travels as two
//! uppercase ASCII hex digits, one wire byte per digit.

use tracing::trace;

/// XOR-reduce a frame body.
///
/// # Examples
///
/// ```
/// use vauban_core::checksum;
///
/// assert_eq!(checksum::calculate(&[0x30, 0x31]), 0x01);
/// assert_eq!(checksum::calculate(&[]), 0x00);
/// ```
pub fn calculate(body: &[u8]) -> u8 {
    let checksum = body.iter().fold(0, |acc, byte| acc ^ byte);

    trace!(
        body_len = body.len(),
        checksum = format!("0x{:02X}", checksum),
        "Calculated checksum"
    );

    checksum
}

/// Render a checksum as its two-byte ASCII hex-digit wire form.
///
/// Always uppercase, always zero-padded to two digits.
pub fn encode(value: u8) -> [u8; 2] {
    let rendered = hex::encode_upper([value]);
    let digits = rendered.as_bytes();
    [digits[0], digits[1]]
}

/// Verify a received checksum pair against a frame body.
///
/// The decode path does not call this; terminals in the field ship frames
/// with valid checksums and the reference stack trusts them. It is left to
/// the access-check collaborator as an optional hardening step.
pub fn verify(body: &[u8], received: &[u8; 2]) -> bool {
    encode(calculate(body)) == *received
}
