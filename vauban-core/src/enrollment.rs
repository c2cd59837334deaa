//! Enrollment result payload decoding
//!
//! An enrollment frame's payload opens with one status character and, on
//! success, eight characters carrying the card identifier: four 2-character
//! groups transmitted least-significant group first. The terminal's card id
//! is those groups in reversed order, each group's internal order kept,
//! lower-cased. In other words, a byte-order reversal of a 4-byte value.

use tracing::debug;

use crate::error::{Error, Result};

/// Status character reporting a successful enrollment
const STATUS_SUCCEEDED: u8 = b'S';

/// Card id wire length: four 2-character groups
const CARD_ID_CHARS: usize = 8;

/// Outcome of an enrollment attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnrollmentOutcome {
    /// The terminal read a card; `card_id` is the reassembled identifier.
    Succeeded { card_id: String },

    /// The terminal reported a failure; no card id is available.
    Failed,
}

/// Decode an enrollment result payload.
///
/// Any status other than `'S'` is a failure and the rest of the payload is
/// not inspected. Trailing bytes past the card id (the frame's checksum
/// pair and ETX) are ignored.
///
/// # Errors
///
/// Returns `FrameTooShort` on an empty payload or a success payload with a
/// truncated card id.
///
/// # Examples
///
/// ```
/// use vauban_core::enrollment::{decode, EnrollmentOutcome};
///
/// let outcome = decode(b"S12345678").unwrap();
/// assert_eq!(
///     outcome,
///     EnrollmentOutcome::Succeeded { card_id: "78563412".into() }
/// );
/// ```
pub fn decode(payload: &[u8]) -> Result<EnrollmentOutcome> {
    let status = *payload.first().ok_or(Error::FrameTooShort {
        expected: 1,
        actual: 0,
    })?;

    debug!(status = %char::from(status), "Enrollment status");

    if status != STATUS_SUCCEEDED {
        return Ok(EnrollmentOutcome::Failed);
    }

    let groups = payload
        .get(1..1 + CARD_ID_CHARS)
        .ok_or(Error::FrameTooShort {
            expected: 1 + CARD_ID_CHARS,
            actual: payload.len(),
        })?;

    // Least-significant group arrives first: reverse the group order,
    // keep each group's internal character order.
    let mut card_id = String::with_capacity(CARD_ID_CHARS);
    for group in groups.chunks_exact(2).rev() {
        card_id.push(char::from(group[0]).to_ascii_lowercase());
        card_id.push(char::from(group[1]).to_ascii_lowercase());
    }

    Ok(EnrollmentOutcome::Succeeded { card_id })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_decode_success_reverses_groups() {
        let outcome = decode(b"S12345678").unwrap();
        assert_eq!(
            outcome,
            EnrollmentOutcome::Succeeded {
                card_id: "78563412".into()
            }
        );
    }

    #[test]
    fn test_decode_lowercases() {
        let outcome = decode(b"SABCD1234").unwrap();
        assert_eq!(
            outcome,
            EnrollmentOutcome::Succeeded {
                card_id: "3412cdab".into()
            }
        );
    }

    #[test]
    fn test_decode_failure_status() {
        assert_eq!(decode(b"F12345678").unwrap(), EnrollmentOutcome::Failed);

        // Failure short-circuits; the tail is never inspected.
        assert_eq!(decode(b"F").unwrap(), EnrollmentOutcome::Failed);
    }

    #[test]
    fn test_decode_ignores_frame_tail() {
        // Checksum pair and ETX trail the card id in a real payload.
        let outcome = decode(b"S12345678A7\x03").unwrap();
        assert_eq!(
            outcome,
            EnrollmentOutcome::Succeeded {
                card_id: "78563412".into()
            }
        );
    }

    #[test]
    fn test_decode_empty_payload() {
        let result = decode(b"");
        assert!(matches!(result, Err(Error::FrameTooShort { .. })));
    }

    #[test]
    fn test_decode_truncated_card_id() {
        let result = decode(b"S1234");
        assert!(matches!(
            result,
            Err(Error::FrameTooShort {
                expected: 9,
                actual: 5,
            })
        ));
    }
}
