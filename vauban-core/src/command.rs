//! Vauban protocol opcode definitions

use std::fmt;

use crate::error::{Error, Result};

/// Outbound command opcodes
///
/// The discriminant is the literal wire byte, transmitted raw (never
/// hex-ASCII expanded). The firmware picked the ASCII codes of mnemonic
/// letters, which is why each value doubles as a printable character.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Command {
    /// Buzzer control (`'B'`)
    Bip = 0x42,

    /// Front-panel LED control (`'D'`)
    Led = 0x44,

    /// Start a card enrollment (`'E'`)
    Enrollment = 0x45,

    /// Enable or disable fingerprint verification (`'M'`)
    FingerprintMode = 0x4D,

    /// Liveness poll (`'P'`)
    Polling = 0x50,
}

impl Command {
    /// Get command name
    pub fn name(self) -> &'static str {
        match self {
            Self::Bip => "MSG_SEND_BIP",
            Self::Led => "MSG_SEND_LED",
            Self::Enrollment => "MSG_SEND_ENROLLMENT",
            Self::FingerprintMode => "MSG_SEND_FINGERPRINT_DEFINE",
            Self::Polling => "MSG_SEND_POLLING",
        }
    }
}

impl From<Command> for u8 {
    fn from(cmd: Command) -> u8 {
        cmd as u8
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(0x{:02X})", self.name(), *self as u8)
    }
}

/// Inbound status opcodes
///
/// Terminals answer with a single raw byte equal to an ASCII letter code.
/// The inbound code space is independent from [`Command`]: `0x45` outbound
/// starts an enrollment, `0x45` inbound reports its result.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Event {
    /// Enrollment finished, payload carries status and card id (`'E'`)
    EnrollmentResult = b'E',

    /// Answer to a liveness poll, no payload defined (`'P'`)
    PollResponse = b'P',
}

impl Event {
    /// Get event name
    pub fn name(self) -> &'static str {
        match self {
            Self::EnrollmentResult => "MSG_RECV_ENROLLMENT",
            Self::PollResponse => "MSG_RECV_POLLING",
        }
    }
}

impl From<Event> for u8 {
    fn from(event: Event) -> u8 {
        event as u8
    }
}

impl TryFrom<u8> for Event {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            b'E' => Ok(Self::EnrollmentResult),
            b'P' => Ok(Self::PollResponse),
            _ => Err(Error::UnknownOpcode(value)),
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}('{}')", self.name(), char::from(*self as u8))
    }
}
