//! Protocol constants

/// Frame start byte
pub const STX: u8 = 0x02;

/// Frame end byte
pub const ETX: u8 = 0x03;

/// Minimum length of a decodable frame
pub const MIN_FRAME_LEN: usize = 5;

/// Device id wire width, in ASCII hex digits
pub const DEVICE_ID_DIGITS: usize = 4;

/// Finger counts accepted by the enrollment command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum FingerCount {
    One = 1,
    Two = 2,
    Three = 3,
}

/// Buzzer states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum BuzzerState {
    Off = 0,
    On = 1,
}
