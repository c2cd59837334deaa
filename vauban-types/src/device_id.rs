//! Device identity

use std::fmt;

use crate::error::{Error, Result};

/// Identifier of one terminal on the serial bus.
///
/// Every frame carries the device id as 4 zero-padded uppercase hex digits,
/// so ids are 16-bit. Zero is reserved and rejected at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceId(u16);

impl DeviceId {
    /// Create a device id, rejecting the reserved zero value.
    ///
    /// # Examples
    ///
    /// ```
    /// use vauban_types::DeviceId;
    ///
    /// let id = DeviceId::new(1).unwrap();
    /// assert_eq!(id.value(), 1);
    /// assert!(DeviceId::new(0).is_err());
    /// ```
    pub fn new(id: u16) -> Result<Self> {
        if id == 0 {
            return Err(Error::InvalidDeviceId(id));
        }
        Ok(Self(id))
    }

    /// Get the raw numeric value
    pub fn value(self) -> u16 {
        self.0
    }
}

impl TryFrom<u16> for DeviceId {
    type Error = Error;

    fn try_from(value: u16) -> Result<Self> {
        Self::new(value)
    }
}

impl From<DeviceId> for u16 {
    fn from(id: DeviceId) -> u16 {
        id.0
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
