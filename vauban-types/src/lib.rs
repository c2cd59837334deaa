//! Type definitions for vauban

pub mod access;
pub mod device_id;
pub mod error;

pub use access::AccessDecision;
pub use device_id::DeviceId;
pub use error::{Error, Result};
