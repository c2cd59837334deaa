//! # vauban
//!
//! Rust driver for Vauban serial-attached biometric access terminals.
//!
//! ## Features
//!
//! - Byte-exact ASCII-hex frame codec with XOR checksums
//! - Resilient streaming frame reassembly over the raw serial byte stream
//! - Async API using Tokio, one background read service per terminal
//! - Card enrollment results routed to a pluggable access-control service
//!
//! ## Quick Start
//!
//! ```no_run
//! use vauban::Device;
//!
//! #[tokio::main]
//! async fn main() -> vauban::Result<()> {
//!     // Open the terminal on its serial interface
//!     let mut device = Device::open("/dev/ttyUSB0", 1)?;
//!
//!     // Blink the green LED
//!     device.send_led(0, 255, 0, 500, 1).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod device;
pub mod dispatch;
pub mod error;

// Re-exports
pub use device::Device;
pub use dispatch::{AccessCheck, Dispatcher};
pub use error::{Error, Result};

// Re-export types
pub use vauban_core::constants::{BuzzerState, FingerCount};
pub use vauban_core::{Command, Event, Frame, FrameAccumulator, Link, LinkState};
pub use vauban_types::{AccessDecision, DeviceId};
