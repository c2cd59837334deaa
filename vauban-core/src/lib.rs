//! # vauban-core
//!
//! Core protocol implementation for Vauban biometric access terminals.
//!
//! This crate provides the low-level protocol primitives:
//! - Frame encoding/decoding and the hex-ASCII field rules
//! - XOR checksum calculation
//! - Opcode definitions for both directions
//! - Byte-stream frame reassembly
//! - Enrollment result decoding

pub mod checksum;
pub mod command;
pub mod constants;
pub mod enrollment;
pub mod error;
pub mod frame;
pub mod link;
pub mod reader;

pub use command::{Command, Event};
pub use enrollment::EnrollmentOutcome;
pub use error::{Error, Result};
pub use frame::{FieldWidth, Frame, FrameBuilder};
pub use link::{Link, LinkState};
pub use reader::FrameAccumulator;
