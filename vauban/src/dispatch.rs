//! Inbound frame dispatch

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use tracing::{debug, trace, warn};

use vauban_core::{enrollment, enrollment::EnrollmentOutcome, Event, Frame};
use vauban_types::AccessDecision;

/// Access-control collaborator
///
/// Receives the card identifier recovered from a successful enrollment
/// together with the interface it arrived on. The driver logs the decision
/// and leaves acting on it to the collaborator.
#[async_trait]
pub trait AccessCheck: Send + Sync {
    async fn check_access(&self, card_id: &str, interface: &str) -> AccessDecision;
}

/// Routes decoded inbound frames by opcode.
pub struct Dispatcher {
    access: Arc<dyn AccessCheck>,
    interface: String,
}

impl Dispatcher {
    pub fn new(access: Arc<dyn AccessCheck>, interface: impl Into<String>) -> Self {
        Self {
            access,
            interface: interface.into(),
        }
    }

    /// Handle one complete STX..ETX frame from the accumulator.
    ///
    /// Malformed frames and unhandled opcodes are dropped; one corrupt
    /// frame must never stall the stream behind it.
    pub async fn handle(&self, raw: Bytes) {
        let frame = match Frame::decode(&raw) {
            Ok(frame) => frame,
            Err(e) => {
                warn!("Dropping malformed frame: {}", e);
                return;
            }
        };

        trace!("Received: {:?}", frame);

        match Event::try_from(frame.opcode) {
            Ok(Event::EnrollmentResult) => self.handle_enrollment(&frame).await,
            Ok(Event::PollResponse) => {
                // Poll answers carry no data yet.
                trace!(device_id = frame.device_id, "Poll response");
            }
            Err(_) => {
                trace!("Ignoring unhandled opcode 0x{:02X}", frame.opcode);
            }
        }
    }

    async fn handle_enrollment(&self, frame: &Frame) {
        match enrollment::decode(&frame.payload) {
            Ok(EnrollmentOutcome::Succeeded { card_id }) => {
                debug!(card_id = %card_id, "Enrollment succeeded");

                let decision = self.access.check_access(&card_id, &self.interface).await;
                debug!(card_id = %card_id, %decision, "Access decision");
            }
            Ok(EnrollmentOutcome::Failed) => {
                debug!(device_id = frame.device_id, "Enrollment failed");
            }
            Err(e) => warn!("Dropping unreadable enrollment payload: {}", e),
        }
    }
}
