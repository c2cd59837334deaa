//! Read-service lifecycle tracking
//!
//! Each open device connection runs exactly one background read service.
//! The link handle records where that service is in its lifecycle:
//! `Idle` (not started) → `Reading` → `Closed` (transport gone).

use std::sync::Arc;

use crate::error::{Error, Result};

/// Link state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    /// Connection open, read service not started
    Idle,

    /// Read service pulling bytes
    Reading,

    /// Transport closed; the connection is finished
    Closed,
}

/// Shared lifecycle handle for one device connection.
///
/// Thread-safe and cheap to clone (Arc internally); the device owner and
/// the read service hold clones of the same link.
#[derive(Debug, Clone)]
pub struct Link {
    state: Arc<parking_lot::RwLock<LinkState>>,
}

impl Link {
    /// Create a link in the idle state.
    pub fn new() -> Self {
        Self {
            state: Arc::new(parking_lot::RwLock::new(LinkState::Idle)),
        }
    }

    /// Get current state
    pub fn state(&self) -> LinkState {
        *self.state.read()
    }

    /// Check if the read service is running
    pub fn is_reading(&self) -> bool {
        matches!(self.state(), LinkState::Reading)
    }

    /// Check if the transport is gone
    pub fn is_closed(&self) -> bool {
        matches!(self.state(), LinkState::Closed)
    }

    /// Mark the read service started.
    ///
    /// Fails unless the link is idle: one read service per connection.
    pub fn start(&self) -> Result<()> {
        let mut state = self.state.write();

        if *state != LinkState::Idle {
            return Err(Error::InvalidLinkState(format!(
                "Cannot start read service from state: {:?}",
                *state
            )));
        }

        *state = LinkState::Reading;
        Ok(())
    }

    /// Mark the connection closed. Idempotent.
    pub fn close(&self) {
        *self.state.write() = LinkState::Closed;
    }
}

impl Default for Link {
    fn default() -> Self {
        Self::new()
    }
}
