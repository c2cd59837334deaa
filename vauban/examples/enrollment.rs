//! Card enrollment example
//!
//! Puts the terminal in enrollment mode and prints every card the
//! access-check collaborator is handed, until the port is closed.

use std::sync::Arc;

use vauban::{AccessCheck, AccessDecision, Device, FingerCount};

struct PrintingAccess;

#[async_trait::async_trait]
impl AccessCheck for PrintingAccess {
    async fn check_access(&self, card_id: &str, interface: &str) -> AccessDecision {
        println!("card {} presented on {}", card_id, interface);
        AccessDecision::Granted
    }
}

#[tokio::main]
async fn main() -> vauban::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let port = std::env::var("VAUBAN_PORT").unwrap_or_else(|_| "/dev/ttyUSB0".to_string());

    let mut device = Device::open(port, 1)?;
    device.start_read_service(Arc::new(PrintingAccess))?;

    device.set_fingerprint_check(true).await?;
    device.start_enrollment(FingerCount::One).await?;

    println!("Enrollment started, waiting for cards...");

    // Runs until the transport goes away.
    let result = device.join_read_service().await;
    println!("Session ended: {:?}", result);

    Ok(())
}
