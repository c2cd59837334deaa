//! LED and buzzer control example

use vauban::{BuzzerState, Device};

#[tokio::main]
async fn main() -> vauban::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let port = std::env::var("VAUBAN_PORT").unwrap_or_else(|_| "/dev/ttyUSB0".to_string());

    let mut device = Device::open(port, 1)?;
    println!("Terminal opened on {}", device.interface());

    // Solid green for 500 ticks
    device.send_led(0, 255, 0, 500, 1).await?;

    // Short double bip
    device.send_buzzer(BuzzerState::On, 200, 2).await?;

    println!("Done!");

    Ok(())
}
