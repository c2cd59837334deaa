//! High-level device interface

use std::sync::Arc;

use bytes::BytesMut;
use tokio::task::JoinHandle;
use tracing::{debug, info, trace, warn};

use vauban_core::{
    constants::{BuzzerState, FingerCount},
    Command, FieldWidth, FrameAccumulator, FrameBuilder, Link,
};
use vauban_transport::{SerialLink, TransportRead, TransportWrite};
use vauban_types::DeviceId;

use crate::dispatch::{AccessCheck, Dispatcher};
use crate::error::{Error, Result};

/// Vauban terminal
///
/// High-level interface for one serial-attached biometric terminal:
/// outbound command builders plus the background read service that turns
/// the inbound byte stream into dispatched frames.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use vauban::{AccessCheck, AccessDecision, Device, FingerCount};
///
/// struct AllowAll;
///
/// #[async_trait::async_trait]
/// impl AccessCheck for AllowAll {
///     async fn check_access(&self, _card_id: &str, _interface: &str) -> AccessDecision {
///         AccessDecision::Granted
///     }
/// }
///
/// #[tokio::main]
/// async fn main() -> vauban::Result<()> {
///     let mut device = Device::open("/dev/ttyUSB0", 1)?;
///     device.start_read_service(Arc::new(AllowAll))?;
///
///     device.start_enrollment(FingerCount::One).await?;
///     device.join_read_service().await?;
///     Ok(())
/// }
/// ```
pub struct Device {
    id: DeviceId,
    interface: String,
    writer: Box<dyn TransportWrite>,
    reader: Option<Box<dyn TransportRead>>,
    link: Link,
    read_task: Option<JoinHandle<Result<()>>>,
}

impl Device {
    /// Open a terminal on a serial interface.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The device id is zero
    /// - The port path does not exist
    /// - The port exists but cannot be opened
    pub fn open(interface: impl Into<String>, device_id: u16) -> Result<Self> {
        let interface = interface.into();
        let id = DeviceId::new(device_id)?;

        let serial = SerialLink::open(&interface)?;
        let (reader, writer) = serial.split();

        info!("Opened {} (device id {})", interface, id);

        Ok(Self::from_parts(reader, writer, id, interface))
    }

    /// Build a device over an already-open transport.
    ///
    /// Useful for tests and for transports other than a local serial port.
    pub fn from_parts(
        reader: impl TransportRead + 'static,
        writer: impl TransportWrite + 'static,
        id: DeviceId,
        interface: impl Into<String>,
    ) -> Self {
        Self {
            id,
            interface: interface.into(),
            writer: Box::new(writer),
            reader: Some(Box::new(reader)),
            link: Link::new(),
            read_task: None,
        }
    }

    /// Device id used in every frame
    pub fn device_id(&self) -> DeviceId {
        self.id
    }

    /// Interface identifier this device was opened on
    pub fn interface(&self) -> &str {
        &self.interface
    }

    /// Lifecycle handle for this connection
    pub fn link(&self) -> &Link {
        &self.link
    }

    /// Start the background read service.
    ///
    /// Spawns the task that pulls bytes one at a time, reassembles frames
    /// and routes them through the dispatcher. Frame delivery is strictly
    /// serialized: the next byte is not pulled until the dispatcher call
    /// for the previous frame has returned.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::ReadServiceAlreadyRunning`] on a second call.
    pub fn start_read_service(&mut self, access: Arc<dyn AccessCheck>) -> Result<()> {
        let reader = self.reader.take().ok_or(Error::ReadServiceAlreadyRunning)?;
        self.link.start()?;

        let dispatcher = Dispatcher::new(access, self.interface.clone());
        let link = self.link.clone();

        info!("Starting read service on {}", self.interface);
        self.read_task = Some(tokio::spawn(read_service(reader, dispatcher, link)));

        Ok(())
    }

    /// Wait for the read service to finish.
    ///
    /// Returns [`Error::TransportClosed`] once the transport is gone; that
    /// is the normal way a session ends and is reported, never retried.
    pub async fn join_read_service(&mut self) -> Result<()> {
        let Some(task) = self.read_task.take() else {
            return Ok(());
        };

        match task.await {
            Ok(result) => result,
            Err(e) => {
                warn!("Read service aborted: {}", e);
                Err(Error::TransportClosed)
            }
        }
    }

    /// Drive the front-panel LED.
    ///
    /// `duration` is in firmware ticks; `repeat` is the blink count.
    pub async fn send_led(
        &mut self,
        red: u8,
        green: u8,
        blue: u8,
        duration: u16,
        repeat: u8,
    ) -> Result<()> {
        debug!(red, green, blue, duration, repeat, "LED command");

        let frame = FrameBuilder::new(self.id.value(), Command::Led)
            .field(red.into(), FieldWidth::Two)
            .field(green.into(), FieldWidth::Two)
            .field(blue.into(), FieldWidth::Two)
            .field(duration, FieldWidth::Two)
            .field(repeat.into(), FieldWidth::One)
            .finish();

        self.write_frame(frame).await
    }

    /// Sound the buzzer.
    pub async fn send_buzzer(
        &mut self,
        state: BuzzerState,
        duration: u16,
        repeat: u8,
    ) -> Result<()> {
        debug!(?state, duration, repeat, "Buzzer command");

        let frame = FrameBuilder::new(self.id.value(), Command::Bip)
            .field(state as u16, FieldWidth::One)
            .field(duration, FieldWidth::Two)
            .field(repeat.into(), FieldWidth::One)
            .finish();

        self.write_frame(frame).await
    }

    /// Put the terminal into enrollment mode.
    ///
    /// The terminal answers later with an enrollment result frame, which
    /// the read service routes to the access-check collaborator.
    pub async fn start_enrollment(&mut self, fingers: FingerCount) -> Result<()> {
        debug!(?fingers, "Enrollment command");

        let frame = FrameBuilder::new(self.id.value(), Command::Enrollment)
            .field(fingers as u16, FieldWidth::One)
            .finish();

        self.write_frame(frame).await
    }

    /// Enable or disable fingerprint verification.
    pub async fn set_fingerprint_check(&mut self, enabled: bool) -> Result<()> {
        debug!(enabled, "Fingerprint mode command");

        let mode = u16::from(enabled);
        let frame = FrameBuilder::new(self.id.value(), Command::FingerprintMode)
            .field(mode, FieldWidth::One)
            .finish();

        self.write_frame(frame).await
    }

    /// Poll the terminal for liveness.
    pub async fn poll(&mut self) -> Result<()> {
        trace!("Poll command");

        let frame = FrameBuilder::new(self.id.value(), Command::Polling).finish();
        self.write_frame(frame).await
    }

    async fn write_frame(&mut self, frame: BytesMut) -> Result<()> {
        self.writer.send(&frame).await?;
        Ok(())
    }
}

/// Read service loop: one byte at a time for the lifetime of the link.
///
/// The accumulator and dispatcher are exclusively owned here; awaiting the
/// dispatcher between bytes is what guarantees at most one consumer
/// invocation in flight.
async fn read_service(
    mut reader: Box<dyn TransportRead>,
    dispatcher: Dispatcher,
    link: Link,
) -> Result<()> {
    let mut accumulator = FrameAccumulator::new();

    loop {
        let byte = match reader.read_byte().await {
            Ok(byte) => byte,
            Err(e) => {
                warn!("Transport closed: {}", e);
                link.close();
                return Err(Error::TransportClosed);
            }
        };

        if let Some(frame) = accumulator.push(byte) {
            dispatcher.handle(frame).await;
        }
    }
}
