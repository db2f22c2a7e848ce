//! UART transport for the OSC link.
//!
//! Transmit is a plain async write of each SLIP frame. Receive runs in its
//! own task ([`pump_rx`]) that pushes bytes into a [`ByteChannel`]; the
//! control loop drains the channel through [`ChannelSource`], which never
//! waits.
//!
//! # Pins
//!
//! Uses UART1:
//! - GPIO 8: TX
//! - GPIO 9: RX

use defmt::warn;
use embassy_rp::uart::{Async, Error as UartError, UartRx, UartTx};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, Receiver};
use stomp_core::{ByteSource, FrameSink, LinkError};

/// Bytes buffered between the receive task and the control loop.
pub const RX_CHANNEL_DEPTH: usize = 256;

/// Received bytes, in arrival order.
pub type ByteChannel = Channel<CriticalSectionRawMutex, u8, RX_CHANNEL_DEPTH>;

/// Convert UART errors to [`LinkError`].
///
/// This is a helper function instead of a `From` impl to avoid orphan rule issues
/// (both `UartError` and `LinkError` are defined in external crates).
#[inline]
fn uart_error_to_link_error(_e: UartError) -> LinkError {
    LinkError::Io
}

/// Writes outbound frames to the UART transmitter.
pub struct UartSink<'d> {
    tx: UartTx<'d, Async>,
}

impl<'d> UartSink<'d> {
    #[must_use]
    pub fn new(tx: UartTx<'d, Async>) -> Self {
        Self { tx }
    }
}

impl FrameSink for UartSink<'_> {
    async fn send_frame(&mut self, frame: &[u8]) -> Result<(), LinkError> {
        self.tx.write(frame).await.map_err(uart_error_to_link_error)
    }

    fn is_ready(&self) -> bool {
        // UART is always "ready" if we have the peripheral
        true
    }
}

/// Non-blocking reader over the receive channel.
pub struct ChannelSource {
    rx: Receiver<'static, CriticalSectionRawMutex, u8, RX_CHANNEL_DEPTH>,
}

impl ChannelSource {
    #[must_use]
    pub fn new(channel: &'static ByteChannel) -> Self {
        Self {
            rx: channel.receiver(),
        }
    }
}

impl ByteSource for ChannelSource {
    fn read_byte(&mut self) -> Option<u8> {
        self.rx.try_receive().ok()
    }
}

/// Move received bytes into `channel` forever.
///
/// A full channel drops the byte; the frame receiver in the control loop
/// sees the damaged frame and reports it.
pub async fn pump_rx(mut rx: UartRx<'_, Async>, channel: &ByteChannel) -> ! {
    let mut byte = [0u8; 1];
    let mut dropping = false;

    loop {
        if let Err(e) = rx.read(&mut byte).await {
            warn!("UART receive error: {:?}", e);
            continue;
        }

        match channel.try_send(byte[0]) {
            Ok(()) => dropping = false,
            Err(_) => {
                if !core::mem::replace(&mut dropping, true) {
                    warn!("receive channel full, dropping bytes");
                }
            }
        }
    }
}
