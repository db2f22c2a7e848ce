//! OSC foot controller firmware for RP2040.
//!
//! This crate provides the board glue between the RP2040 peripherals and the
//! platform-agnostic control loop in [`stomp_core`].
//!
//! # Overview
//!
//! The firmware runs on a Raspberry Pi Pico (RP2040) and:
//! 1. Samples buttons and analog pedals once per tick
//! 2. Counts encoder edges in dedicated tasks
//! 3. Exchanges SLIP-framed OSC with a host relay over UART (115200 baud, 8N1)
//!
//! # Hardware Configuration
//!
//! | Function | GPIO | Description |
//! |----------|------|-------------|
//! | Record   | 0    | Record button (active low) |
//! | Stomp 1-5 | 1-5 | Stomp buttons (active low) |
//! | Knob select 1-3 | 6, 7, 10 | Encoder push buttons (active low) |
//! | Joystick select | 11 | Joystick push (active low) |
//! | UART1 TX | 8    | Serial transmit |
//! | UART1 RX | 9    | Serial receive (DAW feedback) |
//! | Knob 1-3 A/B | 12-17 | Encoder phases, pairs (12,13) (14,15) (16,17) |
//! | Pedals   | 26, 27 | Expression pedals (ADC0, ADC1) |
//! | Joystick | 28, 29 | Joystick axes (ADC2, ADC3) |
//! | LED      | 25   | On-board LED (link status, inverted briefly on receive errors) |
//!
//! # Architecture
//!
//! The firmware uses the Embassy async runtime with these concurrent tasks:
//!
//! - **Knob tasks**: one per encoder, waiting on phase A edges
//! - **Receive task**: reads UART bytes into a [`Channel`](embassy_sync::channel::Channel)
//! - **Control task**: ticks the [`Controller`](stomp_core::Controller) at a fixed period
//!
//! Encoder counts reach the control task through
//! [`KnobCounter`](stomp_core::KnobCounter) atomics; received bytes through
//! the channel, which the control task drains without waiting.
//!
//! # Modules
//!
//! - [`knob`]: encoder edge loop
//! - [`panel`]: button and ADC sampling ([`Panel`])
//! - [`uart_link`]: UART transport ([`UartSink`], [`ChannelSource`])
//!
//! # Features
//!
//! - **`dev-panic`** (default): Use `panic-probe` for development (prints panic info via RTT)
//! - **`prod-panic`**: Use `panic-reset` for production (silent watchdog reset)

#![no_std]

// Re-export core types for convenience
pub use stomp_core::{
    Controller, IndicatorFrame, KnobCounter, PanelSnapshot, Settings, StatusLight, TickReport,
    DEFAULT_SETTINGS,
};

pub mod knob;
pub mod panel;
pub mod uart_link;

pub use panel::Panel;
pub use uart_link::{ByteChannel, ChannelSource, UartSink, RX_CHANNEL_DEPTH};

/// Serial link speed.
pub const BAUD_RATE: u32 = 115_200;

/// Control loop period in milliseconds.
pub const TICK_MS: u64 = 5;
