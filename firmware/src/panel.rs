//! Button and analog sampling.
//!
//! Buttons are wired to ground with the internal pull-ups enabled, so a low
//! line means pressed. The levels are inverted here, before the core sees
//! them.

use embassy_rp::adc::{self, Adc, Blocking};
use embassy_rp::gpio::Input;
use stomp_core::types::{BUTTON_COUNT, PEDAL_COUNT};
use stomp_core::PanelSnapshot;

/// Every sampled input of the device.
pub struct Panel<'d> {
    buttons: [Input<'d>; BUTTON_COUNT],
    adc: Adc<'d, Blocking>,
    analog: [adc::Channel<'d>; PEDAL_COUNT],
    /// Last good reading per analog input.
    last: [u16; PEDAL_COUNT],
}

impl<'d> Panel<'d> {
    /// `buttons` in [`ButtonId`](stomp_core::ButtonId) order, `analog` as
    /// pedals then joystick axes.
    #[must_use]
    pub fn new(
        buttons: [Input<'d>; BUTTON_COUNT],
        adc: Adc<'d, Blocking>,
        analog: [adc::Channel<'d>; PEDAL_COUNT],
    ) -> Self {
        Self {
            buttons,
            adc,
            analog,
            last: [0; PEDAL_COUNT],
        }
    }

    /// Read every input once.
    ///
    /// A failed conversion repeats the previous reading for that input.
    pub fn sample(&mut self) -> PanelSnapshot {
        let mut snapshot = PanelSnapshot::default();

        for (pressed, input) in snapshot.buttons.iter_mut().zip(&self.buttons) {
            *pressed = input.is_low();
        }

        for (i, channel) in self.analog.iter_mut().enumerate() {
            if let Ok(raw) = self.adc.blocking_read(channel) {
                self.last[i] = raw;
            }
        }
        snapshot.pedals = self.last;

        snapshot
    }
}
