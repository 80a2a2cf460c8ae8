// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! LED and buzzer outputs driven during a movement alert.

use crate::config::{BUZZER_ALERT_LEVEL, BUZZER_SILENT_LEVEL};
use crate::state::MonitorState;
use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;

/// RGB LED channels plus the PWM buzzer.
///
/// Only the red channel takes part in the alert pattern; green and blue are
/// held so they can be forced low together with the rest on cleanup.
pub struct AlertOutputs<R, G, B, Z> {
    red: R,
    green: G,
    blue: B,
    buzzer: Z,
}

impl<R, G, B, Z> AlertOutputs<R, G, B, Z>
where
    R: OutputPin,
    G: OutputPin,
    B: OutputPin,
    Z: SetDutyCycle,
{
    /// Take ownership of the outputs and put them at rest.
    pub fn new(red: R, green: G, blue: B, buzzer: Z) -> Self {
        let mut outputs = Self {
            red,
            green,
            blue,
            buzzer,
        };
        outputs.all_off();
        outputs
    }

    /// Drive the red LED and the buzzer to the given blink phase.
    pub fn apply(&mut self, on: bool) {
        if on {
            self.red.set_high().ok();
            self.buzzer.set_duty_cycle(BUZZER_ALERT_LEVEL).ok();
        } else {
            self.red.set_low().ok();
            self.buzzer.set_duty_cycle(BUZZER_SILENT_LEVEL).ok();
        }
    }

    /// Every LED channel low, buzzer silent.
    pub fn all_off(&mut self) {
        self.red.set_low().ok();
        self.green.set_low().ok();
        self.blue.set_low().ok();
        self.buzzer.set_duty_cycle(BUZZER_SILENT_LEVEL).ok();
    }
}

/// Body of the periodic blink callback.
pub struct BlinkTask;

impl BlinkTask {
    /// Flip the blink toggle and mirror it on the outputs. Returns the new phase.
    pub fn on_tick<R, G, B, Z>(state: &MonitorState, outputs: &mut AlertOutputs<R, G, B, Z>) -> bool
    where
        R: OutputPin,
        G: OutputPin,
        B: OutputPin,
        Z: SetDutyCycle,
    {
        let on = state.toggle_blink();
        outputs.apply(on);
        on
    }
}
