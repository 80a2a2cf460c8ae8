// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! The main monitor loop: threshold check, status display and alert window.
//!
//! One pass of the loop is one of:
//! - reading at or below threshold: show the sleeping text, hold it on screen
//! - reading above threshold, no alert running: show the moving text, start
//!   the blink callback, hold the alert window, then cancel the callback,
//!   force the outputs off and clear the alert flag (in that order)
//! - reading above threshold while an alert is flagged: nothing

use crate::config::{MonitorConfig, TextPlacement, MOVING_TEXT, SLEEPING_TEXT};
use crate::state::MonitorState;
use embedded_hal::delay::DelayNs;

/// Text-only view of the OLED.
pub trait TextDisplay {
    type Error;

    fn clear(&mut self) -> Result<(), Self::Error>;

    fn draw_text(&mut self, placement: TextPlacement, text: &str) -> Result<(), Self::Error>;

    /// Push the frame buffer to the panel.
    fn flush(&mut self) -> Result<(), Self::Error>;

    /// Replace the whole screen with `text`.
    fn show(&mut self, placement: TextPlacement, text: &str) -> Result<(), Self::Error> {
        self.clear()?;
        self.draw_text(placement, text)?;
        self.flush()
    }
}

/// Control over the blink callback and the outputs it drives.
pub trait AlertDriver {
    type Error;

    /// Register the periodic blink callback.
    fn start_blink(&mut self, interval_ms: u32) -> Result<(), Self::Error>;

    /// Cancel the blink callback. No tick may run once this returns.
    fn cancel_blink(&mut self) -> Result<(), Self::Error>;

    /// LED channels low, buzzer silent.
    fn force_off(&mut self);
}

/// Which branch a loop pass took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    Sleeping,
    /// A full alert window ran and the monitor is back to sleeping.
    Alerted,
    /// High reading seen while an alert was already flagged.
    AlertInProgress,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MonitorError<D, A> {
    Display(D),
    Alert(A),
}

impl<D, A> MonitorError<D, A> {
    pub fn source_name(&self) -> &'static str {
        match self {
            Self::Display(_) => "display",
            Self::Alert(_) => "alert timer",
        }
    }
}

pub struct Monitor<'a, D, A, T> {
    state: &'a MonitorState,
    display: D,
    alert: A,
    delay: T,
    config: MonitorConfig,
}

impl<'a, D, A, T> Monitor<'a, D, A, T>
where
    D: TextDisplay,
    A: AlertDriver,
    T: DelayNs,
{
    pub fn new(state: &'a MonitorState, display: D, alert: A, delay: T) -> Self {
        Self::with_config(state, display, alert, delay, MonitorConfig::DEFAULT)
    }

    pub fn with_config(
        state: &'a MonitorState,
        display: D,
        alert: A,
        delay: T,
        config: MonitorConfig,
    ) -> Self {
        Self {
            state,
            display,
            alert,
            delay,
            config,
        }
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Run one pass of the loop, blocking for the hold or alert window.
    pub fn run_once(&mut self) -> Result<Phase, MonitorError<D::Error, A::Error>> {
        let reading = self.state.pressure();

        if !reading.exceeds(self.config.threshold) {
            return self.hold_sleeping();
        }

        if !self.state.try_begin_alert() {
            return Ok(Phase::AlertInProgress);
        }

        #[cfg(feature = "defmt")]
        defmt::println!("Movement detected (pressure {}), alert on", reading.value());
        self.run_alert_window()
    }

    /// Loop forever. Errors are reported and the loop carries on.
    pub fn run(&mut self) -> ! {
        loop {
            if let Err(e) = self.run_once() {
                #[cfg(feature = "defmt")]
                defmt::warn!("Monitor: {} error", e.source_name());
                #[cfg(not(feature = "defmt"))]
                let _ = e;
            }
        }
    }

    fn hold_sleeping(&mut self) -> Result<Phase, MonitorError<D::Error, A::Error>> {
        let shown = self.display.show(self.config.placement, SLEEPING_TEXT);
        // Hold even if the display failed so a broken panel doesn't spin the loop.
        self.delay.delay_ms(self.config.idle_hold_ms);
        shown.map_err(MonitorError::Display)?;
        Ok(Phase::Sleeping)
    }

    fn run_alert_window(&mut self) -> Result<Phase, MonitorError<D::Error, A::Error>> {
        let shown = self.display.show(self.config.placement, MOVING_TEXT);
        let started = self.alert.start_blink(self.config.blink_interval_ms);

        self.delay.delay_ms(self.config.alert_duration_ms);

        // Cancel before forcing outputs off, otherwise a late tick could turn them back on.
        let cancelled = match started {
            Ok(()) => self.alert.cancel_blink(),
            Err(e) => Err(e),
        };
        self.alert.force_off();
        self.state.end_alert();

        #[cfg(feature = "defmt")]
        defmt::println!("Alert window elapsed, outputs off");

        shown.map_err(MonitorError::Display)?;
        cancelled.map_err(MonitorError::Alert)?;
        Ok(Phase::Alerted)
    }
}
