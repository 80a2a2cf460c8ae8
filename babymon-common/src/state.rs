// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Application state shared between the timer callbacks and the main loop.
//!
//! The RP2040 (Cortex-M0+) has no atomic read-modify-write instructions, only
//! word-sized atomic loads and stores. Every field therefore has exactly one
//! writer at a time and is accessed with plain `load`/`store`:
//! - the pressure reading is written by the sampling callback only
//! - the alert flag is written by the main loop only
//! - the blink toggle is written by the blink callback while an alert runs,
//!   and by the main loop only while the blink callback is not registered

use crate::config::PRESSURE_RANGE;
use core::sync::atomic::{AtomicBool, AtomicU16, Ordering};

/// A simulated sensor value, always in `0..PRESSURE_RANGE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PressureReading(u16);

impl PressureReading {
    pub const ZERO: Self = Self(0);

    /// Returns `None` if `raw` is outside the sensor range.
    pub const fn new(raw: u16) -> Option<Self> {
        if raw < PRESSURE_RANGE {
            Some(Self(raw))
        } else {
            None
        }
    }

    pub const fn value(self) -> u16 {
        self.0
    }

    pub const fn exceeds(self, threshold: u16) -> bool {
        self.0 > threshold
    }
}

/// Process-wide monitor state, passed by reference to the loop and callbacks.
pub struct MonitorState {
    pressure: AtomicU16,
    alert_active: AtomicBool,
    blink_on: AtomicBool,
}

impl MonitorState {
    pub const fn new() -> Self {
        Self {
            pressure: AtomicU16::new(0),
            alert_active: AtomicBool::new(false),
            blink_on: AtomicBool::new(false),
        }
    }

    pub fn pressure(&self) -> PressureReading {
        // Only `store_pressure` writes this field, and it only stores validated values.
        PressureReading(self.pressure.load(Ordering::Acquire))
    }

    pub fn store_pressure(&self, reading: PressureReading) {
        self.pressure.store(reading.value(), Ordering::Release);
    }

    pub fn is_alert_active(&self) -> bool {
        self.alert_active.load(Ordering::Acquire)
    }

    /// Mark an alert as started. Returns `false` if one was already running.
    ///
    /// Must only be called from the main loop (single writer).
    pub fn try_begin_alert(&self) -> bool {
        if self.is_alert_active() {
            return false;
        }
        self.blink_on.store(false, Ordering::Release);
        self.alert_active.store(true, Ordering::Release);
        true
    }

    pub fn end_alert(&self) {
        self.blink_on.store(false, Ordering::Release);
        self.alert_active.store(false, Ordering::Release);
    }

    pub fn blink_on(&self) -> bool {
        self.blink_on.load(Ordering::Acquire)
    }

    /// Flip the blink toggle and return its new value.
    pub fn toggle_blink(&self) -> bool {
        let next = !self.blink_on.load(Ordering::Acquire);
        self.blink_on.store(next, Ordering::Release);
        next
    }
}

impl Default for MonitorState {
    fn default() -> Self {
        Self::new()
    }
}
