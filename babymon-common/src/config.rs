// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Board wiring and timing constants.
//!
//! Everything here is fixed at compile time; the firmware has no runtime
//! configuration source.

// I2C bus used by the OLED (RP2040 I2C1)
pub const I2C_SDA_PIN: u8 = 14;
pub const I2C_SCL_PIN: u8 = 15;
pub const I2C_FREQUENCY_HZ: u32 = 400_000;

// SSD1306 OLED
pub const DISPLAY_WIDTH: u32 = 128;
pub const DISPLAY_HEIGHT: u32 = 64;
pub const DISPLAY_I2C_ADDR: u8 = 0x3C;

// RGB LED
pub const LED_RED_PIN: u8 = 13;
pub const LED_GREEN_PIN: u8 = 11;
pub const LED_BLUE_PIN: u8 = 12;

// Buzzer (PWM slice 2, channel B)
pub const BUZZER_PIN: u8 = 21;
pub const BUZZER_CLOCK_DIVIDER: u8 = 4;
pub const BUZZER_SILENT_LEVEL: u16 = 0;
pub const BUZZER_ALERT_LEVEL: u16 = 2048;

/// Exclusive upper bound of a simulated pressure reading.
pub const PRESSURE_RANGE: u16 = 1024;
/// Readings strictly above this value mean the baby is moving.
pub const PRESSURE_THRESHOLD: u16 = 500;

pub const SAMPLE_INTERVAL_MS: u32 = 5_000;
pub const ALERT_DURATION_MS: u32 = 5_000;
pub const BLINK_INTERVAL_MS: u32 = 500;

pub const SLEEPING_TEXT: &str = "Bebe Dormindo!";
pub const MOVING_TEXT: &str = "Bebe Movimentando!";

/// Where status text is drawn on the OLED.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TextPlacement {
    pub col: i32,
    pub row: i32,
    pub scale: u8,
}

pub const STATUS_TEXT_PLACEMENT: TextPlacement = TextPlacement {
    col: 5,
    row: 20,
    scale: 1,
};

/// Threshold and timing parameters consumed by the monitor loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MonitorConfig {
    pub threshold: u16,
    pub alert_duration_ms: u32,
    pub blink_interval_ms: u32,
    /// How long the sleeping status stays on screen before the next check.
    pub idle_hold_ms: u32,
    pub placement: TextPlacement,
}

impl MonitorConfig {
    pub const DEFAULT: Self = Self {
        threshold: PRESSURE_THRESHOLD,
        alert_duration_ms: ALERT_DURATION_MS,
        blink_interval_ms: BLINK_INTERVAL_MS,
        idle_hold_ms: ALERT_DURATION_MS,
        placement: STATUS_TEXT_PLACEMENT,
    };
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
