// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Hardware-independent logic for the babymon firmware.
//!
//! The crate is `no_std`; host tests link `std` through the test harness.
//! - `defmt` feature: Emits diagnostics through `defmt`
//!
//! Peripherals are reached only through `embedded-hal` traits and the small
//! seams in [`monitor`], so the same sampling, blink and loop code runs on the
//! RP2040 and against host-side mocks.

#![cfg_attr(not(test), no_std)]

pub mod alert;
pub mod config;
pub mod monitor;
pub mod sensor;
pub mod state;

// Re-export commonly used types
pub use alert::{AlertOutputs, BlinkTask};
pub use config::MonitorConfig;
pub use monitor::{AlertDriver, Monitor, MonitorError, Phase, TextDisplay};
pub use sensor::{seed_from_micros, SamplingTask, SimulatedPressureSensor};
pub use state::{MonitorState, PressureReading};
