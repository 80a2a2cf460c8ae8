// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Simulated pressure sensor and the sampling timer body.

use crate::config::PRESSURE_RANGE;
use crate::state::{MonitorState, PressureReading};
use rand::{Rng, RngCore, SeedableRng};

/// Reduce a free-running microsecond counter to a PRNG seed.
pub const fn seed_from_micros(ticks: u64) -> u64 {
    ticks % 1_000_000
}

/// Pressure "sensor" backed by a pseudo-random generator.
pub struct SimulatedPressureSensor<R> {
    rng: R,
}

impl<R: RngCore> SimulatedPressureSensor<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Draw a reading uniformly from `0..PRESSURE_RANGE`.
    pub fn sample(&mut self) -> PressureReading {
        let raw = self.rng.gen_range(0..PRESSURE_RANGE);
        PressureReading::new(raw)
            .unwrap_or_else(|| unreachable!("gen_range is bounded by PRESSURE_RANGE"))
    }
}

impl<R: RngCore + SeedableRng> SimulatedPressureSensor<R> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(R::seed_from_u64(seed))
    }
}

/// Body of the periodic sampling callback.
pub struct SamplingTask<R> {
    sensor: SimulatedPressureSensor<R>,
}

impl<R: RngCore> SamplingTask<R> {
    pub fn new(sensor: SimulatedPressureSensor<R>) -> Self {
        Self { sensor }
    }

    /// Produce a new reading and publish it to the shared state.
    pub fn on_tick(&mut self, state: &MonitorState) -> PressureReading {
        let reading = self.sensor.sample();
        state.store_pressure(reading);
        #[cfg(feature = "defmt")]
        defmt::println!("Sensor de pressão: {}", reading.value());
        reading
    }
}
