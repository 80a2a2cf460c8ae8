// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Host-side board simulation with a millisecond clock.
//!
//! `SimDelay` advances simulated time one millisecond at a time and fires the
//! sampling and blink callbacks when their periods elapse, the way the
//! RP2040 alarm interrupts preempt the blocking main loop.

#![allow(dead_code)]

use babymon_common::config::{TextPlacement, SAMPLE_INTERVAL_MS};
use babymon_common::{
    AlertDriver, AlertOutputs, BlinkTask, MonitorState, PressureReading, TextDisplay,
};
use core::convert::Infallible;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType as DigitalErrorType, OutputPin};
use embedded_hal::pwm::{ErrorType as PwmErrorType, SetDutyCycle};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

#[derive(Clone, Default)]
pub struct MockPin {
    pub high: Rc<Cell<bool>>,
}

impl DigitalErrorType for MockPin {
    type Error = Infallible;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.high.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.high.set(true);
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct MockBuzzer {
    pub level: Rc<Cell<u16>>,
}

impl PwmErrorType for MockBuzzer {
    type Error = Infallible;
}

impl SetDutyCycle for MockBuzzer {
    fn max_duty_cycle(&self) -> u16 {
        u16::MAX
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        self.level.set(duty);
        Ok(())
    }
}

pub type MockOutputs = AlertOutputs<MockPin, MockPin, MockPin, MockBuzzer>;

/// Handles onto every output line, for assertions.
#[derive(Clone, Default)]
pub struct OutputProbe {
    pub red: MockPin,
    pub green: MockPin,
    pub blue: MockPin,
    pub buzzer: MockBuzzer,
}

impl OutputProbe {
    pub fn outputs(&self) -> MockOutputs {
        AlertOutputs::new(
            self.red.clone(),
            self.green.clone(),
            self.blue.clone(),
            self.buzzer.clone(),
        )
    }

    pub fn at_rest(&self) -> bool {
        !self.red.high.get()
            && !self.green.high.get()
            && !self.blue.high.get()
            && self.buzzer.level.get() == 0
    }
}

/// Everything the simulated board records.
pub struct Sim {
    pub now_ms: u64,
    pub state: Rc<MonitorState>,
    pub outputs: MockOutputs,
    pub probe: OutputProbe,
    /// Readings delivered at successive sampling boundaries.
    pub pending_readings: VecDeque<u16>,
    pub next_sample_ms: u64,
    pub blink_interval_ms: Option<u64>,
    pub next_blink_ms: u64,
    pub live_blink_timers: u32,
    pub blink_registrations: u32,
    /// `(time, phase)` for every blink tick.
    pub blink_ticks: Vec<(u64, bool)>,
    /// Alert flag as observed from inside each blink tick.
    pub alert_flag_at_ticks: Vec<bool>,
    pub blink_started_at: Option<u64>,
    pub blink_cancelled_at: Option<u64>,
    /// Ordered log of alert driver calls.
    pub driver_calls: Vec<&'static str>,
    /// `(time, text)` for every completed clear+draw+flush.
    pub screens: Vec<(u64, String)>,
    pub fail_display: bool,
    pub fail_start: bool,
    pub fail_cancel: bool,
}

impl Sim {
    pub fn new(state: Rc<MonitorState>) -> Rc<RefCell<Self>> {
        let probe = OutputProbe::default();
        let outputs = probe.outputs();
        Rc::new(RefCell::new(Self {
            now_ms: 0,
            state,
            outputs,
            probe,
            pending_readings: VecDeque::new(),
            next_sample_ms: u64::from(SAMPLE_INTERVAL_MS),
            blink_interval_ms: None,
            next_blink_ms: 0,
            live_blink_timers: 0,
            blink_registrations: 0,
            blink_ticks: Vec::new(),
            alert_flag_at_ticks: Vec::new(),
            blink_started_at: None,
            blink_cancelled_at: None,
            driver_calls: Vec::new(),
            screens: Vec::new(),
            fail_display: false,
            fail_start: false,
            fail_cancel: false,
        }))
    }

    fn advance_one_ms(&mut self) {
        self.now_ms += 1;

        if let Some(interval) = self.blink_interval_ms {
            if self.now_ms == self.next_blink_ms {
                let on = BlinkTask::on_tick(&self.state, &mut self.outputs);
                self.blink_ticks.push((self.now_ms, on));
                self.alert_flag_at_ticks.push(self.state.is_alert_active());
                self.next_blink_ms += interval;
            }
        }

        if self.now_ms == self.next_sample_ms {
            if let Some(raw) = self.pending_readings.pop_front() {
                let reading = PressureReading::new(raw).expect("injected reading in range");
                self.state.store_pressure(reading);
            }
            self.next_sample_ms += u64::from(SAMPLE_INTERVAL_MS);
        }
    }

    pub fn screen_texts(&self) -> Vec<&str> {
        self.screens.iter().map(|(_, s)| s.as_str()).collect()
    }
}

pub struct SimDelay(pub Rc<RefCell<Sim>>);

impl DelayNs for SimDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.delay_ms(ns / 1_000_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        for _ in 0..ms {
            self.0.borrow_mut().advance_one_ms();
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayFault;

pub struct SimDisplay {
    sim: Rc<RefCell<Sim>>,
    frame: Option<String>,
}

impl SimDisplay {
    pub fn new(sim: Rc<RefCell<Sim>>) -> Self {
        Self { sim, frame: None }
    }
}

impl TextDisplay for SimDisplay {
    type Error = DisplayFault;

    fn clear(&mut self) -> Result<(), Self::Error> {
        self.frame = Some(String::new());
        Ok(())
    }

    fn draw_text(&mut self, _placement: TextPlacement, text: &str) -> Result<(), Self::Error> {
        self.frame.get_or_insert_with(String::new).push_str(text);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        let mut sim = self.sim.borrow_mut();
        if sim.fail_display {
            return Err(DisplayFault);
        }
        let frame = self.frame.take().unwrap_or_default();
        let now = sim.now_ms;
        sim.screens.push((now, frame));
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerFault {
    AlreadyRunning,
    NotRunning,
    Rejected,
}

pub struct SimAlertDriver(pub Rc<RefCell<Sim>>);

impl AlertDriver for SimAlertDriver {
    type Error = TimerFault;

    fn start_blink(&mut self, interval_ms: u32) -> Result<(), Self::Error> {
        let mut sim = self.0.borrow_mut();
        sim.driver_calls.push("start");
        if sim.fail_start {
            return Err(TimerFault::Rejected);
        }
        if sim.blink_interval_ms.is_some() {
            return Err(TimerFault::AlreadyRunning);
        }
        let interval = u64::from(interval_ms);
        sim.blink_interval_ms = Some(interval);
        sim.next_blink_ms = sim.now_ms + interval;
        sim.live_blink_timers += 1;
        sim.blink_registrations += 1;
        sim.blink_started_at = Some(sim.now_ms);
        Ok(())
    }

    fn cancel_blink(&mut self) -> Result<(), Self::Error> {
        let mut sim = self.0.borrow_mut();
        sim.driver_calls.push("cancel");
        if sim.fail_cancel {
            // The alarm is left armed; only the disarm is reported as failed.
            return Err(TimerFault::Rejected);
        }
        if sim.blink_interval_ms.take().is_none() {
            return Err(TimerFault::NotRunning);
        }
        sim.live_blink_timers -= 1;
        sim.blink_cancelled_at = Some(sim.now_ms);
        Ok(())
    }

    fn force_off(&mut self) {
        let mut sim = self.0.borrow_mut();
        sim.driver_calls.push("force_off");
        sim.outputs.all_off();
    }
}

pub type SimMonitor<'a> = babymon_common::Monitor<'a, SimDisplay, SimAlertDriver, SimDelay>;

pub fn monitor<'a>(state: &'a MonitorState, sim: &Rc<RefCell<Sim>>) -> SimMonitor<'a> {
    babymon_common::Monitor::new(
        state,
        SimDisplay::new(sim.clone()),
        SimAlertDriver(sim.clone()),
        SimDelay(sim.clone()),
    )
}
