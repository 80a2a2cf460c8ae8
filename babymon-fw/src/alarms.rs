// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Repeating callbacks on the RP2040 TIMER alarms.
//!
//! Alarm 0 drives the sampling callback and alarm 1 the blink callback. Each
//! alarm interrupt runs the callback body and re-arms the alarm for the next
//! period. State shared with the main loop lives behind `critical_section`
//! mutexes; the blink timer is only reachable through [`BlinkControl`].

use crate::board::BoardOutputs;
use babymon_common::{AlertDriver, BlinkTask, MonitorState, SamplingTask};
use core::cell::RefCell;
use cortex_m::peripheral::NVIC;
use critical_section::Mutex;
use rand::rngs::SmallRng;
use rp2040_hal::{
    fugit::MicrosDurationU32,
    pac::{self, interrupt},
    timer::{Alarm, Alarm0, Alarm1},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum AlarmError {
    /// The alarm could not be armed for the requested period.
    Schedule,
    /// The alarm could not be disarmed.
    Cancel,
    NotInstalled,
    AlreadyRunning,
}

struct SamplingTimer {
    alarm: Alarm0,
    period: MicrosDurationU32,
    state: &'static MonitorState,
    task: SamplingTask<SmallRng>,
}

impl SamplingTimer {
    fn fire(&mut self) {
        self.alarm.clear_interrupt();
        self.task.on_tick(self.state);
        if self.alarm.schedule(self.period).is_err() {
            defmt::warn!("Sampling: failed to re-arm alarm");
        }
    }
}

struct BlinkTimer {
    alarm: Alarm1,
    period: MicrosDurationU32,
    running: bool,
    state: &'static MonitorState,
    outputs: BoardOutputs,
}

impl BlinkTimer {
    fn fire(&mut self) {
        self.alarm.clear_interrupt();
        // A tick can still be pending in the NVIC right after a cancel.
        if !self.running {
            return;
        }
        BlinkTask::on_tick(self.state, &mut self.outputs);
        if self.alarm.schedule(self.period).is_err() {
            defmt::warn!("Blink: failed to re-arm alarm");
        }
    }
}

static SAMPLING: Mutex<RefCell<Option<SamplingTimer>>> = Mutex::new(RefCell::new(None));
static BLINK: Mutex<RefCell<Option<BlinkTimer>>> = Mutex::new(RefCell::new(None));

/// Start the repeating sampling callback. It runs for the rest of the program.
pub fn start_sampling(
    state: &'static MonitorState,
    mut alarm: Alarm0,
    task: SamplingTask<SmallRng>,
    period_ms: u32,
) -> Result<(), AlarmError> {
    let period = MicrosDurationU32::millis(period_ms);
    alarm.schedule(period).map_err(|_| AlarmError::Schedule)?;
    alarm.enable_interrupt();

    critical_section::with(|cs| {
        SAMPLING.borrow_ref_mut(cs).replace(SamplingTimer {
            alarm,
            period,
            state,
            task,
        });
    });

    // SAFETY: the handler only touches SAMPLING, which is initialized above.
    unsafe { NVIC::unmask(pac::Interrupt::TIMER_IRQ_0) };
    defmt::println!("Sampling every {} ms", period_ms);
    Ok(())
}

/// Hand the alert outputs to the blink timer. The timer stays idle until
/// [`BlinkControl::start_blink`] is called.
pub fn install_blink(
    state: &'static MonitorState,
    alarm: Alarm1,
    outputs: BoardOutputs,
) -> BlinkControl {
    critical_section::with(|cs| {
        BLINK.borrow_ref_mut(cs).replace(BlinkTimer {
            alarm,
            period: MicrosDurationU32::millis(0),
            running: false,
            state,
            outputs,
        });
    });

    // SAFETY: the handler only touches BLINK, which is initialized above.
    unsafe { NVIC::unmask(pac::Interrupt::TIMER_IRQ_1) };
    BlinkControl { _private: () }
}

/// Main-loop handle on the blink timer and the outputs it owns.
pub struct BlinkControl {
    _private: (),
}

impl BlinkControl {
    fn with_timer<R>(
        f: impl FnOnce(&mut BlinkTimer) -> Result<R, AlarmError>,
    ) -> Result<R, AlarmError> {
        critical_section::with(|cs| {
            let mut slot = BLINK.borrow_ref_mut(cs);
            let timer = slot.as_mut().ok_or(AlarmError::NotInstalled)?;
            f(timer)
        })
    }
}

impl AlertDriver for BlinkControl {
    type Error = AlarmError;

    fn start_blink(&mut self, interval_ms: u32) -> Result<(), Self::Error> {
        Self::with_timer(|timer| {
            if timer.running {
                return Err(AlarmError::AlreadyRunning);
            }
            timer.period = MicrosDurationU32::millis(interval_ms);
            timer.alarm.clear_interrupt();
            timer
                .alarm
                .schedule(timer.period)
                .map_err(|_| AlarmError::Schedule)?;
            timer.alarm.enable_interrupt();
            timer.running = true;
            Ok(())
        })
    }

    fn cancel_blink(&mut self) -> Result<(), Self::Error> {
        Self::with_timer(|timer| {
            timer.running = false;
            timer.alarm.disable_interrupt();
            let cancelled = timer.alarm.cancel().map_err(|_| AlarmError::Cancel);
            timer.alarm.clear_interrupt();
            NVIC::unpend(pac::Interrupt::TIMER_IRQ_1);
            cancelled
        })
    }

    fn force_off(&mut self) {
        let result = Self::with_timer(|timer| {
            timer.outputs.all_off();
            Ok(())
        });
        if result.is_err() {
            defmt::warn!("Blink: outputs not installed");
        }
    }
}

#[interrupt]
fn TIMER_IRQ_0() {
    critical_section::with(|cs| {
        if let Some(timer) = SAMPLING.borrow_ref_mut(cs).as_mut() {
            timer.fire();
        }
    });
}

#[interrupt]
fn TIMER_IRQ_1() {
    critical_section::with(|cs| {
        if let Some(timer) = BLINK.borrow_ref_mut(cs).as_mut() {
            timer.fire();
        }
    });
}
