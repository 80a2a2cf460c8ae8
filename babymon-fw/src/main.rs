// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Baby monitor demo firmware.
//!
//! A simulated pressure sensor is sampled every 5 s from a timer interrupt.
//! The main loop shows "Bebe Dormindo!" while the reading stays at or below
//! the threshold, and on movement shows "Bebe Movimentando!" and blinks the
//! red LED and buzzer for the alert window.

#![cfg_attr(target_os = "none", no_std)]
#![cfg_attr(target_os = "none", no_main)]

#[cfg(target_os = "none")]
mod alarms;
#[cfg(target_os = "none")]
mod board;
#[cfg(target_os = "none")]
mod display;

#[cfg(target_os = "none")]
mod firmware {
    use crate::{alarms, board};
    use babymon_common::config::SAMPLE_INTERVAL_MS;
    use babymon_common::{
        seed_from_micros, Monitor, MonitorState, SamplingTask, SimulatedPressureSensor,
    };
    use cortex_m_rt::entry;
    use defmt_rtt as _;
    use panic_probe as _;
    use rand::rngs::SmallRng;
    use rp2040_hal::pac;

    defmt::timestamp!("{=u32:us}", {
        // SAFETY: read-only access to the free-running TIMER counter.
        unsafe { (*pac::TIMER::ptr()).timerawl().read().bits() }
    });

    #[unsafe(link_section = ".boot2")]
    #[used]
    pub static BOOT2_FIRMWARE: [u8; 256] = rp2040_boot2::BOOT_LOADER_W25Q080;

    static STATE: MonitorState = MonitorState::new();

    #[entry]
    fn main() -> ! {
        defmt::println!("babymon v{} starting", env!("BABYMON_VERSION"));

        let board = match board::init() {
            Ok(board) => board,
            Err(e) => defmt::panic!("Board init failed: {}", e),
        };

        let seed = seed_from_micros(board.timer.get_counter().ticks());
        defmt::println!("PRNG seed: {}", seed);
        let sampling = SamplingTask::new(SimulatedPressureSensor::<SmallRng>::seeded(seed));

        if let Err(e) =
            alarms::start_sampling(&STATE, board.sample_alarm, sampling, SAMPLE_INTERVAL_MS)
        {
            defmt::panic!("Sampling timer failed to start: {}", e);
        }
        let blink = alarms::install_blink(&STATE, board.blink_alarm, board.outputs);

        defmt::println!("Monitoring");
        let mut monitor = Monitor::new(&STATE, board.display, blink, board.timer);
        monitor.run()
    }
}

#[cfg(not(target_os = "none"))]
fn main() {
    println!(
        "babymon-fw v{} only runs on the RP2040; build with --target thumbv6m-none-eabi",
        env!("BABYMON_VERSION")
    );
}
