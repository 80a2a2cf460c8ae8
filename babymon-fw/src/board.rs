// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! RP2040 bring-up: clocks, I2C1 + OLED, RGB LED, PWM buzzer, hardware timer.

use crate::display::OledDisplay;
use babymon_common::config::{
    BUZZER_CLOCK_DIVIDER, BUZZER_PIN, I2C_FREQUENCY_HZ, I2C_SCL_PIN, I2C_SDA_PIN, LED_BLUE_PIN,
    LED_GREEN_PIN, LED_RED_PIN,
};
use babymon_common::AlertOutputs;
use rp2040_hal::{
    self as hal,
    fugit::RateExtU32,
    gpio::{
        bank0::{Gpio11, Gpio12, Gpio13, Gpio14, Gpio15},
        FunctionI2C, FunctionSioOutput, Pin, PullDown, PullUp,
    },
    pac, pwm,
    timer::{Alarm0, Alarm1},
    Timer,
};

const XTAL_FREQ_HZ: u32 = 12_000_000;

pub type RedLed = Pin<Gpio13, FunctionSioOutput, PullDown>;
pub type GreenLed = Pin<Gpio11, FunctionSioOutput, PullDown>;
pub type BlueLed = Pin<Gpio12, FunctionSioOutput, PullDown>;
pub type BuzzerChannel = pwm::Channel<pwm::Slice<pwm::Pwm2, pwm::FreeRunning>, pwm::B>;
pub type BoardOutputs = AlertOutputs<RedLed, GreenLed, BlueLed, BuzzerChannel>;

pub type DisplayI2c = hal::I2C<
    pac::I2C1,
    (
        Pin<Gpio14, FunctionI2C, PullUp>,
        Pin<Gpio15, FunctionI2C, PullUp>,
    ),
>;

/// Initialization step that failed.
#[derive(Debug, Clone, Copy, defmt::Format)]
pub enum BoardError {
    PeripheralsTaken,
    Clocks,
    Display,
    AlarmUnavailable,
}

/// Everything the application needs after bring-up.
pub struct Board {
    pub timer: Timer,
    pub display: OledDisplay,
    pub outputs: BoardOutputs,
    pub sample_alarm: Alarm0,
    pub blink_alarm: Alarm1,
}

pub fn init() -> Result<Board, BoardError> {
    let mut pac = pac::Peripherals::take().ok_or(BoardError::PeripheralsTaken)?;
    let mut watchdog = hal::Watchdog::new(pac.WATCHDOG);

    let clocks = hal::clocks::init_clocks_and_plls(
        XTAL_FREQ_HZ,
        pac.XOSC,
        pac.CLOCKS,
        pac.PLL_SYS,
        pac.PLL_USB,
        &mut pac.RESETS,
        &mut watchdog,
    )
    .map_err(|_| BoardError::Clocks)?;

    let sio = hal::Sio::new(pac.SIO);
    let pins = hal::gpio::Pins::new(
        pac.IO_BANK0,
        pac.PADS_BANK0,
        sio.gpio_bank0,
        &mut pac.RESETS,
    );

    // I2C1 + OLED
    let sda: Pin<Gpio14, FunctionI2C, PullUp> = pins.gpio14.reconfigure();
    let scl: Pin<Gpio15, FunctionI2C, PullUp> = pins.gpio15.reconfigure();
    let i2c = hal::I2C::i2c1(
        pac.I2C1,
        sda,
        scl,
        I2C_FREQUENCY_HZ.Hz(),
        &mut pac.RESETS,
        &clocks.system_clock,
    );
    defmt::println!(
        "I2C1 up: SDA=GP{} SCL=GP{} @ {} Hz",
        I2C_SDA_PIN,
        I2C_SCL_PIN,
        I2C_FREQUENCY_HZ
    );
    let display = OledDisplay::new(i2c).map_err(|_| BoardError::Display)?;

    // Buzzer on PWM2 B
    let pwm_slices = pwm::Slices::new(pac.PWM, &mut pac.RESETS);
    let mut buzzer_slice = pwm_slices.pwm2;
    buzzer_slice.set_div_int(BUZZER_CLOCK_DIVIDER);
    buzzer_slice.set_div_frac(0);
    buzzer_slice.enable();
    let mut buzzer = buzzer_slice.channel_b;
    let _buzzer_pin = buzzer.output_to(pins.gpio21);
    defmt::println!(
        "Buzzer on GP{}, clock divider {}",
        BUZZER_PIN,
        BUZZER_CLOCK_DIVIDER
    );

    // RGB LED
    let red: RedLed = pins.gpio13.into_push_pull_output();
    let green: GreenLed = pins.gpio11.into_push_pull_output();
    let blue: BlueLed = pins.gpio12.into_push_pull_output();
    let outputs = AlertOutputs::new(red, green, blue, buzzer);
    defmt::println!(
        "RGB LED on GP{}/GP{}/GP{}",
        LED_RED_PIN,
        LED_GREEN_PIN,
        LED_BLUE_PIN
    );

    let mut timer = Timer::new(pac.TIMER, &mut pac.RESETS, &clocks);
    let sample_alarm = timer.alarm_0().ok_or(BoardError::AlarmUnavailable)?;
    let blink_alarm = timer.alarm_1().ok_or(BoardError::AlarmUnavailable)?;

    Ok(Board {
        timer,
        display,
        outputs,
        sample_alarm,
        blink_alarm,
    })
}
