// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! SSD1306 OLED behind the `TextDisplay` seam.

use crate::board::DisplayI2c;
use babymon_common::config::{TextPlacement, DISPLAY_HEIGHT, DISPLAY_I2C_ADDR, DISPLAY_WIDTH};
use babymon_common::TextDisplay;
use embedded_graphics::{
    mono_font::{
        ascii::{FONT_10X20, FONT_6X10},
        MonoFont, MonoTextStyle,
    },
    pixelcolor::BinaryColor,
    prelude::*,
    text::{Baseline, Text},
};
use ssd1306::{mode::BufferedGraphicsMode, prelude::*, I2CDisplayInterface, Ssd1306};

type Panel = Ssd1306<
    I2CInterface<DisplayI2c>,
    DisplaySize128x64,
    BufferedGraphicsMode<DisplaySize128x64>,
>;

/// The panel did not acknowledge a command or data transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub struct DisplayFault;

pub struct OledDisplay {
    panel: Panel,
}

impl OledDisplay {
    pub fn new(i2c: DisplayI2c) -> Result<Self, DisplayFault> {
        let interface = I2CDisplayInterface::new_custom_address(i2c, DISPLAY_I2C_ADDR);
        let mut panel = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();
        panel.init().map_err(|_| DisplayFault)?;

        defmt::println!(
            "OLED {}x{} at 0x{:02x}",
            DISPLAY_WIDTH,
            DISPLAY_HEIGHT,
            DISPLAY_I2C_ADDR
        );
        Ok(Self { panel })
    }
}

fn font_for_scale(scale: u8) -> &'static MonoFont<'static> {
    match scale {
        0 | 1 => &FONT_6X10,
        _ => &FONT_10X20,
    }
}

impl TextDisplay for OledDisplay {
    type Error = DisplayFault;

    fn clear(&mut self) -> Result<(), Self::Error> {
        DrawTarget::clear(&mut self.panel, BinaryColor::Off).map_err(|_| DisplayFault)
    }

    fn draw_text(&mut self, placement: TextPlacement, text: &str) -> Result<(), Self::Error> {
        let style = MonoTextStyle::new(font_for_scale(placement.scale), BinaryColor::On);
        Text::with_baseline(
            text,
            Point::new(placement.col, placement.row),
            style,
            Baseline::Top,
        )
        .draw(&mut self.panel)
        .map(|_| ())
        .map_err(|_| DisplayFault)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.panel.flush().map_err(|_| DisplayFault)
    }
}
