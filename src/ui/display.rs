//! SSD1306 OLED wrapper presenting a 16×2 character cell display.
//!
//! The controller writes characters into a [`CellGrid`] through
//! [`CharDisplay`]; [`CellDisplay::flush`] pushes the grid to the panel
//! only when a cell changed.

use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::MonoTextStyleBuilder;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use lightctl::config::DISPLAY_ROWS;
use lightctl::{CellGrid, CharDisplay, Error};
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::I2CDisplayInterface;
use ssd1306::Ssd1306;

/// Type alias for the concrete display driver.
///
/// Generic over the I²C implementation so callers pass in their HAL's
/// I²C peripheral.
pub type Display<I2C> =
    Ssd1306<I2CInterface<I2C>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

/// Pixel pitch of one character row.
const ROW_HEIGHT: i32 = 16;

/// Initialise the SSD1306 display and clear the screen.
pub fn init<I2C>(i2c: I2C) -> Display<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    let interface = I2CDisplayInterface::new(i2c);
    let mut display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
        .into_buffered_graphics_mode();
    let _ = display.init();
    display.clear_buffer();
    let _ = display.flush();
    display
}

fn text_style() -> embedded_graphics::mono_font::MonoTextStyle<'static, BinaryColor> {
    MonoTextStyleBuilder::new()
        .font(&FONT_6X10)
        .text_color(BinaryColor::On)
        .build()
}

/// Character grid rendered onto the OLED.
pub struct CellDisplay<I2C> {
    display: Display<I2C>,
    grid: CellGrid,
}

impl<I2C> CellDisplay<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    pub fn new(display: Display<I2C>) -> Self {
        Self {
            display,
            grid: CellGrid::new(),
        }
    }

    /// Redraw the panel if any cell changed since the last flush.
    pub fn flush(&mut self) -> Result<(), Error> {
        if !self.grid.is_dirty() {
            return Ok(());
        }

        self.display.clear_buffer();
        for row in 0..DISPLAY_ROWS as usize {
            let line = self.grid.line(row);
            let text = core::str::from_utf8(&line).map_err(|_| Error::BufferOverflow)?;
            let origin = Point::new(0, row as i32 * ROW_HEIGHT);
            let _ = Text::with_baseline(text, origin, text_style(), Baseline::Top)
                .draw(&mut self.display);
        }
        self.display.flush().map_err(|_| Error::Display)?;
        self.grid.clear_dirty();
        Ok(())
    }
}

impl<I2C> CharDisplay for CellDisplay<I2C> {
    fn clear(&mut self) {
        self.grid.clear()
    }

    fn set_cursor(&mut self, col: u8, row: u8) {
        self.grid.set_cursor(col, row)
    }

    fn print(&mut self, text: &str) {
        self.grid.print(text)
    }

    fn write_glyph(&mut self, glyph: u8) {
        self.grid.write_glyph(glyph)
    }
}
