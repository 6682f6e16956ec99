//! Screen rendering with throttled refresh.
//!
//! A screen change clears the display and draws every field. After that
//! only the fields that can change (mode name, live light level, setting
//! values) are reprinted, at most once per [`DISPLAY_REFRESH_MS`].

use core::fmt::Write;

use heapless::String;

use crate::config::{DISPLAY_BLANK_GLYPH, DISPLAY_COLS, DISPLAY_REFRESH_MS};
use crate::led::OperatingMode;
use crate::settings::Configuration;
use crate::time::Millis;
use crate::ui::{CharDisplay, Screen};

/// Everything a screen may show.
#[derive(Clone, Copy, Debug)]
pub struct View<'a> {
    pub screen: Screen,
    pub mode: OperatingMode,
    pub light_pct: f32,
    pub config: &'a Configuration,
}

/// Formatted value text; one display row at most.
pub type Line = String<{ DISPLAY_COLS as usize }>;

#[derive(Debug)]
pub struct Renderer {
    drawn: Option<Screen>,
    last_update: Millis,
}

impl Renderer {
    pub const fn new() -> Self {
        Self {
            drawn: None,
            last_update: Millis(0),
        }
    }

    /// Screen currently on the display, if any has been drawn.
    pub fn drawn(&self) -> Option<Screen> {
        self.drawn
    }

    /// Draw or refresh the display for this tick.
    pub fn render<D: CharDisplay>(&mut self, display: &mut D, view: &View<'_>, now: Millis) {
        if self.drawn != Some(view.screen) {
            draw_full(display, view);
            self.drawn = Some(view.screen);
            self.last_update = now;
            return;
        }

        if now.since(self.last_update) >= DISPLAY_REFRESH_MS {
            refresh(display, view);
            self.last_update = now;
        }
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

fn draw_full<D: CharDisplay>(display: &mut D, view: &View<'_>) {
    display.clear();
    display.set_cursor(0, 0);
    display.print(view.screen.title());

    match view.screen {
        Screen::Start => {
            display.print(view.mode.name());
            display.set_cursor(0, 1);
            display.print("Light: ");
            display.print(&percent(view.light_pct));
        }
        _ => {
            display.set_cursor(0, 1);
            display.print(&value_text(view));
        }
    }
}

fn refresh<D: CharDisplay>(display: &mut D, view: &View<'_>) {
    match view.screen {
        Screen::Start => {
            blank(display, 0, 5);
            display.set_cursor(6, 0);
            display.print(view.mode.name());

            blank(display, 1, 6);
            display.set_cursor(7, 1);
            display.print(&percent(view.light_pct));
        }
        _ => {
            blank(display, 1, 0);
            display.set_cursor(0, 1);
            display.print(&value_text(view));
        }
    }
}

/// Overwrite `row` from column `from` to the end with the blank glyph.
fn blank<D: CharDisplay>(display: &mut D, row: u8, from: u8) {
    for col in from..DISPLAY_COLS {
        display.set_cursor(col, row);
        display.write_glyph(DISPLAY_BLANK_GLYPH);
    }
}

fn percent(pct: f32) -> Line {
    let mut line = Line::new();
    let _ = write!(line, "{:.2}%", pct);
    line
}

/// Second-row text for a settings screen.
pub fn value_text(view: &View<'_>) -> Line {
    let config = view.config;
    let mut line = Line::new();
    let _ = match view.screen {
        Screen::Start => write!(line, "{:.2}%", view.light_pct),
        Screen::Contrast => write!(line, "{}", config.display_contrast),
        Screen::DisplayBrightness => write!(line, "{}", config.display_brightness),
        Screen::LedMax => write!(line, "{}", config.led_max_brightness),
        Screen::LedMin => write!(line, "{}", config.led_min_brightness),
        Screen::LightThreshold => write!(
            line,
            "{:.2}({:.2}%)",
            config.light_threshold, view.light_pct
        ),
        Screen::FadeStep => write!(line, "{}", config.fade_step_ms),
    };
    line
}
