//! User interface subsystem - 16×2 character display + button + potentiometer.
//!
//! The menu is a ring of screens. Sweeping the potentiometer moves between
//! screens; a long press toggles editing, during which the potentiometer
//! writes straight into the setting shown on the current screen.
//!
//! ## Components
//!
//! - **Input logic**: button press classification and potentiometer gestures
//! - **Menu**: screen ring + editing flag
//! - **Render**: throttled drawing onto a [`CharDisplay`]
//! - **Grid**: change-tracking cell buffer for pixel panels

pub mod grid;
pub mod input_logic;
pub mod menu;
pub mod render;

#[cfg(test)]
mod tests;

/// Screens (views) the menu can be in, in ring order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Screen {
    /// Home - shows the operating mode and live light level.
    Start,
    Contrast,
    DisplayBrightness,
    LedMax,
    LedMin,
    LightThreshold,
    FadeStep,
}

impl Screen {
    /// Next screen in ring order.
    pub fn next(self) -> Self {
        match self {
            Screen::Start => Screen::Contrast,
            Screen::Contrast => Screen::DisplayBrightness,
            Screen::DisplayBrightness => Screen::LedMax,
            Screen::LedMax => Screen::LedMin,
            Screen::LedMin => Screen::LightThreshold,
            Screen::LightThreshold => Screen::FadeStep,
            Screen::FadeStep => Screen::Start,
        }
    }

    /// Previous screen in ring order.
    pub fn prev(self) -> Self {
        match self {
            Screen::Start => Screen::FadeStep,
            Screen::Contrast => Screen::Start,
            Screen::DisplayBrightness => Screen::Contrast,
            Screen::LedMax => Screen::DisplayBrightness,
            Screen::LedMin => Screen::LedMax,
            Screen::LightThreshold => Screen::LedMin,
            Screen::FadeStep => Screen::LightThreshold,
        }
    }

    /// Heading printed on the first row of a settings screen.
    pub fn title(self) -> &'static str {
        match self {
            Screen::Start => "Mode: ",
            Screen::Contrast => "LCD Contrast",
            Screen::DisplayBrightness => "LCD Brightness",
            Screen::LedMax => "LED Max",
            Screen::LedMin => "LED Min",
            Screen::LightThreshold => "Light Level",
            Screen::FadeStep => "Step (ms)",
        }
    }
}

/// Classified user input events.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputEvent {
    ShortPress,
    LongPress,
    /// Potentiometer swept up past the gesture threshold.
    GestureUp,
    /// Potentiometer swept down past the gesture threshold.
    GestureDown,
}

/// 16×2 character display driver.
///
/// Rendering primitives only; implementations swallow bus errors.
pub trait CharDisplay {
    fn clear(&mut self);
    fn set_cursor(&mut self, col: u8, row: u8);
    fn print(&mut self, text: &str);
    /// Write one raw glyph code at the cursor.
    fn write_glyph(&mut self, glyph: u8);
}

impl<T: CharDisplay + ?Sized> CharDisplay for &mut T {
    fn clear(&mut self) {
        (**self).clear()
    }

    fn set_cursor(&mut self, col: u8, row: u8) {
        (**self).set_cursor(col, row)
    }

    fn print(&mut self, text: &str) {
        (**self).print(text)
    }

    fn write_glyph(&mut self, glyph: u8) {
        (**self).write_glyph(glyph)
    }
}
