//! Menu state machine: current screen plus the editing flag.

use crate::settings::Configuration;
use crate::ui::{InputEvent, Screen};

/// What the device must do in response to a menu event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuAction {
    None,
    ScreenChanged(Screen),
    EditStarted,
    /// Edit mode left; the configuration must be persisted.
    EditCommitted,
    /// Short press on the start screen; advance the LED mode.
    AdvanceMode,
}

#[derive(Debug)]
pub struct Menu {
    screen: Screen,
    editing: bool,
}

impl Menu {
    pub const fn new() -> Self {
        Self {
            screen: Screen::Start,
            editing: false,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn handle(&mut self, event: InputEvent) -> MenuAction {
        match (event, self.editing) {
            (InputEvent::GestureUp, false) => {
                self.screen = self.screen.next();
                MenuAction::ScreenChanged(self.screen)
            }
            (InputEvent::GestureDown, false) => {
                self.screen = self.screen.prev();
                MenuAction::ScreenChanged(self.screen)
            }
            (InputEvent::LongPress, false) => {
                self.editing = true;
                MenuAction::EditStarted
            }
            (InputEvent::LongPress, true) => {
                self.editing = false;
                MenuAction::EditCommitted
            }
            (InputEvent::ShortPress, false) if self.screen == Screen::Start => {
                MenuAction::AdvanceMode
            }
            _ => MenuAction::None,
        }
    }

    /// Write the potentiometer percentage into the field bound to the
    /// current screen. Only meaningful while editing.
    pub fn apply_pot(&self, pct: f32, config: &mut Configuration) {
        let byte = || ((pct / 100.0) * 255.0) as u8;
        match self.screen {
            Screen::Start => {}
            Screen::Contrast => config.display_contrast = byte(),
            Screen::DisplayBrightness => config.display_brightness = byte(),
            Screen::LedMax => config.led_max_brightness = byte(),
            Screen::LedMin => config.led_min_brightness = byte(),
            Screen::LightThreshold => config.light_threshold = pct,
            Screen::FadeStep => config.fade_step_ms = ((pct / 100.0) * 1000.0) as u16,
        }
    }
}

impl Default for Menu {
    fn default() -> Self {
        Self::new()
    }
}
