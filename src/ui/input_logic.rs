//! Turns raw button levels and potentiometer readings into [`InputEvent`]s.

use crate::config::{
    BUTTON_LONG_PRESS_MS, BUTTON_SHORT_PRESS_MS, POT_GESTURE_THRESHOLD_PCT, POT_POLL_INTERVAL_MS,
};
use crate::time::Millis;
use crate::ui::InputEvent;

/// Button hold state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonState {
    /// Released.
    Idle,
    /// Pressed, not yet held long enough for any event.
    DebounceWait { since: Millis },
    /// Held past the short-press threshold.
    ShortHeld { since: Millis },
    /// Held past the long-press threshold.
    LongHeld,
}

/// Classifies button presses by hold duration.
///
/// The event fires on release: `LongPress` if the button was seen held
/// for at least [`BUTTON_LONG_PRESS_MS`], `ShortPress` if for at least
/// [`BUTTON_SHORT_PRESS_MS`], nothing for shorter presses.
#[derive(Debug)]
pub struct ButtonClassifier {
    state: ButtonState,
}

impl ButtonClassifier {
    pub const fn new() -> Self {
        Self {
            state: ButtonState::Idle,
        }
    }

    pub fn state(&self) -> ButtonState {
        self.state
    }

    /// Feed one sample of the (already inverted) button level.
    pub fn update(&mut self, pressed: bool, now: Millis) -> Option<InputEvent> {
        if !pressed {
            let event = match self.state {
                ButtonState::LongHeld => Some(InputEvent::LongPress),
                ButtonState::ShortHeld { .. } => Some(InputEvent::ShortPress),
                ButtonState::Idle | ButtonState::DebounceWait { .. } => None,
            };
            self.state = ButtonState::Idle;
            return event;
        }

        let since = match self.state {
            ButtonState::Idle => now,
            ButtonState::DebounceWait { since } | ButtonState::ShortHeld { since } => since,
            ButtonState::LongHeld => return None,
        };

        let held = now.since(since);
        self.state = if held >= BUTTON_LONG_PRESS_MS {
            ButtonState::LongHeld
        } else if held >= BUTTON_SHORT_PRESS_MS {
            ButtonState::ShortHeld { since }
        } else {
            ButtonState::DebounceWait { since }
        };
        None
    }
}

impl Default for ButtonClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Detects potentiometer sweeps used to move between menu screens.
#[derive(Debug)]
pub struct PotGestures {
    last_value: f32,
    last_action: Millis,
}

impl PotGestures {
    pub fn new(value: f32, now: Millis) -> Self {
        Self {
            last_value: value,
            last_action: now,
        }
    }

    /// Gesture path, used while not editing.
    ///
    /// At most one gesture per [`POT_POLL_INTERVAL_MS`]; emitting one
    /// re-anchors the reference value.
    pub fn update(&mut self, value: f32, now: Millis) -> Option<InputEvent> {
        if now.since(self.last_action) < POT_POLL_INTERVAL_MS {
            return None;
        }

        let event = if value >= self.last_value + POT_GESTURE_THRESHOLD_PCT {
            InputEvent::GestureUp
        } else if value <= self.last_value - POT_GESTURE_THRESHOLD_PCT {
            InputEvent::GestureDown
        } else {
            return None;
        };
        self.track(value, now);
        Some(event)
    }

    /// Live-edit path: keep the reference on the knob so leaving edit mode
    /// does not fire a gesture for the travel made while editing.
    pub fn track(&mut self, value: f32, now: Millis) {
        self.last_value = value;
        self.last_action = now;
    }
}
