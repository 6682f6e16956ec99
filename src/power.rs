//! Display power management - backlight sleep and panel drive levels.
//!
//! Implements:
//! - Backlight auto-off after [`DISPLAY_AUTO_OFF_TIMEOUT_SECS`] without user input
//! - Wake on any classified button or potentiometer event
//! - Write-on-change drive of the backlight and contrast PWM channels

use crate::config::{DISPLAY_AUTO_OFF_ENABLED, DISPLAY_AUTO_OFF_TIMEOUT_SECS};
use crate::io::{PwmChannel, PwmOutputs};
use crate::power_logic;
use crate::settings::Configuration;
use crate::time::Millis;

/// Power state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerState {
    /// Backlight on at the configured brightness.
    Active,
    /// Backlight off after inactivity.
    Sleeping,
}

/// Power manager tracks user activity and drives the display panel.
pub struct PowerManager {
    state: PowerState,
    last_activity: Millis,
    backlight: Option<u8>,
    contrast: Option<u8>,
}

impl PowerManager {
    /// Create a new power manager; boot counts as activity.
    pub fn new(now: Millis) -> Self {
        Self {
            state: PowerState::Active,
            last_activity: now,
            backlight: None,
            contrast: None,
        }
    }

    /// Record activity (button press, potentiometer gesture).
    pub fn activity(&mut self, now: Millis) {
        self.last_activity = now;
    }

    /// Get current power state.
    pub fn state(&self) -> PowerState {
        self.state
    }

    /// Check if the backlight should be on.
    pub fn display_on(&self, now: Millis) -> bool {
        power_logic::screen_should_be_on(
            true,
            DISPLAY_AUTO_OFF_ENABLED,
            now.secs_since(self.last_activity),
            DISPLAY_AUTO_OFF_TIMEOUT_SECS,
        )
    }

    /// Per-tick update of power state and panel PWM levels.
    pub fn tick<P: PwmOutputs>(&mut self, config: &Configuration, now: Millis, pwm: &mut P) {
        let new_state = if self.display_on(now) {
            PowerState::Active
        } else {
            PowerState::Sleeping
        };
        if new_state != self.state {
            info!("Power: {:?} -> {:?}", self.state, new_state);
            self.state = new_state;
        }

        let backlight = match self.state {
            PowerState::Active => config.display_brightness,
            PowerState::Sleeping => 0,
        };
        if self.backlight != Some(backlight) {
            pwm.set_duty(PwmChannel::Backlight, backlight);
            self.backlight = Some(backlight);
        }

        if self.contrast != Some(config.display_contrast) {
            pwm.set_duty(PwmChannel::Contrast, config.display_contrast);
            self.contrast = Some(config.display_contrast);
        }
    }
}
