//! Application-wide constants and compile-time configuration.
//!
//! All hardware pin assignments, timing parameters, and persistence
//! constants live here so they can be tuned in one place.

// Inputs

/// Hold time before a press counts as a short press (ms).
pub const BUTTON_SHORT_PRESS_MS: u64 = 50;

/// Hold time before a press counts as a long press (ms).
pub const BUTTON_LONG_PRESS_MS: u64 = 500;

/// Potentiometer travel needed to emit a menu gesture (percent).
pub const POT_GESTURE_THRESHOLD_PCT: f32 = 5.0;

/// Minimum time between two potentiometer gestures (ms).
pub const POT_POLL_INTERVAL_MS: u64 = 100;

/// Number of raw readings averaged per analog channel.
pub const FILTER_WINDOW: usize = 10;

/// Full-scale reading of the 10-bit ADC.
pub const ADC_MAX: u16 = 1023;

// Display

/// Character cells per row.
pub const DISPLAY_COLS: u8 = 16;

/// Character rows.
pub const DISPLAY_ROWS: u8 = 2;

/// Raw glyph used to blank a cell before reprinting a dynamic value.
pub const DISPLAY_BLANK_GLYPH: u8 = 254;

/// Minimum time between two refreshes of the dynamic display fields (ms).
pub const DISPLAY_REFRESH_MS: u64 = 750;

/// Enable automatic backlight power-off after inactivity.
pub const DISPLAY_AUTO_OFF_ENABLED: bool = true;

/// Inactivity timeout before the backlight is turned off (seconds).
pub const DISPLAY_AUTO_OFF_TIMEOUT_SECS: u64 = 30;

// Scheduler

/// Main loop cadence on target (ms). Only paces the loop; every timed
/// behaviour is an elapsed-time comparison inside the tick.
pub const TICK_PERIOD_MS: u64 = 2;

// GPIO / analog assignments (nRF52840-DK defaults)
//
// These are logical names; actual `embassy_nrf::peripherals::*` types are
// selected in `main.rs`.  Adjust for your custom PCB.
//
//   LDR divider     → P0.03 (AIN1)
//   Potentiometer   → P0.04 (AIN2)
//   Sensor supply   → P0.31 (driven high at boot)
//   Button          → P0.11 (active-low, pull-up)
//   LED channel 1   → P0.13 (PWM0 ch0)
//   LED channel 2   → P0.14 (PWM0 ch1)
//   Backlight       → P0.15 (PWM0 ch2)
//   Contrast        → P0.16 (PWM0 ch3)
//   I²C SDA         → P0.26
//   I²C SCL         → P0.27

// Persistent configuration

/// Compatibility sentinel stored at the head of the configuration image.
/// Bump it whenever the image layout changes.
pub const CONFIG_VERSION: [u8; 3] = *b"V6\0";

/// Size of the serialized configuration image (bytes).
pub const CONFIG_IMAGE_SIZE: usize = 14;

/// Flash page index where the configuration image lives (4 KB per page on nRF52840).
pub const STORAGE_FLASH_PAGE_START: u32 = 240;

/// Number of flash pages reserved for the configuration image.
pub const STORAGE_FLASH_PAGE_COUNT: u32 = 2;
