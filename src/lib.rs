//! Light fixture controller logic.
//!
//! Everything that decides what the fixture does lives in this library
//! and runs on the host: input filtering and classification, the settings
//! menu, the LED mode state machine, configuration persistence and
//! display rendering. The hardware is reached only through the traits in
//! [`io`], [`settings::ByteStore`], [`ui::CharDisplay`] and [`time::Clock`].
//!
//! Usage: `cargo test --lib` on the host.
//!
//! Note: The embedded binary uses main.rs with #![no_std] and #![no_main]
//! and implements those traits for the nRF52840 board.

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod config;
pub mod device;
pub mod error;
pub mod filter;
pub mod io;
pub mod led;
pub mod power;
pub mod power_logic;
pub mod settings;
pub mod time;
pub mod ui;

pub use device::Device;
pub use error::Error;
pub use io::{PwmChannel, PwmOutputs, RawInputs};
pub use led::OperatingMode;
pub use settings::{ByteStore, ConfigStore, Configuration, ImageStore};
pub use time::{Clock, Millis};
pub use ui::grid::CellGrid;
pub use ui::{CharDisplay, InputEvent, Screen};
