//! Unified error type for the firmware glue.
//!
//! The control core never fails; these variants only come from the
//! target-side drivers (flash, display bus). We avoid `alloc` - all error
//! variants carry only fixed-size data.

/// Top-level error type used by the hardware glue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // Storage
    /// Flash read/write/erase failed.
    Storage,

    // UI / Display
    /// I²C transaction to the display failed.
    Display,

    // Generic
    /// Buffer too small for the requested operation.
    BufferOverflow,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Storage => write!(f, "flash storage failure"),
            Error::Display => write!(f, "display bus failure"),
            Error::BufferOverflow => write!(f, "buffer too small"),
        }
    }
}
