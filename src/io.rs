//! Hardware seams between the control core and the board.
//!
//! The board samples its pins once per tick into [`RawInputs`] and
//! implements [`PwmOutputs`] for the four PWM channels it drives.

/// One tick's worth of raw input samples.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawInputs {
    /// Light-dependent resistor divider, 10-bit ADC reading.
    pub light_raw: u16,
    /// Potentiometer wiper, 10-bit ADC reading.
    pub pot_raw: u16,
    /// Button level, already inverted from the active-low pin.
    pub button_pressed: bool,
}

/// PWM channels driven by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PwmChannel {
    Led1,
    Led2,
    Backlight,
    Contrast,
}

impl PwmChannel {
    /// Index of the channel on a 4-channel PWM peripheral.
    pub const fn index(self) -> usize {
        match self {
            PwmChannel::Led1 => 0,
            PwmChannel::Led2 => 1,
            PwmChannel::Backlight => 2,
            PwmChannel::Contrast => 3,
        }
    }
}

/// Trait for abstracting the PWM hardware.
///
/// Duty cycles are 8-bit (0 = off, 255 = full on). Handle any hardware
/// errors internally - this method cannot fail.
pub trait PwmOutputs {
    fn set_duty(&mut self, channel: PwmChannel, duty: u8);
}

impl<T: PwmOutputs + ?Sized> PwmOutputs for &mut T {
    fn set_duty(&mut self, channel: PwmChannel, duty: u8) {
        (**self).set_duty(channel, duty)
    }
}
