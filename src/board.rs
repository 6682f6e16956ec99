//! nRF52840 board glue: analog inputs, button, PWM outputs and clock.
//!
//! Implements the library's hardware seams for the fixture PCB. The pin
//! map lives in `config.rs`; the concrete peripherals are chosen in
//! `main.rs`.

use embassy_nrf::gpio::Input;
use embassy_nrf::pwm::{self, SimplePwm};
use embassy_nrf::saadc::Saadc;
use lightctl::config::ADC_MAX;
use lightctl::{Clock, Millis, PwmChannel, PwmOutputs, RawInputs};

/// Monotonic clock backed by the embassy time driver (RTC1).
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now(&self) -> Millis {
        Millis(embassy_time::Instant::now().as_millis())
    }
}

/// Analog channels in SAADC scan order.
const LIGHT_CHANNEL: usize = 0;
const POT_CHANNEL: usize = 1;

/// Input side of the board.
pub struct Inputs<'d> {
    saadc: Saadc<'d, 2>,
    button: Input<'d>,
}

impl<'d> Inputs<'d> {
    pub fn new(saadc: Saadc<'d, 2>, button: Input<'d>) -> Self {
        Self { saadc, button }
    }

    /// Sample both analog channels once and read the button level.
    pub async fn sample(&mut self) -> RawInputs {
        let mut buf = [0i16; 2];
        self.saadc.sample(&mut buf).await;

        RawInputs {
            light_raw: to_raw(buf[LIGHT_CHANNEL]),
            pot_raw: to_raw(buf[POT_CHANNEL]),
            // Active-low with pull-up.
            button_pressed: self.button.is_low(),
        }
    }
}

/// SAADC single-ended results can dip slightly below zero.
fn to_raw(sample: i16) -> u16 {
    (sample.max(0) as u16).min(ADC_MAX)
}

/// Four-channel PWM: LED1, LED2, backlight, contrast.
pub struct Outputs<'d, T: pwm::Instance> {
    pwm: SimplePwm<'d, T>,
}

impl<'d, T: pwm::Instance> Outputs<'d, T> {
    pub fn new(pwm: SimplePwm<'d, T>) -> Self {
        pwm.set_max_duty(u8::MAX as u16);
        for channel in 0..4 {
            pwm.set_duty(channel, 0);
        }
        Self { pwm }
    }
}

impl<T: pwm::Instance> PwmOutputs for Outputs<'_, T> {
    fn set_duty(&mut self, channel: PwmChannel, duty: u8) {
        self.pwm.set_duty(channel.index(), duty as u16);
    }
}
