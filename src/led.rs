//! LED operating modes and the per-tick drive algorithm.
//!
//! Modes form a ring advanced by a short press on the start screen.
//! The fade modes share one triangle-wave accumulator that steps by one
//! every `fade_step_ms` and reverses at the configured max/min. The ramp
//! keeps running while the light gate holds the output at zero, so the
//! waveform phase survives gate transitions.

use crate::io::{PwmChannel, PwmOutputs};
use crate::settings::Configuration;
use crate::time::Millis;

/// LED operating mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum OperatingMode {
    /// Power-on placeholder before a mode is adopted. LEDs dark.
    Init = 0,
    Off = 1,
    /// Both channels steady at the configured max.
    On = 2,
    /// Ungated triangle ramp.
    Fade = 3,
    /// Ungated square wave between max and off.
    Strobe = 4,
    /// Max brightness while the room is darker than the threshold.
    Auto = 5,
    /// Gated triangle ramp.
    AutoFade = 6,
    /// Gated triangle ramp, channel 2 in antiphase.
    AutoFadeInOut = 7,
}

impl OperatingMode {
    /// Next mode in ring order.
    pub fn next(self) -> Self {
        match self {
            OperatingMode::Init | OperatingMode::Off => OperatingMode::On,
            OperatingMode::On => OperatingMode::Fade,
            OperatingMode::Fade => OperatingMode::Strobe,
            OperatingMode::Strobe => OperatingMode::Auto,
            OperatingMode::Auto => OperatingMode::AutoFade,
            OperatingMode::AutoFade => OperatingMode::AutoFadeInOut,
            OperatingMode::AutoFadeInOut => OperatingMode::Off,
        }
    }

    /// Short name shown on the start screen.
    pub fn name(self) -> &'static str {
        match self {
            OperatingMode::Init => "Init",
            OperatingMode::Off => "Off",
            OperatingMode::On => "On",
            OperatingMode::Fade => "On(Fade)",
            OperatingMode::Strobe => "On(Strobe)",
            OperatingMode::Auto => "Auto(LL)",
            OperatingMode::AutoFade => "Auto(LLF)",
            OperatingMode::AutoFadeInOut => "Auto(LLFIO)",
        }
    }

    /// Whether output is suppressed while the room is bright.
    pub fn is_light_gated(self) -> bool {
        matches!(
            self,
            OperatingMode::Auto | OperatingMode::AutoFade | OperatingMode::AutoFadeInOut
        )
    }

    fn uses_ramp(self) -> bool {
        matches!(
            self,
            OperatingMode::Fade | OperatingMode::AutoFade | OperatingMode::AutoFadeInOut
        )
    }

    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(OperatingMode::Init),
            1 => Some(OperatingMode::Off),
            2 => Some(OperatingMode::On),
            3 => Some(OperatingMode::Fade),
            4 => Some(OperatingMode::Strobe),
            5 => Some(OperatingMode::Auto),
            6 => Some(OperatingMode::AutoFade),
            7 => Some(OperatingMode::AutoFadeInOut),
            _ => None,
        }
    }
}

/// Triangle-wave brightness accumulator.
///
/// Starts at the configured min moving up. After each step the direction
/// flips if the value has reached max or min. If the bounds move past the
/// current value (a live LED Max/Min edit) it snaps back into the band
/// and heads inward. With `min >= max` the direction flips on every step;
/// that configuration is not rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Ramp {
    current: i16,
    step: i16,
}

impl Ramp {
    pub fn new(start: u8) -> Self {
        Self {
            current: start as i16,
            step: 1,
        }
    }

    /// Advance one step against the given bounds.
    pub fn step(&mut self, min: u8, max: u8) {
        let (min, max) = (min as i16, max as i16);
        if min < max {
            self.current = self.current.clamp(min, max);
            if self.current == max {
                self.step = -1;
            } else if self.current == min {
                self.step = 1;
            }
        }

        self.current += self.step;
        if self.current >= max || self.current <= min {
            self.step = -self.step;
        }
    }

    /// Current brightness, clamped to the 8-bit duty range.
    pub fn brightness(&self) -> u8 {
        self.current.clamp(0, u8::MAX as i16) as u8
    }

    /// Direction of the next step (+1 or -1).
    pub fn direction(&self) -> i16 {
        self.step
    }
}

/// Drives the two LED channels according to the active mode.
pub struct LedController {
    mode: Option<OperatingMode>,
    ramp: Ramp,
    strobe_lit: bool,
    last_step: Millis,
    written: [Option<u8>; 2],
}

impl LedController {
    pub fn new(config: &Configuration, now: Millis) -> Self {
        Self {
            mode: None,
            ramp: Ramp::new(config.led_min_brightness),
            strobe_lit: false,
            last_step: now,
            written: [None, None],
        }
    }

    /// Mode applied on the last tick, if any.
    pub fn mode(&self) -> Option<OperatingMode> {
        self.mode
    }

    pub fn ramp(&self) -> &Ramp {
        &self.ramp
    }

    /// Run one tick of the LED state machine.
    ///
    /// `light_pct` is the filtered ambient light level (0-100).
    pub fn tick<P: PwmOutputs>(
        &mut self,
        mode: OperatingMode,
        config: &Configuration,
        light_pct: f32,
        now: Millis,
        pwm: &mut P,
    ) {
        if self.mode != Some(mode) {
            debug!("LED: mode {:?} -> {:?}", self.mode, mode);
            // Force both channels dark so no duty cycle survives the switch.
            self.force(pwm, PwmChannel::Led1, 0);
            self.force(pwm, PwmChannel::Led2, 0);
            self.strobe_lit = false;
            self.mode = Some(mode);
        }

        if now.since(self.last_step) >= config.fade_step_ms as u64 {
            if mode.uses_ramp() {
                self.ramp
                    .step(config.led_min_brightness, config.led_max_brightness);
            } else if mode == OperatingMode::Strobe {
                self.strobe_lit = !self.strobe_lit;
            }
            self.last_step = now;
        }

        let (led1, led2) = self.targets(mode, config, light_pct);
        self.write(pwm, PwmChannel::Led1, led1);
        self.write(pwm, PwmChannel::Led2, led2);
    }

    fn targets(&self, mode: OperatingMode, config: &Configuration, light_pct: f32) -> (u8, u8) {
        if mode.is_light_gated() && light_pct >= config.light_threshold {
            return (0, 0);
        }

        let max = config.led_max_brightness;
        match mode {
            OperatingMode::Init | OperatingMode::Off => (0, 0),
            OperatingMode::On | OperatingMode::Auto => (max, max),
            OperatingMode::Strobe => {
                let level = if self.strobe_lit { max } else { 0 };
                (level, level)
            }
            OperatingMode::Fade | OperatingMode::AutoFade => {
                let level = self.ramp.brightness();
                (level, level)
            }
            OperatingMode::AutoFadeInOut => {
                let level = self.ramp.brightness();
                let mirrored = max as i16 + config.led_min_brightness as i16 - level as i16;
                (level, mirrored.clamp(0, u8::MAX as i16) as u8)
            }
        }
    }

    fn write<P: PwmOutputs>(&mut self, pwm: &mut P, channel: PwmChannel, duty: u8) {
        let slot = &mut self.written[channel.index()];
        if *slot != Some(duty) {
            pwm.set_duty(channel, duty);
            *slot = Some(duty);
        }
    }

    fn force<P: PwmOutputs>(&mut self, pwm: &mut P, channel: PwmChannel, duty: u8) {
        pwm.set_duty(channel, duty);
        self.written[channel.index()] = Some(duty);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::Vec;

    #[derive(Default)]
    struct PwmLog {
        writes: Vec<(PwmChannel, u8), 64>,
    }

    impl PwmOutputs for PwmLog {
        fn set_duty(&mut self, channel: PwmChannel, duty: u8) {
            let _ = self.writes.push((channel, duty));
        }
    }

    impl PwmLog {
        fn last(&self, channel: PwmChannel) -> Option<u8> {
            self.writes
                .iter()
                .rev()
                .find(|(c, _)| *c == channel)
                .map(|(_, d)| *d)
        }
    }

    #[test]
    fn mode_ring_order() {
        let mut mode = OperatingMode::Off;
        let mut seen = [OperatingMode::Off; 8];
        for slot in seen.iter_mut().skip(1) {
            mode = mode.next();
            *slot = mode;
        }
        assert_eq!(
            seen,
            [
                OperatingMode::Off,
                OperatingMode::On,
                OperatingMode::Fade,
                OperatingMode::Strobe,
                OperatingMode::Auto,
                OperatingMode::AutoFade,
                OperatingMode::AutoFadeInOut,
                OperatingMode::Off,
            ]
        );
        assert_eq!(OperatingMode::Init.next(), OperatingMode::On);
    }

    #[test]
    fn mode_byte_mapping() {
        for value in 0..8u8 {
            let mode = OperatingMode::from_u8(value).unwrap();
            assert_eq!(mode as u8, value);
        }
        assert!(OperatingMode::from_u8(8).is_none());
    }

    #[test]
    fn ramp_reverses_at_bounds_and_stays_inside() {
        let mut ramp = Ramp::new(15);
        let mut hit_max = false;
        let mut hit_min = false;
        for _ in 0..2_000 {
            ramp.step(15, 255);
            let b = ramp.brightness();
            assert!((15..=255).contains(&b));
            if b == 255 {
                hit_max = true;
                assert_eq!(ramp.direction(), -1);
            }
            if b == 15 {
                hit_min = true;
                assert_eq!(ramp.direction(), 1);
            }
        }
        assert!(hit_max && hit_min);
    }

    #[test]
    fn ramp_thrashes_when_min_not_below_max() {
        let mut ramp = Ramp::new(200);
        ramp.step(200, 100);
        assert_eq!(ramp.brightness(), 201);
        assert_eq!(ramp.direction(), -1);
        ramp.step(200, 100);
        assert_eq!(ramp.brightness(), 200);
        assert_eq!(ramp.direction(), 1);
    }

    #[test]
    fn ramp_returns_into_band_when_max_drops_below_it() {
        let mut ramp = Ramp::new(15);
        while ramp.brightness() < 200 {
            ramp.step(15, 255);
        }

        for _ in 0..1_000 {
            ramp.step(15, 100);
            assert!((15..=100).contains(&ramp.brightness()));
        }
    }

    #[test]
    fn ramp_returns_into_band_when_min_rises_above_it() {
        let mut ramp = Ramp::new(15);
        ramp.step(120, 255);
        assert_eq!(ramp.brightness(), 121);
        assert_eq!(ramp.direction(), 1);
    }

    #[test]
    fn fade_follows_lowered_max_brightness() {
        let mut config = Configuration {
            fade_step_ms: 1,
            ..Configuration::default()
        };
        let mut leds = LedController::new(&config, Millis(0));
        let mut pwm = PwmLog::default();

        let mut t = 0;
        while leds.ramp().brightness() < 200 {
            t += 1;
            leds.tick(OperatingMode::Fade, &config, 0.0, Millis(t), &mut pwm);
        }

        config.led_max_brightness = 100;
        for _ in 0..1_000 {
            t += 1;
            let mut pwm = PwmLog::default();
            leds.tick(OperatingMode::Fade, &config, 0.0, Millis(t), &mut pwm);
            assert!(leds.ramp().brightness() <= 100);
            assert!(pwm.last(PwmChannel::Led1).map_or(true, |d| d <= 100));
        }
    }

    #[test]
    fn strobe_starts_dark_after_mode_change() {
        let config = Configuration {
            fade_step_ms: 50,
            ..Configuration::default()
        };
        let mut leds = LedController::new(&config, Millis(0));
        let mut pwm = PwmLog::default();

        leds.tick(OperatingMode::Strobe, &config, 0.0, Millis(0), &mut pwm);
        leds.tick(OperatingMode::Strobe, &config, 0.0, Millis(50), &mut pwm);
        assert_eq!(pwm.last(PwmChannel::Led1), Some(255));

        leds.tick(OperatingMode::On, &config, 0.0, Millis(60), &mut pwm);
        leds.tick(OperatingMode::Strobe, &config, 0.0, Millis(70), &mut pwm);
        assert_eq!(pwm.last(PwmChannel::Led1), Some(0));
    }

    #[test]
    fn mode_change_forces_channels_dark_first() {
        let config = Configuration::default();
        let mut leds = LedController::new(&config, Millis(0));
        let mut pwm = PwmLog::default();

        leds.tick(OperatingMode::On, &config, 0.0, Millis(0), &mut pwm);
        assert_eq!(
            &pwm.writes[..],
            &[
                (PwmChannel::Led1, 0),
                (PwmChannel::Led2, 0),
                (PwmChannel::Led1, 255),
                (PwmChannel::Led2, 255),
            ]
        );
    }

    #[test]
    fn on_mode_writes_only_on_change() {
        let mut config = Configuration::default();
        let mut leds = LedController::new(&config, Millis(0));
        let mut pwm = PwmLog::default();

        leds.tick(OperatingMode::On, &config, 0.0, Millis(0), &mut pwm);
        let count = pwm.writes.len();
        leds.tick(OperatingMode::On, &config, 0.0, Millis(10), &mut pwm);
        assert_eq!(pwm.writes.len(), count);

        config.led_max_brightness = 128;
        leds.tick(OperatingMode::On, &config, 0.0, Millis(20), &mut pwm);
        assert_eq!(pwm.last(PwmChannel::Led1), Some(128));
        assert_eq!(pwm.last(PwmChannel::Led2), Some(128));
    }

    #[test]
    fn auto_gate_blocks_output_but_ramp_keeps_running() {
        let config = Configuration {
            fade_step_ms: 10,
            light_threshold: 25.0,
            ..Configuration::default()
        };
        let mut leds = LedController::new(&config, Millis(0));
        let mut pwm = PwmLog::default();

        // Bright room: stays dark while the ramp advances.
        for t in 0..=5u64 {
            leds.tick(OperatingMode::AutoFade, &config, 80.0, Millis(t * 10), &mut pwm);
        }
        assert_eq!(pwm.last(PwmChannel::Led1), Some(0));
        let phase = leds.ramp().brightness();
        assert_eq!(phase, config.led_min_brightness + 5);

        // Dark room: output follows the ramp from where it got to.
        leds.tick(OperatingMode::AutoFade, &config, 10.0, Millis(55), &mut pwm);
        assert_eq!(pwm.last(PwmChannel::Led1), Some(phase));
        assert_eq!(pwm.last(PwmChannel::Led2), Some(phase));
    }

    #[test]
    fn threshold_equal_counts_as_bright() {
        let config = Configuration::default();
        let mut leds = LedController::new(&config, Millis(0));
        let mut pwm = PwmLog::default();

        leds.tick(OperatingMode::Auto, &config, config.light_threshold, Millis(0), &mut pwm);
        assert_eq!(pwm.last(PwmChannel::Led1), Some(0));

        leds.tick(OperatingMode::Auto, &config, 24.9, Millis(1), &mut pwm);
        assert_eq!(pwm.last(PwmChannel::Led1), Some(config.led_max_brightness));
    }

    #[test]
    fn fade_in_out_runs_channels_in_antiphase() {
        let config = Configuration {
            fade_step_ms: 1,
            ..Configuration::default()
        };
        let mut leds = LedController::new(&config, Millis(0));
        let mut pwm = PwmLog::default();

        for t in 0..40u64 {
            leds.tick(OperatingMode::AutoFadeInOut, &config, 0.0, Millis(t), &mut pwm);
        }
        let led1 = pwm.last(PwmChannel::Led1).unwrap() as u16;
        let led2 = pwm.last(PwmChannel::Led2).unwrap() as u16;
        assert_eq!(
            led1 + led2,
            config.led_max_brightness as u16 + config.led_min_brightness as u16
        );
    }

    #[test]
    fn strobe_toggles_every_step_interval() {
        let config = Configuration {
            fade_step_ms: 50,
            ..Configuration::default()
        };
        let mut leds = LedController::new(&config, Millis(0));
        let mut pwm = PwmLog::default();

        leds.tick(OperatingMode::Strobe, &config, 100.0, Millis(0), &mut pwm);
        assert_eq!(pwm.last(PwmChannel::Led1), Some(0));
        leds.tick(OperatingMode::Strobe, &config, 100.0, Millis(50), &mut pwm);
        assert_eq!(pwm.last(PwmChannel::Led1), Some(255));
        leds.tick(OperatingMode::Strobe, &config, 100.0, Millis(100), &mut pwm);
        assert_eq!(pwm.last(PwmChannel::Led1), Some(0));
    }

    #[test]
    fn off_mode_stays_dark() {
        let config = Configuration::default();
        let mut leds = LedController::new(&config, Millis(0));
        let mut pwm = PwmLog::default();

        leds.tick(OperatingMode::On, &config, 0.0, Millis(0), &mut pwm);
        leds.tick(OperatingMode::Off, &config, 0.0, Millis(1), &mut pwm);
        assert_eq!(pwm.last(PwmChannel::Led1), Some(0));
        assert_eq!(pwm.last(PwmChannel::Led2), Some(0));
    }
}
