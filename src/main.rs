//! lightctl firmware - nRF52840 light fixture controller.
//!
//! One cooperative loop: sample inputs, run the controller tick, push the
//! display frame and mirror changed settings to flash. All timed
//! behaviour (debounce, gestures, fades, display throttling, backlight
//! sleep) is evaluated inside the tick against the RTC clock.

#![no_std]
#![no_main]

mod board;
#[path = "ui/display.rs"]
mod display;
mod storage;

use board::{EmbassyClock, Inputs, Outputs};
use defmt::{info, warn};
use embassy_embedded_hal::adapter::BlockingAsync;
use embassy_executor::Spawner;
use embassy_nrf::gpio::{Input, Level, Output, OutputDrive, Pull};
use embassy_nrf::nvmc::Nvmc;
use embassy_nrf::pwm::SimplePwm;
use embassy_nrf::saadc::{self, ChannelConfig, Resolution, Saadc};
use embassy_nrf::twim::{self, Twim};
use embassy_nrf::{bind_interrupts, peripherals};
use embassy_time::{Duration, Ticker};
use lightctl::config::TICK_PERIOD_MS;
use lightctl::Device;
use {defmt_rtt as _, panic_probe as _};

bind_interrupts!(struct Irqs {
    SAADC => saadc::InterruptHandler;
    SPIM0_SPIS0_TWIM0_TWIS0_SPI0_TWI0 => twim::InterruptHandler<peripherals::TWISPI0>;
});

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_nrf::init(Default::default());
    info!("lightctl starting");

    // Supply for the LDR divider and potentiometer.
    let _sensor_supply = Output::new(p.P0_31, Level::High, OutputDrive::Standard);

    // Analog inputs, 10-bit to match the 0-1023 scale of the filters.
    let mut adc_config = saadc::Config::default();
    adc_config.resolution = Resolution::_10BIT;
    let light = ChannelConfig::single_ended(p.P0_03);
    let pot = ChannelConfig::single_ended(p.P0_04);
    let saadc = Saadc::new(p.SAADC, Irqs, adc_config, [light, pot]);
    saadc.calibrate().await;

    let button = Input::new(p.P0_11, Pull::Up);
    let mut inputs = Inputs::new(saadc, button);

    let pwm = SimplePwm::new_4ch(p.PWM0, p.P0_13, p.P0_14, p.P0_15, p.P0_16);
    let mut outputs = Outputs::new(pwm);

    // 400 kHz: a full 1 KB frame push takes about 25 ms.
    let mut i2c_config = twim::Config::default();
    i2c_config.frequency = twim::Frequency::K400;
    let i2c = Twim::new(p.TWISPI0, Irqs, p.P0_26, p.P0_27, i2c_config);
    let mut screen = display::CellDisplay::new(display::init(i2c));

    let mut flash = BlockingAsync::new(Nvmc::new(p.NVMC));
    let image = storage::load_from_flash(&mut flash).await;

    let clock = EmbassyClock;
    let mut device = Device::boot(image, &clock);

    let mut ticker = Ticker::every(Duration::from_millis(TICK_PERIOD_MS));
    loop {
        let raw = inputs.sample().await;
        device.tick(&clock, raw, &mut outputs, &mut screen);

        if let Err(e) = screen.flush() {
            warn!("Display flush failed: {}", e);
        }
        if let Err(e) = storage::save_to_flash(&mut flash, device.storage_mut()).await {
            warn!("Config not persisted: {}", e);
        }

        ticker.next().await;
    }
}
