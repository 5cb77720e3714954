//! Parley - voice-assistant board firmware
//!
//! Main firmware binary for RP2040-based Parley boards. Hardware is
//! sampled by small polling tasks; every event goes through one shared
//! `Board`, and everything the board asks for is queued to the UI task.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{Adc, Channel as AdcChannel, Config as AdcConfig};
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_sync::mutex::Mutex;
use embassy_time::Instant;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use parley_core::traits::DeviceState;
use parley_core::Board;
use parley_drivers::backlight::PwmBacklight;
use parley_drivers::button::ButtonInput;
use parley_drivers::sensor::{AdcBatteryProbe, GpioChargeDetect};

use crate::channels::{store_state, SharedBoard};
use crate::collaborators::{UiApp, UiCodec, UiDisplay};

mod channels;
mod collaborators;
mod config;
mod tasks;

/// Output volume at boot (percent)
const DEFAULT_VOLUME: u8 = 70;

/// PWM counter top for the backlight (about 125 kHz at the default clock)
const BACKLIGHT_PWM_TOP: u16 = 999;

static BOARD: StaticCell<SharedBoard> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Parley firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let board_config = config::BOARD_CONFIG;
    info!("Board config: {:?}", board_config);

    // Keep the regulator latched on until shutdown
    let power_hold = Output::new(p.PIN_6, Level::High);

    // Buttons are wired to ground with internal pull-ups
    // Pin assignment is board-specific (BOOT=GPIO2, VOL+=GPIO3, VOL-=GPIO4)
    let buttons = [
        ButtonInput::new(Input::new(p.PIN_2, Pull::Up), true),
        ButtonInput::new(Input::new(p.PIN_3, Pull::Up), true),
        ButtonInput::new(Input::new(p.PIN_4, Pull::Up), true),
    ];

    // Charger status is open drain, low while charging
    let charge_detect = GpioChargeDetect::new(Input::new(p.PIN_5, Pull::Up), true);

    // Battery divider on ADC0 (GPIO26)
    let adc = Adc::new_blocking(p.ADC, AdcConfig::default());
    let battery_channel = AdcChannel::new_pin(p.PIN_26, Pull::None);
    let battery = AdcBatteryProbe::new(tasks::BatteryAdc::new(adc, battery_channel));

    // Backlight on GPIO8 (PWM slice 4, channel A)
    let mut pwm_config = PwmConfig::default();
    pwm_config.top = BACKLIGHT_PWM_TOP;
    let pwm = Pwm::new_output_a(p.PWM_SLICE4, p.PIN_8, pwm_config);
    let (backlight_out, _) = pwm.split();
    let backlight = PwmBacklight::new(backlight_out.unwrap(), false);

    info!("Hardware initialized");

    let board: &'static SharedBoard = BOARD.init(Mutex::new(Board::new(
        board_config,
        UiDisplay,
        UiCodec::new(DEFAULT_VOLUME),
        backlight,
        UiApp,
    )));

    // No network stack on this board: the session is ready once tasks run
    store_state(DeviceState::Idle);

    board.lock().await.start(Instant::now().as_millis());

    spawner.spawn(tasks::ui_task(power_hold)).unwrap();
    spawner.spawn(tasks::tick_task(board)).unwrap();
    spawner.spawn(tasks::button_task(board, buttons)).unwrap();
    spawner
        .spawn(tasks::power_task(board, charge_detect, battery))
        .unwrap();

    info!("All tasks spawned, firmware running");
}
