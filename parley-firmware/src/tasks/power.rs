//! Charge and battery polling task
//!
//! Samples the charger status line and the battery divider once per
//! interval. The battery query at the end of each pass also re-applies
//! the power-save policy, so a board booted on the charger settles on
//! the first pass.

use defmt::*;
use embassy_rp::adc::{Adc, Blocking, Channel};
use embassy_rp::gpio::Input;
use embassy_time::{Duration, Instant, Ticker};
use portable_atomic::{AtomicU8, Ordering};

use parley_core::power::LowBatteryTransition;
use parley_drivers::sensor::{AdcBatteryProbe, AdcReader, GpioChargeDetect};

use crate::channels::SharedBoard;

/// Poll interval in milliseconds
pub const POWER_POLL_INTERVAL_MS: u64 = 1000;

/// Last battery level for status displays (255 = unknown)
pub static BATTERY_LEVEL: AtomicU8 = AtomicU8::new(u8::MAX);

/// Battery divider channel on the RP2040 ADC
pub struct BatteryAdc {
    adc: Adc<'static, Blocking>,
    channel: Channel<'static>,
}

impl BatteryAdc {
    pub fn new(adc: Adc<'static, Blocking>, channel: Channel<'static>) -> Self {
        Self { adc, channel }
    }
}

impl AdcReader for BatteryAdc {
    fn read(&mut self) -> Result<u16, ()> {
        self.adc.blocking_read(&mut self.channel).map_err(|_| ())
    }
}

#[embassy_executor::task]
pub async fn power_task(
    board: &'static SharedBoard,
    mut charge_detect: GpioChargeDetect<Input<'static>>,
    mut battery: AdcBatteryProbe<BatteryAdc>,
) {
    info!("Power task started");

    let mut ticker = Ticker::every(Duration::from_millis(POWER_POLL_INTERVAL_MS));

    loop {
        let charging = match charge_detect.is_charging() {
            Ok(charging) => charging,
            Err(never) => match never {},
        };
        // Sample outside the lock
        let raw = battery.read_raw();

        let now_ms = Instant::now().as_millis();
        let status = {
            let mut board = board.lock().await;
            if let Some(transition) = board.sample_charge(charging, now_ms) {
                info!("Charge: {:?}", transition);
            }
            match raw {
                Ok(raw) => {
                    if board.record_battery(raw) == Some(LowBatteryTransition::Entered) {
                        warn!("Battery low");
                    }
                }
                Err(e) => warn!("Battery read failed: {:?}", e),
            }
            board.battery_status(now_ms)
        };

        BATTERY_LEVEL.store(status.level.unwrap_or(u8::MAX), Ordering::Relaxed);
        debug!("Battery: {:?}", status);

        ticker.next().await;
    }
}
