//! Tick task for the power-save clock

use defmt::*;
use embassy_time::{Duration, Instant, Ticker};

use crate::channels::SharedBoard;

/// Tick interval in milliseconds
pub const TICK_INTERVAL_MS: u64 = 1000;

/// Tick task - advances the idle timer once per interval
#[embassy_executor::task]
pub async fn tick_task(board: &'static SharedBoard) {
    info!("Tick task started");

    let mut ticker = Ticker::every(Duration::from_millis(TICK_INTERVAL_MS));

    loop {
        ticker.next().await;

        let now_ms = Instant::now().as_millis();
        if let Some(transition) = board.lock().await.tick(now_ms) {
            info!("Power save: {:?}", transition);
        }
    }
}
