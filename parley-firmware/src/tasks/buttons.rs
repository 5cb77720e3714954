//! Button polling task
//!
//! Samples every button at a fixed rate and feeds the raw levels to the
//! board, which debounces them and recognizes gestures. Polling while a
//! button is held is what lets long presses fire before release.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::{Duration, Instant, Ticker};

use parley_core::input::ButtonId;
use parley_drivers::button::ButtonInput;

use crate::channels::SharedBoard;

/// Poll interval in milliseconds
pub const POLL_INTERVAL_MS: u64 = 5;

/// Buttons in `ButtonId::ALL` order
pub type Buttons = [ButtonInput<Input<'static>>; 3];

#[embassy_executor::task]
pub async fn button_task(board: &'static SharedBoard, mut buttons: Buttons) {
    info!("Button task started");

    let mut ticker = Ticker::every(Duration::from_millis(POLL_INTERVAL_MS));

    loop {
        ticker.next().await;

        let now_ms = Instant::now().as_millis();
        let mut board = board.lock().await;
        for (id, button) in ButtonId::ALL.iter().zip(buttons.iter_mut()) {
            let pressed = match button.is_pressed() {
                Ok(pressed) => pressed,
                Err(never) => match never {},
            };
            for gesture in board.handle_button(*id, pressed, now_ms) {
                debug!("{:?}: {:?}", id, gesture);
            }
        }
    }
}
