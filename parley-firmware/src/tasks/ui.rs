//! UI task
//!
//! Drains the command queue outside the board lock. Rendering and the
//! audio pipeline live behind this task; this board logs the text it
//! would draw and keeps the coarse session state current.

use defmt::*;
use embassy_rp::gpio::Output;
use portable_atomic::Ordering;

use parley_core::traits::DeviceState;

use crate::channels::{load_state, store_state, UiCommand, NETWORK_CONNECTED, UI_COMMANDS};

/// UI task
///
/// - `power_hold`: latch output keeping the regulator on; driven low to
///   power down
#[embassy_executor::task]
pub async fn ui_task(mut power_hold: Output<'static>) {
    info!("UI task started");

    loop {
        match UI_COMMANDS.receive().await {
            UiCommand::Notification(text) => info!("Notification: {}", text.as_str()),
            UiCommand::ChatMessage { role, text } => {
                info!("Chat [{}]: {}", role.as_str(), text.as_str())
            }
            UiCommand::Emotion(name) => info!("Emotion: {}", name.as_str()),
            UiCommand::Volume(volume) => info!("Volume: {}", volume),
            UiCommand::StartListening => store_state(DeviceState::Listening),
            UiCommand::StopListening => store_state(DeviceState::Idle),
            UiCommand::ToggleChat => {
                // No conversation backend on this board to end a session,
                // so a toggle never leaves the app busy
                info!("Chat toggled in {:?}, staying idle", load_state());
                store_state(DeviceState::Idle);
            }
            UiCommand::ResetNetwork => {
                info!("Resetting network configuration");
                NETWORK_CONNECTED.store(false, Ordering::Release);
                store_state(DeviceState::WifiConfiguring);
            }
            UiCommand::Shutdown => {
                warn!("Shutdown requested, releasing power latch");
                power_hold.set_low();
            }
        }
    }
}
