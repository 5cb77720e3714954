//! Inter-task communication
//!
//! The board runtime runs under one mutex; everything it wants done
//! outside that lock (drawing, audio pipeline, power latch) is queued
//! here as a `UiCommand` and handled by the UI task.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::mutex::Mutex;
use heapless::String;
use portable_atomic::{AtomicBool, AtomicU8, Ordering};

use parley_core::traits::DeviceState;
use parley_core::Board;
use parley_drivers::backlight::PwmBacklight;

use crate::collaborators::{UiApp, UiCodec, UiDisplay};

/// Channel capacity for UI commands
const UI_CHANNEL_SIZE: usize = 16;

/// Concrete board type for this firmware
pub type FwBoard = Board<UiDisplay, UiCodec, PwmBacklight<embassy_rp::pwm::PwmOutput<'static>>, UiApp>;

/// Board shared by all tasks
pub type SharedBoard = Mutex<CriticalSectionRawMutex, FwBoard>;

/// Work requested by the board runtime
#[derive(Debug, Clone, PartialEq, Eq, defmt::Format)]
pub enum UiCommand {
    Notification(String<32>),
    ChatMessage { role: String<16>, text: String<64> },
    Emotion(String<16>),
    Volume(u8),
    ToggleChat,
    StartListening,
    StopListening,
    ResetNetwork,
    Shutdown,
}

/// Commands for the UI task
pub static UI_COMMANDS: Channel<CriticalSectionRawMutex, UiCommand, UI_CHANNEL_SIZE> =
    Channel::new();

/// Application state, written by the UI task and read under the board lock
pub static DEVICE_STATE: AtomicU8 = AtomicU8::new(encode_state(DeviceState::Starting));

/// Network link state
pub static NETWORK_CONNECTED: AtomicBool = AtomicBool::new(false);

/// Queue a command without blocking the board lock
pub fn send_ui(command: UiCommand) {
    if UI_COMMANDS.try_send(command).is_err() {
        defmt::warn!("UI queue full, dropping command");
    }
}

pub fn load_state() -> DeviceState {
    decode_state(DEVICE_STATE.load(Ordering::Acquire))
}

pub fn store_state(state: DeviceState) {
    DEVICE_STATE.store(encode_state(state), Ordering::Release);
}

const fn encode_state(state: DeviceState) -> u8 {
    match state {
        DeviceState::Starting => 0,
        DeviceState::WifiConfiguring => 1,
        DeviceState::Idle => 2,
        DeviceState::Connecting => 3,
        DeviceState::Listening => 4,
        DeviceState::Speaking => 5,
        DeviceState::Upgrading => 6,
        DeviceState::FatalError => 7,
    }
}

fn decode_state(raw: u8) -> DeviceState {
    match raw {
        0 => DeviceState::Starting,
        1 => DeviceState::WifiConfiguring,
        2 => DeviceState::Idle,
        3 => DeviceState::Connecting,
        4 => DeviceState::Listening,
        5 => DeviceState::Speaking,
        6 => DeviceState::Upgrading,
        _ => DeviceState::FatalError,
    }
}

/// Copy as much of `text` as fits
pub fn truncated<const N: usize>(text: &str) -> String<N> {
    let mut out = String::new();
    for c in text.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}
