//! Board collaborators backed by the UI command queue
//!
//! Each call made by the runtime under the board lock becomes a queued
//! command; nothing here waits on hardware or the network.

use parley_core::traits::{Application, AudioCodec, DeviceState, Display, MAX_VOLUME};
use portable_atomic::Ordering;

use crate::channels::{load_state, send_ui, truncated, UiCommand, NETWORK_CONNECTED};

/// Display that forwards text and emotions to the UI task
pub struct UiDisplay;

impl Display for UiDisplay {
    fn show_notification(&mut self, text: &str) {
        send_ui(UiCommand::Notification(truncated(text)));
    }

    fn set_chat_message(&mut self, role: &str, text: &str) {
        send_ui(UiCommand::ChatMessage {
            role: truncated(role),
            text: truncated(text),
        });
    }

    fn set_emotion(&mut self, name: &str) {
        send_ui(UiCommand::Emotion(truncated(name)));
    }
}

/// Codec volume, applied by the audio pipeline through the UI task
pub struct UiCodec {
    volume: u8,
}

impl UiCodec {
    pub fn new(volume: u8) -> Self {
        Self {
            volume: volume.min(MAX_VOLUME),
        }
    }
}

impl AudioCodec for UiCodec {
    fn output_volume(&self) -> u8 {
        self.volume
    }

    fn set_output_volume(&mut self, volume: u8) {
        self.volume = volume.min(MAX_VOLUME);
        send_ui(UiCommand::Volume(self.volume));
    }
}

/// Application handle reading shared state and queueing session requests
pub struct UiApp;

impl Application for UiApp {
    fn device_state(&self) -> DeviceState {
        load_state()
    }

    fn is_network_connected(&self) -> bool {
        NETWORK_CONNECTED.load(Ordering::Acquire)
    }

    fn toggle_chat_state(&mut self) {
        send_ui(UiCommand::ToggleChat);
    }

    fn start_listening(&mut self) {
        send_ui(UiCommand::StartListening);
    }

    fn stop_listening(&mut self) {
        send_ui(UiCommand::StopListening);
    }

    fn reset_network_configuration(&mut self) {
        send_ui(UiCommand::ResetNetwork);
    }

    fn request_shutdown(&mut self) {
        send_ui(UiCommand::Shutdown);
    }
}
