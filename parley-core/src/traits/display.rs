//! Display capability for status and emotion output

use core::fmt::Write;

use heapless::String;

/// Maximum length of a formatted notification
pub const MAX_NOTIFICATION_LEN: usize = 32;

/// Text and emotion output of the board display
///
/// Rendering is owned by the implementation; calls should return quickly
/// and defer drawing if needed.
pub trait Display {
    /// Show a transient notification banner
    fn show_notification(&mut self, text: &str);

    /// Replace the chat line for a role (`"system"`, `"user"`, `"assistant"`)
    fn set_chat_message(&mut self, role: &str, text: &str);

    /// Switch the displayed emotion (`"neutral"`, `"sleepy"`, ...)
    fn set_emotion(&mut self, name: &str);
}

/// Helpers for the notifications the board shows
pub trait DisplayExt: Display {
    /// Show "Volume: N"
    fn notify_volume(&mut self, volume: u8) {
        let mut text: String<MAX_NOTIFICATION_LEN> = String::new();
        // Fits: the longest result is "Volume: 100"
        let _ = write!(text, "Volume: {}", volume);
        self.show_notification(&text);
    }

    /// Clear the system chat line and show an emotion
    fn show_system_state(&mut self, emotion: &str) {
        self.set_chat_message("system", "");
        self.set_emotion(emotion);
    }
}

// Blanket implementation for all Display types
impl<T: Display + ?Sized> DisplayExt for T {}
