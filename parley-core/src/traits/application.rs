//! Application session capability

/// Coarse conversational state of the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeviceState {
    /// Booting, network not yet configured
    Starting,
    /// Waiting for network configuration from the user
    WifiConfiguring,
    /// Ready, no session active
    Idle,
    /// Connecting to the conversation server
    Connecting,
    /// Capturing user speech
    Listening,
    /// Playing a response
    Speaking,
    /// Firmware upgrade in progress
    Upgrading,
    /// Unrecoverable application error
    FatalError,
}

/// Session control exposed by the application
///
/// Long-running work (network reset, reconnects) must be scheduled by the
/// implementation, not performed inside these calls.
pub trait Application {
    /// Current device state
    fn device_state(&self) -> DeviceState;

    /// Whether the network link is up
    fn is_network_connected(&self) -> bool;

    /// Start or stop a conversation depending on the current state
    fn toggle_chat_state(&mut self);

    /// Begin a push-to-talk listening session
    fn start_listening(&mut self);

    /// End a push-to-talk listening session
    fn stop_listening(&mut self);

    /// Drop the stored network credentials and re-enter configuration
    fn reset_network_configuration(&mut self);

    /// Whether the application is quiet enough for power save
    ///
    /// The default allows sleep only while idle.
    fn can_enter_sleep_mode(&self) -> bool {
        self.device_state() == DeviceState::Idle
    }

    /// Ask the platform to power down
    fn request_shutdown(&mut self) {}
}
