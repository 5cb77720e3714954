//! Board coordinator
//!
//! Owns the gesture recognizers, the power-save timer, the charge monitor
//! and the collaborator handles, and is the only place that applies
//! cross-cutting rules:
//!
//! - Any button press counts as activity and wakes the board first
//! - Charging disables power save, running on battery re-enables it
//! - Entering power save dims the backlight, leaving restores it exactly
//!
//! All methods take the current monotonic time and complete without
//! blocking. The coordinator has no internal locking; multi-task callers
//! must serialize access.

use crate::config::BoardConfig;
use crate::input::{ButtonId, GestureHandler, GestureRecognizer, Gestures};
use crate::power::{
    BatteryCurve, ChargeMonitor, ChargeTransition, LowBatteryTransition, PowerPhase,
    PowerSaveObserver, PowerSaveTimer, PowerSaveTransition,
};
use crate::traits::{
    clamp_volume, Application, AudioCodec, Backlight, DeviceState, Display, DisplayExt,
    MAX_VOLUME,
};

/// Notification shown on volume long press up
pub const MAX_VOLUME_TEXT: &str = "Max volume";
/// Notification shown on volume long press down
pub const MUTED_TEXT: &str = "Muted";
/// Notification shown when the battery runs low
pub const LOW_BATTERY_TEXT: &str = "Battery low";

/// Snapshot returned by [`Board::battery_status`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BatteryStatus {
    /// Level in percent, `None` before the first ADC reading
    pub level: Option<u8>,
    pub charging: bool,
    pub discharging: bool,
}

/// Runtime coordinator for one board
pub struct Board<D, A, B, P> {
    config: BoardConfig,
    buttons: [GestureRecognizer; 3],
    power_save: PowerSaveTimer,
    charge: ChargeMonitor,
    /// Discharging state seen by the last battery query
    last_discharging: Option<bool>,
    display: D,
    codec: A,
    backlight: B,
    app: P,
}

impl<D, A, B, P> Board<D, A, B, P>
where
    D: Display,
    A: AudioCodec,
    B: Backlight,
    P: Application,
{
    /// Create a coordinator owning its collaborators
    ///
    /// Power save stays disabled until [`start`](Self::start).
    pub fn new(config: BoardConfig, display: D, codec: A, backlight: B, app: P) -> Self {
        let recognizer = GestureRecognizer::new(config.buttons);
        Self {
            config,
            buttons: [recognizer.clone(), recognizer.clone(), recognizer],
            power_save: PowerSaveTimer::new(config.power_save),
            charge: ChargeMonitor::new(config.battery),
            last_discharging: None,
            display,
            codec,
            backlight,
            app,
        }
    }

    /// Replace the default battery discharge curve
    pub fn with_battery_curve(mut self, curve: BatteryCurve) -> Self {
        self.charge = ChargeMonitor::with_curve(self.config.battery, curve);
        self
    }

    /// Arm power save and bring the backlight to the saved level
    pub fn start(&mut self, now_ms: u64) {
        self.set_power_save_enabled(true, now_ms);
        self.backlight.restore_brightness();
    }

    /// Feed a raw button level
    ///
    /// Returns the gestures recognized, after they have been handled.
    pub fn handle_button(&mut self, button: ButtonId, raw_pressed: bool, now_ms: u64) -> Gestures {
        let gestures = self.buttons[button.index()].update(raw_pressed, now_ms);

        let mut route = ButtonRoute {
            board: self,
            button,
            now_ms,
        };
        for gesture in gestures.iter() {
            #[cfg(feature = "defmt")]
            defmt::debug!("{:?}: {:?}", button, gesture);
            gesture.dispatch(&mut route);
        }

        gestures
    }

    /// Advance the power-save clock
    pub fn tick(&mut self, now_ms: u64) -> Option<PowerSaveTransition> {
        let sleep_allowed = self.app.can_enter_sleep_mode();
        let transition = self.power_save.tick(now_ms, sleep_allowed);
        self.apply_power_save(transition);
        transition
    }

    /// Record activity from any source (network, wake interrupt, ...)
    pub fn wake_up(&mut self, now_ms: u64) -> Option<PowerSaveTransition> {
        let transition = self.power_save.wake_up(now_ms);
        self.apply_power_save(transition);
        transition
    }

    /// Feed a charge-detect sample
    ///
    /// A confirmed flip to charging disables power save; a flip back to
    /// battery re-enables it.
    pub fn sample_charge(&mut self, charge_detect: bool, now_ms: u64) -> Option<ChargeTransition> {
        let transition = self.charge.sample(charge_detect);
        if let Some(flip) = transition {
            #[cfg(feature = "defmt")]
            defmt::info!("Charge: {:?}", flip);
            self.set_power_save_enabled(!flip.is_charging(), now_ms);
        }
        transition
    }

    /// Feed a raw battery ADC reading
    pub fn record_battery(&mut self, raw: u16) -> Option<LowBatteryTransition> {
        let transition = self.charge.record_battery(raw);
        if transition == Some(LowBatteryTransition::Entered) {
            #[cfg(feature = "defmt")]
            defmt::warn!("Battery low: {:?}%", self.charge.battery_level());
            self.display.show_notification(LOW_BATTERY_TEXT);
            self.display.set_emotion("sad");
        }
        transition
    }

    /// Query battery state
    ///
    /// Also re-applies the power-save policy when the discharging state
    /// differs from the previous query, so polling the battery doubles
    /// as a policy check. Nothing is applied before the first charge
    /// sample.
    pub fn battery_status(&mut self, now_ms: u64) -> BatteryStatus {
        let discharging = self.charge.is_discharging();
        let known = discharging || self.charge.is_charging();
        if known && self.last_discharging != Some(discharging) {
            self.last_discharging = Some(discharging);
            self.set_power_save_enabled(discharging, now_ms);
        }

        BatteryStatus {
            level: self.charge.battery_level(),
            charging: self.charge.is_charging(),
            discharging,
        }
    }

    /// Application hint that the radio may (or may not) save power
    ///
    /// Leaving radio power save counts as activity.
    pub fn set_power_save_mode(&mut self, enabled: bool, now_ms: u64) {
        if !enabled {
            self.wake_up(now_ms);
        }
    }

    /// Current power-save phase
    pub fn power_phase(&self) -> PowerPhase {
        self.power_save.phase()
    }

    /// Check if power-save timeouts are armed
    pub fn is_power_save_enabled(&self) -> bool {
        self.power_save.is_enabled()
    }

    /// Check if a button is currently held (debounced)
    pub fn is_button_pressed(&self, button: ButtonId) -> bool {
        self.buttons[button.index()].is_pressed()
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn codec(&self) -> &A {
        &self.codec
    }

    pub fn backlight(&self) -> &B {
        &self.backlight
    }

    pub fn app(&self) -> &P {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut P {
        &mut self.app
    }

    fn set_power_save_enabled(&mut self, enabled: bool, now_ms: u64) {
        let transition = self.power_save.set_enabled(enabled, now_ms);
        self.apply_power_save(transition);
    }

    fn apply_power_save(&mut self, transition: Option<PowerSaveTransition>) {
        if let Some(transition) = transition {
            transition.dispatch(self);
        }
    }

    fn step_volume(&mut self, up: bool) {
        let step = i16::from(self.config.ui.volume_step);
        let current = i16::from(self.codec.output_volume());
        let volume = clamp_volume(if up { current + step } else { current - step });
        self.codec.set_output_volume(volume);
        self.display.notify_volume(volume);
    }

    fn jump_volume(&mut self, volume: u8, text: &str) {
        self.codec.set_output_volume(volume);
        self.display.show_notification(text);
    }

    fn toggle_session(&mut self) {
        let unconfigured = self.app.device_state() == DeviceState::Starting
            && !self.app.is_network_connected();
        if unconfigured {
            #[cfg(feature = "defmt")]
            defmt::info!("Boot click before network is up, resetting configuration");
            self.app.reset_network_configuration();
        } else {
            self.app.toggle_chat_state();
        }
    }
}

impl<D, A, B, P> PowerSaveObserver for Board<D, A, B, P>
where
    D: Display,
    A: AudioCodec,
    B: Backlight,
    P: Application,
{
    fn on_enter_sleep_mode(&mut self) {
        #[cfg(feature = "defmt")]
        defmt::info!("Enabling sleep mode");
        self.display.show_system_state("sleepy");
        self.backlight
            .set_brightness(self.config.power_save.dim_brightness, false);
    }

    fn on_exit_sleep_mode(&mut self) {
        #[cfg(feature = "defmt")]
        defmt::info!("Leaving sleep mode");
        self.display.show_system_state("neutral");
        self.backlight.restore_brightness();
    }

    fn on_shutdown_request(&mut self) {
        #[cfg(feature = "defmt")]
        defmt::info!("Idle past shutdown threshold, requesting shutdown");
        self.app.request_shutdown();
    }
}

/// Gesture routing for one button
struct ButtonRoute<'a, D, A, B, P> {
    board: &'a mut Board<D, A, B, P>,
    button: ButtonId,
    now_ms: u64,
}

impl<D, A, B, P> GestureHandler for ButtonRoute<'_, D, A, B, P>
where
    D: Display,
    A: AudioCodec,
    B: Backlight,
    P: Application,
{
    fn on_press_down(&mut self) {
        self.board.wake_up(self.now_ms);
        if self.button == ButtonId::Boot {
            self.board.app.start_listening();
        }
    }

    fn on_press_up(&mut self) {
        if self.button == ButtonId::Boot {
            self.board.app.stop_listening();
        }
    }

    fn on_click(&mut self) {
        match self.button {
            ButtonId::Boot => {
                // Wake before evaluating the toggle
                self.board.wake_up(self.now_ms);
                self.board.toggle_session();
            }
            ButtonId::VolumeUp => self.board.step_volume(true),
            ButtonId::VolumeDown => self.board.step_volume(false),
        }
    }

    fn on_long_press(&mut self) {
        match self.button {
            ButtonId::Boot => {}
            ButtonId::VolumeUp => self.board.jump_volume(MAX_VOLUME, MAX_VOLUME_TEXT),
            ButtonId::VolumeDown => self.board.jump_volume(0, MUTED_TEXT),
        }
    }
}
