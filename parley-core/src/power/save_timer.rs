//! Power-save timer
//!
//! Tracks time since the last activity and decides when the board dims,
//! when it asks for shutdown and when it comes back. Callers own activity
//! detection; the timer only owns the timeout policy, so every input
//! source shares one idle clock.

use super::phase::{PowerEvent, PowerPhase};
use crate::config::PowerSaveConfig;

/// Observable phase changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerSaveTransition {
    /// `Active -> Idle`
    Entered,
    /// `Idle -> Sleeping`
    ShutdownRequested,
    /// `Idle | Sleeping -> Active`
    Exited,
}

/// Receiver for power-save transitions
pub trait PowerSaveObserver {
    fn on_enter_sleep_mode(&mut self) {}
    fn on_exit_sleep_mode(&mut self) {}
    fn on_shutdown_request(&mut self) {}
}

impl PowerSaveTransition {
    /// Deliver this transition to an observer
    pub fn dispatch<O: PowerSaveObserver + ?Sized>(self, observer: &mut O) {
        match self {
            PowerSaveTransition::Entered => observer.on_enter_sleep_mode(),
            PowerSaveTransition::ShutdownRequested => observer.on_shutdown_request(),
            PowerSaveTransition::Exited => observer.on_exit_sleep_mode(),
        }
    }
}

/// Idle timer with optional shutdown tier
///
/// Starts disabled. Enter and exit transitions strictly alternate.
#[derive(Debug, Clone)]
pub struct PowerSaveTimer {
    config: PowerSaveConfig,
    enabled: bool,
    phase: PowerPhase,
    /// Start of the current idle period
    idle_since_ms: u64,
}

impl PowerSaveTimer {
    /// Create a disabled timer in the `Active` phase
    pub fn new(config: PowerSaveConfig) -> Self {
        Self {
            config,
            enabled: false,
            phase: PowerPhase::Active,
            idle_since_ms: 0,
        }
    }

    /// Current phase
    pub fn phase(&self) -> PowerPhase {
        self.phase
    }

    /// Check if timeouts are armed
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Milliseconds since the last activity
    pub fn idle_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.idle_since_ms)
    }

    /// Arm or cancel the timeouts
    ///
    /// Enabling restarts the idle clock at `now_ms`. Disabling cancels
    /// pending timeouts and forces an exit only when already past
    /// `Active`. Setting the current value again does nothing.
    pub fn set_enabled(&mut self, enabled: bool, now_ms: u64) -> Option<PowerSaveTransition> {
        if enabled == self.enabled {
            return None;
        }

        self.enabled = enabled;
        if enabled {
            self.idle_since_ms = now_ms;
            None
        } else {
            self.apply(PowerEvent::Disabled)
        }
    }

    /// Record activity
    ///
    /// Always restarts the idle clock. Reports `Exited` only when leaving
    /// a power-save phase, so waking an active timer is silent.
    pub fn wake_up(&mut self, now_ms: u64) -> Option<PowerSaveTransition> {
        self.idle_since_ms = now_ms;
        self.apply(PowerEvent::Activity)
    }

    /// Advance the clock
    ///
    /// - `sleep_allowed`: false while the application is busy; an active
    ///   timer then restarts its idle clock instead of counting
    ///
    /// At most one transition is reported per call.
    pub fn tick(&mut self, now_ms: u64, sleep_allowed: bool) -> Option<PowerSaveTransition> {
        if !self.enabled {
            return None;
        }

        if !sleep_allowed && self.phase == PowerPhase::Active {
            self.idle_since_ms = now_ms;
            return None;
        }

        let idle_ms = self.idle_ms(now_ms);
        match self.phase {
            PowerPhase::Active if idle_ms >= secs_to_ms(self.config.idle_secs) => {
                self.apply(PowerEvent::IdleTimeout)
            }
            PowerPhase::Idle => match self.config.shutdown_secs {
                Some(secs) if idle_ms >= secs_to_ms(secs) => {
                    self.apply(PowerEvent::ShutdownTimeout)
                }
                _ => None,
            },
            _ => None,
        }
    }

    fn apply(&mut self, event: PowerEvent) -> Option<PowerSaveTransition> {
        let previous = self.phase;
        self.phase = previous.transition(event);

        match (previous, self.phase) {
            (PowerPhase::Active, PowerPhase::Idle) => Some(PowerSaveTransition::Entered),
            (PowerPhase::Idle, PowerPhase::Sleeping) => Some(PowerSaveTransition::ShutdownRequested),
            (PowerPhase::Idle | PowerPhase::Sleeping, PowerPhase::Active) => {
                Some(PowerSaveTransition::Exited)
            }
            _ => None,
        }
    }
}

fn secs_to_ms(secs: u32) -> u64 {
    u64::from(secs) * 1000
}
