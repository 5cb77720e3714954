//! Power-save phase machine
//!
//! Display, backlight and sleep behavior is a function of the current
//! phase and an event.

/// Power-save phases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerPhase {
    /// Full brightness, normal operation
    Active,
    /// Power-save mode: backlight dimmed, sleepy face shown
    Idle,
    /// Deeper suspend, shutdown requested
    Sleeping,
}

/// Events that drive phase transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerEvent {
    /// Idle threshold elapsed without activity
    IdleTimeout,
    /// Shutdown threshold elapsed without activity
    ShutdownTimeout,
    /// User or system activity (button, wake call, wake interrupt)
    Activity,
    /// Timer disabled (charging, explicit request)
    Disabled,
}

impl PowerPhase {
    /// Check if the device is in any power-save phase
    pub fn is_saving(&self) -> bool {
        !matches!(self, PowerPhase::Active)
    }

    /// Process an event and return the next phase
    pub fn transition(self, event: PowerEvent) -> Self {
        use PowerEvent::*;
        use PowerPhase::*;

        match (self, event) {
            (Active, IdleTimeout) => Idle,
            (Idle, ShutdownTimeout) => Sleeping,

            // Any activity or disable returns to full operation
            (Idle | Sleeping, Activity | Disabled) => Active,

            // Default: stay in current phase
            _ => self,
        }
    }
}
