//! Charge monitor
//!
//! Samples the charge-detect line and battery readings on demand and
//! reports edges: charging started/stopped and low battery entered/left.
//! The first observation of each only sets a baseline.

use super::battery::{BatteryCurve, BatteryGauge};
use crate::config::BatteryConfig;

/// Charging state flip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChargeTransition {
    /// External power connected
    ChargingStarted,
    /// External power removed
    ChargingStopped,
}

impl ChargeTransition {
    /// Charging state after the flip
    pub fn is_charging(&self) -> bool {
        matches!(self, ChargeTransition::ChargingStarted)
    }
}

/// Low-battery state flip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LowBatteryTransition {
    /// Level dropped to the low threshold while discharging
    Entered,
    /// Level recovered or charging started
    Cleared,
}

/// Charge and battery monitor
#[derive(Debug, Clone)]
pub struct ChargeMonitor {
    config: BatteryConfig,
    /// Confirmed charging state, unknown until the first sample
    charging: Option<bool>,
    /// Unconfirmed opposite state and how often it was seen in a row
    candidate: Option<(bool, u8)>,
    gauge: BatteryGauge,
    /// Last reported low-battery state, unknown until the first level
    low_battery: Option<bool>,
}

impl ChargeMonitor {
    /// Create a monitor with the default discharge curve
    pub fn new(config: BatteryConfig) -> Self {
        Self::with_curve(config, BatteryCurve::default())
    }

    /// Create a monitor with a board-specific discharge curve
    pub fn with_curve(config: BatteryConfig, curve: BatteryCurve) -> Self {
        Self {
            config,
            charging: None,
            candidate: None,
            gauge: BatteryGauge::new(curve, config.sample_window as usize),
            low_battery: None,
        }
    }

    /// Feed a charge-detect sample
    ///
    /// Returns a transition exactly once per confirmed flip. The first
    /// sample after construction establishes the baseline silently.
    pub fn sample(&mut self, charge_detect: bool) -> Option<ChargeTransition> {
        let current = match self.charging {
            None => {
                self.charging = Some(charge_detect);
                return None;
            }
            Some(current) => current,
        };

        if charge_detect == current {
            self.candidate = None;
            return None;
        }

        let seen = match self.candidate {
            Some((state, count)) if state == charge_detect => count.saturating_add(1),
            _ => 1,
        };

        if seen < self.config.confirm_samples {
            self.candidate = Some((charge_detect, seen));
            return None;
        }

        self.candidate = None;
        self.charging = Some(charge_detect);
        Some(if charge_detect {
            ChargeTransition::ChargingStarted
        } else {
            ChargeTransition::ChargingStopped
        })
    }

    /// Feed a raw battery reading and re-evaluate the low-battery state
    pub fn record_battery(&mut self, raw: u16) -> Option<LowBatteryTransition> {
        self.gauge.record(raw);
        self.update_low_battery()
    }

    /// Check if external power is connected
    pub fn is_charging(&self) -> bool {
        self.charging == Some(true)
    }

    /// Check if running from the battery
    ///
    /// Never true at the same time as [`is_charging`](Self::is_charging);
    /// both are false before the first sample.
    pub fn is_discharging(&self) -> bool {
        self.charging == Some(false)
    }

    /// Battery level (percent), `None` before the first reading
    pub fn battery_level(&self) -> Option<u8> {
        self.gauge.level()
    }

    /// Check if the battery was last reported low
    pub fn is_low_battery(&self) -> bool {
        self.low_battery == Some(true)
    }

    fn update_low_battery(&mut self) -> Option<LowBatteryTransition> {
        let level = self.gauge.level()?;
        // Power source unknown until the first charge sample
        self.charging?;
        let low = self.is_discharging() && level <= self.config.low_threshold;

        match self.low_battery.replace(low) {
            Some(previous) if previous != low => Some(if low {
                LowBatteryTransition::Entered
            } else {
                LowBatteryTransition::Cleared
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monitor(confirm_samples: u8) -> ChargeMonitor {
        ChargeMonitor::new(BatteryConfig {
            confirm_samples,
            sample_window: 1,
            low_threshold: 20,
        })
    }

    #[test]
    fn test_first_sample_is_silent() {
        let mut mon = monitor(1);
        assert!(!mon.is_charging());
        assert!(!mon.is_discharging());

        // Booted while already charging: no false->true report
        assert_eq!(mon.sample(true), None);
        assert!(mon.is_charging());
        assert!(!mon.is_discharging());
    }

    #[test]
    fn test_fires_once_per_flip() {
        let mut mon = monitor(1);
        let mut flips = 0;
        for detect in [false, true, true, false] {
            if mon.sample(detect).is_some() {
                flips += 1;
            }
        }
        assert_eq!(flips, 2);
        assert!(mon.is_discharging());
    }

    #[test]
    fn test_transition_direction() {
        let mut mon = monitor(1);
        mon.sample(false);
        assert_eq!(mon.sample(true), Some(ChargeTransition::ChargingStarted));
        assert_eq!(mon.sample(false), Some(ChargeTransition::ChargingStopped));
        assert!(!ChargeTransition::ChargingStopped.is_charging());
    }

    #[test]
    fn test_confirmation_filters_glitch() {
        let mut mon = monitor(3);
        mon.sample(false);

        // Two-sample glitch is not confirmed
        assert_eq!(mon.sample(true), None);
        assert_eq!(mon.sample(true), None);
        assert_eq!(mon.sample(false), None);
        assert!(mon.is_discharging());

        assert_eq!(mon.sample(true), None);
        assert_eq!(mon.sample(true), None);
        assert_eq!(mon.sample(true), Some(ChargeTransition::ChargingStarted));
        assert_eq!(mon.sample(true), None);
    }

    #[test]
    fn test_low_battery_edges() {
        let mut mon = monitor(1);
        mon.sample(false);

        // First level sets the baseline
        assert_eq!(mon.record_battery(2430), None);
        assert_eq!(mon.battery_level(), Some(100));

        assert_eq!(mon.record_battery(2062), Some(LowBatteryTransition::Entered));
        assert_eq!(mon.record_battery(2000), None);
        assert!(mon.is_low_battery());

        // Plugging in clears the low state on the next reading
        mon.sample(true);
        assert_eq!(mon.record_battery(2000), Some(LowBatteryTransition::Cleared));
    }

    #[test]
    fn test_low_battery_waits_for_power_source() {
        let mut mon = monitor(1);
        assert_eq!(mon.record_battery(1970), None);
        assert!(!mon.is_low_battery());

        // First reading with a known source sets the baseline silently
        mon.sample(false);
        assert_eq!(mon.record_battery(1970), None);
        assert!(mon.is_low_battery());
    }

    #[test]
    fn test_low_battery_baseline_is_silent() {
        let mut mon = monitor(1);
        mon.sample(false);
        assert_eq!(mon.record_battery(1970), None);
        assert!(mon.is_low_battery());
    }
}
