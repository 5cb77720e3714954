//! Configuration type definitions
//!
//! These types hold every tunable of the runtime layer. They are plain
//! `Copy` values so a board can keep them in a `const`.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Largest supported battery moving-average window
pub const MAX_BATTERY_WINDOW: usize = 16;

/// Button timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct ButtonTiming {
    /// Time a raw level must stay stable before it is accepted (ms)
    pub debounce_ms: u32,
    /// Held duration at or above which a press is a long press (ms)
    pub long_press_ms: u32,
}

impl Default for ButtonTiming {
    fn default() -> Self {
        Self {
            debounce_ms: 20,
            long_press_ms: 1000,
        }
    }
}

/// Power-save timer configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct PowerSaveConfig {
    /// Seconds without activity before entering power-save mode
    pub idle_secs: u32,
    /// Seconds without activity before requesting shutdown
    ///
    /// `None` disables the deep tier. Config files write `-1` for this.
    #[cfg_attr(feature = "serde", serde(with = "optional_secs"))]
    pub shutdown_secs: Option<u32>,
    /// Backlight level while in power-save mode (percent)
    pub dim_brightness: u8,
}

impl Default for PowerSaveConfig {
    fn default() -> Self {
        Self {
            idle_secs: 60,
            shutdown_secs: None,
            dim_brightness: 1,
        }
    }
}

/// Battery and charge-detect configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct BatteryConfig {
    /// Consecutive identical charge-detect samples needed to confirm a flip
    pub confirm_samples: u8,
    /// Number of ADC samples in the moving average
    pub sample_window: u8,
    /// Level (percent) at or below which the battery counts as low
    pub low_threshold: u8,
}

impl Default for BatteryConfig {
    fn default() -> Self {
        Self {
            confirm_samples: 1,
            sample_window: 10,
            low_threshold: 20,
        }
    }
}

/// User-facing adjustment steps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct UiConfig {
    /// Volume change per click (percent)
    pub volume_step: u8,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self { volume_step: 10 }
    }
}

/// Complete board runtime configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct BoardConfig {
    pub buttons: ButtonTiming,
    pub power_save: PowerSaveConfig,
    pub battery: BatteryConfig,
    pub ui: UiConfig,
}

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Long-press threshold does not exceed the debounce window
    LongPressWithinDebounce,
    /// Idle threshold is zero
    ZeroIdleThreshold,
    /// Shutdown threshold is not later than the idle threshold
    ShutdownBeforeIdle,
    /// Dim brightness above 100 %
    BrightnessOutOfRange,
    /// Moving-average window is zero or larger than [`MAX_BATTERY_WINDOW`]
    BatteryWindowOutOfRange,
    /// Charge-detect confirmation count is zero
    ZeroConfirmSamples,
    /// Low-battery threshold above 100 %
    LowThresholdOutOfRange,
    /// Volume step is zero or above 100
    VolumeStepOutOfRange,
}

impl BoardConfig {
    /// Check cross-field constraints
    ///
    /// Returns the first violation found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.buttons.long_press_ms <= self.buttons.debounce_ms {
            return Err(ConfigError::LongPressWithinDebounce);
        }

        let power = &self.power_save;
        if power.idle_secs == 0 {
            return Err(ConfigError::ZeroIdleThreshold);
        }
        if let Some(shutdown) = power.shutdown_secs {
            if shutdown <= power.idle_secs {
                return Err(ConfigError::ShutdownBeforeIdle);
            }
        }
        if power.dim_brightness > 100 {
            return Err(ConfigError::BrightnessOutOfRange);
        }

        let battery = &self.battery;
        if battery.sample_window == 0 || battery.sample_window as usize > MAX_BATTERY_WINDOW {
            return Err(ConfigError::BatteryWindowOutOfRange);
        }
        if battery.confirm_samples == 0 {
            return Err(ConfigError::ZeroConfirmSamples);
        }
        if battery.low_threshold > 100 {
            return Err(ConfigError::LowThresholdOutOfRange);
        }

        if self.ui.volume_step == 0 || self.ui.volume_step > 100 {
            return Err(ConfigError::VolumeStepOutOfRange);
        }

        Ok(())
    }
}

/// Convert a raw threshold where negative values mean "disabled"
pub fn secs_from_raw(raw: i64) -> Option<u32> {
    if raw < 0 {
        None
    } else {
        Some(u32::try_from(raw).unwrap_or(u32::MAX))
    }
}

#[cfg(feature = "serde")]
mod optional_secs {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<u32>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(value.map_or(-1, i64::from))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
        i64::deserialize(deserializer).map(super::secs_from_raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(BoardConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_long_press_must_exceed_debounce() {
        let mut config = BoardConfig::default();
        config.buttons.long_press_ms = config.buttons.debounce_ms;
        assert_eq!(config.validate(), Err(ConfigError::LongPressWithinDebounce));
    }

    #[test]
    fn test_shutdown_after_idle() {
        let mut config = BoardConfig::default();
        config.power_save.shutdown_secs = Some(60);
        assert_eq!(config.validate(), Err(ConfigError::ShutdownBeforeIdle));

        config.power_save.shutdown_secs = Some(600);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_battery_window_bounds() {
        let mut config = BoardConfig::default();
        config.battery.sample_window = 0;
        assert_eq!(config.validate(), Err(ConfigError::BatteryWindowOutOfRange));

        config.battery.sample_window = MAX_BATTERY_WINDOW as u8 + 1;
        assert_eq!(config.validate(), Err(ConfigError::BatteryWindowOutOfRange));
    }

    #[test]
    fn test_volume_step_bounds() {
        let mut config = BoardConfig::default();
        config.ui.volume_step = 0;
        assert_eq!(config.validate(), Err(ConfigError::VolumeStepOutOfRange));
    }

    #[test]
    fn test_secs_from_raw() {
        assert_eq!(secs_from_raw(-1), None);
        assert_eq!(secs_from_raw(0), Some(0));
        assert_eq!(secs_from_raw(300), Some(300));
    }
}
