//! Power management
//!
//! Idle timeout policy, charge detection and battery level estimation.

pub mod battery;
pub mod charge;
pub mod phase;
pub mod save_timer;

pub use battery::{BatteryCurve, BatteryGauge, CurvePoint};
pub use charge::{ChargeMonitor, ChargeTransition, LowBatteryTransition};
pub use phase::{PowerEvent, PowerPhase};
pub use save_timer::{PowerSaveObserver, PowerSaveTimer, PowerSaveTransition};
