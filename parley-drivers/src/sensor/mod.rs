//! Power sensing
//!
//! - Charge-detect line from the charger IC
//! - Battery voltage through a resistor divider on an ADC channel

pub mod battery;
pub mod charge;

pub use battery::{AdcBatteryProbe, AdcReader, SenseError};
pub use charge::GpioChargeDetect;
