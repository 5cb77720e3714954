//! Charge-detect input
//!
//! Most charger ICs expose an open-drain status line that is pulled low
//! while charging. The level is sampled on demand; edge detection and
//! confirmation live in the charge monitor.

use embedded_hal::digital::InputPin;

/// Charger status line
pub struct GpioChargeDetect<P> {
    pin: P,
    active_low: bool,
}

impl<P: InputPin> GpioChargeDetect<P> {
    pub fn new(pin: P, active_low: bool) -> Self {
        Self { pin, active_low }
    }

    /// Sample the line
    pub fn is_charging(&mut self) -> Result<bool, P::Error> {
        let high = self.pin.is_high()?;
        Ok(high != self.active_low)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::button::tests::MockPin;

    #[test]
    fn test_open_drain_status() {
        let mut detect = GpioChargeDetect::new(MockPin { high: false }, true);
        assert_eq!(detect.is_charging(), Ok(true));

        let mut detect = GpioChargeDetect::new(MockPin { high: true }, true);
        assert_eq!(detect.is_charging(), Ok(false));
    }
}
