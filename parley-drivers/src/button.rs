//! GPIO push button
//!
//! Reads the raw line level and applies polarity. Debounce and gesture
//! recognition happen in the board runtime, so this stays a thin wrapper.

use embedded_hal::digital::InputPin;

/// Push button on a GPIO line
pub struct ButtonInput<P> {
    pin: P,
    /// Pressed pulls the line low (pull-up wiring)
    active_low: bool,
}

impl<P: InputPin> ButtonInput<P> {
    /// Create a button
    ///
    /// - `active_low`: true for buttons wired to ground with a pull-up
    pub fn new(pin: P, active_low: bool) -> Self {
        Self { pin, active_low }
    }

    /// Check if the button is at its pressed level right now (undebounced)
    pub fn is_pressed(&mut self) -> Result<bool, P::Error> {
        let high = self.pin.is_high()?;
        Ok(high != self.active_low)
    }

    /// Release the underlying pin
    pub fn free(self) -> P {
        self.pin
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::digital::ErrorType;

    /// Input pin with a settable level
    pub struct MockPin {
        pub high: bool,
    }

    impl ErrorType for MockPin {
        type Error = Infallible;
    }

    impl InputPin for MockPin {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            Ok(self.high)
        }

        fn is_low(&mut self) -> Result<bool, Self::Error> {
            Ok(!self.high)
        }
    }

    #[test]
    fn test_active_low() {
        let mut button = ButtonInput::new(MockPin { high: true }, true);
        assert_eq!(button.is_pressed(), Ok(false));

        let mut button = ButtonInput::new(MockPin { high: false }, true);
        assert_eq!(button.is_pressed(), Ok(true));
    }

    #[test]
    fn test_active_high() {
        let mut button = ButtonInput::new(MockPin { high: true }, false);
        assert_eq!(button.is_pressed(), Ok(true));
        assert!(button.free().high);
    }
}
