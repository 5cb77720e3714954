//! PWM display backlight
//!
//! Drives the backlight LED from a PWM channel and keeps the level the
//! user last chose, so temporary dimming can be undone exactly.

use embedded_hal::pwm::SetDutyCycle;
use parley_core::traits::Backlight;

/// Level used before the user picks one (percent)
pub const DEFAULT_BRIGHTNESS: u8 = 75;

/// Backlight driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BacklightError {
    /// PWM peripheral rejected the duty cycle
    Pwm,
}

/// Backlight on a PWM channel
pub struct PwmBacklight<P> {
    pwm: P,
    /// LED driver is on while the PWM output is low
    inverted: bool,
    current: u8,
    saved: u8,
}

impl<P: SetDutyCycle> PwmBacklight<P> {
    /// Create a backlight, initially off
    ///
    /// The saved level starts at [`DEFAULT_BRIGHTNESS`].
    pub fn new(pwm: P, inverted: bool) -> Self {
        Self {
            pwm,
            inverted,
            current: 0,
            saved: DEFAULT_BRIGHTNESS,
        }
    }

    /// Level restored after power save (percent)
    pub fn saved_brightness(&self) -> u8 {
        self.saved
    }

    /// Drive a level, reporting PWM failures
    pub fn try_set_brightness(&mut self, percent: u8, permanent: bool) -> Result<(), BacklightError> {
        let percent = percent.min(100);
        let duty = if self.inverted { 100 - percent } else { percent };
        self.pwm
            .set_duty_cycle_percent(duty)
            .map_err(|_| BacklightError::Pwm)?;

        self.current = percent;
        if permanent {
            self.saved = percent;
        }
        Ok(())
    }
}

impl<P: SetDutyCycle> Backlight for PwmBacklight<P> {
    fn brightness(&self) -> u8 {
        self.current
    }

    fn set_brightness(&mut self, percent: u8, permanent: bool) {
        if self.try_set_brightness(percent, permanent).is_err() {
            #[cfg(feature = "defmt")]
            defmt::warn!("Backlight: failed to set {}%", percent);
        }
    }

    fn restore_brightness(&mut self) {
        let saved = self.saved;
        self.set_brightness(saved, false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::pwm::{ErrorKind, ErrorType};

    struct MockPwm {
        duty: u16,
        fail: bool,
    }

    #[derive(Debug)]
    struct MockError;

    impl embedded_hal::pwm::Error for MockError {
        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    impl ErrorType for MockPwm {
        type Error = MockError;
    }

    impl SetDutyCycle for MockPwm {
        fn max_duty_cycle(&self) -> u16 {
            1000
        }

        fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
            if self.fail {
                return Err(MockError);
            }
            self.duty = duty;
            Ok(())
        }
    }

    fn backlight(inverted: bool) -> PwmBacklight<MockPwm> {
        PwmBacklight::new(
            MockPwm {
                duty: 0,
                fail: false,
            },
            inverted,
        )
    }

    #[test]
    fn test_dim_then_restore() {
        let mut bl = backlight(false);
        bl.set_brightness(80, true);
        assert_eq!(bl.pwm.duty, 800);

        bl.set_brightness(1, false);
        assert_eq!(bl.brightness(), 1);
        assert_eq!(bl.saved_brightness(), 80);

        bl.restore_brightness();
        assert_eq!(bl.brightness(), 80);
        assert_eq!(bl.pwm.duty, 800);
    }

    #[test]
    fn test_restore_uses_default_level() {
        let mut bl = backlight(false);
        bl.restore_brightness();
        assert_eq!(bl.brightness(), DEFAULT_BRIGHTNESS);
    }

    #[test]
    fn test_inverted_output() {
        let mut bl = backlight(true);
        bl.set_brightness(100, true);
        assert_eq!(bl.pwm.duty, 0);
        bl.set_brightness(30, false);
        assert_eq!(bl.pwm.duty, 700);
    }

    #[test]
    fn test_clamps_level() {
        let mut bl = backlight(false);
        bl.set_brightness(250, true);
        assert_eq!(bl.brightness(), 100);
        assert_eq!(bl.saved_brightness(), 100);
    }

    #[test]
    fn test_pwm_failure_keeps_state() {
        let mut bl = backlight(false);
        bl.set_brightness(60, true);
        bl.pwm.fail = true;

        assert_eq!(bl.try_set_brightness(10, true), Err(BacklightError::Pwm));
        assert_eq!(bl.brightness(), 60);
        assert_eq!(bl.saved_brightness(), 60);
    }
}
