//! Battery voltage probe
//!
//! Reads the divided battery voltage from a 12-bit ADC channel. Level
//! estimation (moving average, discharge curve) happens in the runtime;
//! this probe only rejects readings that cannot come from a battery.

/// ADC reading trait for platform abstraction
pub trait AdcReader {
    /// Read ADC value (12-bit, 0-4095)
    #[allow(clippy::result_unit_err)]
    fn read(&mut self) -> Result<u16, ()>;
}

/// Battery sensing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SenseError {
    /// ADC conversion failed
    ConversionError,
    /// Reading pinned near full scale (divider open)
    OpenCircuit,
    /// Reading near zero (no battery or shorted divider)
    ShortCircuit,
}

/// Margin from either rail treated as a wiring fault
const RAIL_MARGIN: u16 = 10;

/// Battery divider on an ADC channel
pub struct AdcBatteryProbe<ADC> {
    adc: ADC,
    /// ADC resolution (typically 4096 for 12-bit)
    adc_max: u16,
}

impl<ADC: AdcReader> AdcBatteryProbe<ADC> {
    /// Create a probe for a 12-bit ADC
    pub fn new(adc: ADC) -> Self {
        Self { adc, adc_max: 4096 }
    }

    /// Read one raw sample
    pub fn read_raw(&mut self) -> Result<u16, SenseError> {
        let raw = self.adc.read().map_err(|_| SenseError::ConversionError)?;
        self.check(raw)
    }

    fn check(&self, raw: u16) -> Result<u16, SenseError> {
        if raw >= self.adc_max - RAIL_MARGIN {
            return Err(SenseError::OpenCircuit);
        }
        if raw < RAIL_MARGIN {
            return Err(SenseError::ShortCircuit);
        }
        Ok(raw)
    }
}
