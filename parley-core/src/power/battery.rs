//! Battery level estimation
//!
//! Smooths raw ADC readings with a moving average and maps the average
//! to a percentage through a piecewise-linear discharge curve.

use heapless::Deque;

use crate::config::MAX_BATTERY_WINDOW;

/// One point of a discharge curve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CurvePoint {
    /// Raw ADC reading
    pub raw: u16,
    /// Battery level at that reading (percent)
    pub percent: u8,
}

/// Default LiPo curve for a 12-bit ADC behind a 1:2 divider
///
/// Points must be sorted by ascending `raw`.
pub const DEFAULT_CURVE: &[CurvePoint] = &[
    CurvePoint { raw: 1970, percent: 0 },
    CurvePoint { raw: 2062, percent: 20 },
    CurvePoint { raw: 2154, percent: 40 },
    CurvePoint { raw: 2246, percent: 60 },
    CurvePoint { raw: 2338, percent: 80 },
    CurvePoint { raw: 2430, percent: 100 },
];

/// Raw-to-percent mapping
#[derive(Debug, Clone, Copy)]
pub struct BatteryCurve {
    points: &'static [CurvePoint],
}

impl Default for BatteryCurve {
    fn default() -> Self {
        Self::new(DEFAULT_CURVE)
    }
}

impl BatteryCurve {
    /// Create a curve from points sorted by ascending `raw`
    pub const fn new(points: &'static [CurvePoint]) -> Self {
        Self { points }
    }

    /// Convert a raw reading to a percentage
    ///
    /// Readings outside the curve clamp to its end points.
    pub fn percent(&self, raw: u16) -> u8 {
        let (first, last) = match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return 0,
        };

        if raw <= first.raw {
            return first.percent;
        }
        if raw >= last.raw {
            return last.percent;
        }

        for pair in self.points.windows(2) {
            let (low, high) = (pair[0], pair[1]);
            if raw >= low.raw && raw <= high.raw {
                let raw_range = u32::from(high.raw - low.raw);
                if raw_range == 0 {
                    return high.percent;
                }
                let pct_range = i32::from(high.percent) - i32::from(low.percent);
                let offset = u32::from(raw - low.raw);
                let pct = i32::from(low.percent) + pct_range * offset as i32 / raw_range as i32;
                return pct.clamp(0, 100) as u8;
            }
        }

        last.percent
    }
}

/// Moving-average battery gauge
#[derive(Debug, Clone)]
pub struct BatteryGauge {
    curve: BatteryCurve,
    window: usize,
    samples: Deque<u16, MAX_BATTERY_WINDOW>,
}

impl BatteryGauge {
    /// Create a gauge averaging over `window` samples
    ///
    /// The window is clamped to `1..=MAX_BATTERY_WINDOW`.
    pub fn new(curve: BatteryCurve, window: usize) -> Self {
        Self {
            curve,
            window: window.clamp(1, MAX_BATTERY_WINDOW),
            samples: Deque::new(),
        }
    }

    /// Add a raw reading, dropping the oldest once the window is full
    pub fn record(&mut self, raw: u16) {
        if self.samples.len() >= self.window {
            self.samples.pop_front();
        }
        let _ = self.samples.push_back(raw);
    }

    /// Average of the samples in the window
    pub fn average(&self) -> Option<u16> {
        if self.samples.is_empty() {
            return None;
        }
        let sum: u32 = self.samples.iter().map(|&s| u32::from(s)).sum();
        Some((sum / self.samples.len() as u32) as u16)
    }

    /// Battery level from the averaged samples
    pub fn level(&self) -> Option<u8> {
        self.average().map(|avg| self.curve.percent(avg))
    }

    /// Number of samples currently averaged
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curve_end_points_clamp() {
        let curve = BatteryCurve::default();
        assert_eq!(curve.percent(0), 0);
        assert_eq!(curve.percent(1970), 0);
        assert_eq!(curve.percent(2430), 100);
        assert_eq!(curve.percent(4095), 100);
    }

    #[test]
    fn test_curve_interpolates() {
        let curve = BatteryCurve::default();
        assert_eq!(curve.percent(2062), 20);
        // Halfway between 2154 (40%) and 2246 (60%)
        assert_eq!(curve.percent(2200), 50);
    }

    #[test]
    fn test_empty_curve() {
        let curve = BatteryCurve::new(&[]);
        assert_eq!(curve.percent(2000), 0);
    }

    #[test]
    fn test_gauge_moving_average() {
        let mut gauge = BatteryGauge::new(BatteryCurve::default(), 4);
        assert_eq!(gauge.level(), None);

        for raw in [2000, 2100, 2200, 2300] {
            gauge.record(raw);
        }
        assert_eq!(gauge.average(), Some(2150));

        // Oldest sample (2000) drops out
        gauge.record(2400);
        assert_eq!(gauge.sample_count(), 4);
        assert_eq!(gauge.average(), Some(2250));
    }

    #[test]
    fn test_gauge_window_clamped() {
        let mut gauge = BatteryGauge::new(BatteryCurve::default(), 0);
        gauge.record(2000);
        gauge.record(2430);
        assert_eq!(gauge.sample_count(), 1);
        assert_eq!(gauge.level(), Some(100));
    }
}
