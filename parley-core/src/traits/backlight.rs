//! Display backlight capability

/// Display backlight with a saved user level
///
/// The backlight keeps two values: the level currently driven and the
/// level the user chose. Temporary writes (dimming for power save) must
/// not touch the saved level so it can be restored exactly.
pub trait Backlight {
    /// Level currently driven (percent)
    fn brightness(&self) -> u8;

    /// Drive a new level
    ///
    /// - `percent`: 0-100, larger values are clamped
    /// - `permanent`: also store this as the level to restore to
    fn set_brightness(&mut self, percent: u8, permanent: bool);

    /// Return to the last permanently stored level
    fn restore_brightness(&mut self);
}
