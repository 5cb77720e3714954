//! Audio codec capability

/// Highest output volume
pub const MAX_VOLUME: u8 = 100;

/// Clamp a signed volume request into `0..=MAX_VOLUME`
pub fn clamp_volume(volume: i16) -> u8 {
    volume.clamp(0, MAX_VOLUME as i16) as u8
}

/// Output volume control of the audio codec
///
/// Only the volume is visible to the core; sample rates, I2S routing
/// and DSP stay with the codec implementation.
pub trait AudioCodec {
    /// Current output volume (0-100)
    fn output_volume(&self) -> u8;

    /// Set the output volume
    ///
    /// Implementations must clamp values above [`MAX_VOLUME`].
    fn set_output_volume(&mut self, volume: u8);
}
