//! Collaborator traits
//!
//! These traits define the boundary between the coordination logic and
//! the subsystems it drives. The core only calls them; it never inspects
//! rendering, codec or session internals.

pub mod application;
pub mod audio;
pub mod backlight;
pub mod display;

pub use application::{Application, DeviceState};
pub use audio::{clamp_volume, AudioCodec, MAX_VOLUME};
pub use backlight::Backlight;
pub use display::{Display, DisplayExt};
