//! Button input
//!
//! Turns raw line levels into gestures. One recognizer per physical
//! button; the board routes the results.

pub mod gesture;

pub use gesture::{Gesture, GestureHandler, GestureRecognizer, Gestures};

/// Physical buttons on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonId {
    /// Boot / talk button
    Boot,
    /// Volume up
    VolumeUp,
    /// Volume down
    VolumeDown,
}

impl ButtonId {
    /// All buttons, in index order
    pub const ALL: [ButtonId; 3] = [ButtonId::Boot, ButtonId::VolumeUp, ButtonId::VolumeDown];

    /// Stable index for per-button storage
    pub fn index(self) -> usize {
        match self {
            ButtonId::Boot => 0,
            ButtonId::VolumeUp => 1,
            ButtonId::VolumeDown => 2,
        }
    }
}
