//! Button gesture recognition
//!
//! Classifies the raw level history of one input line into press, release,
//! click and long-press gestures. Time is supplied by the caller so the
//! recognizer works the same for edge interrupts and periodic polling.

use heapless::Vec;

use crate::config::ButtonTiming;

/// Most gestures a single update can produce
pub const MAX_GESTURES_PER_UPDATE: usize = 3;

/// Gestures produced by one update, in emission order
pub type Gestures = Vec<Gesture, MAX_GESTURES_PER_UPDATE>;

/// Classified button gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Gesture {
    /// Pressed level settled
    PressDown,
    /// Released level settled
    PressUp,
    /// Press and release shorter than the long-press threshold
    Click,
    /// Held for at least the long-press threshold
    LongPress,
}

/// Receiver for gestures
///
/// Every method defaults to doing nothing, so a gesture without a
/// handler is dropped silently.
pub trait GestureHandler {
    fn on_press_down(&mut self) {}
    fn on_press_up(&mut self) {}
    fn on_click(&mut self) {}
    fn on_long_press(&mut self) {}
}

impl Gesture {
    /// Deliver this gesture to a handler
    pub fn dispatch<H: GestureHandler + ?Sized>(self, handler: &mut H) {
        match self {
            Gesture::PressDown => handler.on_press_down(),
            Gesture::PressUp => handler.on_press_up(),
            Gesture::Click => handler.on_click(),
            Gesture::LongPress => handler.on_long_press(),
        }
    }
}

/// Per-line gesture recognizer
///
/// A raw level is accepted once it has been observed continuously for
/// `debounce_ms`. Held duration runs from the first raw press edge to the
/// raw release edge, so neither the settle delay nor contact bounce before
/// the press settles shortens or lengthens it.
#[derive(Debug, Clone)]
pub struct GestureRecognizer {
    timing: ButtonTiming,
    /// Debounced level (true = pressed)
    pressed: bool,
    /// Raw level differing from `pressed` and when it first appeared
    pending_since_ms: Option<u64>,
    /// Raw edge time of the current press
    press_started_ms: u64,
    /// First raw press edge while still released, kept across bounces
    press_edge_ms: Option<u64>,
    /// Start of the latest released level seen after `press_edge_ms`
    bounce_since_ms: Option<u64>,
    /// Long press already reported for the current press
    long_reported: bool,
}

impl GestureRecognizer {
    /// Create a recognizer for a released line
    pub fn new(timing: ButtonTiming) -> Self {
        Self {
            timing,
            pressed: false,
            pending_since_ms: None,
            press_started_ms: 0,
            press_edge_ms: None,
            bounce_since_ms: None,
            long_reported: false,
        }
    }

    /// Debounced level
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Feed the current raw level
    ///
    /// - `raw_pressed`: true while the line is at its pressed level
    /// - `now_ms`: monotonic time of the sample or edge
    ///
    /// Call on every edge and periodically while pressed so long presses
    /// are reported while the button is still held.
    pub fn update(&mut self, raw_pressed: bool, now_ms: u64) -> Gestures {
        let mut gestures = Gestures::new();

        if !self.pressed {
            self.track_press_edge(raw_pressed, now_ms);
        }

        if raw_pressed == self.pressed {
            // Bounce back inside the settle window
            self.pending_since_ms = None;
        } else if self.pending_since_ms.is_none() {
            self.pending_since_ms = Some(now_ms);
        }

        if let Some(since) = self.pending_since_ms {
            if now_ms.saturating_sub(since) >= u64::from(self.timing.debounce_ms) {
                self.pending_since_ms = None;
                self.accept(raw_pressed, since, &mut gestures);
            }
        }

        if self.pressed && !self.long_reported {
            // A pending release freezes the held time at the release edge
            let held_until = self.pending_since_ms.unwrap_or(now_ms);
            if self.is_long(held_until) {
                self.long_reported = true;
                let _ = gestures.push(Gesture::LongPress);
            }
        }

        gestures
    }

    fn accept(&mut self, pressed: bool, edge_ms: u64, gestures: &mut Gestures) {
        self.pressed = pressed;

        if pressed {
            self.press_started_ms = self.press_edge_ms.take().unwrap_or(edge_ms);
            self.bounce_since_ms = None;
            self.long_reported = false;
            let _ = gestures.push(Gesture::PressDown);
            return;
        }

        if self.long_reported {
            let _ = gestures.push(Gesture::PressUp);
        } else if self.is_long(edge_ms) {
            self.long_reported = true;
            let _ = gestures.push(Gesture::LongPress);
            let _ = gestures.push(Gesture::PressUp);
        } else {
            let _ = gestures.push(Gesture::PressUp);
            let _ = gestures.push(Gesture::Click);
        }
    }

    /// Remember the first press edge until the line has been released for
    /// a full debounce window
    fn track_press_edge(&mut self, raw_pressed: bool, now_ms: u64) {
        let debounce_ms = u64::from(self.timing.debounce_ms);

        if let Some(since) = self.bounce_since_ms {
            if now_ms.saturating_sub(since) >= debounce_ms {
                self.press_edge_ms = None;
                self.bounce_since_ms = None;
            }
        }

        if raw_pressed {
            self.bounce_since_ms = None;
            if self.press_edge_ms.is_none() {
                self.press_edge_ms = Some(now_ms);
            }
        } else if self.press_edge_ms.is_some() && self.bounce_since_ms.is_none() {
            self.bounce_since_ms = Some(now_ms);
            if debounce_ms == 0 {
                self.press_edge_ms = None;
                self.bounce_since_ms = None;
            }
        }
    }

    fn is_long(&self, until_ms: u64) -> bool {
        until_ms.saturating_sub(self.press_started_ms) >= u64::from(self.timing.long_press_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMING: ButtonTiming = ButtonTiming {
        debounce_ms: 20,
        long_press_ms: 500,
    };

    /// Press at `start`, release at `start + held`, poll every 10ms until
    /// the release settles
    fn press_for(rec: &mut GestureRecognizer, start: u64, held: u64) -> Vec<Gesture, 16> {
        let mut all: Vec<Gesture, 16> = Vec::new();
        let mut t = start;
        while t < start + held {
            for g in rec.update(true, t) {
                all.push(g).unwrap();
            }
            t += 10;
        }
        let release = start + held;
        let mut t = release;
        while t <= release + 40 {
            for g in rec.update(false, t) {
                all.push(g).unwrap();
            }
            t += 10;
        }
        all
    }

    #[test]
    fn test_short_press_is_click() {
        let mut rec = GestureRecognizer::new(TIMING);
        let gestures = press_for(&mut rec, 0, 300);
        assert_eq!(
            gestures.as_slice(),
            &[Gesture::PressDown, Gesture::PressUp, Gesture::Click]
        );
    }

    #[test]
    fn test_long_hold_is_long_press_only() {
        let mut rec = GestureRecognizer::new(TIMING);
        let gestures = press_for(&mut rec, 0, 700);
        assert_eq!(
            gestures.as_slice(),
            &[Gesture::PressDown, Gesture::LongPress, Gesture::PressUp]
        );
    }

    #[test]
    fn test_long_press_fires_while_held() {
        let mut rec = GestureRecognizer::new(TIMING);
        rec.update(true, 0);
        assert_eq!(rec.update(true, 20).as_slice(), &[Gesture::PressDown]);
        assert!(rec.update(true, 499).is_empty());
        assert_eq!(rec.update(true, 500).as_slice(), &[Gesture::LongPress]);
        assert!(rec.update(true, 900).is_empty());
    }

    #[test]
    fn test_threshold_is_inclusive_on_long_side() {
        let mut rec = GestureRecognizer::new(TIMING);
        rec.update(true, 0);
        rec.update(true, 20);
        // Release edge exactly at the threshold
        assert_eq!(rec.update(false, 500).as_slice(), &[Gesture::LongPress]);
        assert_eq!(rec.update(false, 520).as_slice(), &[Gesture::PressUp]);
    }

    #[test]
    fn test_sparse_polling_classifies_at_release() {
        let mut rec = GestureRecognizer::new(TIMING);
        rec.update(true, 0);
        rec.update(true, 20);
        // No polls while held; the release edge is the first thing seen
        assert!(rec.update(false, 400).is_empty());
        assert_eq!(
            rec.update(false, 800).as_slice(),
            &[Gesture::PressUp, Gesture::Click]
        );
    }

    #[test]
    fn test_late_release_report_emits_long_press_first() {
        // Hardware-filtered line: edges are accepted immediately
        let mut rec = GestureRecognizer::new(ButtonTiming {
            debounce_ms: 0,
            long_press_ms: 500,
        });
        assert_eq!(rec.update(true, 0).as_slice(), &[Gesture::PressDown]);
        assert_eq!(
            rec.update(false, 600).as_slice(),
            &[Gesture::LongPress, Gesture::PressUp]
        );
    }

    #[test]
    fn test_just_below_threshold_is_click() {
        let mut rec = GestureRecognizer::new(TIMING);
        rec.update(true, 0);
        rec.update(true, 20);
        assert!(rec.update(false, 499).is_empty());
        // Poll past the threshold while the release is settling
        assert!(rec.update(false, 510).is_empty());
        assert_eq!(
            rec.update(false, 519).as_slice(),
            &[Gesture::PressUp, Gesture::Click]
        );
    }

    #[test]
    fn test_press_bounce_keeps_first_edge() {
        let mut rec = GestureRecognizer::new(TIMING);
        assert!(rec.update(true, 0).is_empty());
        assert!(rec.update(false, 5).is_empty());
        assert!(rec.update(true, 8).is_empty());
        assert!(rec.update(true, 20).is_empty());
        assert_eq!(rec.update(true, 28).as_slice(), &[Gesture::PressDown]);
        assert!(rec.is_pressed());

        // Released exactly 500ms after the first edge at t=0
        assert_eq!(rec.update(false, 500).as_slice(), &[Gesture::LongPress]);
        assert_eq!(rec.update(false, 520).as_slice(), &[Gesture::PressUp]);
    }

    #[test]
    fn test_settled_release_starts_fresh_edge() {
        let mut rec = GestureRecognizer::new(TIMING);
        rec.update(true, 0);
        // Glitch that never settled, followed by a long quiet gap
        rec.update(false, 5);
        assert!(rec.update(true, 100).is_empty());
        assert_eq!(rec.update(true, 120).as_slice(), &[Gesture::PressDown]);

        // 450ms from the edge at t=100, so a click
        assert!(rec.update(false, 550).is_empty());
        assert_eq!(
            rec.update(false, 570).as_slice(),
            &[Gesture::PressUp, Gesture::Click]
        );
    }

    #[test]
    fn test_release_bounce_keeps_long_press_timer() {
        let mut rec = GestureRecognizer::new(TIMING);
        rec.update(true, 0);
        rec.update(true, 20);
        // Contact chatter while held
        assert!(rec.update(false, 300).is_empty());
        assert!(rec.update(true, 305).is_empty());
        assert_eq!(rec.update(true, 500).as_slice(), &[Gesture::LongPress]);
    }

    #[test]
    fn test_dispatch_defaults_are_silent() {
        struct ClickOnly(u8);
        impl GestureHandler for ClickOnly {
            fn on_click(&mut self) {
                self.0 += 1;
            }
        }

        let mut handler = ClickOnly(0);
        Gesture::PressDown.dispatch(&mut handler);
        Gesture::LongPress.dispatch(&mut handler);
        Gesture::Click.dispatch(&mut handler);
        assert_eq!(handler.0, 1);
    }
}
