//! Property tests for the gesture, power-save and charge state machines

use parley_core::config::{BatteryConfig, ButtonTiming, PowerSaveConfig};
use parley_core::input::{Gesture, GestureRecognizer};
use parley_core::power::{ChargeMonitor, PowerSaveTimer, PowerSaveTransition};
use parley_core::traits::clamp_volume;
use proptest::prelude::*;

const TIMING: ButtonTiming = ButtonTiming {
    debounce_ms: 20,
    long_press_ms: 500,
};

/// Drive one clean press of `held_ms` and collect every gesture
fn press(recognizer: &mut GestureRecognizer, start: u64, held_ms: u64) -> Vec<Gesture> {
    let release = start + held_ms;
    let mut out = Vec::new();
    out.extend(recognizer.update(true, start));
    // Poll while held, the way the firmware button task does
    let mut t = start + 5;
    while t < release {
        out.extend(recognizer.update(true, t));
        t += 5;
    }
    out.extend(recognizer.update(false, release));
    out.extend(recognizer.update(false, release + u64::from(TIMING.debounce_ms)));
    out
}

proptest! {
    #[test]
    fn click_or_long_press_by_duration(held_ms in 25u64..2000) {
        let mut recognizer = GestureRecognizer::new(TIMING);
        let gestures = press(&mut recognizer, 1000, held_ms);

        let clicks = gestures.iter().filter(|g| **g == Gesture::Click).count();
        let longs = gestures.iter().filter(|g| **g == Gesture::LongPress).count();
        prop_assert_eq!(clicks + longs, 1);
        if held_ms < u64::from(TIMING.long_press_ms) {
            prop_assert_eq!(clicks, 1);
        } else {
            prop_assert_eq!(longs, 1);
        }
    }

    #[test]
    fn press_down_and_up_stay_balanced(
        levels in proptest::collection::vec((any::<bool>(), 1u64..50), 1..200)
    ) {
        let mut recognizer = GestureRecognizer::new(TIMING);
        let mut now = 0u64;
        let mut downs = 0i64;
        let mut ups = 0i64;
        let mut outcomes = 0i64;

        for (level, step) in levels {
            now += step;
            for gesture in recognizer.update(level, now) {
                match gesture {
                    Gesture::PressDown => downs += 1,
                    Gesture::PressUp => ups += 1,
                    Gesture::Click | Gesture::LongPress => outcomes += 1,
                }
            }
            prop_assert!(downs - ups == 0 || downs - ups == 1);
        }

        // Every completed cycle has exactly one outcome; a held press may
        // already have reported its long press
        prop_assert!(outcomes == ups || outcomes == ups + 1);
        prop_assert!(outcomes <= downs);
    }

    #[test]
    fn enter_and_exit_alternate(
        events in proptest::collection::vec((any::<bool>(), 1u64..120_000), 1..100)
    ) {
        let mut timer = PowerSaveTimer::new(PowerSaveConfig {
            idle_secs: 60,
            shutdown_secs: Some(300),
            dim_brightness: 1,
        });
        timer.set_enabled(true, 0);

        let mut now = 0u64;
        let mut saving = false;
        for (wake, step) in events {
            now += step;
            let transition = if wake {
                timer.wake_up(now)
            } else {
                timer.tick(now, true)
            };
            match transition {
                Some(PowerSaveTransition::Entered) => {
                    prop_assert!(!saving);
                    saving = true;
                }
                Some(PowerSaveTransition::Exited) => {
                    prop_assert!(saving);
                    saving = false;
                }
                Some(PowerSaveTransition::ShutdownRequested) => prop_assert!(saving),
                None => {}
            }
            prop_assert_eq!(saving, timer.phase().is_saving());
        }
    }

    #[test]
    fn charge_reports_each_flip_once(samples in proptest::collection::vec(any::<bool>(), 1..100)) {
        let mut monitor = ChargeMonitor::new(BatteryConfig {
            confirm_samples: 1,
            ..BatteryConfig::default()
        });

        let expected = samples.windows(2).filter(|w| w[0] != w[1]).count();
        let reported = samples.iter().filter(|s| monitor.sample(**s).is_some()).count();
        prop_assert_eq!(reported, expected);
        prop_assert!(!(monitor.is_charging() && monitor.is_discharging()));
    }

    #[test]
    fn volume_always_clamped(volume in any::<i16>()) {
        prop_assert!(clamp_volume(volume) <= 100);
    }
}

#[test]
fn idle_enters_exactly_once_at_sixty_seconds() {
    let mut timer = PowerSaveTimer::new(PowerSaveConfig::default());
    timer.set_enabled(true, 0);

    let entered: Vec<u64> = (1..=600u64)
        .filter(|s| timer.tick(s * 1000, true) == Some(PowerSaveTransition::Entered))
        .collect();
    assert_eq!(entered, vec![60]);
}
