//! Debounced digital input
//!
//! A raw level is only promoted to the stable level after it has held
//! unchanged for longer than the debounce window.

use cadence_hal::InputPin;

use crate::config::DebounceConfig;
use crate::time::{elapsed, Millis};

/// Contact-bounce filter for one digital input
#[derive(Debug, Clone)]
pub struct DebouncedInput {
    window_ms: u32,
    stable: bool,
    last_raw: bool,
    last_change_ms: Millis,
}

impl DebouncedInput {
    /// Create a filter whose stable and raw level start at `initial`
    pub fn new(window_ms: u32, initial: bool) -> Self {
        Self {
            window_ms,
            stable: initial,
            last_raw: initial,
            last_change_ms: 0,
        }
    }

    /// Create a filter for an active-high button, starting released
    pub fn from_config(config: &DebounceConfig) -> Self {
        Self::new(config.window_ms, false)
    }

    /// Feed one raw sample
    ///
    /// Returns `true` when the stable level changed on this call.
    pub fn update(&mut self, now_ms: Millis, raw: bool) -> bool {
        if raw != self.last_raw {
            self.last_raw = raw;
            self.last_change_ms = now_ms;
            return false;
        }

        if raw != self.stable && elapsed(now_ms, self.last_change_ms) > self.window_ms {
            self.stable = raw;
            return true;
        }
        false
    }

    /// Read `pin` and feed the sample
    pub fn sample<P: InputPin>(&mut self, now_ms: Millis, pin: &mut P) -> bool {
        let raw = pin.is_high();
        self.update(now_ms, raw)
    }

    /// Filtered level
    pub fn is_high(&self) -> bool {
        self.stable
    }

    /// Button is held down (active-high wiring)
    pub fn pressed(&self) -> bool {
        self.stable
    }

    /// Button is up
    pub fn released(&self) -> bool {
        !self.stable
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    struct MockPin(bool);

    impl InputPin for MockPin {
        fn is_high(&mut self) -> bool {
            self.0
        }
    }

    #[test]
    fn test_sample_reads_pin() {
        let mut input = DebouncedInput::new(5, false);
        let mut pin = MockPin(true);
        input.sample(0, &mut pin);
        assert!(input.sample(6, &mut pin));
        assert!(input.pressed());
    }

    #[test]
    fn test_starts_released() {
        let input = DebouncedInput::new(5, false);
        assert!(input.released());
        assert!(!input.pressed());
    }

    #[test]
    fn test_accepts_after_window() {
        let mut input = DebouncedInput::new(5, false);
        input.update(100, true);
        for t in 101..=105 {
            assert!(!input.update(t, true));
            assert!(input.released());
        }
        assert!(input.update(106, true));
        assert!(input.pressed());
    }

    #[test]
    fn test_bounce_restarts_window() {
        let mut input = DebouncedInput::new(5, false);
        input.update(0, true);
        input.update(3, false);
        input.update(4, true);
        input.update(8, true);
        assert!(input.released());
        input.update(10, true);
        assert!(input.pressed());
    }

    #[test]
    fn test_fast_oscillation_never_settles() {
        let mut input = DebouncedInput::new(5, false);
        for t in 0..200u32 {
            input.update(t, (t / 2) % 2 == 0);
        }
        assert!(input.released());
    }

    #[test]
    fn test_release_is_debounced_too() {
        let mut input = DebouncedInput::new(5, true);
        input.update(50, false);
        input.update(55, false);
        assert!(input.pressed());
        input.update(56, false);
        assert!(input.released());
    }

    proptest! {
        #[test]
        fn prop_short_runs_never_change_level(start in any::<u32>(), run in 0u32..=5) {
            let mut input = DebouncedInput::new(5, false);
            input.update(start, true);
            for dt in 0..=run {
                input.update(start.wrapping_add(dt), true);
            }
            prop_assert!(input.released());
        }

        #[test]
        fn prop_long_runs_change_level_once(start in any::<u32>(), run in 6u32..100) {
            let mut input = DebouncedInput::new(5, false);
            input.update(start, true);
            let mut changes = 0;
            for dt in 1..=run {
                if input.update(start.wrapping_add(dt), true) {
                    changes += 1;
                }
            }
            prop_assert_eq!(changes, 1);
            prop_assert!(input.pressed());
        }
    }
}
