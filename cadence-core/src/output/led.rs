//! Status LED driver

use cadence_hal::OutputPin;

use crate::config::LedConfig;
use crate::time::{elapsed, Millis};

/// LED operating mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedMode {
    Off,
    On,
    BlinkSlow,
    BlinkFast,
    /// Lit until `duration_ms` after `started_at`, then off
    Flash { started_at: Millis, duration_ms: u32 },
}

/// Status indicator on one output pin
pub struct StatusLed<P> {
    pin: P,
    mode: LedMode,
    /// Time of the last blink toggle
    toggled_at: Millis,
    slow_ms: u32,
    fast_ms: u32,
}

impl<P: OutputPin> StatusLed<P> {
    /// Take ownership of `pin` and switch it off
    pub fn new(mut pin: P, config: &LedConfig) -> Self {
        pin.set_low();
        Self {
            pin,
            mode: LedMode::Off,
            toggled_at: 0,
            slow_ms: config.slow_ms,
            fast_ms: config.fast_ms,
        }
    }

    pub fn off(&mut self) {
        self.mode = LedMode::Off;
        self.pin.set_low();
    }

    pub fn on(&mut self) {
        self.mode = LedMode::On;
        self.pin.set_high();
    }

    /// Blink with the slow half period; the pin is left as is until the next toggle
    pub fn blink_slow(&mut self) {
        self.mode = LedMode::BlinkSlow;
    }

    /// Blink with the fast half period
    pub fn blink_fast(&mut self) {
        self.mode = LedMode::BlinkFast;
    }

    /// Light the LED now and switch it off after `duration_ms`
    pub fn flash(&mut self, now_ms: Millis, duration_ms: u32) {
        self.mode = LedMode::Flash {
            started_at: now_ms,
            duration_ms,
        };
        self.pin.set_high();
    }

    /// Advance blink and flash timing
    pub fn update(&mut self, now_ms: Millis) {
        let half_period = match self.mode {
            LedMode::Off | LedMode::On => return,
            LedMode::BlinkSlow => self.slow_ms,
            LedMode::BlinkFast => self.fast_ms,
            LedMode::Flash {
                started_at,
                duration_ms,
            } => {
                if elapsed(now_ms, started_at) > duration_ms {
                    self.off();
                }
                return;
            }
        };

        if elapsed(now_ms, self.toggled_at) > half_period {
            self.pin.toggle();
            self.toggled_at = now_ms;
        }
    }

    pub fn mode(&self) -> LedMode {
        self.mode
    }

    pub fn is_lit(&self) -> bool {
        self.pin.is_set_high()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockPin {
        high: bool,
        writes: u32,
    }

    impl OutputPin for MockPin {
        fn set_high(&mut self) {
            self.high = true;
            self.writes += 1;
        }

        fn set_low(&mut self) {
            self.high = false;
            self.writes += 1;
        }

        fn is_set_high(&self) -> bool {
            self.high
        }
    }

    fn led() -> StatusLed<MockPin> {
        StatusLed::new(
            MockPin {
                high: true,
                writes: 0,
            },
            &LedConfig::default(),
        )
    }

    #[test]
    fn test_starts_off() {
        let led = led();
        assert!(!led.is_lit());
        assert_eq!(led.mode(), LedMode::Off);
    }

    #[test]
    fn test_steady_modes_ignore_time() {
        let mut led = led();
        led.on();
        for t in (0..5000).step_by(100) {
            led.update(t);
        }
        assert!(led.is_lit());
        led.off();
        let writes = led.pin.writes;
        for t in (0..5000).step_by(100) {
            led.update(t);
        }
        assert!(!led.is_lit());
        assert_eq!(led.pin.writes, writes);
    }

    #[test]
    fn test_slow_blink_half_period() {
        let mut led = led();
        led.blink_slow();
        led.update(501);
        assert!(led.is_lit());
        led.update(1001);
        assert!(led.is_lit());
        led.update(1002);
        assert!(!led.is_lit());
    }

    #[test]
    fn test_fast_blink_counts_toggles() {
        let mut led = led();
        led.blink_fast();
        let mut toggles = 0;
        let mut lit = led.is_lit();
        for t in 0..=1008 {
            led.update(t);
            if led.is_lit() != lit {
                toggles += 1;
                lit = led.is_lit();
            }
        }
        // Toggles at 126, 252, ... 1008
        assert_eq!(toggles, 8);
    }

    #[test]
    fn test_blink_mode_does_not_touch_pin() {
        let mut led = led();
        led.on();
        led.blink_slow();
        assert!(led.is_lit());
    }

    #[test]
    fn test_flash_reverts_to_off() {
        let mut led = led();
        led.flash(1000, 40);
        assert!(led.is_lit());
        led.update(1040);
        assert!(led.is_lit());
        led.update(1041);
        assert!(!led.is_lit());
        assert_eq!(led.mode(), LedMode::Off);
    }

    #[test]
    fn test_flash_across_wrap() {
        let mut led = led();
        led.flash(u32::MAX - 10, 40);
        led.update(20);
        assert!(led.is_lit());
        led.update(30);
        assert!(!led.is_lit());
    }
}
