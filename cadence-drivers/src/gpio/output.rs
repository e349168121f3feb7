//! Output pin adapter

use embedded_hal::digital::OutputPin as EhOutputPin;

/// Output pin with a tracked level
pub struct HalOutput<P> {
    pin: P,
    high: bool,
}

impl<P: EhOutputPin> HalOutput<P> {
    /// Wrap `pin` and drive it to `initial_high`
    pub fn new(pin: P, initial_high: bool) -> Self {
        let mut out = Self { pin, high: false };
        cadence_hal::OutputPin::set_state(&mut out, initial_high);
        out
    }

    /// Unwrap the underlying pin
    pub fn free(self) -> P {
        self.pin
    }
}

impl<P: EhOutputPin> cadence_hal::OutputPin for HalOutput<P> {
    fn set_high(&mut self) {
        let _ = self.pin.set_high();
        self.high = true;
    }

    fn set_low(&mut self) {
        let _ = self.pin.set_low();
        self.high = false;
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_hal::OutputPin;
    use core::convert::Infallible;
    use embedded_hal::digital::ErrorType;

    struct MockPin {
        level: bool,
        writes: u8,
    }

    impl ErrorType for MockPin {
        type Error = Infallible;
    }

    impl EhOutputPin for MockPin {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.level = false;
            self.writes += 1;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.level = true;
            self.writes += 1;
            Ok(())
        }
    }

    #[test]
    fn test_initial_level_is_driven() {
        let out = HalOutput::new(
            MockPin {
                level: false,
                writes: 0,
            },
            true,
        );
        assert!(out.is_set_high());
        let pin = out.free();
        assert!(pin.level);
        assert_eq!(pin.writes, 1);
    }

    #[test]
    fn test_toggle_uses_tracked_level() {
        let mut out = HalOutput::new(
            MockPin {
                level: false,
                writes: 0,
            },
            false,
        );
        out.toggle();
        assert!(out.is_set_high());
        out.toggle();
        assert!(!out.free().level);
    }
}
