//! Input pin adapter

use embedded_hal::digital::InputPin as EhInputPin;

/// Active-high input pin
pub struct HalInput<P> {
    pin: P,
}

impl<P: EhInputPin> HalInput<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }
}

impl<P: EhInputPin> cadence_hal::InputPin for HalInput<P> {
    fn is_high(&mut self) -> bool {
        // A failed read counts as not asserted
        self.pin.is_high().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_hal::InputPin;
    use core::convert::Infallible;
    use embedded_hal::digital::ErrorType;

    struct MockPin(bool);

    struct FaultyPin;

    impl ErrorType for FaultyPin {
        type Error = embedded_hal::digital::ErrorKind;
    }

    impl EhInputPin for FaultyPin {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            Err(embedded_hal::digital::ErrorKind::Other)
        }

        fn is_low(&mut self) -> Result<bool, Self::Error> {
            Err(embedded_hal::digital::ErrorKind::Other)
        }
    }

    impl ErrorType for MockPin {
        type Error = Infallible;
    }

    impl EhInputPin for MockPin {
        fn is_high(&mut self) -> Result<bool, Infallible> {
            Ok(self.0)
        }

        fn is_low(&mut self) -> Result<bool, Infallible> {
            Ok(!self.0)
        }
    }

    #[test]
    fn test_active_high() {
        let mut pin = HalInput::new(MockPin(true));
        assert!(pin.is_high());
        assert!(!pin.is_low());
    }

    #[test]
    fn test_released_reads_low() {
        let mut pin = HalInput::new(MockPin(false));
        assert!(!pin.is_high());
        assert!(pin.is_low());
    }

    #[test]
    fn test_read_error_counts_as_released() {
        let mut pin = HalInput::new(FaultyPin);
        assert!(!pin.is_high());
    }
}
