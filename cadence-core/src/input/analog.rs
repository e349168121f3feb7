//! Potentiometer sampling
//!
//! Scales raw ADC conversions onto a small integer range and reports
//! changes beyond a hysteresis band, so a resting knob does not chatter.

use cadence_hal::AnalogInput;

use crate::config::PotConfig;

/// Scaled potentiometer reader
pub struct Potentiometer<A> {
    adc: A,
    out_max: u16,
    hysteresis: u16,
    value: u16,
    reported: Option<u16>,
}

impl<A: AnalogInput> Potentiometer<A> {
    pub fn new(adc: A, config: &PotConfig) -> Self {
        Self {
            adc,
            out_max: config.out_max,
            hysteresis: config.hysteresis,
            value: 0,
            reported: None,
        }
    }

    /// Take one conversion and return it scaled to `0..=out_max`
    ///
    /// A failed conversion returns the previous value.
    pub fn sample(&mut self) -> u16 {
        if let Ok(raw) = self.adc.read_raw() {
            self.value = scale(raw, self.adc.max_value(), self.out_max);
        }
        self.value
    }

    /// Sample and return the value if it moved outside the hysteresis band
    ///
    /// The first call always reports.
    pub fn changed(&mut self) -> Option<u16> {
        let value = self.sample();
        match self.reported {
            Some(last) if value.abs_diff(last) <= self.hysteresis => None,
            _ => {
                self.reported = Some(value);
                Some(value)
            }
        }
    }

    /// Last scaled value without a new conversion
    pub fn value(&self) -> u16 {
        self.value
    }
}

/// Map `raw` in `0..=in_max` onto `0..=out_max`, rounding to nearest
fn scale(raw: u16, in_max: u16, out_max: u16) -> u16 {
    if in_max == 0 {
        return 0;
    }
    let raw = u32::from(raw.min(in_max));
    let in_max = u32::from(in_max);
    ((raw * u32::from(out_max) + in_max / 2) / in_max) as u16
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_hal::AnalogError;

    struct MockAdc {
        raw: Result<u16, AnalogError>,
    }

    impl AnalogInput for MockAdc {
        fn max_value(&self) -> u16 {
            1023
        }

        fn read_raw(&mut self) -> Result<u16, AnalogError> {
            self.raw
        }
    }

    fn pot(raw: u16) -> Potentiometer<MockAdc> {
        Potentiometer::new(MockAdc { raw: Ok(raw) }, &PotConfig::default())
    }

    #[test]
    fn test_scale_endpoints() {
        assert_eq!(pot(0).sample(), 0);
        assert_eq!(pot(1023).sample(), 200);
        assert_eq!(pot(512).sample(), 100);
    }

    #[test]
    fn test_out_of_range_raw_is_clamped() {
        assert_eq!(pot(4000).sample(), 200);
    }

    #[test]
    fn test_failed_read_keeps_value() {
        let mut p = pot(1023);
        p.sample();
        p.adc.raw = Err(AnalogError::Conversion);
        assert_eq!(p.sample(), 200);
    }

    #[test]
    fn test_hysteresis() {
        let mut p = pot(512);
        assert_eq!(p.changed(), Some(100));
        p.adc.raw = Ok(517);
        assert_eq!(p.changed(), None);
        p.adc.raw = Ok(530);
        assert_eq!(p.changed(), Some(104));
    }

    #[test]
    fn test_baseline_suppresses_unmoved_knob() {
        let mut p = pot(512);
        p.changed();
        assert_eq!(p.changed(), None);
        p.adc.raw = Ok(600);
        assert_eq!(p.changed(), Some(117));
    }

    #[test]
    fn test_custom_range() {
        // 10-bit pot mapped onto 0..=86
        let config = PotConfig {
            out_max: 86,
            hysteresis: 0,
        };
        let mut p = Potentiometer::new(MockAdc { raw: Ok(1023) }, &config);
        assert_eq!(p.sample(), 86);
    }
}
