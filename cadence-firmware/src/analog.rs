//! RP2040 ADC adapter for the tempo potentiometer

use cadence_hal::{AnalogError, AnalogInput};
use embassy_rp::adc::{Adc, Blocking, Channel};

/// RP2040 ADC resolution (12 bit)
const ADC_MAX: u16 = 4095;

/// One ADC channel read with blocking single conversions (~2 µs each)
pub struct PotAdc {
    adc: Adc<'static, Blocking>,
    channel: Channel<'static>,
}

impl PotAdc {
    pub fn new(adc: Adc<'static, Blocking>, channel: Channel<'static>) -> Self {
        Self { adc, channel }
    }
}

impl AnalogInput for PotAdc {
    fn max_value(&self) -> u16 {
        ADC_MAX
    }

    fn read_raw(&mut self) -> Result<u16, AnalogError> {
        self.adc
            .blocking_read(&mut self.channel)
            .map_err(|_| AnalogError::Conversion)
    }
}
