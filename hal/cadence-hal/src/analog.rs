//! Analog input abstraction

/// Analog read failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AnalogError {
    /// Conversion did not complete
    Conversion,
    /// Channel not configured
    Unavailable,
}

/// Single-channel analog-to-digital converter
///
/// A read is expected to be short and bounded (one conversion); it is
/// called from the control loop.
pub trait AnalogInput {
    /// Full-scale raw value (e.g. 1023 for 10-bit, 4095 for 12-bit)
    fn max_value(&self) -> u16;

    /// Perform one conversion and return the raw value
    fn read_raw(&mut self) -> Result<u16, AnalogError>;
}
