//! Input state machines
//!
//! - [`debounce::DebouncedInput`] - button contact filter
//! - [`encoder::QuadratureDecoder`] - interrupt-side rotary decoder
//! - [`tap::TapTempo`] - tap interval to BPM
//! - [`analog::Potentiometer`] - scaled ADC reads

pub mod analog;
pub mod debounce;
pub mod encoder;
pub mod tap;

pub use analog::Potentiometer;
pub use debounce::DebouncedInput;
pub use encoder::{QuadratureDecoder, StepCounter};
pub use tap::TapTempo;
