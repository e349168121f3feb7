//! Embassy async tasks
//!
//! - `encoder_task`: GPIO edge interrupts feed the quadrature decoder
//! - `control_task`: the cooperative control loop
//! - `display_task`: LCD writes, off the control loop

pub mod control;
pub mod display;
pub mod encoder;

pub use control::{control_task, ControlPins};
pub use display::{display_task, Lcd};
pub use encoder::encoder_task;
