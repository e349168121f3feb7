//! `embedded-hal` pin adapters
//!
//! Wrap any `embedded_hal::digital` pin so the core state machines can
//! drive it through the infallible `cadence-hal` traits. Pin errors are
//! dropped; on MCUs where GPIO cannot fail they do not exist.

mod input;
mod output;

pub use input::HalInput;
pub use output::HalOutput;
