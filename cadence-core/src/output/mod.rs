//! Output state machines
//!
//! - [`led::StatusLed`] - steady / blink / flash indicator
//! - [`wiper::WiperDrive`] - X9C-style stepped potentiometer protocol
//! - [`display::LineDiff`] - changed-cell tracking for character LCDs

pub mod display;
pub mod led;
pub mod wiper;

pub use display::{LineDiff, Span};
pub use led::{LedMode, StatusLed};
pub use wiper::{WiperDrive, WiperError, WiperMove, WIPER_MAX};
