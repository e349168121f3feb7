//! Configuration types
//!
//! Timing and range parameters for every state machine, with defaults
//! matching the reference hardware. The firmware overrides them from
//! `device.toml`, read with the subset parser in [`toml`].

pub mod toml;
pub mod types;

pub use self::toml::{parse_config, ParseError};
pub use types::*;
