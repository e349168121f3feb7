//! Cadence Hardware Abstraction Layer
//!
//! This crate defines the narrow hardware traits the control kernel is
//! written against. Chip-specific pins and converters are adapted to them
//! in `cadence-drivers`, so every state machine in `cadence-core` can be
//! exercised on the host with mock pins.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (cadence-firmware)         │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  cadence-core (state machines)          │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  cadence-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  cadence-drivers (embedded-hal adapters)│
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`analog::AnalogInput`] - Single-channel ADC reads

#![no_std]
#![deny(unsafe_code)]

pub mod analog;
pub mod gpio;

// Re-export key traits at crate root for convenience
pub use analog::{AnalogError, AnalogInput};
pub use gpio::{InputPin, OutputPin};
