//! Hardware driver implementations
//!
//! This crate connects `embedded-hal` peripherals to the Cadence core:
//!
//! - GPIO adapters implementing the `cadence-hal` pin traits
//! - HD44780 character LCD behind a PCF8574 I2C backpack

#![no_std]
#![deny(unsafe_code)]

pub mod display;
pub mod gpio;
