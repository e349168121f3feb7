//! Cadence Core - board-agnostic control kernel
//!
//! This crate contains the cooperative state machines of the tap-tempo
//! controller. Nothing here blocks: every machine is advanced by an
//! `update` call that receives the current timestamp and fresh pin samples,
//! and returns immediately.
//!
//! Per control-loop tick the firmware updates, in order: the button
//! debouncer, the tap detector, the encoder step drain, the UI state
//! machine, then the outputs (status LED, wiper drive).

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod controller;
pub mod input;
pub mod output;
pub mod state;
pub mod tempo;
pub mod time;
