//! Inter-task communication
//!
//! Static state shared between Embassy tasks.

use cadence_core::controller::Screen;
use cadence_core::input::StepCounter;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

/// Encoder detents, written by the edge task and drained by the control loop
pub static ENCODER_STEPS: StepCounter = StepCounter::new();

/// Latest screen content for the display task (older content is dropped)
pub static SCREEN: Signal<CriticalSectionRawMutex, Screen> = Signal::new();
