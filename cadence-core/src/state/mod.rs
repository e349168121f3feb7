//! UI event state machine
//!
//! Folds the debounced button, encoder steps, tap BPM and inactivity into
//! at most one [`UiEvent`] per control-loop tick.

mod events;
mod machine;

pub use events::UiEvent;
pub use machine::{ButtonState, UiStateMachine};
