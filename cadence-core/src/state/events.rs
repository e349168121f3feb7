//! UI events

/// Discrete event produced by the UI state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UiEvent {
    /// Button released before the hold threshold
    ShortPress,
    /// Button held past the hold threshold (emitted while still down)
    LongPress,
    /// Net encoder detents since the previous tick
    Rotated(i32),
    /// A tap pair produced a new BPM
    Tempo(u16),
    /// No input for the standby period
    Standby,
}
