//! Tap-tempo interval detector
//!
//! Each tap runs through `Idle → Armed → High → FallingDebounce → Idle`.
//! The tap is recorded when the release has been stable for the debounce
//! window, stamped with the time the press was first seen. Two consecutive
//! taps give an interval, and the interval gives a BPM value.

use cadence_hal::InputPin;

use crate::config::TapConfig;
use crate::time::{elapsed, Millis};

const MS_PER_MINUTE: u32 = 60_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum Phase {
    Idle,
    /// Rising level seen at `pressed_at`
    Armed { pressed_at: Millis },
    /// Press confirmed on a following tick
    High { pressed_at: Millis },
    /// Level low since `low_since`, waiting out contact bounce
    FallingDebounce { pressed_at: Millis, low_since: Millis },
}

/// Tap-tempo BPM detector
#[derive(Debug, Clone)]
pub struct TapTempo {
    config: TapConfig,
    phase: Phase,
    previous_tap: Option<Millis>,
    last_interval_ms: Option<u32>,
    bpm: Option<u16>,
    tapped: bool,
}

impl TapTempo {
    pub fn new(config: TapConfig) -> Self {
        Self {
            config,
            phase: Phase::Idle,
            previous_tap: None,
            last_interval_ms: None,
            bpm: None,
            tapped: false,
        }
    }

    /// Feed one sample of the tap input (high = pressed)
    pub fn update(&mut self, now_ms: Millis, level: bool) {
        self.phase = match self.phase {
            Phase::Idle if level => Phase::Armed { pressed_at: now_ms },
            Phase::Idle => Phase::Idle,
            // A press that vanished within one tick was a glitch
            Phase::Armed { pressed_at } if level => Phase::High { pressed_at },
            Phase::Armed { .. } => Phase::Idle,
            Phase::High { pressed_at } if !level => Phase::FallingDebounce {
                pressed_at,
                low_since: now_ms,
            },
            Phase::High { pressed_at } => Phase::High { pressed_at },
            Phase::FallingDebounce { pressed_at, .. } if level => Phase::High { pressed_at },
            Phase::FallingDebounce {
                pressed_at,
                low_since,
            } => {
                if elapsed(now_ms, low_since) >= self.config.debounce_ms {
                    self.record(pressed_at);
                    Phase::Idle
                } else {
                    Phase::FallingDebounce {
                        pressed_at,
                        low_since,
                    }
                }
            }
        };
    }

    /// Read `pin` and feed the sample
    pub fn sample<P: InputPin>(&mut self, now_ms: Millis, pin: &mut P) {
        let level = pin.is_high();
        self.update(now_ms, level);
    }

    fn record(&mut self, at: Millis) {
        self.tapped = true;

        let Some(previous) = self.previous_tap.replace(at) else {
            return;
        };

        let interval = elapsed(at, previous);
        if interval > self.config.max_interval_ms {
            // Too slow: this tap starts a new pair
            self.last_interval_ms = None;
            return;
        }

        let interval = interval.max(self.config.min_interval_ms);
        self.last_interval_ms = Some(interval);
        self.bpm = Some((MS_PER_MINUTE / interval) as u16);
    }

    /// Take the BPM from the latest valid tap pair
    ///
    /// Consuming: returns `None` until another valid pair is tapped.
    pub fn take_bpm(&mut self) -> Option<u16> {
        self.bpm.take()
    }

    /// Take the "a tap was just recorded" flag
    pub fn take_tap(&mut self) -> bool {
        core::mem::take(&mut self.tapped)
    }

    /// Interval of the latest valid pair, after clamping
    pub fn last_interval_ms(&self) -> Option<u32> {
        self.last_interval_ms
    }

    /// Forget recorded taps; a tap in progress still completes
    pub fn reset(&mut self) {
        self.previous_tap = None;
        self.last_interval_ms = None;
        self.bpm = None;
        self.tapped = false;
    }

    /// No tap is in progress
    pub fn is_idle(&self) -> bool {
        self.phase == Phase::Idle
    }
}
