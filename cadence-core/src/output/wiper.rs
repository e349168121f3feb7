//! X9C-style digital potentiometer drive
//!
//! The chip has three control lines: U/D selects the direction, a falling
//! edge on INC moves the wiper one step while CS is low, and CS rising
//! while INC is low deselects without storing the wiper to non-volatile
//! memory. Moves are queued and executed one pin change per `update`, so a
//! full sweep spreads over many control-loop ticks.
//!
//! ```text
//!        ┌──────────────────────────────────────────────┐
//!        ▼                                              │
//!      Idle ──(move dequeued)──▶ Select ──▶ BeginCycle  │
//!                                              │        │
//!                                              ▼        │
//!                     IncHigh ◀──(steps left)── IncLow  │
//!                        │  (after tIH)          │      │
//!                        └──────────────────────▶│      │
//!                                      (last step)▼     │
//!                                            Deselect ──┘ (after tCPH)
//! ```

use cadence_hal::OutputPin;
use heapless::Deque;

use crate::config::WiperTiming;
use crate::time::{elapsed, Micros};

/// Highest wiper position
pub const WIPER_MAX: u8 = 99;

/// Pending moves held before new ones are rejected
pub const QUEUE_CAPACITY: usize = 5;

/// A queued wiper request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WiperMove {
    /// Step by a signed amount
    Relative(i16),
    /// Go to a position, resolved against the position at dequeue time
    Absolute(u8),
}

/// Wiper command error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WiperError {
    /// Move queue is full; the move was dropped
    QueueFull,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum Phase {
    Idle,
    Select,
    BeginCycle,
    IncLow,
    IncHigh,
    Deselect,
}

/// Three-wire stepped potentiometer driver
pub struct WiperDrive<UD, INC, CS> {
    up_down: UD,
    inc: INC,
    cs: CS,
    timing: WiperTiming,
    position: u8,
    queue: Deque<WiperMove, QUEUE_CAPACITY>,
    phase: Phase,
    upward: bool,
    remaining: u16,
    since: Micros,
}

impl<UD, INC, CS> WiperDrive<UD, INC, CS>
where
    UD: OutputPin,
    INC: OutputPin,
    CS: OutputPin,
{
    /// Take the pins and leave the chip deselected without a store
    ///
    /// The tracked position starts at 0; queue [`low`](Self::low) to home
    /// the wiper when the physical position is unknown.
    pub fn new(mut up_down: UD, mut inc: INC, mut cs: CS, timing: WiperTiming, now_us: Micros) -> Self {
        up_down.set_low();
        inc.set_low();
        cs.set_high();
        inc.set_high();

        Self {
            up_down,
            inc,
            cs,
            timing,
            position: 0,
            queue: Deque::new(),
            phase: Phase::Deselect,
            upward: false,
            remaining: 0,
            since: now_us,
        }
    }

    /// Queue a relative move
    pub fn move_by(&mut self, steps: i16) -> Result<(), WiperError> {
        self.enqueue(WiperMove::Relative(steps))
    }

    /// Queue an absolute move, clamped to `0..=WIPER_MAX`
    pub fn move_to(&mut self, position: u8) -> Result<(), WiperError> {
        self.enqueue(WiperMove::Absolute(position.min(WIPER_MAX)))
    }

    pub fn up(&mut self) -> Result<(), WiperError> {
        self.move_by(1)
    }

    pub fn down(&mut self) -> Result<(), WiperError> {
        self.move_by(-1)
    }

    /// Drive to the bottom end from any physical position
    pub fn low(&mut self) -> Result<(), WiperError> {
        self.move_by(-(i16::from(WIPER_MAX) + 1))
    }

    /// Drive to the top end from any physical position
    pub fn high(&mut self) -> Result<(), WiperError> {
        self.move_by(i16::from(WIPER_MAX) + 1)
    }

    fn enqueue(&mut self, mv: WiperMove) -> Result<(), WiperError> {
        self.queue.push_back(mv).map_err(|_| WiperError::QueueFull)
    }

    /// Advance the protocol by at most one pin change
    pub fn update(&mut self, now_us: Micros) {
        match self.phase {
            Phase::Idle => {
                let Some(mv) = self.queue.pop_front() else {
                    return;
                };
                let delta = match mv {
                    WiperMove::Relative(steps) => steps,
                    WiperMove::Absolute(target) => i16::from(target) - i16::from(self.position),
                };
                if delta != 0 {
                    self.upward = delta > 0;
                    self.remaining = delta.unsigned_abs();
                    self.phase = Phase::Select;
                }
            }
            Phase::Select => {
                self.up_down.set_state(self.upward);
                self.cs.set_low();
                self.phase = Phase::BeginCycle;
            }
            Phase::BeginCycle => {
                self.inc.set_low();
                self.since = now_us;
                self.phase = Phase::IncLow;
            }
            Phase::IncLow => {
                if elapsed(now_us, self.since) < self.timing.inc_low_us {
                    return;
                }
                self.position = if self.upward {
                    (self.position + 1).min(WIPER_MAX)
                } else {
                    self.position.saturating_sub(1)
                };
                self.remaining -= 1;

                if self.remaining == 0 {
                    // CS rises while INC is still low: no store
                    self.cs.set_high();
                    self.phase = Phase::Deselect;
                } else {
                    self.phase = Phase::IncHigh;
                }
                self.inc.set_high();
                self.since = now_us;
            }
            Phase::IncHigh => {
                if elapsed(now_us, self.since) < self.timing.inc_high_us {
                    return;
                }
                self.inc.set_low();
                self.since = now_us;
                self.phase = Phase::IncLow;
            }
            Phase::Deselect => {
                if elapsed(now_us, self.since) >= self.timing.deselect_us {
                    self.phase = Phase::Idle;
                }
            }
        }
    }

    /// Best-known wiper position
    pub fn pos(&self) -> u8 {
        self.position
    }

    /// No move queued or in progress
    pub fn stable(&self) -> bool {
        self.queue.is_empty() && self.phase == Phase::Idle
    }

    /// Number of queued moves not yet started
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Give the pins back
    pub fn release(self) -> (UD, INC, CS) {
        (self.up_down, self.inc, self.cs)
    }
}
