//! Quadrature rotary encoder decoding
//!
//! [`QuadratureDecoder::on_pin_change`] runs in edge-interrupt context. It
//! folds 2-bit direction codes into a 4-bit history and looks the signed
//! increment up in [`TRANSITIONS`]. A non-zero increment is published at
//! once into a [`StepCounter`] that the control loop drains with
//! [`StepCounter::take`]. The follow-up code of the same detent looks up
//! zero and clears the history, as does a net return to zero.
//!
//! Clockwise is the sequence where DTA leads CLK. Sampled as `(clk, dta)`
//! one detent reads `00 → 01 → 11 → 10 → 00`.

use portable_atomic::{AtomicI32, Ordering};

/// Increment for each 4-bit history value `(previous_code << 2) | code`
pub const TRANSITIONS: [i8; 16] = [0, -1, 1, 0, 0, 0, 1, 0, 0, -1, 0, 0, 0, 0, 0, 0];

/// Direction code when CLK and DTA read the same level
const CODE_SAME: u8 = 2;
/// Direction code when CLK and DTA differ
const CODE_DIFFERENT: u8 = 1;

/// Decoder state, owned by the interrupt handler
#[derive(Debug, Clone)]
pub struct QuadratureDecoder {
    clk_last: bool,
    dta_last: bool,
    history: u8,
    pending: i8,
}

impl Default for QuadratureDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl QuadratureDecoder {
    /// Create a decoder assuming both lines start low
    pub const fn new() -> Self {
        Self::with_levels(false, false)
    }

    /// Create a decoder primed with the current line levels
    pub const fn with_levels(clk: bool, dta: bool) -> Self {
        Self {
            clk_last: clk,
            dta_last: dta,
            history: 0,
            pending: 0,
        }
    }

    /// Evaluate fresh line levels after an edge on either pin
    ///
    /// Returns the step published by this edge: `1`, `-1` or `0`.
    pub fn on_pin_change(&mut self, clk: bool, dta: bool) -> i8 {
        if clk == self.clk_last {
            return 0;
        }
        self.clk_last = clk;

        if dta == self.dta_last {
            return 0;
        }
        self.dta_last = dta;

        let code = if clk == dta { CODE_SAME } else { CODE_DIFFERENT };
        self.transition(code)
    }

    /// Same as [`on_pin_change`](Self::on_pin_change), publishing into `counter`
    pub fn on_pin_change_into(&mut self, clk: bool, dta: bool, counter: &StepCounter) {
        let detent = self.on_pin_change(clk, dta);
        if detent != 0 {
            counter.add(i32::from(detent));
        }
    }

    fn transition(&mut self, code: u8) -> i8 {
        self.history = ((self.history << 2) | code) & 0x0F;
        let step = TRANSITIONS[self.history as usize];
        self.pending += step;

        // Detent closed, or the history cancelled itself out
        if step == 0 || self.pending == 0 {
            self.history = 0;
            self.pending = 0;
        }
        step
    }

    /// Current 4-bit history (zero once a detent has closed)
    pub fn history(&self) -> u8 {
        self.history
    }
}

/// Net step count shared between the edge handler and the control loop
#[derive(Debug)]
pub struct StepCounter {
    steps: AtomicI32,
}

impl Default for StepCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl StepCounter {
    pub const fn new() -> Self {
        Self {
            steps: AtomicI32::new(0),
        }
    }

    /// Accumulate detents (interrupt side)
    pub fn add(&self, steps: i32) {
        self.steps.fetch_add(steps, Ordering::Relaxed);
    }

    /// Read and zero the net count (control-loop side)
    ///
    /// Consuming: a second call returns `0` unless the encoder moved again.
    pub fn take(&self) -> i32 {
        self.steps.swap(0, Ordering::Relaxed)
    }
}
