//! Character display change tracking
//!
//! [`LineDiff`] remembers what each LCD row currently shows and turns a
//! new row content into the minimal set of contiguous runs that must be
//! rewritten. Writing only changed cells keeps a slow I2C backpack from
//! flickering on every refresh.

use heapless::Vec;

/// A run of changed cells starting at `col`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span<const COLS: usize> {
    pub col: u8,
    pub bytes: Vec<u8, COLS>,
}

/// Shadow copy of a `COLS` x `ROWS` character display
#[derive(Debug, Clone)]
pub struct LineDiff<const COLS: usize, const ROWS: usize> {
    lines: [[u8; COLS]; ROWS],
}

impl<const COLS: usize, const ROWS: usize> Default for LineDiff<COLS, ROWS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const COLS: usize, const ROWS: usize> LineDiff<COLS, ROWS> {
    /// Start from a blank (all spaces) display
    pub const fn new() -> Self {
        Self {
            lines: [[b' '; COLS]; ROWS],
        }
    }

    /// The display was cleared
    pub fn clear(&mut self) {
        self.lines = [[b' '; COLS]; ROWS];
    }

    /// Display content is unknown; the next update rewrites every cell
    pub fn invalidate(&mut self) {
        self.lines = [[0; COLS]; ROWS];
    }

    /// Record `text` as the new content of `row` and return the runs to write
    ///
    /// `text` is padded with spaces or truncated to `COLS`. Rows outside
    /// the display yield no runs.
    pub fn update(&mut self, row: u8, text: &[u8]) -> Vec<Span<COLS>, COLS> {
        let mut spans: Vec<Span<COLS>, COLS> = Vec::new();
        let Some(line) = self.lines.get_mut(usize::from(row)) else {
            return spans;
        };

        let mut open = false;
        for (col, cell) in line.iter_mut().enumerate() {
            let byte = text.get(col).copied().unwrap_or(b' ');
            if *cell == byte {
                open = false;
                continue;
            }
            *cell = byte;

            if !open {
                // Runs are separated by at least one unchanged cell
                let _ = spans.push(Span {
                    col: col as u8,
                    bytes: Vec::new(),
                });
                open = true;
            }
            if let Some(span) = spans.last_mut() {
                let _ = span.bytes.push(byte);
            }
        }
        spans
    }

    /// Current content of `row`
    pub fn line(&self, row: u8) -> Option<&[u8; COLS]> {
        self.lines.get(usize::from(row))
    }
}
