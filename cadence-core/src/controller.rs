//! Application controller
//!
//! Turns UI events and potentiometer moves into effects on the outputs:
//! - tempo changes and the wiper target that follows them
//! - beat indication on the status LED
//! - the screen content for the display task

use core::fmt::Write;

use cadence_hal::OutputPin;
use heapless::String;

use crate::config::DeviceConfig;
use crate::output::{LedMode, StatusLed};
use crate::state::UiEvent;
use crate::tempo::Tempo;

/// Panel geometry
pub const LCD_COLS: usize = 16;
pub const LCD_ROWS: usize = 2;

/// CGRAM slot holding the note glyph (slot 0 collides with the NUL code)
pub const NOTE_CHAR: u8 = 1;

/// Quarter note, 5x8
pub const NOTE_GLYPH: [u8; 8] = [
    0b00001, 0b00001, 0b00001, 0b00111, 0b01111, 0b01111, 0b00110, 0b00000,
];

/// Text content for the character LCD
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    pub lines: [String<LCD_COLS>; LCD_ROWS],
    pub backlight: bool,
}

/// Output effects of one controller step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Actions {
    /// Queue a move to this wiper position
    pub wiper_target: Option<u8>,
    /// Drive the wiper to its bottom end first
    pub rehome: bool,
    /// Screen content changed
    pub redraw: bool,
}

/// Application state
pub struct Controller {
    tempo: Tempo,
    min_bpm: u16,
    fast_beat: bool,
    standby: bool,
}

impl Controller {
    pub fn new(config: &DeviceConfig) -> Self {
        Self {
            tempo: Tempo::new(config.tempo),
            min_bpm: config.tempo.min_bpm,
            fast_beat: false,
            standby: false,
        }
    }

    /// Handle one UI event
    pub fn handle(&mut self, event: UiEvent) -> Actions {
        let woke = core::mem::replace(&mut self.standby, false);
        let mut actions = Actions {
            redraw: woke,
            ..Default::default()
        };

        match event {
            UiEvent::Rotated(steps) => {
                if self.tempo.adjust(steps) {
                    self.tempo_changed(&mut actions);
                }
            }
            UiEvent::Tempo(bpm) => {
                if self.tempo.set(bpm) {
                    self.tempo_changed(&mut actions);
                }
            }
            UiEvent::ShortPress => {
                self.fast_beat = !self.fast_beat;
            }
            UiEvent::LongPress => {
                self.tempo.reset();
                actions.rehome = true;
                self.tempo_changed(&mut actions);
            }
            UiEvent::Standby => {
                self.standby = true;
                actions.redraw = true;
            }
        }
        actions
    }

    /// Handle a potentiometer value outside the hysteresis band
    pub fn pot_moved(&mut self, value: u16) -> Actions {
        let woke = core::mem::replace(&mut self.standby, false);
        let mut actions = Actions {
            redraw: woke,
            ..Default::default()
        };
        if self.tempo.set(self.min_bpm.saturating_add(value)) {
            self.tempo_changed(&mut actions);
        }
        actions
    }

    fn tempo_changed(&self, actions: &mut Actions) {
        actions.wiper_target = Some(self.tempo.wiper_position());
        actions.redraw = true;
    }

    /// Bring the LED mode in line with the application state
    ///
    /// A running flash is left alone.
    pub fn indicate<P: OutputPin>(&self, led: &mut StatusLed<P>) {
        let wanted = if self.standby {
            LedMode::Off
        } else if self.fast_beat {
            LedMode::BlinkFast
        } else {
            LedMode::BlinkSlow
        };

        match (led.mode(), wanted) {
            (LedMode::Flash { .. }, _) => {}
            (current, wanted) if current == wanted => {}
            (_, LedMode::BlinkFast) => led.blink_fast(),
            (_, LedMode::BlinkSlow) => led.blink_slow(),
            _ => led.off(),
        }
    }

    /// Render the current state
    pub fn screen(&self) -> Screen {
        let mut top = String::new();
        let mut bottom = String::new();

        if self.standby {
            let _ = top.push_str("standby");
        } else {
            let _ = top.push(char::from(NOTE_CHAR));
            let _ = write!(top, " {:>3} BPM", self.tempo.bpm());
            if self.fast_beat {
                let _ = top.push_str("  fast");
            }
            let _ = write!(bottom, "delay {:>4} ms", self.tempo.delay_ms());
        }

        Screen {
            lines: [top, bottom],
            backlight: !self.standby,
        }
    }

    pub fn tempo(&self) -> Tempo {
        self.tempo
    }

    pub fn is_standby(&self) -> bool {
        self.standby
    }
}
