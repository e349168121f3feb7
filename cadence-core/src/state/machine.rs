//! UI state machine implementation

use super::events::UiEvent;
use crate::config::UiConfig;
use crate::time::{elapsed, Millis};

/// Button press tracking state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonState {
    Released,
    Pressed,
    Held,
}

/// Top-level UI state machine
///
/// The event slot holds one unread event; a newer event overwrites it.
#[derive(Debug, Clone)]
pub struct UiStateMachine {
    hold_ms: u32,
    standby_ms: u32,
    state: ButtonState,
    pressed_at: Millis,
    last_activity: Millis,
    standby_sent: bool,
    event: Option<UiEvent>,
}

impl UiStateMachine {
    /// Create a released machine; the inactivity timer starts at `now_ms`
    pub fn new(config: &UiConfig, now_ms: Millis) -> Self {
        Self {
            hold_ms: config.hold_ms,
            standby_ms: config.standby_ms,
            state: ButtonState::Released,
            pressed_at: now_ms,
            last_activity: now_ms,
            standby_sent: false,
            event: None,
        }
    }

    /// Advance one tick
    ///
    /// - `button_down`: debounced button level
    /// - `steps`: encoder detents drained this tick
    /// - `bpm`: fresh tap-tempo result, if any
    pub fn update(&mut self, now_ms: Millis, button_down: bool, steps: i32, bpm: Option<u16>) {
        match self.state {
            ButtonState::Released => {
                if button_down {
                    self.state = ButtonState::Pressed;
                    self.pressed_at = now_ms;
                    self.touch(now_ms);
                } else if let Some(bpm) = bpm {
                    self.touch(now_ms);
                    self.emit(UiEvent::Tempo(bpm));
                } else if steps != 0 {
                    self.touch(now_ms);
                    self.emit(UiEvent::Rotated(steps));
                } else if !self.standby_sent && elapsed(now_ms, self.last_activity) > self.standby_ms {
                    self.standby_sent = true;
                    self.emit(UiEvent::Standby);
                }
            }
            ButtonState::Pressed => {
                if !button_down {
                    self.state = ButtonState::Released;
                    self.touch(now_ms);
                    self.emit(UiEvent::ShortPress);
                } else if elapsed(now_ms, self.pressed_at) > self.hold_ms {
                    self.state = ButtonState::Held;
                    self.emit(UiEvent::LongPress);
                }
            }
            ButtonState::Held => {
                if !button_down {
                    self.state = ButtonState::Released;
                    self.touch(now_ms);
                }
            }
        }
    }

    fn touch(&mut self, now_ms: Millis) {
        self.last_activity = now_ms;
        self.standby_sent = false;
    }

    fn emit(&mut self, event: UiEvent) {
        self.event = Some(event);
    }

    /// Take the pending event
    ///
    /// Consuming: a second call returns `None` until a new event occurs.
    pub fn poll(&mut self) -> Option<UiEvent> {
        self.event.take()
    }

    pub fn state(&self) -> ButtonState {
        self.state
    }

    /// A standby event was emitted and no activity has happened since
    pub fn is_standby(&self) -> bool {
        self.standby_sent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn machine() -> UiStateMachine {
        UiStateMachine::new(&UiConfig::default(), 0)
    }

    /// Drive the button with 10 ms ticks, collecting every polled event
    fn run(
        ui: &mut UiStateMachine,
        from: u32,
        to: u32,
        down: bool,
        events: &mut [Option<UiEvent>; 8],
        n: &mut usize,
    ) {
        let mut t = from;
        while t < to {
            ui.update(t, down, 0, None);
            if let Some(ev) = ui.poll() {
                events[*n] = Some(ev);
                *n += 1;
            }
            t += 10;
        }
    }

    #[test]
    fn test_short_press_emits_once() {
        let mut ui = machine();
        let mut events = [None; 8];
        let mut n = 0;
        run(&mut ui, 100, 400, true, &mut events, &mut n);
        run(&mut ui, 400, 1000, false, &mut events, &mut n);
        assert_eq!(n, 1);
        assert_eq!(events[0], Some(UiEvent::ShortPress));
        assert_eq!(ui.state(), ButtonState::Released);
    }

    #[test]
    fn test_long_press_emits_before_release_only() {
        let mut ui = machine();
        let mut events = [None; 8];
        let mut n = 0;
        run(&mut ui, 100, 3100, true, &mut events, &mut n);
        assert_eq!(n, 0);
        run(&mut ui, 3100, 5000, true, &mut events, &mut n);
        assert_eq!(n, 1);
        assert_eq!(events[0], Some(UiEvent::LongPress));
        assert_eq!(ui.state(), ButtonState::Held);
        run(&mut ui, 5000, 6000, false, &mut events, &mut n);
        assert_eq!(n, 1);
    }

    #[test]
    fn test_hold_threshold_is_exclusive() {
        let mut ui = machine();
        ui.update(0, true, 0, None);
        ui.update(3000, true, 0, None);
        assert_eq!(ui.poll(), None);
        ui.update(3001, true, 0, None);
        assert_eq!(ui.poll(), Some(UiEvent::LongPress));
    }

    #[test]
    fn test_rotation_while_released() {
        let mut ui = machine();
        ui.update(10, false, -3, None);
        assert_eq!(ui.poll(), Some(UiEvent::Rotated(-3)));
        assert_eq!(ui.poll(), None);
    }

    #[test]
    fn test_rotation_ignored_while_pressed() {
        let mut ui = machine();
        ui.update(10, true, 0, None);
        ui.update(20, true, 2, None);
        assert_eq!(ui.poll(), None);
    }

    #[test]
    fn test_tempo_has_priority_over_rotation() {
        let mut ui = machine();
        ui.update(10, false, 1, Some(96));
        assert_eq!(ui.poll(), Some(UiEvent::Tempo(96)));
    }

    #[test]
    fn test_unread_event_is_overwritten() {
        let mut ui = machine();
        ui.update(10, false, 1, None);
        ui.update(20, false, 2, None);
        assert_eq!(ui.poll(), Some(UiEvent::Rotated(2)));
    }

    #[test]
    fn test_standby_once_per_idle_period() {
        let mut ui = machine();
        ui.update(60_000, false, 0, None);
        assert_eq!(ui.poll(), None);
        ui.update(60_001, false, 0, None);
        assert_eq!(ui.poll(), Some(UiEvent::Standby));
        assert!(ui.is_standby());
        ui.update(200_000, false, 0, None);
        assert_eq!(ui.poll(), None);

        // Activity re-arms the timer
        ui.update(200_010, false, 1, None);
        assert_eq!(ui.poll(), Some(UiEvent::Rotated(1)));
        assert!(!ui.is_standby());
        ui.update(260_011, false, 0, None);
        assert_eq!(ui.poll(), Some(UiEvent::Standby));
    }

    #[test]
    fn test_button_counts_as_activity() {
        let mut ui = machine();
        ui.update(50_000, true, 0, None);
        ui.update(50_100, false, 0, None);
        assert_eq!(ui.poll(), Some(UiEvent::ShortPress));
        ui.update(100_000, false, 0, None);
        assert_eq!(ui.poll(), None);
    }
}
