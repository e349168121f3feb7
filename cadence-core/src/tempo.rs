//! Tempo model
//!
//! Holds the current BPM inside the configured range and maps it onto a
//! delay time and a wiper position. The slowest tempo gives the longest
//! delay and the top wiper position.

use crate::config::TempoConfig;
use crate::output::WIPER_MAX;

const MS_PER_MINUTE: u32 = 60_000;

/// Current tempo, always within `min_bpm..=max_bpm`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tempo {
    bpm: u16,
    config: TempoConfig,
}

impl Tempo {
    /// Start at the configured default
    pub fn new(config: TempoConfig) -> Self {
        let mut tempo = Self {
            bpm: config.default_bpm,
            config,
        };
        tempo.set(config.default_bpm);
        tempo
    }

    pub fn bpm(&self) -> u16 {
        self.bpm
    }

    /// Set the tempo, clamped into range; returns `true` if it changed
    pub fn set(&mut self, bpm: u16) -> bool {
        let bpm = bpm.clamp(self.config.min_bpm, self.config.max_bpm);
        let changed = bpm != self.bpm;
        self.bpm = bpm;
        changed
    }

    /// Move by `steps` BPM; returns `true` if it changed
    pub fn adjust(&mut self, steps: i32) -> bool {
        let target = (i32::from(self.bpm) + steps).clamp(0, i32::from(u16::MAX));
        self.set(target as u16)
    }

    /// Return to the configured default
    pub fn reset(&mut self) -> bool {
        self.set(self.config.default_bpm)
    }

    /// Beat period in milliseconds
    pub fn delay_ms(&self) -> u32 {
        MS_PER_MINUTE / u32::from(self.bpm)
    }

    /// Wiper position for the current delay, linear in delay time
    pub fn wiper_position(&self) -> u8 {
        let shortest = MS_PER_MINUTE / u32::from(self.config.max_bpm);
        let longest = MS_PER_MINUTE / u32::from(self.config.min_bpm);
        let span = longest - shortest;
        if span == 0 {
            return 0;
        }
        let offset = self.delay_ms().clamp(shortest, longest) - shortest;
        let max = u32::from(WIPER_MAX);
        ((offset * max + span / 2) / span) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tempo() -> Tempo {
        Tempo::new(TempoConfig::default())
    }

    #[test]
    fn test_starts_at_default() {
        let t = tempo();
        assert_eq!(t.bpm(), 120);
        assert_eq!(t.delay_ms(), 500);
    }

    #[test]
    fn test_set_clamps() {
        let mut t = tempo();
        assert!(t.set(400));
        assert_eq!(t.bpm(), 240);
        assert!(t.set(1));
        assert_eq!(t.bpm(), 40);
        assert!(!t.set(10));
    }

    #[test]
    fn test_adjust_by_steps() {
        let mut t = tempo();
        assert!(t.adjust(-5));
        assert_eq!(t.bpm(), 115);
        t.adjust(-1000);
        assert_eq!(t.bpm(), 40);
        assert!(t.reset());
        assert_eq!(t.bpm(), 120);
    }

    #[test]
    fn test_wiper_endpoints() {
        let mut t = tempo();
        t.set(240);
        assert_eq!(t.wiper_position(), 0);
        t.set(40);
        assert_eq!(t.wiper_position(), WIPER_MAX);
    }

    #[test]
    fn test_wiper_midrange() {
        let mut t = tempo();
        t.set(120);
        // 500 ms is 250 ms into the 1250 ms span
        assert_eq!(t.wiper_position(), 20);
    }
}
