//! Device configuration structures

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Button debounce settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct DebounceConfig {
    /// Raw level must hold longer than this before it is accepted (ms)
    pub window_ms: u32,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self { window_ms: 5 }
    }
}

/// Status LED timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct LedConfig {
    /// Half period of the slow blink (ms)
    pub slow_ms: u32,
    /// Half period of the fast blink (ms)
    pub fast_ms: u32,
    /// Length of the feedback flash on each tap (ms)
    pub tap_flash_ms: u32,
}

impl Default for LedConfig {
    fn default() -> Self {
        Self {
            slow_ms: 500,
            fast_ms: 125,
            tap_flash_ms: 40,
        }
    }
}

/// Tap-tempo detector bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct TapConfig {
    /// Release must be stable for this long before a tap counts (ms)
    pub debounce_ms: u32,
    /// Shorter intervals are clamped up to this (ms, 240 BPM)
    pub min_interval_ms: u32,
    /// Longer intervals discard the tap pair (ms, 40 BPM)
    pub max_interval_ms: u32,
}

impl Default for TapConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 5,
            min_interval_ms: 250,
            max_interval_ms: 1500,
        }
    }
}

/// X9C-style wiper protocol timings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct WiperTiming {
    /// Minimum INC low time (tIL, µs)
    pub inc_low_us: u32,
    /// Minimum INC high time (tIH, µs)
    pub inc_high_us: u32,
    /// Minimum CS deselect time between moves (tCPH, µs)
    pub deselect_us: u32,
}

impl Default for WiperTiming {
    fn default() -> Self {
        Self {
            inc_low_us: 1,
            inc_high_us: 1,
            deselect_us: 20_000,
        }
    }
}

/// UI event thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct UiConfig {
    /// Press duration that turns a press into a long press (ms)
    pub hold_ms: u32,
    /// Inactivity before a standby event (ms)
    pub standby_ms: u32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            hold_ms: 3000,
            standby_ms: 60_000,
        }
    }
}

/// Tempo range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct TempoConfig {
    /// Tempo at boot and after a long press
    pub default_bpm: u16,
    pub min_bpm: u16,
    pub max_bpm: u16,
}

impl Default for TempoConfig {
    fn default() -> Self {
        Self {
            default_bpm: 120,
            min_bpm: 40,
            max_bpm: 240,
        }
    }
}

/// Tempo potentiometer scaling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct PotConfig {
    /// Scaled output range is `0..=out_max`
    pub out_max: u16,
    /// Changes of this size or smaller are ignored
    pub hysteresis: u16,
}

impl Default for PotConfig {
    fn default() -> Self {
        Self {
            out_max: 200,
            hysteresis: 1,
        }
    }
}

/// Complete device configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct DeviceConfig {
    pub button: DebounceConfig,
    pub led: LedConfig,
    pub tap: TapConfig,
    pub wiper: WiperTiming,
    pub ui: UiConfig,
    pub tempo: TempoConfig,
    pub pot: PotConfig,
}

/// Configuration consistency error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A debounce window of zero accepts every glitch
    ZeroDebounce,
    /// Blink half periods must be non-zero
    ZeroBlinkPeriod,
    /// Tap `min_interval_ms` must be non-zero and below `max_interval_ms`
    TapBoundsInverted,
    /// Tempo `min_bpm` must be non-zero and below `max_bpm`
    TempoRangeInverted,
    /// `default_bpm` lies outside `min_bpm..=max_bpm`
    DefaultTempoOutOfRange,
    /// Tempo range reaches beyond what the tap bounds can produce
    TempoOutsideTapRange,
    /// Hold threshold must be non-zero
    ZeroHold,
    /// Standby must not fire before a long press could
    StandbyBeforeHold,
    /// Pot output range is empty
    PotRangeEmpty,
}

impl DeviceConfig {
    /// Check cross-field consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.button.window_ms == 0 || self.tap.debounce_ms == 0 {
            return Err(ConfigError::ZeroDebounce);
        }
        if self.led.slow_ms == 0 || self.led.fast_ms == 0 {
            return Err(ConfigError::ZeroBlinkPeriod);
        }
        if self.tap.min_interval_ms == 0 || self.tap.min_interval_ms >= self.tap.max_interval_ms {
            return Err(ConfigError::TapBoundsInverted);
        }

        let tempo = &self.tempo;
        if tempo.min_bpm == 0 || tempo.min_bpm >= tempo.max_bpm {
            return Err(ConfigError::TempoRangeInverted);
        }
        if !(tempo.min_bpm..=tempo.max_bpm).contains(&tempo.default_bpm) {
            return Err(ConfigError::DefaultTempoOutOfRange);
        }
        let slowest_tap = 60_000 / self.tap.max_interval_ms;
        let fastest_tap = 60_000 / self.tap.min_interval_ms;
        if u32::from(tempo.min_bpm) < slowest_tap || u32::from(tempo.max_bpm) > fastest_tap {
            return Err(ConfigError::TempoOutsideTapRange);
        }

        if self.ui.hold_ms == 0 {
            return Err(ConfigError::ZeroHold);
        }
        if self.ui.standby_ms <= self.ui.hold_ms {
            return Err(ConfigError::StandbyBeforeHold);
        }
        if self.pot.out_max == 0 {
            return Err(ConfigError::PotRangeEmpty);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert_eq!(DeviceConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_reference_constants() {
        let config = DeviceConfig::default();
        assert_eq!(config.button.window_ms, 5);
        assert_eq!(config.tap.min_interval_ms, 250);
        assert_eq!(config.tap.max_interval_ms, 1500);
        assert_eq!(config.ui.hold_ms, 3000);
        assert_eq!(config.wiper.deselect_us, 20_000);
    }

    #[test]
    fn test_inverted_tap_bounds() {
        let mut config = DeviceConfig::default();
        config.tap.min_interval_ms = 1500;
        assert_eq!(config.validate(), Err(ConfigError::TapBoundsInverted));
    }

    #[test]
    fn test_tempo_wider_than_tap_range() {
        let mut config = DeviceConfig::default();
        config.tempo.max_bpm = 300;
        assert_eq!(config.validate(), Err(ConfigError::TempoOutsideTapRange));
    }

    #[test]
    fn test_default_tempo_out_of_range() {
        let mut config = DeviceConfig::default();
        config.tempo.default_bpm = 30;
        assert_eq!(config.validate(), Err(ConfigError::DefaultTempoOutOfRange));
    }

    #[test]
    fn test_standby_shorter_than_hold() {
        let mut config = DeviceConfig::default();
        config.ui.standby_ms = 2000;
        assert_eq!(config.validate(), Err(ConfigError::StandbyBeforeHold));
    }
}
