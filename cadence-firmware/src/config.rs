//! Configuration loading
//!
//! The device configuration is compiled in from `device.toml` and parsed
//! at boot by a small no_std parser. A file that fails to parse or
//! validate falls back to the built-in defaults.

use cadence_core::config::{parse_config, DeviceConfig};
use defmt::{info, warn};

/// Embedded configuration (compiled into firmware)
/// Edit device.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../device.toml");

/// Parse and validate the embedded configuration
pub fn load() -> DeviceConfig {
    let config = match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => config,
        Err(e) => {
            warn!("device.toml parse error {}, using defaults", e);
            return DeviceConfig::default();
        }
    };

    match config.validate() {
        Ok(()) => {
            info!(
                "Config: tempo {}-{} BPM (default {}), hold {} ms, standby {} ms",
                config.tempo.min_bpm,
                config.tempo.max_bpm,
                config.tempo.default_bpm,
                config.ui.hold_ms,
                config.ui.standby_ms
            );
            config
        }
        Err(e) => {
            warn!("device.toml rejected: {}, using defaults", e);
            DeviceConfig::default()
        }
    }
}
