//! Minimal TOML parser for the device configuration
//!
//! Handles only the subset `device.toml` uses. Strings, arrays, floats
//! and inline tables are rejected.
//!
//! Supported features:
//! - [section] headers
//! - key = integer pairs, with `_` digit separators
//! - Comments (# ...), full-line and trailing
//!
//! Keys outside a section, unknown sections and unknown keys are errors.

use super::DeviceConfig;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Malformed or unknown section header
    InvalidSection,
    /// Key not valid in its section (or outside any section)
    UnknownKey,
    /// Line is not `key = value`
    InvalidLine,
    /// Value is not a non-negative integer
    InvalidValue,
    /// Integer does not fit the field
    OutOfRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Button,
    Led,
    Tap,
    Wiper,
    Ui,
    Tempo,
    Pot,
}

/// Parse TOML text into a DeviceConfig, starting from defaults
pub fn parse_config(input: &str) -> Result<DeviceConfig, ParseError> {
    let mut config = DeviceConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = strip_comment(line).trim();
        if line.is_empty() {
            continue;
        }

        if line.starts_with('[') {
            section = parse_section_header(line)?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidLine)?;
        apply_value(&mut config, section, key, parse_int(value)?)?;
    }

    Ok(config)
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

/// Parse "[name]"
fn parse_section_header(line: &str) -> Result<Section, ParseError> {
    let name = line
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or(ParseError::InvalidSection)?
        .trim();

    match name {
        "button" => Ok(Section::Button),
        "led" => Ok(Section::Led),
        "tap" => Ok(Section::Tap),
        "wiper" => Ok(Section::Wiper),
        "ui" => Ok(Section::Ui),
        "tempo" => Ok(Section::Tempo),
        "pot" => Ok(Section::Pot),
        _ => Err(ParseError::InvalidSection),
    }
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    let value = value.trim();
    if key.is_empty() || value.is_empty() {
        return None;
    }
    Some((key, value))
}

/// Parse a non-negative integer, allowing `_` separators
fn parse_int(value: &str) -> Result<u32, ParseError> {
    let mut result: u32 = 0;
    let mut digits = 0;
    for c in value.chars() {
        if c == '_' {
            continue;
        }
        let digit = c.to_digit(10).ok_or(ParseError::InvalidValue)?;
        result = result
            .checked_mul(10)
            .and_then(|r| r.checked_add(digit))
            .ok_or(ParseError::OutOfRange)?;
        digits += 1;
    }
    if digits == 0 {
        return Err(ParseError::InvalidValue);
    }
    Ok(result)
}

fn to_u16(value: u32) -> Result<u16, ParseError> {
    u16::try_from(value).map_err(|_| ParseError::OutOfRange)
}

fn apply_value(
    config: &mut DeviceConfig,
    section: Section,
    key: &str,
    value: u32,
) -> Result<(), ParseError> {
    match (section, key) {
        (Section::Button, "window_ms") => config.button.window_ms = value,

        (Section::Led, "slow_ms") => config.led.slow_ms = value,
        (Section::Led, "fast_ms") => config.led.fast_ms = value,
        (Section::Led, "tap_flash_ms") => config.led.tap_flash_ms = value,

        (Section::Tap, "debounce_ms") => config.tap.debounce_ms = value,
        (Section::Tap, "min_interval_ms") => config.tap.min_interval_ms = value,
        (Section::Tap, "max_interval_ms") => config.tap.max_interval_ms = value,

        (Section::Wiper, "inc_low_us") => config.wiper.inc_low_us = value,
        (Section::Wiper, "inc_high_us") => config.wiper.inc_high_us = value,
        (Section::Wiper, "deselect_us") => config.wiper.deselect_us = value,

        (Section::Ui, "hold_ms") => config.ui.hold_ms = value,
        (Section::Ui, "standby_ms") => config.ui.standby_ms = value,

        (Section::Tempo, "default_bpm") => config.tempo.default_bpm = to_u16(value)?,
        (Section::Tempo, "min_bpm") => config.tempo.min_bpm = to_u16(value)?,
        (Section::Tempo, "max_bpm") => config.tempo.max_bpm = to_u16(value)?,

        (Section::Pot, "out_max") => config.pot.out_max = to_u16(value)?,
        (Section::Pot, "hysteresis") => config.pot.hysteresis = to_u16(value)?,

        _ => return Err(ParseError::UnknownKey),
    }
    Ok(())
}
