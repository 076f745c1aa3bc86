//! Daemon configuration
//!
//! Stored as YAML in the user's config directory, default location
//! `~/.config/fader/config.yaml`. Every field has a default matching the
//! stock handheld tuning, so a missing or unparsable file just works.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// ADC sensor calibration (board-specific fudge factors)
    pub calibration: CalibrationConfig,
    /// Animation and polling cadence
    pub timing: TimingConfig,
    /// Which I2C bus/address/input the knob sits on
    pub knob: KnobConfig,
    /// How to reach the system mixer
    pub mixer: MixerConfig,
}

/// Sensor calibration section.
///
/// The floor and ceiling are empirical: the pot never quite reaches its
/// rails, so readings inside those bands snap to exact mute / exact full.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationConfig {
    /// ADC full-scale range in volts (PGA setting)
    pub full_scale_volts: f32,
    /// The divider's reference rail in volts
    pub reference_volts: f32,
    /// Readings below this count as exactly 0 V
    pub floor_volts: f32,
    /// Readings above this count as exactly the reference rail
    pub ceiling_volts: f32,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            full_scale_volts: 4.096, // gain 1 on the ADS1015
            reference_volts: 3.3,
            floor_volts: 0.01,
            ceiling_volts: 3.25,
        }
    }
}

/// Animation and polling cadence section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// How long a slide-in or slide-out takes, in ms
    pub slide_ms: u64,
    /// How long the slider stays fully shown absent new input, in ms
    pub hold_ms: u64,
    /// Loop sleep while the knob is moving or the slider is on screen, in ms
    pub active_poll_ms: u64,
    /// Loop sleep while idle, in ms
    pub idle_poll_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            slide_ms: 300,
            hold_ms: 1000,
            // The ADC conversion alone blocks ~8 ms; 12 ms leaves headroom
            // to keep the animation smooth while the dial is moving
            active_poll_ms: 12,
            idle_poll_ms: 200,
        }
    }
}

/// Knob hardware section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KnobConfig {
    /// I2C bus device path
    pub i2c_bus: String,
    /// ADS1015 slave address
    pub address: u16,
    /// Single-ended input channel (0-3)
    pub channel: u8,
}

impl Default for KnobConfig {
    fn default() -> Self {
        Self {
            i2c_bus: "/dev/i2c-1".to_string(),
            address: 0x48,
            channel: 0,
        }
    }
}

/// Mixer section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MixerConfig {
    /// Mixer binary to keep open in stdin-command mode
    pub command: String,
    /// Mixer simple-control name to set
    pub control: String,
}

impl Default for MixerConfig {
    fn default() -> Self {
        Self {
            command: "/usr/bin/amixer".to_string(),
            control: "PCM".to_string(),
        }
    }
}

/// Get the default config file path
///
/// Returns: ~/.config/fader/config.yaml
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
        .join("fader")
        .join("config.yaml")
}

/// Load configuration from a YAML file
///
/// If the file doesn't exist, returns default config.
/// If the file exists but is invalid, logs a warning and returns default config.
pub fn load_config(path: &Path) -> OverlayConfig {
    if !path.exists() {
        log::info!("load_config: no config at {:?}, using defaults", path);
        return OverlayConfig::default();
    }

    match std::fs::read_to_string(path) {
        Ok(contents) => match serde_yaml::from_str::<OverlayConfig>(&contents) {
            Ok(config) => {
                log::info!(
                    "load_config: loaded {:?} - knob on {} ch{}, control {}",
                    path,
                    config.knob.i2c_bus,
                    config.knob.channel,
                    config.mixer.control
                );
                config
            }
            Err(e) => {
                log::warn!("load_config: failed to parse config: {}, using defaults", e);
                OverlayConfig::default()
            }
        },
        Err(e) => {
            log::warn!("load_config: failed to read config file: {}, using defaults", e);
            OverlayConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = OverlayConfig::default();
        assert_eq!(config.timing.slide_ms, 300);
        assert_eq!(config.timing.hold_ms, 1000);
        assert_eq!(config.knob.address, 0x48);
        assert_eq!(config.mixer.control, "PCM");
        assert!((config.calibration.reference_volts - 3.3).abs() < f32::EPSILON);
    }

    #[test]
    fn test_yaml_roundtrip() {
        let mut config = OverlayConfig::default();
        config.calibration.ceiling_volts = 3.2;
        config.timing.hold_ms = 1500;
        config.knob.channel = 2;
        config.mixer.control = "Master".to_string();

        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: OverlayConfig = serde_yaml::from_str(&yaml).unwrap();

        assert!((parsed.calibration.ceiling_volts - 3.2).abs() < f32::EPSILON);
        assert_eq!(parsed.timing.hold_ms, 1500);
        assert_eq!(parsed.knob.channel, 2);
        assert_eq!(parsed.mixer.control, "Master");
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let parsed: OverlayConfig = serde_yaml::from_str("timing:\n  hold_ms: 2000\n").unwrap();
        assert_eq!(parsed.timing.hold_ms, 2000);
        // Untouched sections keep their defaults
        assert_eq!(parsed.timing.slide_ms, 300);
        assert_eq!(parsed.knob.address, 0x48);
    }
}
