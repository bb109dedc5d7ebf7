//! # Configuration Module
//!
//! Handles loading and validating configuration from TOML files.
//!
//! The defaults reproduce the original gamepad profile of the ESP32 firmware:
//! UDP port 4200, a 12-bit joystick centered at 2047, tilt full scale of 90
//! degrees and a signed 16-bit output range.

use serde::Deserialize;
use serde::de::Error;
use std::fs;
use std::path::Path;

use crate::error::Result;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub device: DeviceConfig,
    #[serde(default)]
    pub stick: StickConfig,
    #[serde(default)]
    pub tilt: TiltConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub thresholds: ThresholdConfig,
}

/// UDP listener configuration
#[derive(Debug, Deserialize, Clone)]
pub struct NetworkConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

/// Virtual device configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DeviceConfig {
    #[serde(default = "default_device_name")]
    pub name: String,

    /// Device variant: "gamepad" or "keyboard"
    #[serde(default = "default_variant")]
    pub variant: String,
}

/// Joystick calibration
#[derive(Debug, Deserialize, Clone)]
pub struct StickConfig {
    /// Raw ADC value at stick rest position.
    #[serde(default = "default_center")]
    pub center: i32,

    /// Explicit scale factor. When absent, the gain is derived from the
    /// output range and center (`out_max / center`).
    #[serde(default)]
    pub gain: Option<f32>,

    #[serde(default)]
    pub invert_x: bool,

    #[serde(default)]
    pub invert_y: bool,
}

/// Tilt sensor calibration
#[derive(Debug, Deserialize, Clone)]
pub struct TiltConfig {
    /// Angle in degrees that maps to full output deflection.
    #[serde(default = "default_full_scale_deg")]
    pub full_scale_deg: f32,

    #[serde(default)]
    pub invert_pitch: bool,

    #[serde(default)]
    pub invert_roll: bool,
}

/// Destination value range for continuous axes
#[derive(Debug, Deserialize, Clone)]
pub struct OutputConfig {
    #[serde(default = "default_output_min")]
    pub min: i32,

    #[serde(default = "default_output_max")]
    pub max: i32,
}

/// Stick threshold band for the keyboard variant
#[derive(Debug, Deserialize, Clone)]
pub struct ThresholdConfig {
    /// Raw stick values strictly below this trigger one direction.
    #[serde(default = "default_threshold_low")]
    pub low: i32,

    /// Raw stick values strictly above this trigger the opposite direction.
    #[serde(default = "default_threshold_high")]
    pub high: i32,
}

// Default value functions
fn default_port() -> u16 { 4200 }
fn default_bind_address() -> String { "0.0.0.0".to_string() }

fn default_device_name() -> String { "ESP32 Motion Controller".to_string() }
fn default_variant() -> String { "gamepad".to_string() }

fn default_center() -> i32 { 2047 }

fn default_full_scale_deg() -> f32 { 90.0 }

fn default_output_min() -> i32 { -32768 }
fn default_output_max() -> i32 { 32767 }

fn default_threshold_low() -> i32 { 1000 }
fn default_threshold_high() -> i32 { 3000 }

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            bind_address: default_bind_address(),
        }
    }
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            name: default_device_name(),
            variant: default_variant(),
        }
    }
}

impl Default for StickConfig {
    fn default() -> Self {
        Self {
            center: default_center(),
            gain: None,
            invert_x: false,
            invert_y: false,
        }
    }
}

impl Default for TiltConfig {
    fn default() -> Self {
        Self {
            full_scale_deg: default_full_scale_deg(),
            invert_pitch: false,
            invert_roll: false,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            min: default_output_min(),
            max: default_output_max(),
        }
    }
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            low: default_threshold_low(),
            high: default_threshold_high(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            network: NetworkConfig::default(),
            device: DeviceConfig::default(),
            stick: StickConfig::default(),
            tilt: TiltConfig::default(),
            output: OutputConfig::default(),
            thresholds: ThresholdConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - TOML parsing fails
    /// - Validation fails
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use motion_bridge::config::Config;
    ///
    /// let config = Config::load("config/default.toml")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns error if any configuration value is out of valid range
    fn validate(&self) -> Result<()> {
        if self.device.name.is_empty() {
            return Err(crate::error::MotionBridgeError::Config(
                toml::de::Error::custom("device name cannot be empty")
            ));
        }

        if !["gamepad", "keyboard"].contains(&self.device.variant.as_str()) {
            return Err(crate::error::MotionBridgeError::Config(
                toml::de::Error::custom("device variant must be 'gamepad' or 'keyboard'")
            ));
        }

        if self.stick.center < 1 {
            return Err(crate::error::MotionBridgeError::Config(
                toml::de::Error::custom("stick center must be at least 1")
            ));
        }

        if let Some(gain) = self.stick.gain {
            if !gain.is_finite() || gain == 0.0 {
                return Err(crate::error::MotionBridgeError::Config(
                    toml::de::Error::custom("stick gain must be finite and non-zero")
                ));
            }
        }

        if !self.tilt.full_scale_deg.is_finite() || self.tilt.full_scale_deg <= 0.0 {
            return Err(crate::error::MotionBridgeError::Config(
                toml::de::Error::custom("tilt full_scale_deg must be greater than 0")
            ));
        }

        if self.output.min >= self.output.max {
            return Err(crate::error::MotionBridgeError::Config(
                toml::de::Error::custom("output min must be less than output max")
            ));
        }

        if self.thresholds.low >= self.thresholds.high {
            return Err(crate::error::MotionBridgeError::Config(
                toml::de::Error::custom("threshold low must be less than threshold high")
            ));
        }

        Ok(())
    }
}
