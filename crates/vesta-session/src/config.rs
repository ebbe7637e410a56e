//! # Session Configuration
//!
//! Configuration management for the POS session.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     VESTA_SALES_PROFILE=credit                                         │
//! │     VESTA_STORE_ID=store-001                                           │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/vesta-pos/pos.toml (Linux)                               │
//! │     ~/Library/Application Support/com.vesta.pos/pos.toml (macOS)       │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     cash profile, 10% overpayment tolerance, 300/100ms stepper         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # pos.toml
//! [store]
//! id = "store-001"
//! name = "Downtown Branch"
//!
//! [sales]
//! profile = "cash"   # cash | credit
//! overpayment_tolerance_bps = 1000
//!
//! [stepper]
//! arm_delay_ms = 300
//! repeat_interval_ms = 100
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

use vesta_core::types::SalesProfile;

// =============================================================================
// Config Error
// =============================================================================

/// Configuration loading/saving failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Result type for config operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Store Configuration
// =============================================================================

/// Configuration for the store this terminal belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Unique store identifier.
    pub id: String,

    /// Human-readable store name (shown on receipts).
    #[serde(default)]
    pub name: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            id: "default-store".to_string(),
            name: "Default Store".to_string(),
        }
    }
}

// =============================================================================
// Sales Settings
// =============================================================================

/// Sales behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesSettings {
    /// Cash sales collect payment before submission; credit sales invoice.
    #[serde(default)]
    pub profile: SalesProfile,

    /// Overpayment tolerance in basis points (1000 = 10%).
    #[serde(default = "default_tolerance_bps")]
    pub overpayment_tolerance_bps: u32,
}

fn default_tolerance_bps() -> u32 {
    vesta_core::OVERPAYMENT_TOLERANCE_BPS
}

impl Default for SalesSettings {
    fn default() -> Self {
        SalesSettings {
            profile: SalesProfile::default(),
            overpayment_tolerance_bps: default_tolerance_bps(),
        }
    }
}

// =============================================================================
// Stepper Settings
// =============================================================================

/// Hold-to-repeat timings for the quantity stepper controls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepperSettings {
    /// Delay before repeats start (milliseconds).
    #[serde(default = "default_arm_delay_ms")]
    pub arm_delay_ms: u64,

    /// Interval between repeats while held (milliseconds).
    #[serde(default = "default_repeat_interval_ms")]
    pub repeat_interval_ms: u64,
}

fn default_arm_delay_ms() -> u64 {
    300
}

fn default_repeat_interval_ms() -> u64 {
    100
}

impl Default for StepperSettings {
    fn default() -> Self {
        StepperSettings {
            arm_delay_ms: default_arm_delay_ms(),
            repeat_interval_ms: default_repeat_interval_ms(),
        }
    }
}

impl StepperSettings {
    /// Arm delay as a Duration.
    pub fn arm_delay(&self) -> Duration {
        Duration::from_millis(self.arm_delay_ms)
    }

    /// Repeat interval as a Duration.
    pub fn repeat_interval(&self) -> Duration {
        Duration::from_millis(self.repeat_interval_ms)
    }
}

// =============================================================================
// Main Session Configuration
// =============================================================================

/// Complete session configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PosConfig {
    /// Store configuration.
    #[serde(default)]
    pub store: StoreConfig,

    /// Sales behavior settings.
    #[serde(default)]
    pub sales: SalesSettings,

    /// Stepper timings.
    #[serde(default)]
    pub stepper: StepperSettings,
}

impl PosConfig {
    /// Creates a config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (pos.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading POS config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load POS config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> ConfigResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| ConfigError::Invalid("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "POS config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.store.id.is_empty() {
            return Err(ConfigError::Invalid("store.id must not be empty".into()));
        }

        if self.sales.overpayment_tolerance_bps > 10000 {
            return Err(ConfigError::Invalid(
                "sales.overpayment_tolerance_bps must be at most 10000".into(),
            ));
        }

        if self.stepper.repeat_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "stepper.repeat_interval_ms must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(profile) = std::env::var("VESTA_SALES_PROFILE") {
            match profile.parse() {
                Ok(parsed) => {
                    debug!(profile = %profile, "Overriding sales profile from environment");
                    self.sales.profile = parsed;
                }
                Err(e) => warn!("Ignoring VESTA_SALES_PROFILE: {}", e),
            }
        }

        if let Ok(id) = std::env::var("VESTA_STORE_ID") {
            self.store.id = id;
        }

        if let Ok(name) = std::env::var("VESTA_STORE_NAME") {
            self.store.name = name;
        }

        if let Ok(bps) = std::env::var("VESTA_OVERPAYMENT_TOLERANCE_BPS") {
            if let Ok(parsed) = bps.parse::<u32>() {
                debug!(bps = parsed, "Overriding overpayment tolerance from environment");
                self.sales.overpayment_tolerance_bps = parsed;
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "vesta", "pos").map(|dirs| {
            let config_dir = dirs.config_dir();
            config_dir.join("pos.toml")
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PosConfig::default();
        assert_eq!(config.sales.profile, SalesProfile::Cash);
        assert_eq!(config.sales.overpayment_tolerance_bps, 1000);
        assert_eq!(config.stepper.arm_delay_ms, 300);
        assert_eq!(config.stepper.repeat_interval_ms, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = PosConfig::default();

        config.store.id = String::new();
        assert!(config.validate().is_err());

        config.store.id = "store-001".to_string();
        config.sales.overpayment_tolerance_bps = 20000;
        assert!(config.validate().is_err());

        config.sales.overpayment_tolerance_bps = 1000;
        config.stepper.repeat_interval_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = PosConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[store]"));
        assert!(toml_str.contains("[sales]"));
        assert!(toml_str.contains("[stepper]"));

        let parsed: PosConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.sales.profile, config.sales.profile);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let parsed: PosConfig = toml::from_str("[sales]\nprofile = \"credit\"\n").unwrap();
        assert_eq!(parsed.sales.profile, SalesProfile::Credit);
        assert_eq!(parsed.sales.overpayment_tolerance_bps, 1000);
        assert_eq!(parsed.store.id, "default-store");
    }

    #[test]
    fn test_stepper_durations() {
        let settings = StepperSettings::default();
        assert_eq!(settings.arm_delay(), Duration::from_millis(300));
        assert_eq!(settings.repeat_interval(), Duration::from_millis(100));
    }
}
