//! Configuration management

use crate::core::{Error, RateSettings, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "appliance-cost";

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub rates: RateConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

impl Config {
    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))?;

        Ok(config_dir.join(APP_DIR).join("config.toml"))
    }

    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`, writing defaults there if it does not exist yet
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::info!("No configuration at {}, writing defaults", path.display());
            let config = Self::default();
            config.save_to(path)?;
            return Ok(config);
        }

        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;

        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Serialization(e.to_string()))?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Database file: the configured path or `<data_dir>/appliance-cost/session.db`
    pub fn database_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.storage.database_path {
            return Ok(path.clone());
        }
        let data_dir = dirs::data_dir()
            .ok_or_else(|| Error::Config("Could not determine data directory".to_string()))?;
        Ok(data_dir.join(APP_DIR).join("session.db"))
    }

    fn validate(&self) -> Result<()> {
        if self.rates.peak_rate.is_sign_negative() || self.rates.offpeak_rate.is_sign_negative() {
            return Err(Error::Config("Rates cannot be negative".to_string()));
        }
        Ok(())
    }
}

/// General application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Language: "auto", "en", "fr"
    #[serde(default = "default_language")]
    pub language: String,
    /// Symbol printed in front of amounts
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

fn default_language() -> String { "auto".to_string() }
fn default_currency_symbol() -> String { "\u{00A3}".to_string() } // Pound sign

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            currency_symbol: default_currency_symbol(),
        }
    }
}

/// Rates a fresh session starts with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateConfig {
    /// Peak rate per kWh
    #[serde(default = "default_peak_rate")]
    pub peak_rate: Decimal,
    /// Off-peak rate per kWh
    #[serde(default = "default_offpeak_rate")]
    pub offpeak_rate: Decimal,
}

fn default_peak_rate() -> Decimal { RateSettings::default().peak }
fn default_offpeak_rate() -> Decimal { RateSettings::default().off_peak }

impl Default for RateConfig {
    fn default() -> Self {
        Self {
            peak_rate: default_peak_rate(),
            offpeak_rate: default_offpeak_rate(),
        }
    }
}

impl RateConfig {
    pub fn to_settings(&self) -> RateSettings {
        RateSettings::new(self.peak_rate, self.offpeak_rate)
    }
}

/// Where the session is persisted
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub database_path: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config, Config::default());
        assert!(path.exists());

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[rates]\npeak_rate = \"0.30\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.rates.peak_rate, Decimal::new(30, 2));
        assert_eq!(config.rates.offpeak_rate, Decimal::new(7, 2));
        assert_eq!(config.general.language, "auto");
        assert_eq!(config.general.currency_symbol, "\u{00A3}");
        assert!(config.storage.database_path.is_none());
    }

    #[test]
    fn test_negative_rate_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[rates]\noffpeak_rate = \"-0.01\"\n").unwrap();

        assert!(matches!(Config::load_from(&path), Err(Error::Config(_))));
    }

    #[test]
    fn test_configured_database_path() {
        let mut config = Config::default();
        config.storage.database_path = Some(PathBuf::from("/tmp/devices.db"));
        assert_eq!(config.database_path().unwrap(), PathBuf::from("/tmp/devices.db"));
    }
}
