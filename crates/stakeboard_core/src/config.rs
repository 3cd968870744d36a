//! Runtime configuration from the process environment.
//!
//! # Responsibility
//! - Resolve database path, logging and LCD settings from `STAKEBOARD_*`
//!   variables.
//!
//! # Invariants
//! - Unset or blank variables fall back to defaults.
//! - Set but malformed variables are errors, never silently ignored.
//! - The chain table itself is compiled in; only LCD endpoints are
//!   overridable (`STAKEBOARD_LCD_URL_<CHAIN>`).

use crate::chain::ChainKey;
use crate::lcd::DEFAULT_LCD_TIMEOUT;
use crate::logging::default_log_level;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::time::Duration;

pub const ENV_DB_PATH: &str = "STAKEBOARD_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "STAKEBOARD_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "STAKEBOARD_LOG_DIR";
pub const ENV_LCD_TIMEOUT_SECS: &str = "STAKEBOARD_LCD_TIMEOUT_SECS";
pub const ENV_LCD_URL_PREFIX: &str = "STAKEBOARD_LCD_URL_";

pub const DEFAULT_DB_FILE: &str = "stakeboard.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidTimeout(String),
    InvalidLcdUrl { chain: ChainKey, value: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTimeout(value) => write!(
                f,
                "{ENV_LCD_TIMEOUT_SECS} must be a positive number of seconds, got `{value}`"
            ),
            Self::InvalidLcdUrl { chain, value } => write!(
                f,
                "LCD override for {chain} must be an http(s) URL, got `{value}`"
            ),
        }
    }
}

impl Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StakeboardConfig {
    pub db_path: PathBuf,
    pub log_level: String,
    /// File logging is off when unset.
    pub log_dir: Option<PathBuf>,
    pub lcd_timeout: Duration,
    pub lcd_overrides: BTreeMap<ChainKey, String>,
}

impl Default for StakeboardConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_FILE),
            log_level: default_log_level().to_string(),
            log_dir: None,
            lcd_timeout: DEFAULT_LCD_TIMEOUT,
            lcd_overrides: BTreeMap::new(),
        }
    }
}

impl StakeboardConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();
        if let Some(path) = read(ENV_DB_PATH) {
            config.db_path = PathBuf::from(path);
        }
        if let Some(level) = read(ENV_LOG_LEVEL) {
            config.log_level = level;
        }
        config.log_dir = read(ENV_LOG_DIR).map(PathBuf::from);

        if let Some(raw) = read(ENV_LCD_TIMEOUT_SECS) {
            config.lcd_timeout = match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => return Err(ConfigError::InvalidTimeout(raw)),
            };
        }

        for chain in ChainKey::ALL {
            let key = format!("{ENV_LCD_URL_PREFIX}{}", chain.env_suffix());
            if let Some(url) = read(&key) {
                config.set_lcd_override(chain, &url)?;
            }
        }
        Ok(config)
    }

    /// Points `chain` at another LCD endpoint.
    pub fn set_lcd_override(&mut self, chain: ChainKey, url: &str) -> Result<(), ConfigError> {
        let url = url.trim();
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(ConfigError::InvalidLcdUrl {
                chain,
                value: url.to_string(),
            });
        }
        self.lcd_overrides
            .insert(chain, url.trim_end_matches('/').to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, StakeboardConfig, DEFAULT_DB_FILE};
    use crate::chain::ChainKey;
    use crate::lcd::DEFAULT_LCD_TIMEOUT;
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::time::Duration;

    fn config_from(pairs: &[(&str, &str)]) -> Result<StakeboardConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        StakeboardConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn empty_environment_yields_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.db_path, PathBuf::from(DEFAULT_DB_FILE));
        assert_eq!(config.lcd_timeout, DEFAULT_LCD_TIMEOUT);
        assert!(config.log_dir.is_none());
        assert!(config.lcd_overrides.is_empty());
    }

    #[test]
    fn reads_values_and_chain_overrides() {
        let config = config_from(&[
            ("STAKEBOARD_DB_PATH", "/var/lib/stakeboard/db.sqlite3"),
            ("STAKEBOARD_LOG_DIR", " /var/log/stakeboard "),
            ("STAKEBOARD_LCD_TIMEOUT_SECS", "30"),
            ("STAKEBOARD_LCD_URL_CRYPTO_ORG", "https://rest.example.org/"),
            ("STAKEBOARD_LCD_URL_JUNO", "  "),
        ])
        .unwrap();

        assert_eq!(config.db_path, PathBuf::from("/var/lib/stakeboard/db.sqlite3"));
        assert_eq!(config.log_dir, Some(PathBuf::from("/var/log/stakeboard")));
        assert_eq!(config.lcd_timeout, Duration::from_secs(30));
        assert_eq!(
            config.lcd_overrides.get(&ChainKey::CryptoOrg).map(String::as_str),
            Some("https://rest.example.org")
        );
        assert!(!config.lcd_overrides.contains_key(&ChainKey::Juno));
    }

    #[test]
    fn malformed_values_are_rejected() {
        assert_eq!(
            config_from(&[("STAKEBOARD_LCD_TIMEOUT_SECS", "0")]).unwrap_err(),
            ConfigError::InvalidTimeout("0".to_string())
        );
        assert!(matches!(
            config_from(&[("STAKEBOARD_LCD_URL_COSMOS", "ftp://node")]).unwrap_err(),
            ConfigError::InvalidLcdUrl { chain: ChainKey::Cosmos, .. }
        ));
    }
}
