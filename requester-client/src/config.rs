// requester-client/src/config.rs
use anyhow::{anyhow, bail, Result};
use directories::BaseDirs;
use requester_core::TransportConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const TIMEOUT_ENV: &str = "HTTP_REQUESTER_TIMEOUT_SECS";
const LOG_ENV: &str = "HTTP_REQUESTER_LOG";
const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub transport: TransportSection,
    #[serde(default)]
    pub log: LogSection,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct TransportSection {
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_timeout_secs")]
    pub resource_timeout_secs: u64,
}

impl Default for TransportSection {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_timeout_secs(),
            resource_timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    20
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct LogSection {
    /// Default filter for diagnostics (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load from the user config directory, writing defaults on first use.
    /// Environment variables override file values.
    pub fn load() -> Result<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)?;
        }

        let config_path = config_dir.join("config.toml");

        let mut config = if config_path.exists() {
            Self::from_toml_str(&fs::read_to_string(&config_path)?)?
        } else {
            let default = Self::default();
            default.save_to(&config_path)?;
            default
        };

        config.apply_overrides(
            std::env::var(TIMEOUT_ENV).ok().as_deref(),
            std::env::var(LOG_ENV).ok().as_deref(),
        )?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn save_to(&self, config_path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(config_path, content)?;

        // Set permissions to 600 (owner read/write only)
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(config_path)?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(config_path, perms)?;
        }

        Ok(())
    }

    fn config_dir() -> Result<PathBuf> {
        let base_dirs =
            BaseDirs::new().ok_or_else(|| anyhow!("Cannot determine config directory"))?;
        Ok(base_dirs.config_dir().join("http-requester"))
    }

    fn apply_overrides(&mut self, timeout: Option<&str>, log: Option<&str>) -> Result<()> {
        if let Some(raw) = timeout {
            let secs: u64 = raw
                .trim()
                .parse()
                .map_err(|e| anyhow!("{} must be a number of seconds: {}", TIMEOUT_ENV, e))?;
            self.transport.request_timeout_secs = secs;
            self.transport.resource_timeout_secs = secs;
        }
        if let Some(level) = log {
            self.log.level = level.trim().to_lowercase();
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.transport.request_timeout_secs == 0 || self.transport.resource_timeout_secs == 0 {
            bail!("timeouts must be at least one second");
        }
        if !LOG_LEVELS.contains(&self.log.level.as_str()) {
            bail!(
                "unknown log level {:?}, expected one of {}",
                self.log.level,
                LOG_LEVELS.join(", ")
            );
        }
        Ok(())
    }

    pub fn transport_config(&self) -> TransportConfig {
        TransportConfig {
            request_timeout: Duration::from_secs(self.transport.request_timeout_secs),
            resource_timeout: Duration::from_secs(self.transport.resource_timeout_secs),
        }
    }

    pub fn log_level(&self) -> &str {
        &self.log.level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_fixed_timeouts() {
        let config = Config::default();
        let transport = config.transport_config();
        assert_eq!(transport.request_timeout, Duration::from_secs(20));
        assert_eq!(transport.resource_timeout, Duration::from_secs(20));
        assert_eq!(config.log_level(), "info");
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config = Config::from_toml_str("[transport]\nresource_timeout_secs = 60\n").unwrap();
        assert_eq!(config.transport.request_timeout_secs, 20);
        assert_eq!(config.transport.resource_timeout_secs, 60);
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(Config::from_toml_str("").unwrap(), Config::default());
    }

    #[test]
    fn test_rejects_zero_timeout_and_unknown_level() {
        assert!(Config::from_toml_str("[transport]\nrequest_timeout_secs = 0\n").is_err());
        assert!(Config::from_toml_str("[log]\nlevel = \"loud\"\n").is_err());
    }

    #[test]
    fn test_overrides_apply_to_both_timeouts() {
        let mut config = Config::default();
        config.apply_overrides(Some("5"), Some("DEBUG")).unwrap();
        assert_eq!(config.transport.request_timeout_secs, 5);
        assert_eq!(config.transport.resource_timeout_secs, 5);
        assert_eq!(config.log.level, "debug");
        assert!(config.apply_overrides(Some("soon"), None).is_err());
    }

    #[test]
    fn test_serialized_config_parses_back() {
        let config = Config::default();
        let text = toml::to_string_pretty(&config).unwrap();
        assert_eq!(Config::from_toml_str(&text).unwrap(), config);
    }
}
