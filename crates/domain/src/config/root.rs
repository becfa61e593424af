use serde::{Deserialize, Serialize};

use super::errors::ConfigError;
use super::ftl::FtlConfig;
use super::logging::LoggingConfig;
use super::server::ServerConfig;

const LOCAL_CONFIG_PATH: &str = "pihole-collector.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/pihole-collector/config.toml";

/// Main configuration structure for the collector
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// FTL query API endpoint and poll timeouts
    #[serde(default)]
    pub ftl: FtlConfig,

    /// Metrics HTTP server
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. pihole-collector.toml in current directory
    /// 3. /etc/pihole-collector/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match path.map(str::to_string).or_else(Self::get_config_path) {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply command-line overrides to configuration
    pub fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(host) = overrides.ftl_host {
            self.ftl.host = host;
        }
        if let Some(port) = overrides.ftl_port {
            self.ftl.port = port;
        }
        if let Some(port) = overrides.web_port {
            self.server.web_port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ftl.host.trim().is_empty() {
            return Err(ConfigError::Validation("host cannot be empty".to_string()));
        }

        if self.ftl.port == 0 {
            return Err(ConfigError::Validation("FTL port cannot be 0".to_string()));
        }

        if self.server.web_port == 0 {
            return Err(ConfigError::Validation("Web port cannot be 0".to_string()));
        }

        if self.ftl.idle_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "FTL idle timeout must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Get the path to the configuration file being used
    pub fn get_config_path() -> Option<String> {
        [LOCAL_CONFIG_PATH, SYSTEM_CONFIG_PATH]
            .into_iter()
            .find(|p| std::path::Path::new(p).exists())
            .map(str::to_string)
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub ftl_host: Option<String>,
    pub ftl_port: Option<u16>,
    pub web_port: Option<u16>,
    pub bind_address: Option<String>,
    pub log_level: Option<String>,
}
