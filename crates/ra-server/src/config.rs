use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use ra_telemetry::TruncationLimits;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Service name stamped on exported spans and trace annotations.
    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// Total attributes budget before truncation kicks in.
    #[serde(default = "default_max_total_bytes")]
    pub max_total_bytes: usize,

    /// Per-attribute budget for individual string values.
    #[serde(default = "default_max_attribute_bytes")]
    pub max_attribute_bytes: usize,

    /// Also log every exported span entry at debug level.
    #[serde(default)]
    pub debug: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: default_service_name(),
            max_total_bytes: default_max_total_bytes(),
            max_attribute_bytes: default_max_attribute_bytes(),
            debug: false,
        }
    }
}

impl TelemetryConfig {
    pub fn limits(&self) -> TruncationLimits {
        TruncationLimits {
            max_total_bytes: self.max_total_bytes,
            max_attribute_bytes: self.max_attribute_bytes,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_service_name() -> String {
    "researcher-agent".to_string()
}

fn default_max_total_bytes() -> usize {
    200 * 1024
}

fn default_max_attribute_bytes() -> usize {
    10 * 1024
}

impl Config {
    /// Load configuration: defaults, then the TOML file (if present), then
    /// `RA_`-prefixed environment variables (`RA_SERVER__PORT=9090`).
    /// A missing file is not an error; the service boots on defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));

        let path = match path {
            Some(p) => Some(p.to_path_buf()),
            None => Self::default_config_path(),
        };
        if let Some(p) = path.filter(|p| p.exists()) {
            figment = figment.merge(Toml::file(p));
        }

        figment
            .merge(Env::prefixed("RA_").split("__"))
            .extract()
            .context("failed to load configuration")
    }

    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("researcher-agent").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_boot_without_a_file() {
        let config = Config::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.telemetry.service_name, "researcher-agent");
        assert_eq!(config.telemetry.max_total_bytes, 200 * 1024);
        assert_eq!(config.telemetry.max_attribute_bytes, 10 * 1024);
    }

    #[test]
    fn test_partial_file_fills_in_defaults() {
        let config: Config = toml::from_str(
            r#"
            [server]
            port = 9090

            [telemetry]
            service_name = "staging-researcher"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.telemetry.service_name, "staging-researcher");
        assert_eq!(config.telemetry.max_attribute_bytes, 10 * 1024);
    }

    #[test]
    fn test_limits_mirror_telemetry_config() {
        let telemetry = TelemetryConfig {
            max_total_bytes: 1024,
            max_attribute_bytes: 256,
            ..TelemetryConfig::default()
        };
        let limits = telemetry.limits();
        assert_eq!(limits.max_total_bytes, 1024);
        assert_eq!(limits.max_attribute_bytes, 256);
    }
}
