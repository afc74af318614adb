/*
[INPUT]:  Optional YAML config files and process environment
[OUTPUT]: Parsed AppConfig handed to client/session constructors
[POS]:    Configuration layer - credentials, endpoints, timeouts, logging
[UPDATE]: When adding new configuration options
*/

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use binance_trade_adapter::ws::DEFAULT_STREAM_URL;
use binance_trade_adapter::{ClientConfig, SessionConfig};

/// File name looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "binance-trade";

/// Top-level configuration for the trading CLI
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// API key sent as `X-MBX-APIKEY`
    #[serde(default)]
    pub api_key: String,
    /// HMAC secret; validated by the client constructor
    #[serde(default, skip_serializing)]
    pub api_secret: String,
    /// REST origin
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-call timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// WebSocket origin for ticker streams
    #[serde(default = "default_stream_url")]
    pub stream_url: String,
    /// Seconds to wait for the stream task after the stop signal
    #[serde(default = "default_stream_grace_period")]
    pub stream_grace_period: u64,
    /// `tracing` filter directive, e.g. "info" or "binance_trade_adapter=debug"
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Directory for rolling log files; `None` keeps logs on stderr only
    #[serde(default = "default_log_dir")]
    pub log_dir: Option<PathBuf>,
}

fn default_base_url() -> String {
    binance_trade_adapter::http::client::DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_stream_url() -> String {
    DEFAULT_STREAM_URL.to_string()
}

fn default_stream_grace_period() -> u64 {
    5
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("binance-trade").join("logs"))
}

/// Un-prefixed variables (`API_KEY`, `TIMEOUT`, ...) kept as strings;
/// numeric fields are parsed during deserialization.
pub(crate) fn env_source() -> Environment {
    Environment::default()
}

impl AppConfig {
    /// Load from user config dir, then `./binance-trade.yaml`, then environment
    pub fn load() -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(dir) = dirs::config_dir() {
            let path = dir.join("binance-trade").join("config.yaml");
            builder = builder.add_source(File::from(path).required(false));
        }
        let config = builder
            .add_source(File::with_name(LOCAL_CONFIG_FILE).required(false))
            .add_source(env_source())
            .build()
            .context("read configuration sources")?;

        Self::from_config(config)
    }

    pub(crate) fn from_config(config: Config) -> Result<Self> {
        config
            .try_deserialize()
            .context("deserialize configuration")
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.clone(),
            timeout: Duration::from_secs(self.timeout),
            ..ClientConfig::default()
        }
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            grace_period: Duration::from_secs(self.stream_grace_period),
            ..SessionConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn from_yaml(yaml: &str) -> AppConfig {
        let config = Config::builder()
            .add_source(File::from_str(yaml, FileFormat::Yaml))
            .build()
            .unwrap();
        AppConfig::from_config(config).unwrap()
    }

    #[test]
    fn test_defaults_applied() {
        let config = from_yaml("api_key: key\napi_secret: secret\n");
        assert_eq!(config.api_key, "key");
        assert_eq!(config.base_url, "https://api.binance.com");
        assert_eq!(config.timeout, 10);
        assert_eq!(config.stream_url, "wss://stream.binance.com:9443");
        assert_eq!(config.session_config().grace_period, Duration::from_secs(5));
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_overrides_flow_into_component_configs() {
        let config = from_yaml(
            "api_key: key\napi_secret: secret\nbase_url: https://testnet.binance.vision\ntimeout: 3\nstream_grace_period: 1\n",
        );
        let client = config.client_config();
        assert_eq!(client.base_url, "https://testnet.binance.vision");
        assert_eq!(client.timeout, Duration::from_secs(3));
        assert_eq!(config.session_config().grace_period, Duration::from_secs(1));
    }

    #[test]
    fn test_missing_credentials_default_to_empty() {
        let config = from_yaml("timeout: 4\n");
        assert!(config.api_key.is_empty());
        assert!(config.api_secret.is_empty());
    }

    #[test]
    fn test_env_values_keep_their_text() {
        let vars: config::Map<String, String> = [
            ("API_KEY", "00123"),
            ("API_SECRET", "0123456789"),
            ("TIMEOUT", "7"),
            ("STREAM_GRACE_PERIOD", "2"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let config = Config::builder()
            .add_source(env_source().source(Some(vars)))
            .build()
            .unwrap();
        let config = AppConfig::from_config(config).unwrap();

        assert_eq!(config.api_key, "00123");
        assert_eq!(config.api_secret, "0123456789");
        assert_eq!(config.timeout, 7);
        assert_eq!(config.session_config().grace_period, Duration::from_secs(2));
    }

    #[test]
    fn test_secret_not_serialized() {
        let config = from_yaml("api_key: key\napi_secret: hunter2\n");
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("hunter2"));
    }
}
