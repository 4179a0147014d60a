//! CLI configuration.

use std::time::Duration;

use anyhow::{Context, Result};
use rocketshoes_cart::STORAGE_NAMESPACE;
use rocketshoes_data::{FetchPolicy, RetryPolicy, TimeoutConfig};
use serde::{Deserialize, Serialize};

/// Config file names searched for, in order.
pub const CONFIG_NAMES: [&str; 3] = ["rocketshoes.toml", ".rocketshoes.toml", "rocketshoes.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Catalog API configuration.
    #[serde(default)]
    pub api: ApiConfig,

    /// Cart storage configuration.
    #[serde(default)]
    pub storage: StorageConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        Self::parse(path, &content)
    }

    /// Parse config content, choosing the format by file extension.
    pub fn parse(path: &str, content: &str) -> Result<Self> {
        if path.ends_with(".json") {
            serde_json::from_str(content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }
}

/// Catalog API settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL serving `/stock/{id}` and `/products/{id}`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Extra attempts after a failed request.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Bearer token sent with every request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

fn default_base_url() -> String {
    "http://localhost:3333".to_string()
}

fn default_timeout_ms() -> u64 {
    5000
}

fn default_max_retries() -> u32 {
    1
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
            max_retries: default_max_retries(),
            token: None,
        }
    }
}

impl ApiConfig {
    /// Fetch policy described by this config.
    pub fn fetch_policy(&self) -> FetchPolicy {
        FetchPolicy::new(
            TimeoutConfig::from_total(Duration::from_millis(self.timeout_ms)),
            RetryPolicy::new(self.max_retries),
        )
    }
}

/// Cart storage settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Storage file, relative to the working directory unless absolute.
    #[serde(default = "default_storage_path")]
    pub path: String,

    /// Key namespace; the cart lives under `<namespace>:cart`.
    #[serde(default = "default_namespace")]
    pub namespace: String,
}

fn default_storage_path() -> String {
    ".rocketshoes/storage.json".to_string()
}

fn default_namespace() -> String {
    STORAGE_NAMESPACE.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
            namespace: default_namespace(),
        }
    }
}

/// Generate a default rocketshoes.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# RocketShoes cart configuration

[api]
base_url = "{base_url}"
timeout_ms = {timeout_ms}
max_retries = {max_retries}
# token = "..."

[storage]
path = "{path}"
namespace = "{namespace}"
"#,
        base_url = default_base_url(),
        timeout_ms = default_timeout_ms(),
        max_retries = default_max_retries(),
        path = default_storage_path(),
        namespace = default_namespace(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_config_matches_defaults() {
        let config = CliConfig::parse("rocketshoes.toml", &generate_default_config()).unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = CliConfig::parse(
            "rocketshoes.toml",
            "[api]\nbase_url = \"https://api.example.com\"\ntoken = \"abc\"\n",
        )
        .unwrap();

        assert_eq!(config.api.base_url, "https://api.example.com");
        assert_eq!(config.api.token.as_deref(), Some("abc"));
        assert_eq!(config.api.timeout_ms, 5000);
        assert_eq!(config.storage.namespace, "@RocketShoes");
    }

    #[test]
    fn test_json_config() {
        let config = CliConfig::parse(
            "rocketshoes.json",
            r#"{"storage": {"path": "/tmp/cart.json"}}"#,
        )
        .unwrap();

        assert_eq!(config.storage.path, "/tmp/cart.json");
        assert_eq!(config.api, ApiConfig::default());
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        assert!(CliConfig::parse("rocketshoes.toml", "[api\n").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rocketshoes.toml");
        std::fs::write(&path, "[api]\nmax_retries = 3\n").unwrap();

        let config = CliConfig::load(path.to_str().unwrap()).unwrap();

        assert_eq!(config.api.max_retries, 3);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(CliConfig::load("/nonexistent/rocketshoes.toml").is_err());
    }

    #[test]
    fn test_fetch_policy() {
        let api = ApiConfig {
            timeout_ms: 2000,
            max_retries: 2,
            ..ApiConfig::default()
        };
        let policy = api.fetch_policy();

        assert_eq!(policy.timeout.total, Duration::from_secs(2));
        assert_eq!(policy.retry.max_attempts, 2);
    }
}
