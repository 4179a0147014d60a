//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use rocketshoes_cache::Cache;
use rocketshoes_cart::{CartStore, HttpCatalog, Notifier};
use rocketshoes_data::FetchClient;
use tracing::debug;

use crate::config::{CliConfig, CONFIG_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// File the configuration came from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            (CliConfig::load(path)?, Some(PathBuf::from(path)))
        } else {
            // Try to find config in current directory or parent directories
            match Self::find_config(&cwd) {
                Some((config, path)) => (config, Some(path)),
                None => (CliConfig::default(), None),
            }
        };

        match config_path {
            Some(ref path) => debug!(path = %path.display(), "config loaded"),
            None => debug!("no config file found, using defaults"),
        }

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(CliConfig, PathBuf)> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = CliConfig::load(config_path.to_str()?) {
                        return Some((config, config_path));
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if PathBuf::from(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }

    /// Path of the cart storage file.
    pub fn storage_path(&self) -> PathBuf {
        self.resolve_path(&self.config.storage.path)
    }

    /// HTTP client for the catalog API.
    pub fn fetch_client(&self) -> Result<FetchClient> {
        let api = &self.config.api;
        let mut client = FetchClient::new()
            .with_base_url(&api.base_url)
            .with_default_header("Accept", "application/json")
            .with_policy(api.fetch_policy())
            .context("Failed to build HTTP client")?;

        if let Some(ref token) = api.token {
            client = client.with_default_header("Authorization", format!("Bearer {}", token));
        }

        Ok(client)
    }

    /// Open the cart, restoring it from storage.
    pub fn cart_store(&self, notifier: Arc<dyn Notifier>) -> Result<CartStore> {
        let catalog = HttpCatalog::new(self.fetch_client()?);
        let cache = Cache::open(self.storage_path());

        let store = CartStore::builder(Arc::new(catalog), cache)
            .namespace(&self.config.storage.namespace)
            .notifier(notifier)
            .build();

        debug!(
            path = %self.storage_path().display(),
            key = store.storage_key(),
            "cart storage opened"
        );

        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_config_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(".rocketshoes.toml"),
            "[storage]\nnamespace = \"@Walk\"\n",
        )
        .unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let (config, path) = Context::find_config(&nested).unwrap();

        assert_eq!(config.storage.namespace, "@Walk");
        assert_eq!(path, dir.path().join(".rocketshoes.toml"));
    }

    #[test]
    fn test_resolve_path() {
        let ctx = Context {
            config: CliConfig::default(),
            config_path: None,
            output: Output::new(true),
            cwd: PathBuf::from("/work"),
        };

        assert_eq!(
            ctx.storage_path(),
            PathBuf::from("/work/.rocketshoes/storage.json")
        );
        assert_eq!(ctx.resolve_path("/abs/cart.json"), PathBuf::from("/abs/cart.json"));
    }
}
