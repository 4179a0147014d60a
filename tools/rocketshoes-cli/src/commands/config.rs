//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CliConfig, CONFIG_NAMES};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx).await,
        ConfigCommand::Init { force } => init_config(force, ctx).await,
        ConfigCommand::Validate => validate_config(ctx).await,
    }
}

async fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match ctx.config_path {
        Some(ref path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    ctx.output.info("[api]");
    ctx.output.kv("base_url", &ctx.config.api.base_url);
    ctx.output.kv("timeout_ms", &ctx.config.api.timeout_ms.to_string());
    ctx.output.kv("max_retries", &ctx.config.api.max_retries.to_string());
    if ctx.config.api.token.is_some() {
        ctx.output.kv("token", "********");
    }

    ctx.output.info("[storage]");
    ctx.output.kv("path", &ctx.storage_path().display().to_string());
    ctx.output.kv("namespace", &ctx.config.storage.namespace);

    Ok(())
}

async fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

async fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let (errors, warnings) = check_config(&ctx.config);

    if errors.is_empty() && warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}

/// Collect configuration errors and warnings.
fn check_config(config: &CliConfig) -> (Vec<String>, Vec<String>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let base_url = &config.api.base_url;
    if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        errors.push(format!("api.base_url '{}' must be an http(s) URL", base_url));
    }

    if config.api.timeout_ms == 0 {
        errors.push("api.timeout_ms must be greater than 0".to_string());
    } else if config.api.timeout_ms > 60_000 {
        warnings.push(format!(
            "api.timeout_ms {} is unusually long",
            config.api.timeout_ms
        ));
    }

    if config.api.max_retries > 5 {
        warnings.push(format!(
            "api.max_retries {} may delay every failed operation",
            config.api.max_retries
        ));
    }

    if config.storage.path.trim().is_empty() {
        errors.push("storage.path is required".to_string());
    }

    if config.storage.namespace.is_empty() {
        errors.push("storage.namespace is required".to_string());
    } else if config.storage.namespace.contains(':') {
        warnings.push(format!(
            "storage.namespace '{}' contains ':'",
            config.storage.namespace
        ));
    }

    (errors, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let (errors, warnings) = check_config(&CliConfig::default());
        assert!(errors.is_empty(), "{:?}", errors);
        assert!(warnings.is_empty(), "{:?}", warnings);
    }

    #[test]
    fn test_invalid_config() {
        let mut config = CliConfig::default();
        config.api.base_url = "localhost:3333".to_string();
        config.api.timeout_ms = 0;
        config.storage.namespace.clear();

        let (errors, _) = check_config(&config);
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_warnings() {
        let mut config = CliConfig::default();
        config.api.max_retries = 10;

        let (errors, warnings) = check_config(&config);
        assert!(errors.is_empty());
        assert_eq!(warnings.len(), 1);
    }
}
