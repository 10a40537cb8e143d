//! Config file loader.
//!
//! The helpdesk runs without any config file. When one is named, it is read
//! as TOML into [`HelpdeskConfig`]; a file that is missing or fails to parse
//! is logged and replaced by the defaults.

use std::path::Path;

use helpdesk_types::config::HelpdeskConfig;

/// Load the config file at `path`, or the defaults when `path` is `None`.
pub async fn load_config(path: Option<&Path>) -> HelpdeskConfig {
    let Some(path) = path else {
        return HelpdeskConfig::default();
    };

    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!("Config file {} not found, using defaults", path.display());
            return HelpdeskConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", path.display());
            return HelpdeskConfig::default();
        }
    };

    match toml::from_str::<HelpdeskConfig>(&content) {
        Ok(config) => {
            tracing::debug!("Loaded config from {}", path.display());
            config
        }
        Err(err) => {
            tracing::warn!("Failed to parse {}: {err}, using defaults", path.display());
            HelpdeskConfig::default()
        }
    }
}
