mod types;

pub use types::*;

use crate::{Error, Result};
use std::env;
use std::path::Path;
use tracing::debug;

const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Loads configuration from `path`, else `CONFIG_PATH`, else `config.yaml`.
///
/// An explicitly named file must exist. When nothing is named and the default
/// file is absent, built-in defaults are used.
pub async fn load(path: Option<&Path>) -> Result<Config> {
    let explicit = path
        .map(|p| p.to_string_lossy().to_string())
        .or_else(|| env::var("CONFIG_PATH").ok());

    let config_path = match explicit {
        Some(path) => path,
        None => {
            if !tokio::fs::try_exists(DEFAULT_CONFIG_PATH).await? {
                debug!("No {} found, using default configuration", DEFAULT_CONFIG_PATH);
                return Ok(Config::default());
            }
            DEFAULT_CONFIG_PATH.to_string()
        }
    };

    debug!("Loading configuration from: {}", config_path);

    let config_str = tokio::fs::read_to_string(&config_path).await?;
    from_yaml_str(&config_str)
}

pub fn from_yaml_str(yaml: &str) -> Result<Config> {
    let config: Config = serde_yaml::from_str(yaml)?;

    if config.forms.is_empty() {
        return Err(Error::config("at least one form must be configured"));
    }
    if let Some(form) = config.forms.iter().find(|f| !f.endpoint.starts_with('/')) {
        return Err(Error::config(format!(
            "endpoint for form '{}' must be an absolute path, got '{}'",
            form.form_id, form.endpoint
        )));
    }

    Ok(config)
}
