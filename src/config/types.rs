use crate::submit::SubmitOptions;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logs: LogsConfig,
    #[serde(default)]
    pub auth: Option<AuthConfig>,
    #[serde(default = "default_forms")]
    pub forms: Vec<SubmitOptions>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Unset means requests may stay pending indefinitely.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogsConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    pub email: String,
    pub password: String,
}

impl Config {
    /// Resolves a form by its `form_id` or by the last segment of its endpoint
    /// (`heart` matches `/predict/heart`).
    pub fn find_form(&self, target: &str) -> Option<&SubmitOptions> {
        self.forms.iter().find(|form| {
            form.form_id == target || form.endpoint.rsplit('/').next() == Some(target)
        })
    }
}

impl ServerConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            logs: LogsConfig::default(),
            auth: None,
            forms: default_forms(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: None,
        }
    }
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_forms() -> Vec<SubmitOptions> {
    vec![SubmitOptions::diabetes(), SubmitOptions::heart()]
}
