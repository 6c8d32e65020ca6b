use std::{fs, io, path::Path, time::Duration};

use anyhow::Context;
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "tracker.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_url: String,
    pub detail_base_url: Option<String>,
    pub request_timeout_seconds: u64,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8000/api/".into(),
            detail_base_url: None,
            request_timeout_seconds: 30,
            log_filter: "info".into(),
        }
    }
}

impl Settings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

/// Optional overrides read from the TOML config file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileSettings {
    pub server_url: Option<String>,
    pub detail_base_url: Option<String>,
    pub request_timeout_seconds: Option<u64>,
    pub log_filter: Option<String>,
}

/// Reads `path`; a missing file is not an error.
pub fn read_settings_file(path: &Path) -> anyhow::Result<Option<FileSettings>> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to read config file '{}'", path.display()))
        }
    };
    let parsed = toml::from_str(&raw)
        .with_context(|| format!("failed to parse config file '{}'", path.display()))?;
    Ok(Some(parsed))
}

/// Defaults, then the config file, then environment variables.
pub fn resolve_settings<F>(file: Option<FileSettings>, env: F) -> Settings
where
    F: Fn(&str) -> Option<String>,
{
    let mut settings = Settings::default();

    if let Some(file) = file {
        if let Some(v) = file.server_url {
            settings.server_url = v;
        }
        if let Some(v) = file.detail_base_url {
            settings.detail_base_url = Some(v);
        }
        if let Some(v) = file.request_timeout_seconds {
            settings.request_timeout_seconds = v;
        }
        if let Some(v) = file.log_filter {
            settings.log_filter = v;
        }
    }

    if let Some(v) = env("TRACKER_SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = env("APP__SERVER_URL") {
        settings.server_url = v;
    }

    if let Some(v) = env("TRACKER_DETAIL_BASE_URL") {
        settings.detail_base_url = Some(v);
    }
    if let Some(v) = env("APP__DETAIL_BASE_URL") {
        settings.detail_base_url = Some(v);
    }

    if let Some(v) = env("APP__REQUEST_TIMEOUT_SECONDS") {
        if let Ok(parsed) = v.trim().parse::<u64>() {
            settings.request_timeout_seconds = parsed;
        }
    }

    if let Some(v) = env("APP__LOG_FILTER") {
        settings.log_filter = v;
    }

    settings
}

pub fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
