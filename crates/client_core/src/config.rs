use std::{collections::HashMap, fs, path::Path};

use anyhow::Context;

pub const DEFAULT_ENDPOINT: &str = "https://api.coinstats.app/public/v1/coins";
pub const SETTINGS_FILE: &str = "coin_tracker.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub endpoint: String,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.into(),
            log_filter: "info".into(),
        }
    }
}

/// Defaults, then `coin_tracker.toml` in the working directory, then env.
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    match read_settings_file(Path::new(SETTINGS_FILE)) {
        Ok(Some(file_cfg)) => apply_file_overrides(&mut settings, &file_cfg),
        Ok(None) => {}
        Err(err) => tracing::warn!("ignoring {SETTINGS_FILE}: {err:#}"),
    }

    apply_env_overrides(&mut settings, |name| std::env::var(name).ok());
    settings
}

fn read_settings_file(path: &Path) -> anyhow::Result<Option<HashMap<String, String>>> {
    if !path.exists() {
        return Ok(None);
    }
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read settings file '{}'", path.display()))?;
    let parsed = toml::from_str::<HashMap<String, String>>(&raw)
        .with_context(|| format!("failed to parse settings file '{}'", path.display()))?;
    Ok(Some(parsed))
}

fn apply_file_overrides(settings: &mut Settings, file_cfg: &HashMap<String, String>) {
    if let Some(v) = non_empty(file_cfg.get("endpoint").cloned()) {
        settings.endpoint = v;
    }
    if let Some(v) = non_empty(file_cfg.get("log_filter").cloned()) {
        settings.log_filter = v;
    }
}

fn apply_env_overrides(settings: &mut Settings, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = non_empty(var("COINS_ENDPOINT")) {
        settings.endpoint = v;
    }
    if let Some(v) = non_empty(var("APP__COINS_ENDPOINT")) {
        settings.endpoint = v;
    }

    if let Some(v) = non_empty(var("RUST_LOG")) {
        settings.log_filter = v;
    }
    if let Some(v) = non_empty(var("APP__LOG_FILTER")) {
        settings.log_filter = v;
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
