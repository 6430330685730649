use std::{collections::HashMap, fs};

use serde::Deserialize;

use crate::pokeapi::DEFAULT_CATALOG_URL;

const SETTINGS_FILE: &str = "server.toml";

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub server_bind: String,
    pub upstream_base_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:8000".into(),
            upstream_base_url: DEFAULT_CATALOG_URL.into(),
        }
    }
}

pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(SETTINGS_FILE) {
        apply_file_overrides(&mut settings, &raw);
    }
    apply_env_overrides(&mut settings, |name| std::env::var(name).ok());

    settings.upstream_base_url = normalize_base_url(&settings.upstream_base_url);
    settings
}

fn apply_file_overrides(settings: &mut Settings, raw: &str) {
    let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(raw) else {
        tracing::warn!(file = SETTINGS_FILE, "ignoring unparseable settings file");
        return;
    };

    if let Some(v) = file_cfg.get("bind_addr") {
        settings.server_bind = v.clone();
    }
    if let Some(v) = file_cfg.get("upstream_base_url") {
        settings.upstream_base_url = v.clone();
    }
}

fn apply_env_overrides(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    // Later names win.
    for name in ["SERVER_BIND", "APP__BIND_ADDR"] {
        if let Some(v) = lookup(name) {
            settings.server_bind = v;
        }
    }
    for name in ["POKEAPI_BASE_URL", "APP__POKEAPI_BASE_URL"] {
        if let Some(v) = lookup(name) {
            settings.upstream_base_url = v;
        }
    }
}

fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Settings::default().upstream_base_url;
    }
    trimmed.to_string()
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
