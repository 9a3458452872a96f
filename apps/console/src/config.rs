use std::{collections::HashMap, fs};

use url::Url;

/// Backend base URL used when neither file nor environment provides one.
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

#[derive(Debug, Clone)]
pub struct Settings {
    pub api_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
        }
    }
}

/// Layered lookup: defaults, then `console.toml`, then environment.
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("console.toml") {
        apply_file_overrides(&mut settings, &raw);
    }

    if let Ok(v) = std::env::var("API_URL") {
        settings.api_url = v;
    }
    if let Ok(v) = std::env::var("APP__API_URL") {
        settings.api_url = v;
    }

    settings
}

fn apply_file_overrides(settings: &mut Settings, raw: &str) {
    if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(raw) {
        if let Some(v) = file_cfg.get("api_url") {
            settings.api_url = v.clone();
        }
    }
}

/// Trims and validates a configured base URL, falling back to the default on
/// empty or unparseable input.
pub fn normalize_api_url(raw: &str) -> String {
    let raw = raw.trim().trim_end_matches('/');

    if raw.is_empty() {
        return DEFAULT_API_URL.to_string();
    }

    match Url::parse(raw) {
        Ok(_) => raw.to_string(),
        Err(err) => {
            tracing::warn!("invalid api url '{raw}' ({err}); using default");
            DEFAULT_API_URL.to_string()
        }
    }
}
