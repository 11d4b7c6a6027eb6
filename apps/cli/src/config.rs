use std::{fs, path::Path};

use anyhow::{bail, Context};
use url::Url;

pub const CONFIG_FILE: &str = "incident_chat.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_url: String,
    pub store_url: String,
    pub reject_empty_questions: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8000".into(),
            store_url: "sqlite://./data/incident_chat.db".into(),
            reject_empty_questions: false,
        }
    }
}

/// Defaults, then `incident_chat.toml` if present, then environment.
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();
    apply_file(&mut settings, Path::new(CONFIG_FILE));
    apply_env(&mut settings, |name| std::env::var(name).ok());
    settings
}

fn apply_file(settings: &mut Settings, path: &Path) {
    let Ok(raw) = fs::read_to_string(path) else {
        return;
    };
    match raw.parse::<toml::Table>() {
        Ok(file_cfg) => apply_table(settings, &file_cfg),
        Err(error) => {
            tracing::warn!(path = %path.display(), %error, "ignoring unreadable config file")
        }
    }
}

fn apply_table(settings: &mut Settings, table: &toml::Table) {
    if let Some(v) = table.get("server_url").and_then(toml::Value::as_str) {
        settings.server_url = v.to_string();
    }
    if let Some(v) = table.get("store_url").and_then(toml::Value::as_str) {
        settings.store_url = v.to_string();
    }
    // Accepts a TOML bool or a quoted flag like the environment form.
    let reject_empty = match table.get("reject_empty_questions") {
        Some(toml::Value::Boolean(v)) => Some(*v),
        Some(toml::Value::String(v)) => parse_flag(v),
        _ => None,
    };
    if let Some(v) = reject_empty {
        settings.reject_empty_questions = v;
    }
}

fn apply_env(settings: &mut Settings, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("CHAT_SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = var("APP__SERVER_URL") {
        settings.server_url = v;
    }

    if let Some(v) = var("CHAT_STORE_URL") {
        settings.store_url = v;
    }
    if let Some(v) = var("APP__STORE_URL") {
        settings.store_url = v;
    }

    if let Some(v) = var("APP__REJECT_EMPTY_QUESTIONS").and_then(|v| parse_flag(&v)) {
        settings.reject_empty_questions = v;
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

pub fn validate_server_url(raw: &str) -> anyhow::Result<String> {
    let url = Url::parse(raw.trim()).with_context(|| format!("invalid server url '{raw}'"))?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!("server url '{raw}' must use http or https");
    }
    Ok(url.as_str().trim_end_matches('/').to_string())
}

pub fn normalize_store_url(raw_store_url: &str) -> String {
    let raw_store_url = raw_store_url.trim();

    if raw_store_url.is_empty() {
        return Settings::default().store_url;
    }

    if raw_store_url.starts_with("sqlite:") || raw_store_url.contains("://") {
        return raw_store_url.to_string();
    }

    format!("sqlite://{}", raw_store_url.replace('\\', "/"))
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
