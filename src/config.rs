use crate::model::Theme;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const APP_DIR: &str = "tunestats";
const SETTINGS_FILE: &str = "settings.json";
const LOG_FILE: &str = "tunestats.log";
pub const CONFIG_DIR_ENV: &str = "TUNESTATS_CONFIG_DIR";
pub const API_BASE_URL_ENV: &str = "TUNESTATS_API_BASE_URL";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_request_timeout_seconds")]
    pub request_timeout_seconds: u64,
    #[serde(default)]
    pub session_cookie: Option<String>,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_api_base_url() -> String {
    String::from("http://127.0.0.1:5001")
}

fn default_request_timeout_seconds() -> u64 {
    30
}

fn default_log_filter() -> String {
    String::from("info")
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            request_timeout_seconds: default_request_timeout_seconds(),
            session_cookie: None,
            theme: Theme::default(),
            log_filter: default_log_filter(),
        }
    }
}

impl Settings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds.max(1))
    }

    pub fn apply_env(&mut self) {
        if let Ok(url) = env::var(API_BASE_URL_ENV)
            && !url.trim().is_empty()
        {
            self.api_base_url = url.trim().to_string();
        }
    }
}

pub fn config_root() -> Result<PathBuf> {
    if let Ok(override_dir) = env::var(CONFIG_DIR_ENV) {
        return Ok(PathBuf::from(override_dir));
    }

    let home = env::var("HOME")
        .or_else(|_| env::var("USERPROFILE"))
        .context("neither HOME nor USERPROFILE is set")?;
    Ok(PathBuf::from(home).join(".config").join(APP_DIR))
}

pub fn settings_path() -> Result<PathBuf> {
    Ok(config_root()?.join(SETTINGS_FILE))
}

pub fn log_path() -> Result<PathBuf> {
    Ok(config_root()?.join(LOG_FILE))
}

pub fn ensure_config_dir() -> Result<PathBuf> {
    let root = config_root()?;
    fs::create_dir_all(&root).with_context(|| format!("failed to create {}", root.display()))?;
    Ok(root)
}

pub fn load_settings() -> Result<Settings> {
    let mut settings = load_settings_from_path(&settings_path()?)?;
    settings.apply_env();
    Ok(settings)
}

pub fn load_settings_from_path(path: &Path) -> Result<Settings> {
    if !path.exists() {
        return Ok(Settings::default());
    }

    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read settings file {}", path.display()))?;
    let settings: Settings = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse settings file {}", path.display()))?;
    Ok(settings)
}
