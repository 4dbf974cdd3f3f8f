use std::env;
use std::fs;
use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8001";

const CONFIG_FILE_NAME: &str = "config.json";

/// Resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub base_url: String,
    pub theme: ThemePreference,
}

impl AppConfig {
    /// Resolution order for the base URL: `TIX_BASE_URL`, then the stored
    /// config, then the default local backend.
    pub fn load() -> AppResult<Self> {
        let stored = StoredConfig::load()?;

        let base_url = env::var("TIX_BASE_URL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .or(stored.base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let theme = stored
            .theme
            .as_deref()
            .and_then(ThemePreference::from_str)
            .unwrap_or_default();

        Ok(Self { base_url, theme })
    }
}

/// The one persisted user preference besides the backend address: the
/// board's light/dark theme, written on toggle and read at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemePreference {
    #[default]
    Light,
    Dark,
}

impl ThemePreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemePreference::Light => "light",
            ThemePreference::Dark => "dark",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "light" => Some(ThemePreference::Light),
            "dark" => Some(ThemePreference::Dark),
            _ => None,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            ThemePreference::Light => ThemePreference::Dark,
            ThemePreference::Dark => ThemePreference::Light,
        }
    }
}

/// Persist the theme preference without disturbing the rest of the file.
pub fn save_theme(theme: ThemePreference) -> AppResult<()> {
    let mut stored = StoredConfig::load()?;
    stored.theme = Some(theme.as_str().to_string());
    stored.save()
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct StoredConfig {
    pub base_url: Option<String>,
    pub theme: Option<String>,
}

impl StoredConfig {
    pub fn load() -> AppResult<Self> {
        let path = config_file_path()?;
        match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str::<StoredConfig>(&contents)
                .map_err(|err| AppError::Configuration(format!("invalid config file: {err}"))),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(StoredConfig::default()),
            Err(err) => Err(AppError::Io(err)),
        }
    }

    pub fn save(&self) -> AppResult<()> {
        let path = config_file_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(self)
            .map_err(|err| AppError::Configuration(format!("failed to write config: {err}")))?;
        fs::write(&path, data)?;
        Ok(())
    }
}

/// `TIX_CONFIG_DIR` overrides the platform config directory (tests rely
/// on this to stay out of the real one).
pub fn config_directory() -> AppResult<PathBuf> {
    if let Ok(dir) = env::var("TIX_CONFIG_DIR") {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    let dirs = ProjectDirs::from("", "", "tix")
        .ok_or_else(|| AppError::Configuration("could not locate a config directory".to_string()))?;
    Ok(dirs.config_dir().to_path_buf())
}

pub fn config_file_path() -> AppResult<PathBuf> {
    Ok(config_directory()?.join(CONFIG_FILE_NAME))
}
