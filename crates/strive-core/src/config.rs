//! TOML-based application configuration.
//!
//! Stores the backend project settings and view preferences.
//! Configuration lives at `~/.config/strive/config.toml`
//! (`~/.config/strive-dev/` when `STRIVE_ENV=dev`).

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::rollup::Period;

/// Hosted backend project settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Project URL, e.g. `https://xyzcompany.supabase.co`.
    #[serde(default = "default_backend_url")]
    pub url: String,
    /// Public (anon) API key for the project.
    #[serde(default)]
    pub anon_key: String,
}

/// View preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Period a fresh view opens on.
    #[serde(default = "default_period")]
    pub default_period: Period,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/strive/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

fn default_backend_url() -> String {
    "http://127.0.0.1:54321".into()
}

fn default_period() -> Period {
    Period::Day
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: default_backend_url(),
            anon_key: String::new(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            default_period: default_period(),
        }
    }
}

/// Returns `~/.config/strive[-dev]/` based on STRIVE_ENV.
///
/// Set STRIVE_ENV=dev to use the development data directory.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("STRIVE_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("strive-dev")
    } else {
        base_dir.join("strive")
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::LoadFailed {
        path: dir.clone(),
        message: e.to_string(),
    })?;
    Ok(dir)
}

impl Config {
    fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk or return default.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                toml::from_str(&content).map_err(|e| ConfigError::ParseFailed(e.to_string()))
            }
            Err(_) => Ok(Self::default()),
        }
    }

    /// Persist to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Load from disk, returning default on error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let mut current = &json;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        match current {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key and persist it.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::ParseFailed(message);

        let mut json =
            serde_json::to_value(&*self).map_err(|e| invalid(e.to_string()))?;
        let mut parts = key.split('.').peekable();
        let mut current = &mut json;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current
                    .as_object_mut()
                    .ok_or_else(|| invalid(format!("unknown config key: {key}")))?;
                if !obj.contains_key(part) {
                    return Err(invalid(format!("unknown config key: {key}")));
                }
                obj.insert(part.to_string(), serde_json::Value::String(value.into()));
            } else {
                current = current
                    .get_mut(part)
                    .ok_or_else(|| invalid(format!("unknown config key: {key}")))?;
            }
        }

        *self = serde_json::from_value(json).map_err(|e| invalid(e.to_string()))?;
        self.save()
    }
}
