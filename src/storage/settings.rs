//! Settings storage
//!
//! Manages persistence of user preferences and provider configuration. The
//! provider credential is never written here; it comes from the environment.

use crate::storage::{get_data_dir, StorageError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable holding the image provider credential
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

pub const DEFAULT_API_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_IMAGE_MODEL: &str = "dall-e-3";

/// Which view the shell opens on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Image,
    Video,
    Gallery,
}

/// Application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    /// Provider model identifier sent with every image request
    #[serde(default = "default_image_model")]
    pub image_model: String,
    /// Base URL of the OpenAI-compatible images API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// HTTP timeout for a single provider request
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Upper bound on a whole generation, provider wait included
    #[serde(default = "default_timeout_secs")]
    pub generation_timeout_secs: u64,
    /// Simulated video latency range, in milliseconds
    #[serde(default = "default_video_latency_min_ms")]
    pub video_latency_min_ms: u64,
    #[serde(default = "default_video_latency_max_ms")]
    pub video_latency_max_ms: u64,
    #[serde(default)]
    pub default_tab: Tab,
}

fn default_image_model() -> String {
    DEFAULT_IMAGE_MODEL.to_string()
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_video_latency_min_ms() -> u64 {
    3000
}

fn default_video_latency_max_ms() -> u64 {
    5000
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            image_model: default_image_model(),
            api_base_url: default_api_base_url(),
            request_timeout_secs: default_timeout_secs(),
            generation_timeout_secs: default_timeout_secs(),
            video_latency_min_ms: default_video_latency_min_ms(),
            video_latency_max_ms: default_video_latency_max_ms(),
            default_tab: Tab::Image,
        }
    }
}

impl AppSettings {
    /// Validate settings values
    ///
    /// Ensures all parameters are within acceptable ranges.
    pub fn validate(&mut self) {
        if self.image_model.trim().is_empty() {
            self.image_model = default_image_model();
        }

        let base = self.api_base_url.trim().trim_end_matches('/');
        if base.starts_with("http://") || base.starts_with("https://") {
            self.api_base_url = base.to_string();
        } else {
            tracing::warn!(
                "Invalid API base URL {:?}, using {}",
                self.api_base_url,
                DEFAULT_API_BASE_URL
            );
            self.api_base_url = default_api_base_url();
        }

        self.request_timeout_secs = self.request_timeout_secs.clamp(5, 600);
        self.generation_timeout_secs = self.generation_timeout_secs.clamp(5, 600);

        self.video_latency_max_ms = self.video_latency_max_ms.min(60_000);
        if self.video_latency_min_ms > self.video_latency_max_ms {
            self.video_latency_min_ms = self.video_latency_max_ms;
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn generation_timeout(&self) -> Duration {
        Duration::from_secs(self.generation_timeout_secs)
    }

    pub fn video_latency(&self) -> (Duration, Duration) {
        (
            Duration::from_millis(self.video_latency_min_ms),
            Duration::from_millis(self.video_latency_max_ms),
        )
    }
}

/// Read the provider credential from the environment
///
/// Blank values count as missing.
pub fn api_key_from_env() -> Option<String> {
    std::env::var(API_KEY_ENV)
        .ok()
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty())
}

/// Get the settings file path
fn get_settings_path() -> Result<PathBuf, StorageError> {
    Ok(get_data_dir()?.join("settings.json"))
}

/// Load settings from disk
///
/// Returns default settings if the file doesn't exist or is corrupted
pub fn load_settings() -> AppSettings {
    match get_settings_path().and_then(|path| load_settings_from(&path)) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!("Failed to load settings, using defaults: {}", e);
            AppSettings::default()
        }
    }
}

/// Load and validate settings from a specific file
pub fn load_settings_from(path: &std::path::Path) -> Result<AppSettings, StorageError> {
    if !path.exists() {
        tracing::info!("Settings file not found, using defaults");
        return Ok(AppSettings::default());
    }

    let json = fs::read_to_string(path)?;
    let mut settings: AppSettings = serde_json::from_str(&json)?;
    settings.validate();

    tracing::debug!("Loaded settings from disk");
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = AppSettings::default();
        assert_eq!(settings.image_model, "dall-e-3");
        assert_eq!(settings.api_base_url, "https://api.openai.com/v1");
        assert_eq!(settings.request_timeout_secs, 120);
        assert_eq!(settings.video_latency_min_ms, 3000);
        assert_eq!(settings.video_latency_max_ms, 5000);
        assert_eq!(settings.default_tab, Tab::Image);
    }

    #[test]
    fn test_settings_validation() {
        let mut settings = AppSettings::default();

        settings.image_model = "  ".to_string();
        settings.api_base_url = "ftp://nope".to_string();
        settings.request_timeout_secs = 0;
        settings.generation_timeout_secs = 10_000;
        settings.video_latency_min_ms = 9000;
        settings.validate();

        assert_eq!(settings.image_model, "dall-e-3");
        assert_eq!(settings.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(settings.request_timeout_secs, 5);
        assert_eq!(settings.generation_timeout_secs, 600);
        assert_eq!(settings.video_latency_min_ms, 5000);
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let mut settings = AppSettings::default();
        settings.api_base_url = "http://localhost:8080/v1/".to_string();
        settings.validate();
        assert_eq!(settings.api_base_url, "http://localhost:8080/v1");
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: AppSettings = serde_json::from_str(r#"{"default_tab": "gallery"}"#).unwrap();
        assert_eq!(settings.default_tab, Tab::Gallery);
        assert_eq!(settings.image_model, "dall-e-3");
        assert_eq!(settings.generation_timeout_secs, 120);
    }

    #[test]
    fn test_settings_file_is_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let mut settings = AppSettings::default();
        settings.video_latency_min_ms = 100;
        settings.video_latency_max_ms = 200;
        settings.default_tab = Tab::Video;
        fs::write(&path, serde_json::to_string_pretty(&settings).unwrap()).unwrap();

        let loaded = load_settings_from(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_corrupted_settings_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{{{").unwrap();
        assert!(load_settings_from(&path).is_err());
    }

    #[test]
    fn test_absent_settings_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_settings_from(&dir.path().join("missing.json")).unwrap();
        assert_eq!(loaded, AppSettings::default());
    }
}
