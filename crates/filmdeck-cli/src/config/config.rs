//! `AppConfig` struct and TOML read/write.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::messages::Locale;

/// Default TMDB response language.
const DEFAULT_LANGUAGE: &str = "en-US";

/// Placeholder printed instead of the API token.
const REDACTED: &str = "********";

/// Default search debounce interval in milliseconds.
const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// TMDB request settings.
    #[serde(default)]
    pub tmdb: TmdbConfig,
    /// Search behaviour.
    #[serde(default)]
    pub search: SearchConfig,
    /// Interface settings.
    #[serde(default)]
    pub ui: UiConfig,
}

/// TMDB request configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TmdbConfig {
    /// Response language (e.g. "en-US", "tr-TR").
    #[serde(default = "default_language")]
    pub language: String,
    /// Region filter for now playing / upcoming (ISO 3166-1).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// API bearer token. `TMDB_API_TOKEN` takes precedence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            region: None,
            api_token: None,
        }
    }
}

/// Search configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchConfig {
    /// Debounce interval in milliseconds.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

impl SearchConfig {
    /// Debounce interval as a [`Duration`].
    #[must_use]
    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// Interface configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct UiConfig {
    /// Interface language.
    #[serde(default)]
    pub locale: Locale,
}

fn default_language() -> String {
    String::from(DEFAULT_LANGUAGE)
}

const fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Saves config to a TOML file, creating parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation or file write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        let content = self.to_toml()?;
        std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
    }

    /// Serializes the config to pretty TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("failed to serialize config to TOML")
    }

    /// Renders the config as TOML with the API token masked.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_redacted_toml(&self) -> Result<String> {
        let mut redacted = self.clone();
        if redacted.tmdb.api_token.is_some() {
            redacted.tmdb.api_token = Some(String::from(REDACTED));
        }
        redacted.to_toml()
    }

    /// Picks the API token: the environment value wins over the config file.
    /// Blank values count as unset.
    #[must_use]
    pub fn api_token(&self, env_token: Option<String>) -> Option<String> {
        env_token
            .filter(|t| !t.trim().is_empty())
            .or_else(|| self.tmdb.api_token.clone())
            .filter(|t| !t.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_default_config() {
        // Arrange & Act
        let config = AppConfig::default();

        // Assert
        assert_eq!(config.tmdb.language, "en-US");
        assert_eq!(config.tmdb.region, None);
        assert_eq!(config.search.debounce(), Duration::from_millis(500));
        assert_eq!(config.ui.locale, Locale::En);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        // Arrange
        let toml_str = "[tmdb]\nregion = \"TR\"\n\n[ui]\nlocale = \"tr\"\n";

        // Act
        let config: AppConfig = toml::from_str(toml_str).unwrap();

        // Assert
        assert_eq!(config.tmdb.language, "en-US");
        assert_eq!(config.tmdb.region.as_deref(), Some("TR"));
        assert_eq!(config.search.debounce_ms, 500);
        assert_eq!(config.ui.locale, Locale::Tr);
    }

    #[test]
    fn test_redacted_toml_masks_token() {
        // Arrange
        let mut config = AppConfig::default();
        config.tmdb.api_token = Some(String::from("secret-token"));

        // Act
        let rendered = config.to_redacted_toml().unwrap();

        // Assert
        assert!(!rendered.contains("secret-token"));
        assert!(rendered.contains("api_token = \"********\""));
        assert_eq!(config.tmdb.api_token.as_deref(), Some("secret-token"));
    }

    #[test]
    fn test_load_nonexistent_returns_default() {
        // Arrange
        let path = Path::new("/tmp/nonexistent_filmdeck_test/config.toml");

        // Act
        let config = AppConfig::load(path).unwrap();

        // Assert
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_malformed_fails() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[search]\ndebounce_ms = \"soon\"\n").unwrap();

        // Act
        let result = AppConfig::load(&path);

        // Assert
        assert!(result.unwrap_err().to_string().contains("failed to parse"));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sub").join("config.toml");
        let config = AppConfig {
            tmdb: TmdbConfig {
                language: String::from("tr-TR"),
                region: Some(String::from("TR")),
                api_token: None,
            },
            search: SearchConfig { debounce_ms: 250 },
            ui: UiConfig { locale: Locale::Tr },
        };

        // Act
        config.save(&path).unwrap();
        let loaded = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_api_token_env_wins() {
        // Arrange
        let mut config = AppConfig::default();
        config.tmdb.api_token = Some(String::from("from-file"));

        // Act & Assert
        assert_eq!(
            config.api_token(Some(String::from("from-env"))).as_deref(),
            Some("from-env")
        );
        assert_eq!(
            config.api_token(Some(String::from("  "))).as_deref(),
            Some("from-file")
        );
        assert_eq!(config.api_token(None).as_deref(), Some("from-file"));
    }

    #[test]
    fn test_api_token_missing() {
        // Arrange
        let config = AppConfig::default();

        // Act & Assert
        assert_eq!(config.api_token(None), None);
    }
}
