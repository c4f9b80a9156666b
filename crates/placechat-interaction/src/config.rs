//! Configuration file management for PlaceChat.
//!
//! Supports reading secrets from `~/.config/placechat/secret.json`, with
//! environment variables as a fallback.

use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration structure for secret.json
#[derive(Debug, Clone, Deserialize)]
pub struct SecretConfig {
    #[serde(default)]
    pub gemini: Option<GeminiConfig>,
    #[serde(default)]
    pub places: Option<PlacesConfig>,
}

/// Gemini API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct GeminiConfig {
    pub api_key: String,
    #[serde(default)]
    pub model_name: Option<String>,
}

/// Places-search API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PlacesConfig {
    pub api_key: String,
}

/// Loads the secret configuration file from ~/.config/placechat/secret.json
pub fn load_secret_config() -> Result<SecretConfig, String> {
    let config_path = get_config_path()?;
    load_secret_config_from(&config_path)
}

/// Loads a secret configuration file from an explicit path.
pub fn load_secret_config_from(config_path: &Path) -> Result<SecretConfig, String> {
    if !config_path.exists() {
        return Err(format!(
            "Configuration file not found at: {}",
            config_path.display()
        ));
    }

    let content = fs::read_to_string(config_path).map_err(|e| {
        format!(
            "Failed to read configuration file at {}: {}",
            config_path.display(),
            e
        )
    })?;

    serde_json::from_str(&content).map_err(|e| {
        format!(
            "Failed to parse configuration file at {}: {}",
            config_path.display(),
            e
        )
    })
}

/// Resolves the Gemini API key: secret.json first, then `GEMINI_API_KEY`.
pub fn resolve_gemini_api_key() -> Option<String> {
    if let Ok(config) = load_secret_config() {
        if let Some(gemini) = config.gemini {
            return Some(gemini.api_key);
        }
    }
    env::var("GEMINI_API_KEY").ok()
}

/// Resolves the places API key: secret.json first, then `PLACES_API_KEY`.
pub fn resolve_places_api_key() -> Option<String> {
    if let Ok(config) = load_secret_config() {
        if let Some(places) = config.places {
            return Some(places.api_key);
        }
    }
    env::var("PLACES_API_KEY").ok()
}

/// Returns the path to the configuration file: ~/.config/placechat/secret.json
fn get_config_path() -> Result<PathBuf, String> {
    let home = dirs::home_dir().ok_or_else(|| "Could not determine home directory".to_string())?;
    Ok(home.join(".config").join("placechat").join("secret.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_secret_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("secret.json");
        let mut file = fs::File::create(&path).unwrap();
        write!(
            file,
            r#"{{"gemini": {{"api_key": "g-key", "model_name": "gemini-2.5-flash"}}, "places": {{"api_key": "p-key"}}}}"#
        )
        .unwrap();

        let config = load_secret_config_from(&path).unwrap();
        assert_eq!(config.gemini.as_ref().unwrap().api_key, "g-key");
        assert_eq!(
            config.gemini.unwrap().model_name.as_deref(),
            Some("gemini-2.5-flash")
        );
        assert_eq!(config.places.unwrap().api_key, "p-key");
    }

    #[test]
    fn test_missing_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_secret_config_from(&dir.path().join("missing.json")).unwrap_err();
        assert!(err.contains("not found"));
    }

    #[test]
    fn test_partial_config_is_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("secret.json");
        fs::write(&path, r#"{"places": {"api_key": "p-key"}}"#).unwrap();

        let config = load_secret_config_from(&path).unwrap();
        assert!(config.gemini.is_none());
        assert!(config.places.is_some());
    }
}
