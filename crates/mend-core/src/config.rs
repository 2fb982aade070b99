//! Configuration file management for Mend.
//!
//! Supports reading secrets from `~/.config/mend/secret.json`.

use crate::error::{MendError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration structure for secret.json
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SecretConfig {
    #[serde(default)]
    pub openai: Option<OpenAiConfig>,
}

/// OpenAI API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiConfig {
    pub api_key: String,
    #[serde(default)]
    pub model_name: Option<String>,
}

/// Loads the secret configuration file from ~/.config/mend/secret.json
///
/// # Security Note
///
/// The secret file is read-only plaintext JSON; error messages carry the
/// file path, never the key material itself.
pub fn load_secret_config() -> Result<SecretConfig> {
    let config_path = secret_file_path()?;
    load_secret_config_from(&config_path)
}

/// Loads the secret configuration from an explicit path (used by tests).
pub fn load_secret_config_from(config_path: &Path) -> Result<SecretConfig> {
    if !config_path.exists() {
        return Err(MendError::config(format!(
            "Configuration file not found at: {}",
            config_path.display()
        )));
    }

    let content = fs::read_to_string(config_path).map_err(|e| {
        MendError::config(format!(
            "Failed to read configuration file at {}: {}",
            config_path.display(),
            e
        ))
    })?;

    serde_json::from_str(&content).map_err(|e| {
        MendError::config(format!(
            "Failed to parse configuration file at {}: {}",
            config_path.display(),
            e
        ))
    })
}

/// Returns the path to the configuration file: ~/.config/mend/secret.json
pub fn secret_file_path() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| MendError::config("Could not determine home directory"))?;
    Ok(home.join(".config").join("mend").join("secret.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_nonexistent_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("secret.json");

        let result = load_secret_config_from(&file_path);
        assert!(matches!(result, Err(MendError::Config(_))));
    }

    #[test]
    fn test_load_valid_json() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("secret.json");

        let json_content = r#"{
            "openai": {
                "api_key": "test-key-123",
                "model_name": "gpt-4.1"
            }
        }"#;
        fs::write(&file_path, json_content).unwrap();

        let config = load_secret_config_from(&file_path).unwrap();
        let openai = config.openai.unwrap();
        assert_eq!(openai.api_key, "test-key-123");
        assert_eq!(openai.model_name, Some("gpt-4.1".to_string()));
    }

    #[test]
    fn test_load_empty_config() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("secret.json");
        fs::write(&file_path, "{}").unwrap();

        let config = load_secret_config_from(&file_path).unwrap();
        assert!(config.openai.is_none());
    }

    #[test]
    fn test_load_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("secret.json");
        fs::write(&file_path, "{ invalid json").unwrap();

        let result = load_secret_config_from(&file_path);
        assert!(matches!(result, Err(MendError::Config(_))));
    }
}
