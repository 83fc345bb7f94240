//! User configuration, stored as TOML in the platform config directory.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub calculator: CalculatorConfig,
    pub ai: AiConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    /// Copy every successful result to the clipboard.
    pub copy_results: bool,
}

/// Settings for the formula explainer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// One of `openai`, `anthropic`, `ollama`, `deepseek`, `google`, `groq`.
    pub backend: String,
    pub model: String,
    /// Environment variable holding the API key. Never stored in the file.
    pub api_key_env: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            backend: "openai".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            base_url: None,
            max_tokens: 512,
            temperature: 0.2,
        }
    }
}

impl AiConfig {
    /// Read the API key from the configured environment variable.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }
}

impl Config {
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("calcdeck")
            .join("config.toml")
    }

    /// Load the configuration.
    ///
    /// A missing file yields the defaults. Writing them out is best-effort:
    /// an unwritable location only logs a warning.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path.map(Path::to_path_buf).unwrap_or_else(Self::default_path);

        if !path.exists() {
            let default = Config::default();
            match default.save(&path) {
                Ok(()) => info!(path = %path.display(), "wrote default configuration"),
                Err(err) => warn!("Using default configuration: {:#}", err),
            }
            return Ok(default);
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_toml(&contents)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        fs::write(path, self.to_toml()?)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_survives_toml() {
        let config = Config::default();
        let text = config.to_toml().unwrap();
        assert!(text.contains("[ai]"));
        assert!(!text.contains("base_url"));
        assert_eq!(Config::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config = Config::from_toml(
            r#"
            [ai]
            backend = "ollama"
            model = "llama3"
            base_url = "http://localhost:11434"
            "#,
        )
        .unwrap();

        assert_eq!(config.ai.backend, "ollama");
        assert_eq!(config.ai.base_url.as_deref(), Some("http://localhost:11434"));
        assert_eq!(config.ai.max_tokens, 512);
        assert!(!config.calculator.copy_results);
    }

    #[test]
    fn test_invalid_file_is_rejected() {
        assert!(Config::from_toml("[calculator]\ncopy_results = \"yes\"").is_err());
    }

    #[test]
    fn test_load_writes_defaults() {
        let dir = std::env::temp_dir().join(format!("calcdeck-config-{}", std::process::id()));
        let path = dir.join("config.toml");
        let _ = fs::remove_dir_all(&dir);

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config, Config::default());
        assert!(path.exists());

        fs::write(&path, "[calculator]\ncopy_results = true\n").unwrap();
        assert!(Config::load(Some(&path)).unwrap().calculator.copy_results);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_unwritable_location_falls_back_to_defaults() {
        let blocker = std::env::temp_dir().join(format!("calcdeck-blocker-{}", std::process::id()));
        fs::write(&blocker, "not a directory").unwrap();
        // The parent of the config path is a regular file, so it cannot be created.
        let path = blocker.join("config.toml");

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config, Config::default());
        assert!(!path.exists());

        let _ = fs::remove_file(&blocker);
    }

    #[test]
    fn test_missing_api_key() {
        let config = AiConfig {
            api_key_env: "CALCDECK_TEST_KEY_THAT_IS_NOT_SET".to_string(),
            ..AiConfig::default()
        };
        assert_eq!(config.api_key(), None);
    }
}
