//! Configuration management for VibeWriter.
//!
//! Configuration is loaded from the platform config directory with sensible
//! defaults. Credentials are stored as `${ENV_VAR}` references by default so
//! the file never needs to hold secrets.

mod types;
mod validate;

pub use types::*;

use crate::engine::EngineOptions;
use crate::error::ConfigError;
use crate::image::ImageBank;
use crate::llm::{resolve_env_var, ProviderKeys, RetryPolicy, TransportOptions};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Root configuration structure for VibeWriter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Request defaults
    pub general: GeneralConfig,

    /// Variant engine limits
    pub generation: GenerationConfig,

    /// Text generation backend
    pub llm: LlmConfig,

    /// Image source
    pub images: ImagesConfig,

    /// Output settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default configuration if the file doesn't exist. `LLM_PROVIDER`
    /// and `LLM_MODEL` override the `[llm]` section.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        let mut config = if path.exists() {
            Self::load_from(&path)?
        } else {
            Self::default()
        };
        config.apply_overrides(
            std::env::var("LLM_PROVIDER").ok(),
            std::env::var("LLM_MODEL").ok(),
        );
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path.
    ///
    /// Uses platform-appropriate directories:
    /// - macOS: ~/Library/Application Support/com.vibewriter.vibewriter/config.toml
    /// - Linux: ~/.config/vibewriter/config.toml
    /// - Windows: C:\Users\<User>\AppData\Roaming\vibewriter\config\config.toml
    ///
    /// Falls back to ~/.vibewriter/config.toml if directory detection fails.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "vibewriter", "vibewriter")
            .map(|dirs| dirs.config_dir().to_path_buf().join("config.toml"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".vibewriter").join("config.toml")
            })
    }

    /// Override provider and model; blank values are ignored.
    pub fn apply_overrides(&mut self, provider: Option<String>, model: Option<String>) {
        if let Some(provider) = provider.filter(|p| !p.trim().is_empty()) {
            self.llm.provider = provider.trim().to_string();
        }
        if let Some(model) = model.filter(|m| !m.trim().is_empty()) {
            self.llm.model = model.trim().to_string();
        }
    }

    /// Engine limits from the `[generation]` section.
    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            max_chars: self.generation.max_chars,
            fallback_max_chars: self.generation.fallback_max_chars,
            attempts: self.generation.attempts,
            max_tokens: self.generation.max_tokens,
            fallback_max_tokens: self.generation.fallback_max_tokens,
        }
    }

    /// Credentials with `${ENV_VAR}` references resolved.
    pub fn provider_keys(&self) -> ProviderKeys {
        ProviderKeys {
            google: resolve_env_var(&self.llm.google_api_key),
            openai: resolve_env_var(&self.llm.openai_api_key),
            anthropic: resolve_env_var(&self.llm.anthropic_api_key),
        }
    }

    /// Timeout and retry settings for text backends.
    pub fn transport_options(&self) -> TransportOptions {
        TransportOptions {
            timeout: Duration::from_millis(self.llm.timeout_ms),
            retry: RetryPolicy {
                attempts: self.llm.retry_attempts,
                base_delay_ms: self.llm.retry_delay_ms,
            },
        }
    }

    /// Configured image source mode.
    pub fn image_bank(&self) -> Result<ImageBank, ConfigError> {
        ImageBank::parse(&self.general.image_bank).ok_or_else(|| {
            ConfigError::ValidationError(format!(
                "general.image_bank must be \"unsplash\" or \"suggest\", got {:?}",
                self.general.image_bank
            ))
        })
    }

    /// Unsplash access key with `${ENV_VAR}` references resolved.
    pub fn unsplash_key(&self) -> Option<String> {
        resolve_env_var(&self.images.unsplash_access_key)
    }

    /// Default output file with `~` expanded.
    pub fn output_path(&self) -> Option<PathBuf> {
        self.output
            .path
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .map(|p| PathBuf::from(shellexpand::tilde(p).into_owned()))
    }

    /// Serialize the config to a pretty TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }
}

/// Load `.env` from the working directory or one of its parents.
///
/// Variables already present in the environment win. Returns the loaded
/// path, or `None` when no `.env` file exists.
pub fn load_dotenv() -> Result<Option<PathBuf>, ConfigError> {
    match dotenvy::dotenv() {
        Ok(path) => Ok(Some(path)),
        Err(e) if e.not_found() => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Load `KEY=value` pairs from a specific env file without overriding.
pub fn load_env_file(path: &Path) -> Result<(), ConfigError> {
    dotenvy::from_path(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.general.variants, 3);
        assert_eq!(config.generation.max_chars, 220);
        assert_eq!(config.llm.provider, "google");
        assert_eq!(config.engine_options(), EngineOptions::default());
    }

    #[test]
    fn test_config_to_toml() {
        let config = Config::default();
        let toml = config.to_toml().unwrap();
        assert!(toml.contains("[general]"));
        assert!(toml.contains("[generation]"));
        assert!(toml.contains("${OPENAI_API_KEY}"));
    }

    #[test]
    fn test_load_from_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "[general]\nvariants = 5\nimage_bank = \"suggest\"").unwrap();
        writeln!(f, "[llm]\nprovider = \"openai\"\nopenai_api_key = \"sk-inline\"").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.general.variants, 5);
        assert_eq!(config.image_bank().unwrap(), ImageBank::Suggest);
        assert_eq!(config.llm.provider, "openai");
        assert_eq!(config.provider_keys().openai.as_deref(), Some("sk-inline"));
        // Untouched sections keep defaults
        assert_eq!(config.generation.attempts, 4);
    }

    #[test]
    fn test_load_from_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[generation]\nattempts = 0\n").unwrap();
        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("generation.attempts"));
    }

    #[test]
    fn test_load_from_rejects_malformed_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[general\nvariants = ").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_apply_overrides_ignores_blank() {
        let mut config = Config::default();
        config.apply_overrides(Some("  ".to_string()), Some("gpt-4o".to_string()));
        assert_eq!(config.llm.provider, "google");
        assert_eq!(config.llm.model, "gpt-4o");

        config.apply_overrides(Some("Anthropic".to_string()), None);
        assert_eq!(config.llm.provider, "Anthropic");
        assert_eq!(config.llm.model, "gpt-4o");
    }

    #[test]
    fn test_transport_options_from_llm_section() {
        let mut config = Config::default();
        config.llm.timeout_ms = 2500;
        config.llm.retry_attempts = 0;
        let transport = config.transport_options();
        assert_eq!(transport.timeout, Duration::from_millis(2500));
        assert_eq!(transport.retry.attempts, 0);
    }

    #[test]
    fn test_output_path_expands_tilde() {
        let mut config = Config::default();
        assert!(config.output_path().is_none());
        config.output.path = Some("~/posts.json".to_string());
        let path = config.output_path().unwrap();
        assert!(path.ends_with("posts.json"));
        assert!(!path.to_string_lossy().starts_with('~'));
    }

    #[test]
    fn test_env_file_feeds_credential_references() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "VIBEWRITER_DOTENV_UNSPLASH=unsplash-from-file").unwrap();
        writeln!(f, "VIBEWRITER_DOTENV_PRESET=from-file").unwrap();
        std::env::set_var("VIBEWRITER_DOTENV_PRESET", "from-shell");

        load_env_file(&path).unwrap();

        let mut config = Config::default();
        config.images.unsplash_access_key = "${VIBEWRITER_DOTENV_UNSPLASH}".to_string();
        assert_eq!(config.unsplash_key().as_deref(), Some("unsplash-from-file"));
        // The shell environment takes precedence over the file
        assert_eq!(
            std::env::var("VIBEWRITER_DOTENV_PRESET").unwrap(),
            "from-shell"
        );
    }

    #[test]
    fn test_missing_env_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_env_file(&dir.path().join(".env")).unwrap_err();
        assert!(matches!(err, ConfigError::EnvFile(_)));
    }
}
