//! Configuration validation with range checks.

use crate::error::ConfigError;

use super::Config;

/// Smallest caption ceiling that still leaves room for a disambiguating suffix.
const MIN_MAX_CHARS: usize = 16;

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.general.variants == 0 {
            return Err(ConfigError::ValidationError(
                "general.variants must be > 0".into(),
            ));
        }
        self.image_bank()?;
        if self.generation.max_chars < MIN_MAX_CHARS {
            return Err(ConfigError::ValidationError(format!(
                "generation.max_chars must be >= {MIN_MAX_CHARS}"
            )));
        }
        if self.generation.fallback_max_chars == 0
            || self.generation.fallback_max_chars > self.generation.max_chars
        {
            return Err(ConfigError::ValidationError(
                "generation.fallback_max_chars must be > 0 and <= generation.max_chars".into(),
            ));
        }
        if self.generation.attempts == 0 {
            return Err(ConfigError::ValidationError(
                "generation.attempts must be > 0".into(),
            ));
        }
        if self.generation.max_tokens == 0 || self.generation.fallback_max_tokens == 0 {
            return Err(ConfigError::ValidationError(
                "generation token budgets must be > 0".into(),
            ));
        }
        if self.llm.timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "llm.timeout_ms must be > 0".into(),
            ));
        }
        if self.images.timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "images.timeout_ms must be > 0".into(),
            ));
        }
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::ValidationError(
                "logging.format must be \"pretty\" or \"json\"".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_passes_validation() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_variants() {
        let mut config = Config::default();
        config.general.variants = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("general.variants"));
    }

    #[test]
    fn test_validate_rejects_unknown_image_bank() {
        let mut config = Config::default();
        config.general.image_bank = "pexels".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("image_bank"));
    }

    #[test]
    fn test_validate_rejects_fallback_above_ceiling() {
        let mut config = Config::default();
        config.generation.fallback_max_chars = 300;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("fallback_max_chars"));
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.llm.timeout_ms = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("llm.timeout_ms"));
    }

    #[test]
    fn test_validate_rejects_unknown_log_format() {
        let mut config = Config::default();
        config.logging.format = "xml".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("logging.format"));
    }

    #[test]
    fn test_validate_rejects_ceiling_below_suffix_room() {
        let mut config = Config::default();
        config.generation.max_chars = 8;
        config.generation.fallback_max_chars = 8;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("generation.max_chars must be >= 16"));

        config.generation.max_chars = 16;
        assert!(config.validate().is_ok());
    }
}
