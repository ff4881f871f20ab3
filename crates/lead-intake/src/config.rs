//! Intake configuration
//!
//! Layering, lowest to highest precedence:
//! 1. built-in defaults
//! 2. optional TOML file
//! 3. environment (`LEAD_INTAKE_URL`, `LEAD_SOURCE_TAG`, `LEAD_INTAKE_TIMEOUT_SECS`)
//!
//! Command-line flags are applied on top by the binary.

use crate::error::ConfigError;
use lead_form::ValidationMode;
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

/// Placeholder endpoint; deployments must override it
pub const DEFAULT_ENDPOINT_URL: &str = "https://example.invalid/lead-intake";

/// Tag identifying the originating page in every payload
pub const DEFAULT_SOURCE_TAG: &str = "landing_page";

/// Transport timeout applied by the HTTP sink
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Endpoint override
pub const ENV_ENDPOINT_URL: &str = "LEAD_INTAKE_URL";
/// Source tag override
pub const ENV_SOURCE_TAG: &str = "LEAD_SOURCE_TAG";
/// Timeout override, in seconds
pub const ENV_TIMEOUT_SECS: &str = "LEAD_INTAKE_TIMEOUT_SECS";

/// Lead intake configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IntakeConfig {
    /// Intake endpoint receiving the JSON POST
    pub endpoint_url: String,
    /// `source` tag written into every payload
    pub source_tag: String,
    /// Transport timeout for one submission request
    pub request_timeout_secs: u64,
    /// Select-field validation strictness
    pub validation_mode: ValidationMode,
}

impl IntakeConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With endpoint URL
    #[inline]
    #[must_use]
    pub fn with_endpoint(mut self, url: impl Into<String>) -> Self {
        self.endpoint_url = url.into();
        self
    }

    /// With source tag
    #[inline]
    #[must_use]
    pub fn with_source_tag(mut self, tag: impl Into<String>) -> Self {
        self.source_tag = tag.into();
        self
    }

    /// With validation mode
    #[inline]
    #[must_use]
    pub fn with_validation_mode(mut self, mode: ValidationMode) -> Self {
        self.validation_mode = mode;
        self
    }

    /// Parse a TOML document; missing keys keep their defaults
    ///
    /// # Errors
    /// `ConfigError::Parse` for malformed TOML or unknown keys.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Read a TOML config file
    ///
    /// # Errors
    /// `ConfigError::Io` when the file cannot be read, `ConfigError::Parse`
    /// when it does not parse.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Apply overrides from an environment lookup
    ///
    /// # Errors
    /// `ConfigError::InvalidEnv` when the timeout override is not a number.
    pub fn apply_env<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_ENDPOINT_URL) {
            self.endpoint_url = url;
        }
        if let Some(tag) = lookup(ENV_SOURCE_TAG) {
            self.source_tag = tag;
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            self.request_timeout_secs =
                raw.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                    var: ENV_TIMEOUT_SECS,
                    value: raw.clone(),
                })?;
        }
        Ok(self)
    }

    /// Defaults, then `path` if given, then the process environment
    ///
    /// # Errors
    /// Any [`ConfigError`] from the layers or from [`IntakeConfig::validate`].
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let base = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        let config = base.apply_env(|var| std::env::var(var).ok())?;
        config.validate()?;
        tracing::debug!(endpoint = %config.endpoint_url, source = %config.source_tag, "intake config loaded");
        Ok(config)
    }

    /// Parsed endpoint URL
    ///
    /// # Errors
    /// `ConfigError::InvalidUrl` or `ConfigError::UnsupportedScheme`.
    pub fn endpoint(&self) -> Result<Url, ConfigError> {
        let url = Url::parse(&self.endpoint_url).map_err(|source| ConfigError::InvalidUrl {
            url: self.endpoint_url.clone(),
            source,
        })?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(ConfigError::UnsupportedScheme(other.to_string())),
        }
    }

    /// Check the configuration is usable
    ///
    /// # Errors
    /// Endpoint errors from [`IntakeConfig::endpoint`], or
    /// `ConfigError::InvalidTimeout` for a zero timeout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.endpoint()?;
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout);
        }
        Ok(())
    }

    /// True while the endpoint is still the documented placeholder
    #[inline]
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.endpoint_url == DEFAULT_ENDPOINT_URL
    }
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            endpoint_url: DEFAULT_ENDPOINT_URL.to_string(),
            source_tag: DEFAULT_SOURCE_TAG.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            validation_mode: ValidationMode::Presence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_are_valid_placeholder() {
        let config = IntakeConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.is_placeholder());
        assert_eq!(config.source_tag, "landing_page");
    }

    #[test]
    fn toml_overrides_defaults() {
        let config = IntakeConfig::from_toml_str(
            r#"
            endpoint_url = "https://hooks.example.com/leads"
            validation_mode = "strict"
            "#,
        )
        .unwrap();
        assert_eq!(config.endpoint_url, "https://hooks.example.com/leads");
        assert_eq!(config.validation_mode, ValidationMode::Strict);
        assert_eq!(config.request_timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert!(!config.is_placeholder());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = IntakeConfig::from_toml_str("webhook = \"x\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn env_overrides_file() {
        let config = IntakeConfig::default()
            .with_endpoint("https://file.example.com/")
            .apply_env(env(&[
                (ENV_ENDPOINT_URL, "https://env.example.com/hook"),
                (ENV_TIMEOUT_SECS, " 5 "),
            ]))
            .unwrap();
        assert_eq!(config.endpoint_url, "https://env.example.com/hook");
        assert_eq!(config.request_timeout_secs, 5);
        assert_eq!(config.source_tag, DEFAULT_SOURCE_TAG);
    }

    #[test]
    fn bad_timeout_env_is_reported() {
        let err = IntakeConfig::default()
            .apply_env(env(&[(ENV_TIMEOUT_SECS, "soon")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { var: ENV_TIMEOUT_SECS, .. }));
    }

    #[test]
    fn endpoint_must_be_http() {
        let err = IntakeConfig::default()
            .with_endpoint("ftp://example.com/")
            .validate()
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedScheme(s) if s == "ftp"));

        let err = IntakeConfig::default().with_endpoint("not a url").validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { .. }));
    }

    #[test]
    fn zero_timeout_is_invalid() {
        let config = IntakeConfig {
            request_timeout_secs: 0,
            ..IntakeConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidTimeout)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = IntakeConfig::from_file(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
