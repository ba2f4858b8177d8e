use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::types::SiteConfig;
use crate::form::FormKind;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config from {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    Invalid { message: String },
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        message: message.into(),
    }
}

impl SiteConfig {
    /// Reads, parses and validates the file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content, &path.display().to_string())
    }

    /// Parses and validates TOML held in memory.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Self::parse(content, "inline TOML")
    }

    fn parse(content: &str, origin: &str) -> Result<Self, ConfigError> {
        let config: SiteConfig = toml::from_str(content).map_err(|e| ConfigError::Parse {
            origin: origin.to_string(),
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - Service, account and template identifiers are non-empty
    /// - Every timing is non-zero, except the optional manual cooldown
    /// - Mandatory-field overrides only name fields the form has
    pub fn validate(&self) -> Result<(), ConfigError> {
        let n = &self.notification;
        for (name, value) in [
            ("notification.service_id", &n.service_id),
            ("notification.user_id", &n.user_id),
            ("notification.endpoint", &n.endpoint),
            ("notification.templates.trial", &n.templates.trial),
            ("notification.templates.rental", &n.templates.rental),
        ] {
            if value.trim().is_empty() {
                return Err(invalid(format!("'{}' must not be empty", name)));
            }
        }
        if n.timeout_seconds == Some(0) {
            return Err(invalid("'notification.timeout_seconds' must be greater than zero"));
        }

        let t = &self.timing;
        for (name, value) in [
            ("timing.hero_interval_ms", t.hero_interval_ms),
            ("timing.testimonial_interval_ms", t.testimonial_interval_ms),
            ("timing.branch_interval_ms", t.branch_interval_ms),
            ("timing.success_reset_ms", t.success_reset_ms),
            ("timing.counter_duration_ms", t.counter_duration_ms),
            ("timing.frame_interval_ms", t.frame_interval_ms),
        ] {
            if value == 0 {
                return Err(invalid(format!("'{}' must be greater than zero", name)));
            }
        }

        for kind in [FormKind::Trial, FormKind::Rental, FormKind::Join] {
            self.forms
                .schema_for(kind)
                .map_err(|e| invalid(format!("forms.{}: {}", kind, e)))?;
        }

        Ok(())
    }
}
