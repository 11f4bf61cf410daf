//! Bot configuration.
//!
//! Region, account, and project references live here and are passed into
//! adapters at construction; command definitions never see literals.

use crate::reply::domain::ProjectRef;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_RECONCILE_TIMEOUT_SECS: u64 = 30;

/// Error returned when a configuration file cannot be parsed.
#[derive(Debug, Error)]
#[error("invalid configuration: {0}")]
pub struct ConfigError(#[from] toml::de::Error);

/// Location of the external job service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JobSettings {
    /// Service region.
    pub region: String,
    /// Account identifier the build projects live under.
    pub account_id: String,
}

/// Build project references, one per command.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JobProjects {
    /// Project that builds pull request images.
    pub build: ProjectRef,
    /// Project that deploys preview environments.
    pub preview: ProjectRef,
}

/// Top-level bot configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BotConfig {
    /// Job service location.
    pub jobs: JobSettings,
    /// Build project references.
    pub projects: JobProjects,
    /// Budget for a single reconciliation pass, in seconds.
    #[serde(default = "default_reconcile_timeout_secs")]
    pub reconcile_timeout_secs: u64,
}

const fn default_reconcile_timeout_secs() -> u64 {
    DEFAULT_RECONCILE_TIMEOUT_SECS
}

impl BotConfig {
    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the text is not valid TOML or is missing
    /// required fields.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Returns the reconciliation pass budget as a [`Duration`].
    #[must_use]
    pub const fn reconcile_timeout(&self) -> Duration {
        Duration::from_secs(self.reconcile_timeout_secs)
    }
}
