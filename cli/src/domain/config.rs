//! Runtime configuration schema and validation.
//!
//! Pure functions only; no I/O. Loading from the environment lives in
//! `crate::infra::config`.

use std::fmt;
use std::time::Duration;

use serde::Deserialize;

use crate::domain::error::ConfigError;
use crate::domain::migration::{MigrationPolicy, ReleaseCheck};

// ── Constants ────────────────────────────────────────────────────────────────

pub const ENV_PREFIX: &str = "WARDEN_";
pub const DEFAULT_BASE_URL: &str = "https://api.fuze.com/oss/v1/";
pub const DEFAULT_PAGE_LIMIT: u32 = 1000;

// ── Config schema ────────────────────────────────────────────────────────────

/// Settings read once at start-up from `WARDEN_*` variables.
#[derive(Clone, Deserialize)]
pub struct WardenConfig {
    /// Provider bearer token (`WARDEN_BEARER_TOKEN`).
    #[serde(default)]
    pub bearer_token: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Page-size cap for the active-service listing.
    #[serde(default = "default_page_limit")]
    pub page_limit: u32,

    #[serde(default = "default_cooldown_secs")]
    pub cooldown_secs: u64,

    /// Enables poll-until-released when set to a positive count.
    #[serde(default)]
    pub release_poll_attempts: Option<u32>,

    #[serde(default = "default_release_poll_interval_secs")]
    pub release_poll_interval_secs: u64,

    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_page_limit() -> u32 {
    DEFAULT_PAGE_LIMIT
}

fn default_cooldown_secs() -> u64 {
    crate::domain::migration::DEFAULT_COOLDOWN.as_secs()
}

fn default_release_poll_interval_secs() -> u64 {
    crate::domain::migration::DEFAULT_RELEASE_POLL_INTERVAL.as_secs()
}

fn default_http_timeout_secs() -> u64 {
    30
}

impl Default for WardenConfig {
    fn default() -> Self {
        Self {
            bearer_token: String::new(),
            base_url: default_base_url(),
            page_limit: default_page_limit(),
            cooldown_secs: default_cooldown_secs(),
            release_poll_attempts: None,
            release_poll_interval_secs: default_release_poll_interval_secs(),
            http_timeout_secs: default_http_timeout_secs(),
        }
    }
}

impl fmt::Debug for WardenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WardenConfig")
            .field("bearer_token", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("page_limit", &self.page_limit)
            .field("cooldown_secs", &self.cooldown_secs)
            .field("release_poll_attempts", &self.release_poll_attempts)
            .field("release_poll_interval_secs", &self.release_poll_interval_secs)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .finish()
    }
}

impl WardenConfig {
    /// Check required values and normalise the base URL to end with `/`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for a missing token, an empty base URL, a zero
    /// page limit, or a zero cooldown.
    pub fn validated(mut self) -> Result<Self, ConfigError> {
        self.bearer_token = self.bearer_token.trim().to_string();
        if self.bearer_token.is_empty() {
            return Err(ConfigError::MissingToken);
        }
        let base = self.base_url.trim();
        if base.is_empty() {
            return Err(ConfigError::Invalid {
                key: "WARDEN_BASE_URL".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        self.base_url = if base.ends_with('/') {
            base.to_string()
        } else {
            format!("{base}/")
        };
        if self.page_limit == 0 {
            return Err(ConfigError::Invalid {
                key: "WARDEN_PAGE_LIMIT".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if self.cooldown_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "WARDEN_COOLDOWN_SECS".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(self)
    }

    /// Cooldown and release-check settings for the migration engine.
    #[must_use]
    pub fn migration_policy(&self) -> MigrationPolicy {
        let release_check = match self.release_poll_attempts {
            Some(attempts) if attempts > 0 => ReleaseCheck::Poll {
                interval: Duration::from_secs(self.release_poll_interval_secs),
                attempts,
            },
            _ => ReleaseCheck::None,
        };
        MigrationPolicy {
            cooldown: Duration::from_secs(self.cooldown_secs),
            release_check,
        }
    }

    #[must_use]
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
