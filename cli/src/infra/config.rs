//! Infrastructure implementation of the `ConfigSource` port.

use anyhow::{Context, Result};

use crate::application::ports::ConfigSource;
use crate::domain::WardenConfig;
use crate::domain::config::ENV_PREFIX;

/// Reads `WARDEN_*` environment variables via `envy`.
pub struct EnvConfigSource {
    prefix: String,
}

impl Default for EnvConfigSource {
    fn default() -> Self {
        Self {
            prefix: ENV_PREFIX.to_string(),
        }
    }
}

impl EnvConfigSource {
    /// Source reading variables under a custom prefix.
    #[must_use]
    pub fn with_prefix(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
        }
    }
}

impl ConfigSource for EnvConfigSource {
    fn load(&self) -> Result<WardenConfig> {
        let config: WardenConfig = envy::prefixed(self.prefix.as_str())
            .from_env()
            .with_context(|| format!("failed to load config from {}* env vars", self.prefix))?;
        let config = config.validated()?;
        tracing::debug!(?config, "configuration loaded");
        Ok(config)
    }
}
