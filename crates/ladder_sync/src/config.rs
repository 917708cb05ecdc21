//! Engine configuration.

use ladder_error::{ConfigError, ConfigErrorKind, LadderResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Configuration for the sync pipeline, scheduler, and reconciler.
///
/// All fields have defaults matching the engine's contract: a 60 second
/// sweep tick, a worker pool capped at 5, and up to 5 seconds of pacing
/// jitter between remote lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Seconds between sweep-loop ticks
    pub sweep_interval_secs: u64,
    /// Seconds to wait after startup before the first sweep
    pub startup_grace_secs: u64,
    /// Accounts whose history is older than this many seconds are due
    pub stale_after_secs: u64,
    /// Worker-pool concurrency cap
    pub max_workers: usize,
    /// Upper bound of the uniform pacing jitter, in seconds
    pub jitter_max_secs: u64,
    /// Local hour (0-23) at which the daily task becomes due
    pub daily_hour: u32,
    /// Seconds to wait for a channel create/delete confirmation
    pub confirm_timeout_secs: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            sweep_interval_secs: 60,
            startup_grace_secs: 10,
            stale_after_secs: 3600,
            max_workers: 5,
            jitter_max_secs: 5,
            daily_hour: 9,
            confirm_timeout_secs: 10,
        }
    }
}

impl SyncConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> LadderResult<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            ConfigError::new(ConfigErrorKind::Read(format!(
                "{}: {}",
                path.as_ref().display(),
                e
            )))
        })?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(ConfigErrorKind::Parse(e.to_string())))?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    pub fn validate(&self) -> LadderResult<()> {
        if self.daily_hour > 23 {
            return Err(ConfigError::new(ConfigErrorKind::Invalid(format!(
                "daily_hour must be 0-23, got {}",
                self.daily_hour
            )))
            .into());
        }
        if self.max_workers == 0 {
            return Err(
                ConfigError::new(ConfigErrorKind::Invalid("max_workers must be at least 1".into()))
                    .into(),
            );
        }
        Ok(())
    }

    /// Sweep-loop tick interval.
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }

    /// Startup grace before the first sweep.
    pub fn startup_grace(&self) -> Duration {
        Duration::from_secs(self.startup_grace_secs)
    }

    /// Staleness threshold as a chrono duration.
    pub fn stale_after(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.stale_after_secs as i64)
    }

    /// Upper bound of the pacing jitter.
    pub fn jitter_max(&self) -> Duration {
        Duration::from_secs(self.jitter_max_secs)
    }

    /// Confirmation deadline for channel create/delete.
    pub fn confirm_timeout(&self) -> Duration {
        Duration::from_secs(self.confirm_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_contract() {
        let config = SyncConfig::default();
        assert_eq!(config.sweep_interval_secs, 60);
        assert_eq!(config.max_workers, 5);
        assert_eq!(config.jitter_max_secs, 5);
        assert_eq!(config.daily_hour, 9);
        config.validate().unwrap();
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: SyncConfig = toml::from_str("stale_after_secs = 120").unwrap();
        assert_eq!(config.stale_after_secs, 120);
        assert_eq!(config.max_workers, 5);
    }

    #[test]
    fn test_validate_rejects_bad_hour() {
        let config = SyncConfig {
            daily_hour: 24,
            ..SyncConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
