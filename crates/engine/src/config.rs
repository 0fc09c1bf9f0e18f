//! Session configuration from environment variables.

use std::env;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::input::DEFAULT_KEY_RELEASE_TIMEOUT_MS;

/// Session configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Bag randomizer seed; None derives one from the clock
    pub seed: Option<u32>,
    /// JSON-lines event log destination; None disables the log
    pub log_path: Option<String>,
    /// Synthetic key-release timeout for terminals without release events
    pub key_release_ms: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: None,
            log_path: None,
            key_release_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }
}

impl SessionConfig {
    /// Create from `GRIDFALL_*` environment variables.
    ///
    /// Unset or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Create from an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let seed = lookup("GRIDFALL_SEED").and_then(|s| s.trim().parse().ok());

        let log_path = lookup("GRIDFALL_LOG_PATH")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let key_release_ms = lookup("GRIDFALL_KEY_RELEASE_MS")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(DEFAULT_KEY_RELEASE_TIMEOUT_MS);

        Self {
            seed,
            log_path,
            key_release_ms,
        }
    }

    /// The configured seed, or one derived from the current time
    pub fn resolve_seed(&self) -> u32 {
        self.seed.unwrap_or_else(clock_seed)
    }
}

fn clock_seed() -> u32 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    (now.as_secs() as u32) ^ now.subsec_nanos()
}
