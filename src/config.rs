//! Run settings for the headless CLI.
//!
//! Read from the environment first; command-line flags override individual
//! fields afterwards.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::{SystemTime, UNIX_EPOCH};

const DEFAULT_WIDTH: f64 = 1280.0;
const DEFAULT_HEIGHT: f64 = 800.0;
const DEFAULT_COLLECTION: &str = "prototypes";

/// Settings for one headless run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    /// Stage width in CSS pixels.
    pub width: f64,
    /// Stage height in CSS pixels.
    pub height: f64,
    /// Placement seed; `None` picks one from the clock.
    pub seed: Option<u64>,
    /// Overrides the engine's spread-out stagger.
    pub stagger_ms: Option<u64>,
    /// Collection to load.
    pub collection: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            seed: None,
            stagger_ms: None,
            collection: DEFAULT_COLLECTION.to_owned(),
        }
    }
}

impl RunConfig {
    /// Build from `FOLIO_*` environment variables. Unset or unparsable values
    /// fall back to defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            width: env_parse("FOLIO_WIDTH", defaults.width),
            height: env_parse("FOLIO_HEIGHT", defaults.height),
            seed: env_parse_opt("FOLIO_SEED"),
            stagger_ms: env_parse_opt("FOLIO_STAGGER_MS"),
            collection: std::env::var("FOLIO_COLLECTION").unwrap_or(defaults.collection),
        }
    }

    /// The configured seed, or one derived from the current time.
    #[must_use]
    pub fn seed_or_clock(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map_or(0, |d| u64::try_from(d.as_nanos()).unwrap_or(u64::MAX))
        })
    }
}

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    env_parse_opt(key).unwrap_or(default)
}

pub(crate) fn env_parse_opt<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    std::env::var(key).ok().and_then(|v| v.trim().parse::<T>().ok())
}
