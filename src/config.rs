// Copyright (c) 2025 - Cowboy AI, Inc.
//! Ticker configuration
//!
//! The library itself never reads the environment. Callers build a
//! [`TickerConfig`] directly, deserialize one from JSON, or (in the
//! `item-ticker` binary) load overrides from environment variables.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::{TickerError, TickerResult};

/// Default interval between ticks
pub const DEFAULT_INTERVAL_MS: u64 = 2000;

/// Configuration for a tick source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TickerConfig {
    /// Milliseconds between consecutive ticks
    pub interval_ms: u64,
}

impl Default for TickerConfig {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_INTERVAL_MS,
        }
    }
}

impl TickerConfig {
    /// Create a configuration with the given interval in milliseconds
    pub fn with_interval_ms(interval_ms: u64) -> Self {
        Self { interval_ms }
    }

    /// Parse a configuration from JSON, filling missing fields with defaults
    pub fn from_json(json: &str) -> TickerResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration describes a usable timer
    pub fn validate(&self) -> TickerResult<()> {
        if self.interval_ms == 0 {
            return Err(TickerError::InvalidInterval);
        }
        Ok(())
    }

    /// The tick period as a [`Duration`]
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

/// Whole milliseconds in `duration`, saturating at `u64::MAX`
pub fn duration_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
