//! Configuration types for the valley.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How the tick driver walks the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TickOrder {
    /// Re-read every cell as the raster scan reaches it. A unit that moved
    /// ahead of the scan acts again, and units born mid-tick act when reached.
    #[default]
    LiveScan,
    /// Only units present when the tick starts act, each at most once.
    Snapshot,
}

/// Valley configuration parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValleyConfig {
    /// Side length of the square grid
    pub size: i32,
    /// Random seed for reproducibility
    pub seed: u64,
    /// Raster scan semantics
    pub tick_order: TickOrder,
}

impl Default for ValleyConfig {
    fn default() -> Self {
        Self {
            size: 25,
            seed: 0,
            tick_order: TickOrder::LiveScan,
        }
    }
}

impl ValleyConfig {
    pub fn validate(&self) -> Result<()> {
        if self.size < 1 {
            return Err(Error::InvalidConfig(format!(
                "valley size must be at least 1, got {}",
                self.size
            )));
        }
        Ok(())
    }
}

/// Driving loop configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Number of ticks to run
    pub num_ticks: u64,
    /// Log a population census every this many ticks (0 disables)
    pub log_every: u64,
    /// Valley configuration
    pub valley: ValleyConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            num_ticks: 100,
            log_every: 10,
            valley: ValleyConfig::default(),
        }
    }
}

impl RunConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: RunConfig = serde_json::from_str(json)?;
        config.valley.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
