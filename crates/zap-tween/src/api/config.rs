use serde::{Deserialize, Serialize};
use super::error::Result;

/// Configuration for a transition scheduler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Multiplier applied to `dt` for transitions using `Timing::Scaled` (default: 1.0).
    pub time_scale: f32,
    /// Maximum number of idle states kept per state kind (default: 64).
    /// States released beyond this are dropped.
    pub max_idle_per_pool: usize,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            time_scale: 1.0,
            max_idle_per_pool: 64,
        }
    }
}

impl SchedulerConfig {
    /// Parse a config from a JSON string. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_time_scale(mut self, time_scale: f32) -> Self {
        self.time_scale = time_scale;
        self
    }

    pub fn with_max_idle_per_pool(mut self, max_idle: usize) -> Self {
        self.max_idle_per_pool = max_idle;
        self
    }
}
