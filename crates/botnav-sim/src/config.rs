//! Simulation settings.

use std::time::Duration;

use botnav_paths::SearchBudget;

use crate::error::ConfigError;

/// Default grid side length.
pub const DEFAULT_GRID_SIZE: i32 = 10;
/// Default obstacle quota.
pub const DEFAULT_MAX_OBSTACLES: usize = 5;
/// Default delay between two bot moves.
pub const DEFAULT_STEP_INTERVAL: Duration = Duration::from_millis(1000);

/// Settings for a [`Session`](crate::Session).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Side length of the square grid.
    pub grid_size: i32,
    /// How many obstacles the user may place.
    pub max_obstacles: usize,
    /// Delay between two bot moves during animation.
    #[cfg_attr(feature = "serde", serde(with = "millis", rename = "step_interval_ms"))]
    pub step_interval: Duration,
    /// Expansion cap for each path search.
    pub search_budget: SearchBudget,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            max_obstacles: DEFAULT_MAX_OBSTACLES,
            step_interval: DEFAULT_STEP_INTERVAL,
            search_budget: SearchBudget::UNLIMITED,
        }
    }
}

impl SimConfig {
    pub fn with_grid_size(mut self, size: i32) -> Self {
        self.grid_size = size;
        self
    }

    pub fn with_max_obstacles(mut self, n: usize) -> Self {
        self.max_obstacles = n;
        self
    }

    pub fn with_step_interval(mut self, interval: Duration) -> Self {
        self.step_interval = interval;
        self
    }

    pub fn with_search_budget(mut self, budget: SearchBudget) -> Self {
        self.search_budget = budget;
        self
    }

    /// Cells left for obstacles once source and destination are placed.
    pub fn obstacle_capacity(&self) -> usize {
        let n = self.grid_size.max(0) as usize;
        (n * n).saturating_sub(2)
    }

    /// Check that the settings describe a usable session.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size < 1 {
            return Err(ConfigError::InvalidGridSize {
                size: self.grid_size,
            });
        }
        let capacity = self.obstacle_capacity();
        if self.max_obstacles > capacity {
            return Err(ConfigError::TooManyObstacles {
                max_obstacles: self.max_obstacles,
                capacity,
            });
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}
