//! Planner and world configuration
//!
//! Both sections deserialize from TOML. Missing fields fall back to the
//! values of the `Default` impls, so a partial file is valid.
//!
//! ```toml
//! [planner]
//! workspace_extent = 100.0
//! step_bound = 0.3
//! max_iterations = 1000
//!
//! [world]
//! count = 10
//! mean_radius = 8.0
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, RrtError};

/// Configuration for the RRT planner
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RrtConfig {
    /// Side length of the square workspace `[0, extent]²`
    pub workspace_extent: f32,
    /// Step bound as a fraction of the workspace extent, in (0, 1]
    pub step_bound: f32,
    /// Safety margin as a fraction of the workspace extent.
    /// Inflates obstacles, sets the minimum motion and the goal tolerance.
    pub margin_fraction: f32,
    /// Number of non-goal insertions before the run is exhausted
    pub max_iterations: usize,
    /// Cap on extension attempts, accepted or rejected (None for no cap)
    pub max_attempts: Option<usize>,
    /// Probability of sampling the goal (0.0 to 1.0)
    pub goal_sample_rate: f32,
    /// Random seed (None for random)
    pub seed: Option<u64>,
}

impl Default for RrtConfig {
    fn default() -> Self {
        Self {
            workspace_extent: 100.0,
            step_bound: 0.3,
            margin_fraction: 0.03,
            max_iterations: 1000,
            max_attempts: Some(200_000),
            goal_sample_rate: 0.0,
            seed: None,
        }
    }
}

impl RrtConfig {
    /// Absolute safety margin in workspace units
    pub fn margin(&self) -> f32 {
        self.workspace_extent * self.margin_fraction
    }

    /// Absolute step bound in workspace units
    pub fn step_length(&self) -> f32 {
        self.workspace_extent * self.step_bound
    }

    /// Check every parameter is in range
    pub fn validate(&self) -> Result<()> {
        if !(self.workspace_extent.is_finite() && self.workspace_extent > 0.0) {
            return Err(RrtError::Config(format!(
                "workspace_extent must be positive, got {}",
                self.workspace_extent
            )));
        }
        if !(self.step_bound > 0.0 && self.step_bound <= 1.0) {
            return Err(RrtError::Config(format!(
                "step_bound must be in (0, 1], got {}",
                self.step_bound
            )));
        }
        if !(self.margin_fraction >= 0.0 && self.margin_fraction < 1.0) {
            return Err(RrtError::Config(format!(
                "margin_fraction must be in [0, 1), got {}",
                self.margin_fraction
            )));
        }
        if !(0.0..=1.0).contains(&self.goal_sample_rate) {
            return Err(RrtError::Config(format!(
                "goal_sample_rate must be in [0, 1], got {}",
                self.goal_sample_rate
            )));
        }
        if self.max_iterations == 0 {
            return Err(RrtError::Config("max_iterations must be positive".into()));
        }
        if self.max_attempts == Some(0) {
            return Err(RrtError::Config("max_attempts must be positive".into()));
        }
        Ok(())
    }
}

/// Settings for random obstacle-field generation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Number of circles
    pub count: usize,
    /// Mean circle radius; also keeps centers this far from the border
    pub mean_radius: f32,
    /// Standard deviation of the circle radius
    pub radius_std: f32,
    /// Fields to draw before giving up on keeping start and goal open
    pub max_attempts: usize,
    /// Random seed (None for random)
    pub seed: Option<u64>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            count: 10,
            mean_radius: 8.0,
            radius_std: 3.0,
            max_attempts: 1000,
            seed: None,
        }
    }
}

impl WorldConfig {
    pub fn validate(&self, workspace_extent: f32) -> Result<()> {
        if !(self.mean_radius >= 0.0 && 2.0 * self.mean_radius <= workspace_extent) {
            return Err(RrtError::Config(format!(
                "mean_radius must be in [0, extent / 2], got {}",
                self.mean_radius
            )));
        }
        if !(self.radius_std.is_finite() && self.radius_std >= 0.0) {
            return Err(RrtError::Config(format!(
                "radius_std must be non-negative, got {}",
                self.radius_std
            )));
        }
        if self.max_attempts == 0 {
            return Err(RrtError::Config("max_attempts must be positive".into()));
        }
        Ok(())
    }
}

/// Top-level configuration file layout
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    pub planner: RrtConfig,
    pub world: WorldConfig,
}

impl ExplorerConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: ExplorerConfig = toml::from_str(text)?;
        config.planner.validate()?;
        config.world.validate(config.planner.workspace_extent)?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| RrtError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}
