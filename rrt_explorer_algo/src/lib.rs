//! Rapidly-exploring random tree exploration of 2D worlds with circular obstacles.
//!
//! ```no_run
//! use rrt_explorer_algo::prelude::*;
//!
//! let config = RrtConfig {
//!     seed: Some(42),
//!     ..Default::default()
//! };
//! let field = ObstacleField::from_triples(&[(10.0, 50.0, 50.0)], config.margin())?;
//! let planner = RrtPlanner::new(&field, config)?;
//! let result = planner.plan(Configuration::new(10.0, 10.0), Some(Configuration::new(90.0, 90.0)))?;
//! if let Some(route) = result.route {
//!     println!("{} waypoints, length {:.1}", route.len(), route.length());
//! }
//! # Ok::<(), rrt_explorer_algo::RrtError>(())
//! ```

pub mod config;
pub mod error;
pub mod path_planning;

pub mod prelude {
    pub use crate::config::{ExplorerConfig, RrtConfig, WorldConfig};
    pub use crate::error::{Result, RrtError};
    pub use crate::path_planning::{
        extract_route, random_world, CircleObstacle, Configuration, ObstacleField,
        ObstacleQuery, PlannerState, Route, RrtPlanner, RrtResult, RrtRun, RrtStats, Tree,
    };
}

pub use prelude::*;
