//! Path planning in continuous 2D space
//!
//! This module provides a Rapidly-exploring Random Tree planner and its parts:
//! - geometry primitives (point-segment distance, segment crossing)
//! - obstacle fields of inflated circles, random or loaded from an image
//! - the arena tree store with nearest-vertex queries
//! - the RRT planner loop and route extraction

pub mod geometry;
pub mod obstacle;
pub mod route;
pub mod rrt;
pub mod tree;
pub mod world;

pub use geometry::{point_segment_distance, segments_intersect, Configuration};
pub use obstacle::{CircleObstacle, ObstacleField, ObstacleQuery};
pub use route::{extract_route, Route};
pub use rrt::{
    Extension, PlannerState, Rejection, RrtPlanner, RrtResult, RrtRun, RrtStats,
};
pub use tree::{RrtNode, Tree};
pub use world::{generate_circles, random_world};
