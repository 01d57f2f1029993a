//! Circular obstacles and the queries the planner runs against them

use serde::{Deserialize, Serialize};

use super::geometry::{point_segment_distance, Configuration};
use crate::error::{Result, RrtError};

/// Collision queries the planner needs from a world
pub trait ObstacleQuery {
    /// Check if the segment from `seg_start` to `seg_end` comes too close to an obstacle
    fn blocks(&self, seg_start: &Configuration, seg_end: &Configuration) -> bool;

    /// Check if a single configuration is too close to an obstacle
    fn point_blocked(&self, point: &Configuration) -> bool;
}

/// A circular obstacle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircleObstacle {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

impl CircleObstacle {
    pub fn new(x: f32, y: f32, radius: f32) -> Self {
        Self { x, y, radius }
    }

    pub fn center(&self) -> Configuration {
        Configuration::new(self.x, self.y)
    }
}

/// A fixed set of circular obstacles, inflated by a safety margin
#[derive(Debug, Clone, Default)]
pub struct ObstacleField {
    obstacles: Vec<CircleObstacle>,
    /// Added to every radius during collision checks
    margin: f32,
}

impl ObstacleField {
    /// Create a field from obstacles, rejecting negative radii
    pub fn new(obstacles: Vec<CircleObstacle>, margin: f32) -> Result<Self> {
        if let Some((index, obs)) = obstacles
            .iter()
            .enumerate()
            .find(|(_, obs)| !(obs.radius >= 0.0))
        {
            return Err(RrtError::NegativeRadius {
                index,
                radius: obs.radius,
            });
        }
        if !(margin >= 0.0) {
            return Err(RrtError::Config(format!(
                "margin must be non-negative, got {margin}"
            )));
        }
        Ok(Self { obstacles, margin })
    }

    /// An obstacle-free field
    pub fn empty(margin: f32) -> Self {
        Self {
            obstacles: Vec::new(),
            margin,
        }
    }

    /// Create a field from `(radius, center_x, center_y)` triples
    pub fn from_triples(triples: &[(f32, f32, f32)], margin: f32) -> Result<Self> {
        let obstacles = triples
            .iter()
            .map(|&(radius, x, y)| CircleObstacle::new(x, y, radius))
            .collect();
        Self::new(obstacles, margin)
    }

    pub fn obstacles(&self) -> &[CircleObstacle] {
        &self.obstacles
    }

    pub fn margin(&self) -> f32 {
        self.margin
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// Clearance threshold for one obstacle
    fn reach(&self, obs: &CircleObstacle) -> f32 {
        obs.radius + self.margin
    }
}

impl ObstacleQuery for ObstacleField {
    fn blocks(&self, seg_start: &Configuration, seg_end: &Configuration) -> bool {
        if seg_start == seg_end {
            return self.point_blocked(seg_start);
        }
        self.obstacles.iter().any(|obs| {
            point_segment_distance(&obs.center(), seg_start, seg_end) <= self.reach(obs)
        })
    }

    fn point_blocked(&self, point: &Configuration) -> bool {
        self.obstacles
            .iter()
            .any(|obs| obs.center().distance_to(point) <= self.reach(obs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_triples_ordering() {
        let field = ObstacleField::from_triples(&[(5.0, 20.0, 30.0)], 1.0).unwrap();
        assert_eq!(field.obstacles()[0], CircleObstacle::new(20.0, 30.0, 5.0));
        assert_eq!(field.len(), 1);
    }

    #[test]
    fn test_negative_radius_rejected() {
        let err = ObstacleField::from_triples(&[(1.0, 0.0, 0.0), (-2.0, 5.0, 5.0)], 0.0)
            .unwrap_err();
        assert!(matches!(err, RrtError::NegativeRadius { index: 1, .. }));
    }

    #[test]
    fn test_point_blocked_includes_margin() {
        let field = ObstacleField::from_triples(&[(40.0, 50.0, 50.0)], 3.0).unwrap();
        assert!(field.point_blocked(&Configuration::new(50.0, 50.0)));
        assert!(field.point_blocked(&Configuration::new(92.0, 50.0)));
        assert!(!field.point_blocked(&Configuration::new(94.0, 50.0)));
    }

    #[test]
    fn test_segment_passing_through_obstacle_blocked() {
        let field = ObstacleField::from_triples(&[(5.0, 50.0, 50.0)], 1.0).unwrap();
        // Both endpoints are clear but the segment passes over the center
        assert!(field.blocks(&Configuration::new(30.0, 50.0), &Configuration::new(70.0, 50.0)));
        // Grazes the inflated radius
        assert!(field.blocks(&Configuration::new(30.0, 56.0), &Configuration::new(70.0, 56.0)));
        assert!(!field.blocks(&Configuration::new(30.0, 57.0), &Configuration::new(70.0, 57.0)));
    }

    #[test]
    fn test_segment_checked_against_nearest_endpoint() {
        let field = ObstacleField::from_triples(&[(2.0, 0.0, 0.0)], 0.0).unwrap();
        // Projection falls before the start, so the start is what counts
        assert!(field.blocks(&Configuration::new(1.5, 0.0), &Configuration::new(10.0, 0.0)));
        assert!(!field.blocks(&Configuration::new(2.5, 0.0), &Configuration::new(10.0, 0.0)));
    }

    #[test]
    fn test_empty_field_blocks_nothing() {
        let field = ObstacleField::empty(3.0);
        assert!(field.is_empty());
        assert!(!field.point_blocked(&Configuration::new(0.0, 0.0)));
        assert!(!field.blocks(&Configuration::new(0.0, 0.0), &Configuration::new(9.0, 9.0)));
    }
}
