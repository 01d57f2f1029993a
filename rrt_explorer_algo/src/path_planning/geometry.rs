//! Planar geometry primitives used by the collision gate

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// A point in the planning space
///
/// Equality is exact coordinate equality; the tree never matches vertices
/// within a tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    pub x: f32,
    pub y: f32,
}

impl Configuration {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another configuration
    pub fn distance_to(&self, other: &Configuration) -> f32 {
        (self.to_vector() - other.to_vector()).norm()
    }

    pub fn to_vector(self) -> Vector2<f32> {
        Vector2::new(self.x, self.y)
    }

    pub fn from_vector(v: Vector2<f32>) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<(f32, f32)> for Configuration {
    fn from((x, y): (f32, f32)) -> Self {
        Self::new(x, y)
    }
}

impl From<Configuration> for (f32, f32) {
    fn from(c: Configuration) -> Self {
        (c.x, c.y)
    }
}

/// Distance from `point` to the closest point of the segment `seg_start`-`seg_end`
///
/// The segment must have non-zero length.
pub fn point_segment_distance(
    point: &Configuration,
    seg_start: &Configuration,
    seg_end: &Configuration,
) -> f32 {
    let p = point.to_vector();
    let a = seg_start.to_vector();
    let b = seg_end.to_vector();
    let ab = b - a;

    // Projection factor onto the infinite line through the segment
    let u = (p - a).dot(&ab) / ab.norm_squared();

    if u > 0.0 && u < 1.0 {
        (p - (a + ab * u)).norm()
    } else if u >= 1.0 {
        (p - b).norm()
    } else {
        (p - a).norm()
    }
}

/// Check whether segment `a1`-`a2` crosses segment `b1`-`b2`
///
/// Parallel and collinear segments never intersect. Segments that only touch
/// at a shared endpoint do not intersect either, so two tree edges meeting at
/// a common vertex are not a crossing.
pub fn segments_intersect(
    a1: &Configuration,
    a2: &Configuration,
    b1: &Configuration,
    b2: &Configuration,
) -> bool {
    // Non-parallel segments sharing an endpoint can only meet there. Checking
    // it exactly keeps rounding in the parametric form from reporting a touch
    // as a crossing.
    if a1 == b1 || a1 == b2 || a2 == b1 || a2 == b2 {
        return false;
    }

    let da = a2.to_vector() - a1.to_vector();
    let db = b2.to_vector() - b1.to_vector();
    let offset = a1.to_vector() - b1.to_vector();

    let de = db.y * da.x - db.x * da.y;
    if de == 0.0 {
        return false;
    }

    let u1 = (db.x * offset.y - db.y * offset.x) / de;
    let u2 = (da.x * offset.y - da.y * offset.x) / de;

    let at_end = |u: f32| u == 0.0 || u == 1.0;
    if at_end(u1) && at_end(u2) {
        return false;
    }

    (0.0..=1.0).contains(&u1) && (0.0..=1.0).contains(&u2)
}
