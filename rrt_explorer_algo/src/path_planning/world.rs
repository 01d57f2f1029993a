//! Obstacle worlds: random circle fields and occupancy images

use std::path::Path;

use image::{GrayImage, ImageError};
use rand::distributions::Uniform;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use tracing::debug;

use super::geometry::Configuration;
use super::obstacle::{CircleObstacle, ObstacleField, ObstacleQuery};
use crate::config::{RrtConfig, WorldConfig};
use crate::error::{Result, RrtError};

/// Radius of the circle standing in for one occupied image cell
const CELL_RADIUS: f32 = 0.5;

/// Draw `count` random circles inside `[0, extent]²`
///
/// Centers are uniform in `[mean, extent - mean]²`; radii follow
/// Normal(mean, std) and are clamped at zero.
pub fn generate_circles<R: Rng + ?Sized>(
    count: usize,
    mean: f32,
    std: f32,
    extent: f32,
    rng: &mut R,
) -> Result<Vec<CircleObstacle>> {
    if !(extent.is_finite() && mean >= 0.0 && 2.0 * mean <= extent) {
        return Err(RrtError::Config(format!(
            "mean radius {mean} does not fit a workspace of extent {extent}"
        )));
    }
    let center_dist = Uniform::new_inclusive(mean, extent - mean);
    let radius_dist = Normal::new(mean, std).map_err(|e| RrtError::Config(e.to_string()))?;

    Ok((0..count)
        .map(|_| {
            let x = center_dist.sample(rng);
            let y = center_dist.sample(rng);
            CircleObstacle::new(x, y, radius_dist.sample(rng).max(0.0))
        })
        .collect())
}

/// Generate a random field that leaves `start` and `goal` in open space
pub fn random_world(
    world: &WorldConfig,
    planner: &RrtConfig,
    start: &Configuration,
    goal: Option<&Configuration>,
) -> Result<ObstacleField> {
    world.validate(planner.workspace_extent)?;
    let mut rng = match world.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    for attempt in 1..=world.max_attempts {
        let circles = generate_circles(
            world.count,
            world.mean_radius,
            world.radius_std,
            planner.workspace_extent,
            &mut rng,
        )?;
        let field = ObstacleField::new(circles, planner.margin())?;
        let open = !field.point_blocked(start) && !goal.is_some_and(|g| field.point_blocked(g));
        if open {
            debug!("random world accepted after {} attempt(s)", attempt);
            return Ok(field);
        }
        debug!("random world {} blocks start or goal, regenerating", attempt);
    }

    Err(RrtError::WorldGeneration(world.max_attempts))
}

impl ObstacleField {
    /// Build a field from a square occupancy image
    ///
    /// `rows[0]` is the top row of the image. Every occupied cell becomes a
    /// circle of radius 0.5 at its center, with world y growing upward.
    /// Returns the field and the workspace extent (the image side length).
    pub fn from_occupancy(rows: &[Vec<bool>], margin_fraction: f32) -> Result<(Self, f32)> {
        let size = rows.len();
        if size == 0 {
            return Err(RrtError::Image("image has no rows".into()));
        }
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != size) {
            return Err(RrtError::Image(format!(
                "image must be square: row {} has {} cells, expected {}",
                i,
                row.len(),
                size
            )));
        }

        let obstacles = rows
            .iter()
            .enumerate()
            .flat_map(|(row_idx, row)| {
                let y = (size - 1 - row_idx) as f32 + CELL_RADIUS;
                row.iter()
                    .enumerate()
                    .filter(|&(_, &occupied)| occupied)
                    .map(move |(x, _)| CircleObstacle::new(x as f32 + CELL_RADIUS, y, CELL_RADIUS))
            })
            .collect();

        let extent = size as f32;
        Ok((Self::new(obstacles, extent * margin_fraction)?, extent))
    }

    /// Build a field from a grayscale occupancy image, where black (0) is occupied
    pub fn from_luma(pixels: &GrayImage, margin_fraction: f32) -> Result<(Self, f32)> {
        let rows: Vec<Vec<bool>> = pixels
            .rows()
            .map(|row| row.map(|pixel| pixel.0[0] == 0).collect())
            .collect();
        Self::from_occupancy(&rows, margin_fraction)
    }

    /// Load a field from a square image file (PNG, PGM, ...)
    ///
    /// Color images are converted to grayscale first; only pure black pixels
    /// become obstacles.
    pub fn from_image(path: impl AsRef<Path>, margin_fraction: f32) -> Result<(Self, f32)> {
        let path = path.as_ref();
        let pixels = image::open(path)
            .map_err(|e| match e {
                ImageError::IoError(source) => RrtError::Io {
                    path: path.to_path_buf(),
                    source,
                },
                other => RrtError::Image(format!(
                    "failed to load map image {}: {}",
                    path.display(),
                    other
                )),
            })?
            .to_luma8();
        debug!(
            "loaded map image {} ({}x{})",
            path.display(),
            pixels.width(),
            pixels.height()
        );
        Self::from_luma(&pixels, margin_fraction)
    }
}
