//! Error types for the RRT explorer

use std::path::PathBuf;

use thiserror::Error;

/// RRT explorer error type
#[derive(Error, Debug)]
pub enum RrtError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Start configuration ({x}, {y}) is not in open space")]
    StartBlocked { x: f32, y: f32 },

    #[error("Goal configuration ({x}, {y}) is not in open space")]
    GoalBlocked { x: f32, y: f32 },

    #[error("Obstacle {index} has negative radius {radius}")]
    NegativeRadius { index: usize, radius: f32 },

    #[error("Vertex ({x}, {y}) is already in the tree")]
    DuplicateVertex { x: f32, y: f32 },

    #[error("Parent node {0} is not in the tree")]
    UnknownParent(usize),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed occupancy image: {0}")]
    Image(String),

    #[error("No obstacle field leaves start and goal open after {0} attempts")]
    WorldGeneration(usize),
}

impl From<toml::de::Error> for RrtError {
    fn from(e: toml::de::Error) -> Self {
        RrtError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RrtError>;
