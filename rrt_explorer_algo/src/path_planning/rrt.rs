//! RRT (Rapidly-exploring Random Tree) path planning algorithm
//!
//! Works in a continuous square workspace with circular obstacles. The tree
//! only ever holds collision-free edges that do not cross each other.
//!
//! Each extension samples a point, finds its nearest vertex and moves from
//! that vertex toward the sample by `d mod step_length`, where `d` is the
//! sampled distance. This is a remainder, not a clamp: a sample 70 units
//! away with a 30 unit step produces a 10 unit edge.

use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, trace, warn};

use super::geometry::{segments_intersect, Configuration};
use super::obstacle::{ObstacleField, ObstacleQuery};
use super::route::{extract_route, Route};
use super::tree::Tree;
use crate::config::RrtConfig;
use crate::error::{Result, RrtError};

/// State of a planning run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannerState {
    /// Still extending the tree
    Running,
    /// The goal is connected to the tree
    Succeeded,
    /// Budget spent without reaching the goal
    Exhausted,
}

/// Why an extension attempt added nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// No vertex other than the sample itself
    NoNearest,
    /// Sample within the minimum motion of its nearest vertex
    TooShort,
    /// Truncated point is already a vertex
    DuplicateVertex,
    /// Edge comes within the margin of an obstacle
    ObstacleCollision,
    /// Edge crosses an existing tree edge
    EdgeCrossing,
}

/// Outcome of a single extension attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extension {
    Rejected(Rejection),
    /// New vertex id
    Inserted(usize),
    /// New vertex id; the goal now hangs off it (or is it)
    ReachedGoal(usize),
}

/// Counters for one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RrtStats {
    pub attempts: usize,
    pub insertions: usize,
    pub no_nearest: usize,
    pub too_short: usize,
    pub duplicate_vertex: usize,
    pub obstacle_collision: usize,
    pub edge_crossing: usize,
}

impl RrtStats {
    fn record(&mut self, rejection: Rejection) {
        match rejection {
            Rejection::NoNearest => self.no_nearest += 1,
            Rejection::TooShort => self.too_short += 1,
            Rejection::DuplicateVertex => self.duplicate_vertex += 1,
            Rejection::ObstacleCollision => self.obstacle_collision += 1,
            Rejection::EdgeCrossing => self.edge_crossing += 1,
        }
    }

    pub fn rejections(&self) -> usize {
        self.no_nearest
            + self.too_short
            + self.duplicate_vertex
            + self.obstacle_collision
            + self.edge_crossing
    }
}

/// Result of RRT path planning
#[derive(Debug, Clone)]
pub struct RrtResult {
    /// All vertices and edges grown during the run
    pub tree: Tree,
    /// Goal-to-root route, present iff the run succeeded
    pub route: Option<Route>,
    /// Terminal state
    pub state: PlannerState,
    /// Non-goal insertions counted against the budget
    pub iterations: usize,
    pub stats: RrtStats,
}

impl RrtResult {
    /// Whether a path was found
    pub fn success(&self) -> bool {
        self.state == PlannerState::Succeeded
    }
}

/// RRT path planner over a borrowed obstacle world
pub struct RrtPlanner<'a, O: ObstacleQuery = ObstacleField> {
    obstacles: &'a O,
    config: RrtConfig,
}

impl<'a, O: ObstacleQuery> RrtPlanner<'a, O> {
    /// Create a new RRT planner
    pub fn new(obstacles: &'a O, config: RrtConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { obstacles, config })
    }

    pub fn config(&self) -> &RrtConfig {
        &self.config
    }

    /// Reject start or goal configurations that are not in open space
    pub fn check_request(
        &self,
        start: &Configuration,
        goal: Option<&Configuration>,
    ) -> Result<()> {
        if self.obstacles.point_blocked(start) {
            return Err(RrtError::StartBlocked {
                x: start.x,
                y: start.y,
            });
        }
        if let Some(goal) = goal {
            if self.obstacles.point_blocked(goal) {
                return Err(RrtError::GoalBlocked {
                    x: goal.x,
                    y: goal.y,
                });
            }
        }
        Ok(())
    }

    /// Begin a run rooted at `start`
    ///
    /// With `goal` set to None the run only explores and always ends
    /// exhausted.
    pub fn start(
        &self,
        start: Configuration,
        goal: Option<Configuration>,
    ) -> Result<RrtRun<'a, O>> {
        self.check_request(&start, goal.as_ref())?;

        let rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let extent = self.config.workspace_extent;

        info!(
            "RRT run from ({:.2}, {:.2}) to {:?}, step {:.2}, margin {:.2}, budget {}",
            start.x,
            start.y,
            goal.map(|g| (g.x, g.y)),
            self.config.step_length(),
            self.config.margin(),
            self.config.max_iterations
        );

        let mut run = RrtRun {
            obstacles: self.obstacles,
            config: self.config.clone(),
            tree: Tree::new(start),
            goal,
            state: PlannerState::Running,
            iterations: 0,
            stats: RrtStats::default(),
            rng,
            coord_dist: Uniform::new_inclusive(0.0, extent),
            unit_dist: Uniform::new(0.0f32, 1.0),
        };

        // A goal already within tolerance of the start needs no extension
        if run.try_connect_goal(Tree::ROOT) {
            run.state = PlannerState::Succeeded;
        }

        Ok(run)
    }

    /// Plan from `start` toward `goal` until success or the budget runs out
    pub fn plan(&self, start: Configuration, goal: Option<Configuration>) -> Result<RrtResult> {
        let mut run = self.start(start, goal)?;
        while run.step() == PlannerState::Running {}
        Ok(run.finish())
    }
}

/// One planning run in progress
///
/// All state lives here between calls to [`RrtRun::step`], so a caller may
/// stop after any step and still [`finish`](RrtRun::finish) cleanly.
pub struct RrtRun<'a, O: ObstacleQuery> {
    obstacles: &'a O,
    config: RrtConfig,
    tree: Tree,
    goal: Option<Configuration>,
    state: PlannerState,
    iterations: usize,
    stats: RrtStats,
    rng: StdRng,
    coord_dist: Uniform<f32>,
    unit_dist: Uniform<f32>,
}

impl<'a, O: ObstacleQuery> RrtRun<'a, O> {
    pub fn state(&self) -> PlannerState {
        self.state
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn stats(&self) -> &RrtStats {
        &self.stats
    }

    /// Make one extension attempt and return the resulting state
    pub fn step(&mut self) -> PlannerState {
        if self.state != PlannerState::Running {
            return self.state;
        }
        if let Some(cap) = self.config.max_attempts {
            if self.stats.attempts >= cap {
                warn!(
                    "RRT attempt cap {} reached after {} insertions",
                    cap, self.iterations
                );
                self.state = PlannerState::Exhausted;
                return self.state;
            }
        }

        self.stats.attempts += 1;
        match self.extend() {
            Extension::Rejected(rejection) => {
                trace!("extension rejected: {:?}", rejection);
                self.stats.record(rejection);
            }
            Extension::Inserted(_) => {
                self.stats.insertions += 1;
                self.iterations += 1;
                if self.iterations >= self.config.max_iterations {
                    self.state = PlannerState::Exhausted;
                }
            }
            Extension::ReachedGoal(_) => {
                self.stats.insertions += 1;
                self.state = PlannerState::Succeeded;
            }
        }
        self.state
    }

    /// Consume the run and build its result
    ///
    /// A run stopped while still running keeps that state and has no route.
    pub fn finish(self) -> RrtResult {
        let route = match (self.state, self.goal) {
            (PlannerState::Succeeded, Some(goal)) => extract_route(&self.tree, &goal),
            _ => None,
        };

        info!(
            "RRT run finished: {:?} with {} vertices, {} iterations, {} attempts",
            self.state,
            self.tree.len(),
            self.iterations,
            self.stats.attempts
        );

        RrtResult {
            tree: self.tree,
            route,
            state: self.state,
            iterations: self.iterations,
            stats: self.stats,
        }
    }

    /// Try to grow the tree by one edge
    fn extend(&mut self) -> Extension {
        let sample = self.sample();

        let nearest_idx = match self.tree.nearest(&sample) {
            Some(idx) => idx,
            None => return Extension::Rejected(Rejection::NoNearest),
        };
        let nearest = self.tree.nodes()[nearest_idx].config;

        let new = match self.truncate(&nearest, &sample) {
            Some(new) => new,
            None => return Extension::Rejected(Rejection::TooShort),
        };

        if self.tree.contains(&new) {
            return Extension::Rejected(Rejection::DuplicateVertex);
        }

        if let Some(rejection) = self.collision(&nearest, &new) {
            return Extension::Rejected(rejection);
        }

        let new_idx = match self.tree.insert(new, nearest_idx) {
            Ok(idx) => idx,
            Err(_) => return Extension::Rejected(Rejection::DuplicateVertex),
        };

        if self.try_connect_goal(new_idx) {
            Extension::ReachedGoal(new_idx)
        } else {
            Extension::Inserted(new_idx)
        }
    }

    /// Sample a random point (with goal bias)
    fn sample(&mut self) -> Configuration {
        if let Some(goal) = self.goal {
            if self.unit_dist.sample(&mut self.rng) < self.config.goal_sample_rate {
                return goal;
            }
        }
        Configuration::new(
            self.coord_dist.sample(&mut self.rng),
            self.coord_dist.sample(&mut self.rng),
        )
    }

    /// Move from `nearest` toward `sample` by the sampled distance modulo the step length
    ///
    /// Returns None when the sample is closer than the minimum motion.
    fn truncate(&self, nearest: &Configuration, sample: &Configuration) -> Option<Configuration> {
        let d = nearest.distance_to(sample);
        if d == 0.0 || d < self.config.margin() {
            return None;
        }
        let new_d = d % self.config.step_length();
        let from = nearest.to_vector();
        let direction = sample.to_vector() - from;
        Some(Configuration::from_vector(from + direction * (new_d / d)))
    }

    /// Check a candidate edge against the obstacles and every tree edge
    fn collision(&self, from: &Configuration, to: &Configuration) -> Option<Rejection> {
        if self.obstacles.blocks(from, to) {
            return Some(Rejection::ObstacleCollision);
        }
        let crosses = self
            .tree
            .edges()
            .any(|(child, parent)| segments_intersect(to, from, &child, &parent));
        if crosses {
            return Some(Rejection::EdgeCrossing);
        }
        None
    }

    /// Connect the goal below vertex `idx` if it lies within tolerance
    ///
    /// The final edge passes the same collision gate as any other edge.
    fn try_connect_goal(&mut self, idx: usize) -> bool {
        let goal = match self.goal {
            Some(goal) => goal,
            None => return false,
        };
        let vertex = self.tree.nodes()[idx].config;
        if vertex.distance_to(&goal) > self.config.margin() {
            return false;
        }
        if vertex == goal {
            debug!("RRT vertex {} landed on the goal", idx);
            return true;
        }
        if let Some(rejection) = self.collision(&vertex, &goal) {
            debug!(
                "goal within tolerance of vertex {} but final edge rejected: {:?}",
                idx, rejection
            );
            return false;
        }
        match self.tree.insert(goal, idx) {
            Ok(goal_idx) => {
                debug!("goal connected as vertex {} below vertex {}", goal_idx, idx);
                true
            }
            Err(e) => {
                debug!("goal not connected: {}", e);
                false
            }
        }
    }
}
