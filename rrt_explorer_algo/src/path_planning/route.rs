//! Route extraction from a finished tree

use super::geometry::Configuration;
use super::tree::Tree;

/// Ordered waypoints from the goal back to the root
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    waypoints: Vec<Configuration>,
}

impl Route {
    /// Waypoints in goal-to-root order
    pub fn waypoints(&self) -> &[Configuration] {
        &self.waypoints
    }

    pub fn goal(&self) -> Configuration {
        self.waypoints[0]
    }

    pub fn root(&self) -> Configuration {
        self.waypoints[self.waypoints.len() - 1]
    }

    /// Waypoints in root-to-goal (driving) order
    pub fn start_to_goal(&self) -> Vec<Configuration> {
        self.waypoints.iter().rev().copied().collect()
    }

    /// Number of waypoints
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// Always false; a route holds at least the root
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Total length of the polyline
    pub fn length(&self) -> f32 {
        self.waypoints
            .windows(2)
            .map(|w| w[0].distance_to(&w[1]))
            .sum()
    }
}

/// Walk parent pointers from `goal` back to the root of `tree`
///
/// Returns None if `goal` is not a vertex of the tree.
pub fn extract_route(tree: &Tree, goal: &Configuration) -> Option<Route> {
    let goal_idx = tree.find(goal)?;
    let waypoints = tree.path_to_root(goal_idx)?;
    Some(Route { waypoints })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_extract_route_goal_first() {
        let mut tree = Tree::new(Configuration::new(0.0, 0.0));
        let a = tree.insert(Configuration::new(3.0, 4.0), Tree::ROOT).unwrap();
        tree.insert(Configuration::new(3.0, 10.0), a).unwrap();
        tree.insert(Configuration::new(-1.0, 0.0), Tree::ROOT).unwrap();

        let route = extract_route(&tree, &Configuration::new(3.0, 10.0)).unwrap();
        assert_eq!(route.len(), 3);
        assert_eq!(route.goal(), Configuration::new(3.0, 10.0));
        assert_eq!(route.root(), Configuration::new(0.0, 0.0));
        assert_relative_eq!(route.length(), 11.0, epsilon = 1e-5);
        assert_eq!(
            route.start_to_goal(),
            vec![
                Configuration::new(0.0, 0.0),
                Configuration::new(3.0, 4.0),
                Configuration::new(3.0, 10.0)
            ]
        );
    }

    #[test]
    fn test_extract_route_missing_goal() {
        let tree = Tree::new(Configuration::new(0.0, 0.0));
        assert!(extract_route(&tree, &Configuration::new(1.0, 1.0)).is_none());
    }
}
