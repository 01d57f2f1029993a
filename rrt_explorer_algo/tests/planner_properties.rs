//! Structural properties every planning run must satisfy

use rrt_explorer_algo::path_planning::{point_segment_distance, segments_intersect};
use rrt_explorer_algo::prelude::*;

const SEEDS: [u64; 6] = [1, 2, 3, 17, 42, 2024];

fn run(seed: u64, goal: Option<Configuration>) -> (ObstacleField, RrtResult) {
    let config = RrtConfig {
        seed: Some(seed),
        max_iterations: 400,
        goal_sample_rate: 0.05,
        ..Default::default()
    };
    let world = WorldConfig {
        seed: Some(seed),
        ..Default::default()
    };
    let start = Configuration::new(50.0, 50.0);
    let field = random_world(&world, &config, &start, goal.as_ref()).unwrap();
    let planner = RrtPlanner::new(&field, config).unwrap();
    let result = planner.plan(start, goal).unwrap();
    (field, result)
}

#[test]
fn test_tree_is_acyclic_and_rooted() {
    for seed in SEEDS {
        let (_, result) = run(seed, Some(Configuration::new(95.0, 95.0)));
        let tree = &result.tree;
        for id in 0..tree.len() {
            let path = tree.path_to_root(id).unwrap();
            assert!(path.len() <= tree.len(), "seed {seed}: walk from {id} too long");
            assert_eq!(*path.last().unwrap(), Configuration::new(50.0, 50.0));
        }
    }
}

#[test]
fn test_vertices_are_unique() {
    for seed in SEEDS {
        let (_, result) = run(seed, None);
        let nodes = result.tree.nodes();
        for (i, a) in nodes.iter().enumerate() {
            for b in &nodes[i + 1..] {
                assert_ne!(a.config, b.config, "seed {seed}: duplicate vertex");
            }
        }
    }
}

#[test]
fn test_edges_clear_obstacles_and_each_other() {
    for seed in SEEDS {
        let (field, result) = run(seed, Some(Configuration::new(5.0, 95.0)));
        // Insertion order, and the argument order used when each edge was admitted
        let edges: Vec<_> = result.tree.edges().collect();
        for (j, (child, parent)) in edges.iter().enumerate() {
            for obs in field.obstacles() {
                let d = point_segment_distance(&obs.center(), parent, child);
                assert!(d > obs.radius + field.margin(), "seed {seed}: edge {j} hits obstacle");
            }
            for (earlier_child, earlier_parent) in &edges[..j] {
                assert!(
                    !segments_intersect(child, parent, earlier_child, earlier_parent),
                    "seed {seed}: edge {j} crosses an earlier edge"
                );
            }
        }
    }
}

#[test]
fn test_route_follows_tree_edges() {
    for seed in SEEDS {
        let goal = Configuration::new(90.0, 10.0);
        let (_, result) = run(seed, Some(goal));
        let Some(route) = &result.route else {
            assert_eq!(result.state, PlannerState::Exhausted);
            continue;
        };
        assert!(result.success());
        assert_eq!(route.goal(), goal);
        assert_eq!(route.root(), result.tree.root());
        for pair in route.waypoints().windows(2) {
            let child = result.tree.find(&pair[0]).unwrap();
            let parent = result.tree.get(child).unwrap().parent.unwrap();
            assert_eq!(result.tree.get(parent).unwrap().config, pair[1]);
        }
    }
}

#[test]
fn test_nearby_goal_connects_immediately() {
    let config = RrtConfig {
        step_bound: 1.0,
        seed: Some(0),
        ..Default::default()
    };
    let field = ObstacleField::empty(config.margin());
    let planner = RrtPlanner::new(&field, config).unwrap();
    let result = planner
        .plan(Configuration::new(50.0, 50.0), Some(Configuration::new(52.0, 52.0)))
        .unwrap();
    assert_eq!(result.state, PlannerState::Succeeded);
    assert_eq!(result.route.unwrap().len(), 2);
    assert_eq!(result.tree.len(), 2);
}

#[test]
fn test_start_inside_obstacle_rejected_before_planning() {
    let field = ObstacleField::from_triples(&[(40.0, 50.0, 50.0)], 3.0).unwrap();
    let planner = RrtPlanner::new(&field, RrtConfig::default()).unwrap();
    let result = planner.plan(Configuration::new(50.0, 50.0), None);
    assert!(matches!(result, Err(RrtError::StartBlocked { .. })));
}

#[test]
fn test_occupancy_world_plans_around_wall() {
    // A 20x20 image with a vertical wall that leaves a gap at the bottom
    let mut rows = vec![vec![false; 20]; 20];
    for row in rows.iter_mut().take(14) {
        row[10] = true;
    }
    let (field, extent) = ObstacleField::from_occupancy(&rows, 0.03).unwrap();
    let config = RrtConfig {
        workspace_extent: extent,
        seed: Some(8),
        max_iterations: 3000,
        goal_sample_rate: 0.1,
        ..Default::default()
    };
    let planner = RrtPlanner::new(&field, config).unwrap();
    let result = planner
        .plan(Configuration::new(3.0, 15.0), Some(Configuration::new(17.0, 15.0)))
        .unwrap();
    assert!(result.success());
    let route = result.route.unwrap();
    assert!(route.waypoints().iter().any(|c| c.y < 7.0));
}
