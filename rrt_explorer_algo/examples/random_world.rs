//! Explore a random circle world and print the resulting route.
//!
//! Usage: cargo run --example random_world -- [config.toml]
//!
//! Set `RUST_LOG=debug` for per-run details.

use rrt_explorer_algo::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => ExplorerConfig::from_file(path)?,
        None => ExplorerConfig::default(),
    };

    let start = Configuration::new(50.0, 50.0);
    let goal = Configuration::new(95.0, 95.0);

    let field = random_world(&config.world, &config.planner, &start, Some(&goal))?;
    for obs in field.obstacles() {
        println!("obstacle r={:.2} at ({:.2}, {:.2})", obs.radius, obs.x, obs.y);
    }

    let planner = RrtPlanner::new(&field, config.planner)?;
    let result = planner.plan(start, Some(goal))?;

    println!(
        "{:?}: {} vertices after {} iterations ({} attempts, {} rejected)",
        result.state,
        result.tree.len(),
        result.iterations,
        result.stats.attempts,
        result.stats.rejections()
    );
    match &result.route {
        Some(route) => {
            println!("route length {:.2}", route.length());
            for c in route.start_to_goal() {
                println!("  ({:.2}, {:.2})", c.x, c.y);
            }
        }
        None => println!("goal not reached"),
    }

    Ok(())
}
