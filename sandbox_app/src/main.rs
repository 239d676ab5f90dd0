//! Collision sandbox
//!
//! Loads a RON scenario, spawns its shapes into a collision scene and runs
//! the scripted steps, logging every outcome.
//!
//! Usage: `collision_sandbox [scenario.ron]`

mod scenario;

use collision_engine::foundation::logging::{self, LevelFilter};
use scenario::Scenario;

const DEFAULT_SCENARIO: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/scenarios/corridor.ron");

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_with_level(LevelFilter::Info);

    let path = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_SCENARIO.to_string());
    log::info!("Loading scenario {path}");

    let scenario = Scenario::load(&path)?;
    let report = scenario.run()?;

    println!("=== Scenario Summary ===");
    println!("  Overlapping spawns: {}", report.blocked_spawns);
    println!("  Moves accepted:     {}", report.moves_accepted);
    println!("  Moves rejected:     {}", report.moves_rejected);
    Ok(())
}
