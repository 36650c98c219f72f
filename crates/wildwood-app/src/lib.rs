//! Headless driver for Wildwood worlds.
//!
//! [`run_headless`] parses a world description, runs it for a simulated
//! lifetime, and returns the survivor log. The `wildwood` binary wraps it
//! with a small CLI; tests drive it directly with inline descriptions.

use std::str::FromStr;
use std::time::Instant;

use anyhow::Result;
use tracing::{debug, info};
use wildwood_core::entity::{
    BAD_DUDE_KEY, CAR_KEY, DUDE_CARRY_KEY, DUDE_KEY, EXPLOSION_KEY, FAIRY_KEY, HOUSE_KEY,
    MUSHROOM_KEY, SAPLING_KEY, STUMP_KEY, TREE_KEY, WATER_KEY, WATER_TILE_KEY, WATER_TRAIL_KEY,
};
use wildwood_core::{Simulation, SpriteLibrary};
use wildwood_path::{AStarPathing, PathingStrategy, SingleStepPathing};
use wildwood_save::load_world;

/// Which pathing strategy movers use for the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathingChoice {
    AStar,
    SingleStep,
}

impl PathingChoice {
    #[must_use]
    pub fn strategy(self) -> Box<dyn PathingStrategy> {
        match self {
            PathingChoice::AStar => Box::new(AStarPathing),
            PathingChoice::SingleStep => Box::new(SingleStepPathing),
        }
    }
}

impl FromStr for PathingChoice {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "a-star" => Ok(PathingChoice::AStar),
            "single-step" => Ok(PathingChoice::SingleStep),
            other => Err(format!(
                "unknown pathing strategy `{other}` (expected a-star or single-step)"
            )),
        }
    }
}

/// Frame counts for the stock sprite sheets. Unlisted keys fall back to a
/// single frame, so worlds with unknown art still run.
#[must_use]
pub fn standard_sprites() -> SpriteLibrary {
    let mut sprites = SpriteLibrary::new();
    sprites.insert(DUDE_KEY, 4);
    sprites.insert(DUDE_CARRY_KEY, 4);
    sprites.insert(FAIRY_KEY, 4);
    sprites.insert(HOUSE_KEY, 1);
    sprites.insert(MUSHROOM_KEY, 1);
    sprites.insert(SAPLING_KEY, 5);
    sprites.insert(STUMP_KEY, 1);
    sprites.insert(TREE_KEY, 4);
    sprites.insert(WATER_KEY, 1);
    sprites.insert(WATER_TILE_KEY, 1);
    sprites.insert(BAD_DUDE_KEY, 4);
    sprites.insert(CAR_KEY, 2);
    sprites.insert(EXPLOSION_KEY, 10);
    sprites.insert(WATER_TRAIL_KEY, 6);
    sprites
}

/// Parse `source`, run every entity's actions for `lifetime` simulated
/// seconds, and return one log line per surviving named entity.
pub fn run_headless(
    source: &str,
    lifetime: f64,
    seed: Option<u64>,
    pathing: PathingChoice,
) -> Result<Vec<String>> {
    let sprites = standard_sprites();
    let world = load_world(source, &sprites)?;
    debug!(
        rows = world.rows(),
        cols = world.cols(),
        entities = world.len(),
        "world loaded"
    );

    let mut simulation = Simulation::new(world, sprites, pathing.strategy(), seed);
    simulation.schedule_all_actions();

    let started = Instant::now();
    simulation.advance(lifetime);
    info!(
        lifetime,
        strategy = ?pathing,
        entities = simulation.world().len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "simulation finished"
    );

    Ok(simulation.log())
}
