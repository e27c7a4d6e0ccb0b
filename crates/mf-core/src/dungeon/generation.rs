//! The generation pipeline
//!
//! Rooms first, then mazes in the space between them, then connectors between
//! every pair of touching regions. Corridor pockets left unreachable are
//! walled up before dead end tagging. Every random choice
//! comes from one [`DungeonRng`], so a seed replays the whole dungeon.

use tracing::{debug, info_span};

use super::connect::{connect_regions, fill_unreached};
use super::loot::mark_dead_ends;
use super::map::Dungeon;
use super::maze::grow_mazes;
use super::room::Room;
use super::rooms::place_rooms;
use super::stage::Stage;
use crate::error::BuildError;
use crate::options::GeneratorConfig;
use crate::rng::DungeonRng;

/// State threaded through the pipeline stages
pub struct GenContext {
    pub stage: Stage,
    pub rng: DungeonRng,
    pub rooms: Vec<Room>,
    pub config: GeneratorConfig,
}

impl GenContext {
    pub fn new(stage: Stage, rng: DungeonRng, config: GeneratorConfig) -> Self {
        Self {
            stage,
            rng,
            rooms: Vec::new(),
            config,
        }
    }

    /// Freeze the stage into a dungeon
    pub fn finish(self) -> Dungeon {
        let seed = self.rng.seed().clone();
        Dungeon::new(self.rooms, self.stage.into_tiles(), seed)
    }
}

/// Run the whole pipeline on a fresh stage
///
/// Fails on a stage below the minimum size or when the result is not a
/// single connected area.
pub fn generate(
    width: usize,
    height: usize,
    rng: DungeonRng,
    config: &GeneratorConfig,
) -> Result<Dungeon, BuildError> {
    config.validate()?;
    let stage = Stage::build(width, height)?;

    let span = info_span!(
        "generate",
        seed = %rng.seed(),
        width = stage.width(),
        height = stage.height()
    );
    let _guard = span.enter();

    let mut ctx = GenContext::new(stage, rng, config.clone());
    place_rooms(&mut ctx)?;
    grow_mazes(&mut ctx)?;
    connect_regions(&mut ctx)?;
    fill_unreached(&mut ctx.stage, &ctx.rooms);
    mark_dead_ends(&mut ctx.stage, &ctx.rooms);

    let dungeon = ctx.finish();
    let components = dungeon.passable_components();
    if components > 1 {
        return Err(BuildError::Disconnected { components });
    }
    debug!(rooms = dungeon.rooms().len(), "dungeon ready");
    Ok(dungeon)
}
