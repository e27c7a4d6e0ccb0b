//! mf-core: Seeded rooms-and-mazes dungeon generation
//!
//! Rooms are scattered over an odd-sized grid, the space between them is
//! filled with growing-tree mazes, and every region is then joined through
//! doors. Long dead ends are tagged with loot markers. The same seed always
//! yields the same dungeon.
//!
//! ```no_run
//! use mf_core::{build, BuildOptions};
//!
//! let dungeon = build(&BuildOptions::size(41, 31).with_seed("foobarbaz"))?;
//! println!("{} rooms, seed {}", dungeon.rooms().len(), dungeon.seed());
//! # Ok::<(), mf_core::BuildError>(())
//! ```

use std::time::Instant;

use tracing::info;

pub mod dungeon;
pub mod error;
pub mod options;
pub mod rng;

pub use dungeon::{Dungeon, PlainDungeon, PlainTile, Room, Tile, TileKind};
pub use error::{Axis, BuildError};
pub use options::{BuildOptions, GeneratorConfig};
pub use rng::{DungeonRng, Seed};

/// Build a dungeon from the given options
///
/// Without a seed (or with an empty phrase) one is generated;
/// [`Dungeon::seed`] reports it for replay.
pub fn build(options: &BuildOptions) -> Result<Dungeon, BuildError> {
    let (width, height) = options.dimensions()?;

    let started = Instant::now();
    let rng = match options.replay_seed() {
        Some(seed) => DungeonRng::new(seed.clone()),
        None => DungeonRng::from_entropy(),
    };
    let dungeon = dungeon::generate(width, height, rng, &options.config)?;

    info!(
        seed = %dungeon.seed(),
        width = dungeon.width(),
        height = dungeon.height(),
        rooms = dungeon.rooms().len(),
        elapsed_us = started.elapsed().as_micros() as u64,
        "built dungeon"
    );
    Ok(dungeon)
}
