//! The finished dungeon and its plain projection

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::room::Room;
use super::tile::{Direction, PlainTile, Tile};
use crate::rng::Seed;

/// A generated dungeon: rooms, a `[x][y]` tile grid and the seed that
/// reproduces it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dungeon {
    rooms: Vec<Room>,
    tiles: Vec<Vec<Tile>>,
    seed: Seed,
}

impl Dungeon {
    pub(crate) fn new(rooms: Vec<Room>, tiles: Vec<Vec<Tile>>, seed: Seed) -> Self {
        Self { rooms, tiles, seed }
    }

    /// Rooms in placement order
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Tile columns, indexed `[x][y]`
    pub fn tiles(&self) -> &[Vec<Tile>] {
        &self.tiles
    }

    pub fn tile(&self, x: usize, y: usize) -> Option<&Tile> {
        self.tiles.get(x).and_then(|column| column.get(y))
    }

    pub fn seed(&self) -> &Seed {
        &self.seed
    }

    pub fn width(&self) -> usize {
        self.tiles.len()
    }

    pub fn height(&self) -> usize {
        self.tiles.first().map_or(0, Vec::len)
    }

    /// All tiles, column by column
    pub fn iter(&self) -> impl Iterator<Item = &Tile> + '_ {
        self.tiles.iter().flatten()
    }

    /// Snapshot with neighbor links dropped, safe to serialize
    pub fn to_plain(&self) -> PlainDungeon {
        PlainDungeon {
            rooms: self.rooms.clone(),
            tiles: self
                .tiles
                .iter()
                .map(|column| column.iter().map(Tile::to_plain).collect())
                .collect(),
            seed: self.seed.clone(),
        }
    }

    /// Number of separate passable areas under N/E/S/W movement
    pub fn passable_components(&self) -> usize {
        let (width, height) = (self.width(), self.height());
        let mut seen = vec![vec![false; height]; width];
        let mut components = 0;

        for start in self.iter().filter(|t| t.is_passable()) {
            if seen[start.x][start.y] {
                continue;
            }
            components += 1;
            seen[start.x][start.y] = true;

            let mut queue = VecDeque::from([start]);
            while let Some(tile) = queue.pop_front() {
                for dir in Direction::CARDINAL {
                    let Some(pos) = tile.neighbors.get(dir) else {
                        continue;
                    };
                    let next = &self.tiles[pos.x][pos.y];
                    if next.is_passable() && !seen[pos.x][pos.y] {
                        seen[pos.x][pos.y] = true;
                        queue.push_back(next);
                    }
                }
            }
        }

        components
    }

    /// Every floor and door tile can reach every other
    pub fn is_connected(&self) -> bool {
        self.passable_components() <= 1
    }
}

/// Serializable dungeon without neighbor links
///
/// `tiles` keeps the `[x][y]` layout of [`Dungeon::tiles`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlainDungeon {
    pub rooms: Vec<Room>,
    pub tiles: Vec<Vec<PlainTile>>,
    pub seed: Seed,
}
