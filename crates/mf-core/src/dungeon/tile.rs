//! Grid cells and their neighbor links

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};

/// A grid coordinate, used as a handle into the stage's tile arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Pos {
    pub x: usize,
    pub y: usize,
}

impl Pos {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// The eight compass directions, north being towards `y = 0`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[repr(u8)]
pub enum Direction {
    #[strum(serialize = "n")]
    North = 0,
    #[strum(serialize = "ne")]
    NorthEast = 1,
    #[strum(serialize = "e")]
    East = 2,
    #[strum(serialize = "se")]
    SouthEast = 3,
    #[strum(serialize = "s")]
    South = 4,
    #[strum(serialize = "sw")]
    SouthWest = 5,
    #[strum(serialize = "w")]
    West = 6,
    #[strum(serialize = "nw")]
    NorthWest = 7,
}

impl Direction {
    /// Directions used for movement, carving and connectivity
    pub const CARDINAL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// (dx, dy) unit step
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Direction::North => (0, -1),
            Direction::NorthEast => (1, -1),
            Direction::East => (1, 0),
            Direction::SouthEast => (1, 1),
            Direction::South => (0, 1),
            Direction::SouthWest => (-1, 1),
            Direction::West => (-1, 0),
            Direction::NorthWest => (-1, -1),
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn is_cardinal(self) -> bool {
        matches!(
            self,
            Direction::North | Direction::East | Direction::South | Direction::West
        )
    }
}

/// Terrain of a tile
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TileKind {
    #[default]
    Wall,
    Floor,
    Door,
}

impl TileKind {
    /// Floor and doors can be walked on, walls cannot
    pub const fn is_passable(self) -> bool {
        matches!(self, TileKind::Floor | TileKind::Door)
    }
}

bitflags! {
    /// Reward markers left on dead ends
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Loot: u8 {
        const LOOT = 0x01;
        const BIG_LOOT = 0x02;
    }
}

// Manual serde impl for Loot
impl Serialize for Loot {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.bits().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Loot {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bits = u8::deserialize(deserializer)?;
        Ok(Loot::from_bits_truncate(bits))
    }
}

/// Neighbor links of a tile, one slot per [`Direction`]
///
/// A slot is `None` when the neighbor would fall outside the stage. A wall
/// neighbor is still `Some`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Neighbors([Option<Pos>; 8]);

impl Neighbors {
    pub fn get(&self, dir: Direction) -> Option<Pos> {
        self.0[dir.index()]
    }

    pub(crate) fn set(&mut self, dir: Direction, pos: Pos) {
        self.0[dir.index()] = Some(pos);
    }

    /// Present neighbors with their direction
    pub fn iter(&self) -> impl Iterator<Item = (Direction, Pos)> + '_ {
        Direction::iter().filter_map(|dir| self.get(dir).map(|pos| (dir, pos)))
    }

    /// Present N, E, S and W neighbors, in that order
    pub fn cardinal(&self) -> impl Iterator<Item = Pos> + '_ {
        Direction::CARDINAL.into_iter().filter_map(|dir| self.get(dir))
    }

    /// Key names of present neighbors (`"n"`, `"ne"`, ...)
    pub fn keys(&self) -> Vec<String> {
        self.iter().map(|(dir, _)| dir.to_string()).collect()
    }

    /// Number of present neighbors: 3 in a corner, 5 on an edge, 8 inside
    pub fn len(&self) -> usize {
        self.0.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A single grid cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub x: usize,
    pub y: usize,

    /// Terrain
    pub kind: TileKind,

    /// Region stamped when the tile was carved; connector tiles have none
    pub region: Option<u32>,

    /// Dead end reward markers
    pub loot: Loot,

    pub neighbors: Neighbors,
}

impl Tile {
    /// Create an unlinked tile
    pub fn new(x: usize, y: usize, kind: TileKind) -> Self {
        Self {
            x,
            y,
            kind,
            region: None,
            loot: Loot::empty(),
            neighbors: Neighbors::default(),
        }
    }

    pub fn pos(&self) -> Pos {
        Pos::new(self.x, self.y)
    }

    pub fn is_passable(&self) -> bool {
        self.kind.is_passable()
    }

    pub fn has_loot(&self) -> bool {
        self.loot.contains(Loot::LOOT)
    }

    pub fn has_big_loot(&self) -> bool {
        self.loot.contains(Loot::BIG_LOOT)
    }

    /// Snapshot without neighbor links
    pub fn to_plain(&self) -> PlainTile {
        PlainTile {
            x: self.x,
            y: self.y,
            kind: self.kind,
            loot: self.has_loot(),
            big_loot: self.has_big_loot(),
        }
    }
}

/// Serialization-safe projection of a [`Tile`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlainTile {
    pub x: usize,
    pub y: usize,
    #[serde(rename = "type")]
    pub kind: TileKind,
    pub loot: bool,
    #[serde(rename = "bigLoot")]
    pub big_loot: bool,
}
