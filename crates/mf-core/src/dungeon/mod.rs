//! Dungeon system
//!
//! Contains the tile grid, rooms, and the rooms-and-mazes generation pipeline.

mod connect;
mod generation;
mod loot;
mod map;
mod maze;
mod room;
mod rooms;
mod stage;
mod tile;

pub use connect::{
    connect_regions, fill_unreached, find_connectors, open_connector, ConnectorGroups, RoomTiles,
};
pub use generation::{generate, GenContext};
pub use loot::{classify_dead_end, loot_lengths, mark_dead_ends};
pub use map::{Dungeon, PlainDungeon};
pub use maze::{can_carve, grow_maze, grow_mazes};
pub use room::{BoundingBox, Room};
pub use rooms::{max_room_count, max_room_extent, place_rooms};
pub use stage::{Stage, MIN_DIMENSION};
pub use tile::{Direction, Loot, Neighbors, PlainTile, Pos, Tile, TileKind};
