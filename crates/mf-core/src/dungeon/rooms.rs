//! Room placement
//!
//! Rooms are rolled at random and dropped when they would touch an already
//! placed room. Sizes and positions are odd so rooms line up with the maze
//! lattice.

use tracing::{debug, trace};

use super::generation::GenContext;
use super::room::Room;
use super::tile::TileKind;
use crate::error::BuildError;
use crate::rng::DungeonRng;

/// Largest odd room extent allowed on a stage side, never below 3
///
/// Rooms are limited to a fifth of the stage. Rounding the limit down to odd
/// keeps every room on the odd lattice.
pub fn max_room_extent(stage_extent: usize) -> usize {
    let limit = stage_extent / 5;
    let odd = if limit % 2 == 0 {
        limit.saturating_sub(1)
    } else {
        limit
    };
    odd.max(3)
}

/// Number of rooms a stage of the given height may hold
pub fn max_room_count(stage_height: usize) -> usize {
    stage_height * 2 / 5
}

/// Place up to `room_tries` rooms, each carved as its own region
pub fn place_rooms(ctx: &mut GenContext) -> Result<(), BuildError> {
    let stage_width = ctx.stage.width();
    let stage_height = ctx.stage.height();
    let max_rooms = max_room_count(stage_height);
    let max_width = max_room_extent(stage_width);
    let max_height = max_room_extent(stage_height);

    for attempt in 0..ctx.config.room_tries {
        if ctx.rooms.len() >= max_rooms {
            break;
        }

        // Odd size; the rectangularity bonus goes on one axis only so rooms
        // are neither too flat nor too narrow
        let size = ctx.rng.integer(1, 3 + ctx.config.room_extra_size) as usize * 2 + 1;
        let rectangularity = ctx.rng.integer(0, 1 + (size / 2) as u32) as usize * 2;
        let (mut width, mut height) = (size, size);
        if ctx.rng.one_in(2) {
            width += rectangularity;
        } else {
            height += rectangularity;
        }
        let width = width.min(max_width);
        let height = height.min(max_height);

        let x = odd_origin(&mut ctx.rng, stage_width, width);
        let y = odd_origin(&mut ctx.rng, stage_height, height);
        let room = Room::new(x, y, width, height);

        if ctx.rooms.iter().any(|other| room.intersects(other)) {
            trace!(attempt, ?room, "room rejected");
            continue;
        }

        ctx.stage.start_region();
        for (tx, ty) in room.tiles() {
            ctx.stage.set(tx, ty, TileKind::Floor)?;
        }
        ctx.rooms.push(room);
    }

    debug!(rooms = ctx.rooms.len(), max_rooms, "placed rooms");
    Ok(())
}

/// Odd coordinate for a room of `extent` tiles, pulled back inside the
/// border when the roll overshoots
fn odd_origin(rng: &mut DungeonRng, stage_extent: usize, extent: usize) -> usize {
    let slots = ((stage_extent - extent) / 2) as u32;
    let origin = rng.integer(0, slots) as usize * 2 + 1;
    if origin + extent > stage_extent {
        (stage_extent - extent - 1).max(1)
    } else {
        origin
    }
}
