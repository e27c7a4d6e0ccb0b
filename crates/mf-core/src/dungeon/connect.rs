//! Joining regions through connector tiles
//!
//! A connector is a wall tile with floor of two or more different regions on
//! its N/E/S/W sides. Connectors are grouped by the exact set of regions they
//! join. One connector of each group always opens, the others open by chance.
//! Corridor pockets that no connector could reach are walled up afterwards.

use std::collections::{BTreeMap, VecDeque};

use hashbrown::HashSet;
use tracing::{debug, trace};

use super::generation::GenContext;
use super::room::Room;
use super::stage::Stage;
use super::tile::{Pos, TileKind};
use crate::error::BuildError;

/// Room tiles split by whether a connector may sit next to them
#[derive(Debug, Clone, Default)]
pub struct RoomTiles {
    /// Corner floor tiles away from the stage border
    pub corners: HashSet<Pos>,
    /// Every other room floor tile
    pub inner: HashSet<Pos>,
}

impl RoomTiles {
    pub fn new(stage: &Stage, rooms: &[Room]) -> Self {
        let mut tiles = Self::default();
        for room in rooms {
            for (x, y) in room.tiles() {
                let pos = Pos::new(x, y);
                if room.is_corner(x, y) && !near_border(stage, x, y) {
                    tiles.corners.insert(pos);
                } else {
                    tiles.inner.insert(pos);
                }
            }
        }
        tiles
    }
}

/// On the first ring of tiles inside the outer wall
fn near_border(stage: &Stage, x: usize, y: usize) -> bool {
    x == 1 || y == 1 || x == stage.width() - 2 || y == stage.height() - 2
}

/// Connector groups keyed by the sorted regions they join
pub type ConnectorGroups = BTreeMap<Vec<u32>, Vec<Pos>>;

/// Collect connectors, scanning column by column
///
/// Tiles next to a room corner never become connectors, so doors do not
/// appear in room corners.
pub fn find_connectors(stage: &Stage, room_tiles: &RoomTiles) -> ConnectorGroups {
    let mut groups = ConnectorGroups::new();

    for tile in stage.iter() {
        if tile.kind == TileKind::Floor {
            continue;
        }
        let pos = tile.pos();
        if stage
            .cardinal_neighbors(pos)
            .any(|n| room_tiles.corners.contains(&n.pos()))
        {
            continue;
        }

        let mut regions: Vec<u32> = stage
            .cardinal_neighbors(pos)
            .filter(|n| n.is_passable())
            .filter_map(|n| n.region)
            .collect();
        regions.sort_unstable();
        regions.dedup();

        if regions.len() >= 2 {
            groups.entry(regions).or_default().push(pos);
        }
    }

    groups
}

/// Open one connector per group plus random extras
///
/// Returns the number of tiles opened.
pub fn connect_regions(ctx: &mut GenContext) -> Result<usize, BuildError> {
    let room_tiles = RoomTiles::new(&ctx.stage, &ctx.rooms);
    let groups = find_connectors(&ctx.stage, &room_tiles);
    let group_count = groups.len();
    let mut opened = 0;

    for (regions, mut candidates) in groups {
        let index = ctx.rng.index(candidates.len());
        let chosen = candidates.remove(index);
        let kind = open_connector(&mut ctx.stage, &room_tiles, chosen)?;
        trace!(?regions, x = chosen.x, y = chosen.y, %kind, "joined regions");
        opened += 1;

        for pos in candidates {
            if ctx.rng.one_in(ctx.config.extra_connector_chance) {
                open_connector(&mut ctx.stage, &room_tiles, pos)?;
                opened += 1;
            }
        }
    }

    debug!(groups = group_count, opened, "connected regions");
    Ok(opened)
}

/// Turn a connector into door when it leads into a room, floor otherwise
///
/// The tile keeps no region.
pub fn open_connector(
    stage: &mut Stage,
    room_tiles: &RoomTiles,
    pos: Pos,
) -> Result<TileKind, BuildError> {
    let enters_room = stage
        .cardinal_neighbors(pos)
        .any(|n| room_tiles.inner.contains(&n.pos()));
    let kind = if enters_room {
        TileKind::Door
    } else {
        TileKind::Floor
    };

    let tile = stage
        .get_mut(pos.x, pos.y)
        .ok_or(BuildError::TileUnreachable { x: pos.x, y: pos.y })?;
    tile.kind = kind;
    Ok(kind)
}

/// Wall up passable areas cut off from the main one
///
/// The largest area (first in column order on a tie) is kept, as is any area
/// holding a room tile. A corridor pocket boxed in by room corners has no
/// connector and is filled back with wall, region cleared. Returns the number
/// of tiles filled.
pub fn fill_unreached(stage: &mut Stage, rooms: &[Room]) -> usize {
    let areas = passable_areas(stage);
    let Some(main) = areas
        .iter()
        .enumerate()
        .rev()
        .max_by_key(|(_, area)| area.len())
        .map(|(index, _)| index)
    else {
        return 0;
    };

    let mut filled = 0;
    for (index, area) in areas.into_iter().enumerate() {
        if index == main
            || area
                .iter()
                .any(|pos| rooms.iter().any(|room| room.contains_tile(pos.x, pos.y)))
        {
            continue;
        }
        trace!(tiles = area.len(), x = area[0].x, y = area[0].y, "filling pocket");
        for pos in area {
            if let Some(tile) = stage.get_mut(pos.x, pos.y) {
                tile.kind = TileKind::Wall;
                tile.region = None;
                filled += 1;
            }
        }
    }

    if filled > 0 {
        debug!(filled, "filled unreached corridors");
    }
    filled
}

/// Cardinally connected passable areas, in column order of their first tile
fn passable_areas(stage: &Stage) -> Vec<Vec<Pos>> {
    let mut seen: HashSet<Pos> = HashSet::new();
    let mut areas = Vec::new();

    for start in stage.iter().filter(|t| t.is_passable()) {
        if !seen.insert(start.pos()) {
            continue;
        }
        let mut area = Vec::new();
        let mut queue = VecDeque::from([start.pos()]);
        while let Some(pos) = queue.pop_front() {
            area.push(pos);
            for next in stage.cardinal_neighbors(pos) {
                if next.is_passable() && seen.insert(next.pos()) {
                    queue.push_back(next.pos());
                }
            }
        }
        areas.push(area);
    }

    areas
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Two 5x5 rooms side by side on a 13x9 stage, one wall column apart
    fn two_rooms() -> (Stage, Vec<Room>) {
        let mut stage = Stage::build(13, 9).unwrap();
        let rooms = vec![Room::new(1, 1, 5, 5), Room::new(7, 1, 5, 5)];
        for room in &rooms {
            stage.start_region();
            for (x, y) in room.tiles() {
                stage.set(x, y, TileKind::Floor).unwrap();
            }
        }
        (stage, rooms)
    }

    #[test]
    fn test_room_tiles_split() {
        let stage = Stage::build(21, 21).unwrap();
        let rooms = vec![Room::new(5, 5, 3, 3)];
        let tiles = RoomTiles::new(&stage, &rooms);
        assert_eq!(tiles.corners.len(), 4);
        assert_eq!(tiles.inner.len(), 5);
        assert!(tiles.corners.contains(&Pos::new(7, 7)));
        assert!(tiles.inner.contains(&Pos::new(6, 5)));
    }

    #[test]
    fn test_corners_on_border_ring_are_inner() {
        let stage = Stage::build(13, 9).unwrap();
        let rooms = vec![Room::new(1, 1, 5, 5)];
        let tiles = RoomTiles::new(&stage, &rooms);
        // Only (5, 5) is away from the first ring
        assert_eq!(tiles.corners.len(), 1);
        assert!(tiles.corners.contains(&Pos::new(5, 5)));
    }

    #[test]
    fn test_connectors_between_rooms() {
        let (stage, rooms) = two_rooms();
        let tiles = RoomTiles::new(&stage, &rooms);
        let groups = find_connectors(&stage, &tiles);

        assert_eq!(groups.len(), 1);
        let connectors = &groups[&vec![0u32, 1]];
        // Column x = 6 between the rooms, minus the row next to the
        // bottom corners at y = 5
        assert_eq!(
            connectors,
            &vec![
                Pos::new(6, 1),
                Pos::new(6, 2),
                Pos::new(6, 3),
                Pos::new(6, 4)
            ]
        );
    }

    #[test]
    fn test_connectors_next_to_corner_skipped() {
        let mut stage = Stage::build(21, 21).unwrap();
        let rooms = vec![Room::new(5, 5, 3, 3), Room::new(9, 5, 3, 3)];
        for room in &rooms {
            stage.start_region();
            for (x, y) in room.tiles() {
                stage.set(x, y, TileKind::Floor).unwrap();
            }
        }
        let tiles = RoomTiles::new(&stage, &rooms);
        let groups = find_connectors(&stage, &tiles);
        assert_eq!(groups[&vec![0u32, 1]], vec![Pos::new(8, 6)]);
    }

    #[test]
    fn test_open_connector_into_room_is_door() {
        let (mut stage, rooms) = two_rooms();
        let tiles = RoomTiles::new(&stage, &rooms);
        let kind = open_connector(&mut stage, &tiles, Pos::new(6, 2)).unwrap();
        assert_eq!(kind, TileKind::Door);
        let tile = stage.get(6, 2).unwrap();
        assert_eq!(tile.kind, TileKind::Door);
        assert_eq!(tile.region, None);
    }

    #[test]
    fn test_open_connector_between_corridors_is_floor() {
        let mut stage = Stage::build(9, 5).unwrap();
        stage.start_region();
        stage.set(3, 1, TileKind::Floor).unwrap();
        stage.start_region();
        stage.set(5, 1, TileKind::Floor).unwrap();
        let tiles = RoomTiles::default();

        let groups = find_connectors(&stage, &tiles);
        assert_eq!(groups[&vec![0u32, 1]], vec![Pos::new(4, 1)]);
        let kind = open_connector(&mut stage, &tiles, Pos::new(4, 1)).unwrap();
        assert_eq!(kind, TileKind::Floor);
    }

    #[test]
    fn test_fill_unreached_walls_corner_pocket() {
        // One-cell corridor at (5, 5) boxed in by four room corners
        let mut stage = Stage::build(11, 11).unwrap();
        let rooms = vec![
            Room::new(1, 3, 3, 3),
            Room::new(5, 1, 3, 3),
            Room::new(7, 5, 3, 3),
            Room::new(3, 7, 3, 3),
        ];
        for room in &rooms {
            stage.start_region();
            for (x, y) in room.tiles() {
                stage.set(x, y, TileKind::Floor).unwrap();
            }
        }
        stage.start_region();
        stage.set(5, 5, TileKind::Floor).unwrap();

        let tiles = RoomTiles::new(&stage, &rooms);
        let groups = find_connectors(&stage, &tiles);
        assert!(groups.keys().all(|regions| !regions.contains(&4)));

        assert_eq!(fill_unreached(&mut stage, &rooms), 1);
        let pocket = stage.get(5, 5).unwrap();
        assert_eq!(pocket.kind, TileKind::Wall);
        assert_eq!(pocket.region, None);
        // Rooms stay even though they are not joined yet
        for room in &rooms {
            for (x, y) in room.tiles() {
                assert_eq!(stage.get(x, y).unwrap().kind, TileKind::Floor);
            }
        }
    }

    #[test]
    fn test_fill_unreached_keeps_largest_corridor() {
        let mut stage = Stage::build(13, 5).unwrap();
        stage.start_region();
        for x in 1..=5 {
            stage.set(x, 1, TileKind::Floor).unwrap();
        }
        stage.start_region();
        for x in 7..=9 {
            stage.set(x, 3, TileKind::Floor).unwrap();
        }
        assert_eq!(fill_unreached(&mut stage, &[]), 3);
        assert!(stage.iter().filter(|t| t.y == 3).all(|t| t.kind == TileKind::Wall));
        assert!((1..=5).all(|x| stage.get(x, 1).unwrap().is_passable()));
    }

    #[test]
    fn test_fill_unreached_leaves_connected_stage() {
        let (mut stage, rooms) = two_rooms();
        let room_tiles = RoomTiles::new(&stage, &rooms);
        open_connector(&mut stage, &room_tiles, Pos::new(6, 2)).unwrap();
        assert_eq!(fill_unreached(&mut stage, &rooms), 0);
        assert_eq!(fill_unreached(&mut Stage::build(9, 9).unwrap(), &[]), 0);
    }
}
