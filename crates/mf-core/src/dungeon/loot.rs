//! Dead end classification
//!
//! Dead ends are walked back along their corridor. A corridor that stays
//! unbranched for a tenth of the stage width earns [`Loot::LOOT`], one that
//! stays unbranched for a fifth earns [`Loot::BIG_LOOT`] instead. Tile kinds
//! are left alone.

use hashbrown::HashSet;
use tracing::debug;

use super::room::Room;
use super::stage::Stage;
use super::tile::{Loot, Pos, Tile};

/// Corridor lengths (loot, big loot) for a stage width
pub fn loot_lengths(stage_width: usize) -> (usize, usize) {
    (stage_width / 10, stage_width / 5)
}

/// Tag dead ends outside rooms; returns how many tiles got a marker
pub fn mark_dead_ends(stage: &mut Stage, rooms: &[Room]) -> usize {
    let (loot_len, big_len) = loot_lengths(stage.width());

    let view: &Stage = stage;
    let dead_ends: Vec<Pos> = view
        .iter()
        .filter(|tile| tile.is_passable())
        .filter(|tile| passable_exits(view, tile.pos()) <= 1)
        .filter(|tile| !rooms.iter().any(|room| room.contains_tile(tile.x, tile.y)))
        .map(Tile::pos)
        .collect();

    let mut tagged = 0;
    let mut big = 0;
    for pos in dead_ends {
        let loot = classify_dead_end(stage, pos, loot_len, big_len);
        if loot.is_empty() {
            continue;
        }
        if let Some(tile) = stage.get_mut(pos.x, pos.y) {
            tile.loot |= loot;
            tagged += 1;
            if loot.contains(Loot::BIG_LOOT) {
                big += 1;
            }
        }
    }

    debug!(tagged, big, loot_len, big_len, "marked dead ends");
    tagged
}

fn passable_exits(stage: &Stage, pos: Pos) -> usize {
    stage
        .cardinal_neighbors(pos)
        .filter(|tile| tile.is_passable())
        .count()
}

/// Walk from a dead end while the corridor has a single way on
pub fn classify_dead_end(stage: &Stage, start: Pos, loot_len: usize, big_len: usize) -> Loot {
    let mut travelled: HashSet<Pos> = HashSet::new();
    let mut current = start;
    let mut loot = Loot::empty();

    for step in 0..big_len {
        let only = {
            let mut next = stage
                .cardinal_neighbors(current)
                .filter(|tile| tile.is_passable() && !travelled.contains(&tile.pos()))
                .map(Tile::pos);
            match (next.next(), next.next()) {
                (Some(only), None) => only,
                _ => return loot,
            }
        };
        if step + 1 == loot_len {
            loot = Loot::LOOT;
        }
        travelled.insert(current);
        current = only;
    }

    Loot::BIG_LOOT
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::TileKind;

    /// Straight east-west corridor on row 1 from x = 1 to `end`
    fn corridor(width: usize, end: usize) -> Stage {
        let mut stage = Stage::build(width, 5).unwrap();
        stage.start_region();
        for x in 1..=end {
            stage.set(x, 1, TileKind::Floor).unwrap();
        }
        stage
    }

    #[test]
    fn test_loot_lengths() {
        assert_eq!(loot_lengths(21), (2, 4));
        assert_eq!(loot_lengths(41), (4, 8));
        assert_eq!(loot_lengths(5), (0, 1));
    }

    #[test]
    fn test_long_corridor_gets_big_loot_only() {
        let stage = corridor(41, 20);
        let loot = classify_dead_end(&stage, Pos::new(1, 1), 4, 8);
        assert_eq!(loot, Loot::BIG_LOOT);
    }

    #[test]
    fn test_medium_corridor_gets_loot() {
        // Five tiles then a junction
        let mut stage = corridor(41, 9);
        stage.set(5, 2, TileKind::Floor).unwrap();
        stage.set(5, 3, TileKind::Floor).unwrap();
        let loot = classify_dead_end(&stage, Pos::new(1, 1), 4, 8);
        assert_eq!(loot, Loot::LOOT);
    }

    #[test]
    fn test_short_corridor_gets_nothing() {
        let mut stage = corridor(41, 9);
        stage.set(2, 2, TileKind::Floor).unwrap();
        let loot = classify_dead_end(&stage, Pos::new(1, 1), 4, 8);
        assert!(loot.is_empty());
    }

    #[test]
    fn test_isolated_tile_gets_nothing() {
        let mut stage = Stage::build(41, 5).unwrap();
        stage.set(3, 1, TileKind::Floor).unwrap();
        assert!(classify_dead_end(&stage, Pos::new(3, 1), 4, 8).is_empty());
    }

    #[test]
    fn test_mark_dead_ends_tags_both_ends() {
        let mut stage = corridor(41, 39);
        let tagged = mark_dead_ends(&mut stage, &[]);
        assert_eq!(tagged, 2);
        assert!(stage.get(1, 1).unwrap().has_big_loot());
        assert!(stage.get(39, 1).unwrap().has_big_loot());
        assert!(!stage.get(1, 1).unwrap().has_loot());
        assert_eq!(stage.get(1, 1).unwrap().kind, TileKind::Floor);
        assert!(stage.iter().filter(|t| t.x > 1 && t.x < 39).all(|t| t.loot.is_empty()));
    }

    #[test]
    fn test_room_tiles_never_tagged() {
        let mut stage = Stage::build(21, 7).unwrap();
        let room = Room::new(1, 1, 3, 3);
        stage.start_region();
        for (x, y) in room.tiles() {
            stage.set(x, y, TileKind::Floor).unwrap();
        }
        // Corridor leaving the room's east side
        for x in 4..=15 {
            stage.set(x, 2, TileKind::Floor).unwrap();
        }
        mark_dead_ends(&mut stage, &[room]);
        for (x, y) in room.tiles() {
            assert!(stage.get(x, y).unwrap().loot.is_empty());
        }
        // 12 tiles long: more than 21 / 5 = 4 unbranched steps
        assert!(stage.get(15, 2).unwrap().has_big_loot());
    }
}
