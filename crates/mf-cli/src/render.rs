//! Text renderings of a dungeon

use mf_core::{Dungeon, Tile, TileKind};

/// Display character for a tile
pub fn glyph(tile: &Tile) -> char {
    match tile.kind {
        TileKind::Wall => '#',
        TileKind::Door => '+',
        TileKind::Floor if tile.has_big_loot() => '*',
        TileKind::Floor if tile.has_loot() => '$',
        TileKind::Floor => '.',
    }
}

/// Seed header followed by one line per row
pub fn render_ascii(dungeon: &Dungeon) -> String {
    let mut out = format!("seed: {}\n", dungeon.seed());
    out.reserve((dungeon.width() + 1) * dungeon.height());

    for y in 0..dungeon.height() {
        for x in 0..dungeon.width() {
            out.push(dungeon.tile(x, y).map_or(' ', glyph));
        }
        out.push('\n');
    }
    out
}

/// Pretty JSON of the plain projection
pub fn render_json(dungeon: &Dungeon) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&dungeon.to_plain())
}
