//! The tile grid that generation carves into

use strum::IntoEnumIterator;
use tracing::debug;

use super::tile::{Direction, Pos, Tile, TileKind};
use crate::error::{Axis, BuildError};

/// Smallest accepted width or height
pub const MIN_DIMENSION: usize = 5;

/// Owns every tile of a dungeon, indexed `[x][y]`
///
/// Width and height are always odd so that rooms and maze cells can sit on
/// odd coordinates with a solid wall border around the stage.
#[derive(Debug, Clone)]
pub struct Stage {
    width: usize,
    height: usize,
    tiles: Vec<Vec<Tile>>,
    /// Region stamped by `set`
    current_region: Option<u32>,
    next_region: u32,
}

impl Stage {
    /// Validate dimensions, round them up to odd and fill with wall
    pub fn build(width: usize, height: usize) -> Result<Self, BuildError> {
        let width = odd_dimension(Axis::Width, width)?;
        let height = odd_dimension(Axis::Height, height)?;

        let mut stage = Self {
            width,
            height,
            tiles: Vec::new(),
            current_region: None,
            next_region: 0,
        };
        stage.fill(TileKind::Wall);
        Ok(stage)
    }

    /// Reallocate every tile with the given kind and link neighbors
    pub fn fill(&mut self, kind: TileKind) {
        self.tiles = (0..self.width)
            .map(|x| (0..self.height).map(|y| Tile::new(x, y, kind)).collect())
            .collect();

        for x in 0..self.width {
            for y in 0..self.height {
                let pos = Pos::new(x, y);
                let mut neighbors = self.tiles[x][y].neighbors;
                for dir in Direction::iter() {
                    if let Some(neighbor) = self.offset(pos, dir, 1) {
                        neighbors.set(dir, neighbor);
                    }
                }
                self.tiles[x][y].neighbors = neighbors;
            }
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Check if a signed coordinate lies on the stage
    pub fn contains(&self, x: isize, y: isize) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// The coordinate `distance` steps from `pos`, if it is on the stage
    pub fn offset(&self, pos: Pos, dir: Direction, distance: usize) -> Option<Pos> {
        let (dx, dy) = dir.delta();
        let x = pos.x as isize + dx * distance as isize;
        let y = pos.y as isize + dy * distance as isize;
        self.contains(x, y).then(|| Pos::new(x as usize, y as usize))
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&Tile> {
        self.tiles.get(x).and_then(|column| column.get(y))
    }

    pub(crate) fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut Tile> {
        self.tiles.get_mut(x).and_then(|column| column.get_mut(y))
    }

    /// Tile at a position known to be on the stage
    pub fn tile(&self, pos: Pos) -> &Tile {
        &self.tiles[pos.x][pos.y]
    }

    /// Set a tile's kind and stamp it with the current region
    pub fn set(&mut self, x: usize, y: usize, kind: TileKind) -> Result<&mut Tile, BuildError> {
        let region = self.current_region;
        let tile = self
            .get_mut(x, y)
            .ok_or(BuildError::TileUnreachable { x, y })?;
        tile.kind = kind;
        tile.region = region;
        Ok(tile)
    }

    /// Begin a new region; later `set` calls are stamped with it
    pub fn start_region(&mut self) -> u32 {
        let region = self.next_region;
        self.next_region += 1;
        self.current_region = Some(region);
        region
    }

    pub fn current_region(&self) -> Option<u32> {
        self.current_region
    }

    /// Number of regions started so far
    pub fn region_count(&self) -> u32 {
        self.next_region
    }

    /// In-bounds N, E, S, W neighbors of `pos`
    pub fn cardinal_neighbors(&self, pos: Pos) -> impl Iterator<Item = &Tile> + '_ {
        self.tile(pos).neighbors.cardinal().map(|p| self.tile(p))
    }

    /// All tiles, column by column
    pub fn iter(&self) -> impl Iterator<Item = &Tile> + '_ {
        self.tiles.iter().flatten()
    }

    pub fn tiles(&self) -> &[Vec<Tile>] {
        &self.tiles
    }

    pub fn into_tiles(self) -> Vec<Vec<Tile>> {
        self.tiles
    }
}

fn odd_dimension(axis: Axis, value: usize) -> Result<usize, BuildError> {
    if value < MIN_DIMENSION {
        return Err(BuildError::DimensionTooSmall { axis, value });
    }
    if value % 2 == 0 {
        debug!(%axis, value, "rounding even dimension up to {}", value + 1);
        return Ok(value + 1);
    }
    Ok(value)
}
