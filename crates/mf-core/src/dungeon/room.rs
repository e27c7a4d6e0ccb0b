//! Rectangular rooms

use serde::{Deserialize, Serialize};

/// Inclusive tile bounds of a room
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub top: usize,
    pub right: usize,
    pub bottom: usize,
    pub left: usize,
}

/// An axis-aligned room; `x`, `y` is the top-left floor tile
///
/// This is also the plain projection used by [`super::PlainDungeon`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Room {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Room {
    pub fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox {
            top: self.y,
            right: self.x + self.width - 1,
            bottom: self.y + self.height - 1,
            left: self.x,
        }
    }

    /// Check if the tile is inside the room
    pub fn contains_tile(&self, x: usize, y: usize) -> bool {
        let b = self.bounding_box();
        x >= b.left && x <= b.right && y >= b.top && y <= b.bottom
    }

    /// Check if the rooms overlap or are closer than one tile of wall
    ///
    /// Touching rooms, including rooms that only meet diagonally, intersect.
    pub fn intersects(&self, other: &Room) -> bool {
        let r1 = self.bounding_box();
        let r2 = other.bounding_box();

        !(r2.left > r1.right + 1
            || r1.left > r2.right + 1
            || r2.top > r1.bottom + 1
            || r1.top > r2.bottom + 1)
    }

    /// Is (x, y) one of the four corner floor tiles
    pub fn is_corner(&self, x: usize, y: usize) -> bool {
        let b = self.bounding_box();
        (x == b.left || x == b.right) && (y == b.top || y == b.bottom)
    }

    /// All floor tiles of the room, column by column
    pub fn tiles(&self) -> impl Iterator<Item = (usize, usize)> + use<> {
        let (x, y, width, height) = (self.x, self.y, self.width, self.height);
        (x..x + width).flat_map(move |tx| (y..y + height).map(move |ty| (tx, ty)))
    }

    pub fn area(&self) -> usize {
        self.width * self.height
    }
}
