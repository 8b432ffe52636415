//! Board access for combat rules.
//!
//! The rules only need boundary, occupancy and victory queries over the
//! board, expressed by [`TileMap`]. [`Battlefield`] is the grid
//! implementation used by the runtime: a rectangular occupancy grid plus the
//! roster that owns the occupants.

mod battlefield;

pub use battlefield::Battlefield;

use crate::state::{Position, Unit};

/// Read-only board queries used by targeting, proximity and victory checks.
pub trait TileMap {
    fn dimensions(&self) -> MapDimensions;

    /// Edge length of one tile in world units.
    fn tile_size(&self) -> f32;

    /// Returns the tile at `(x, z)`, or `None` outside the board.
    fn tile_at(&self, x: i32, z: i32) -> Option<TileData<'_>>;

    /// True when no enemy unit is left standing.
    fn are_all_enemies_defeated(&self) -> bool;

    /// True when no player unit is left standing.
    fn are_all_allies_defeated(&self) -> bool;

    fn is_inside_boundary(&self, x: i32, z: i32) -> bool {
        self.dimensions().contains(x, z)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapDimensions {
    pub width: u32,
    pub height: u32,
}

impl MapDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, x: i32, z: i32) -> bool {
        x >= 0 && z >= 0 && x < self.width as i32 && z < self.height as i32
    }

    pub fn contains_position(&self, position: Position) -> bool {
        self.contains(position.x, position.z)
    }

    pub const fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// View of one tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileData<'a> {
    pub position: Position,
    pub occupant: Option<&'a Unit>,
}

/// Converts a world-space point to the tile containing it.
///
/// Tile `(0, 0)` spans `[0, tile_size)` on both axes; points on a shared edge
/// belong to the tile with the larger index.
pub fn world_to_tile(world_x: f32, world_z: f32, tile_size: f32) -> Position {
    Position::new(
        (world_x / tile_size).floor() as i32,
        (world_z / tile_size).floor() as i32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimensions_reject_negative_and_overflowing_coordinates() {
        let dims = MapDimensions::new(5, 3);
        assert!(dims.contains(0, 0));
        assert!(dims.contains(4, 2));
        assert!(!dims.contains(5, 0));
        assert!(!dims.contains(0, 3));
        assert!(!dims.contains(-1, 1));
        assert_eq!(dims.area(), 15);
    }

    #[test]
    fn world_points_map_to_tiles() {
        assert_eq!(world_to_tile(0.5, 0.5, 1.0), Position::new(0, 0));
        assert_eq!(world_to_tile(5.0, 9.9, 2.0), Position::new(2, 4));
        assert_eq!(world_to_tile(-0.1, 3.0, 1.0), Position::new(-1, 3));
    }
}
