use crate::error::PlacementError;
use crate::state::{Faction, Position, Roster, Unit, UnitId};

use super::{MapDimensions, TileData, TileMap};

/// Rectangular occupancy grid together with the roster of its occupants.
///
/// The grid stores unit ids only; the units themselves live in the roster.
/// Defeated units are removed from the grid but stay on the roster so that
/// post-combat reporting can still see them.
#[derive(Clone, Debug, PartialEq)]
pub struct Battlefield {
    dimensions: MapDimensions,
    tile_size: f32,
    occupancy: Vec<Option<UnitId>>,
    roster: Roster,
}

impl Battlefield {
    pub const DEFAULT_TILE_SIZE: f32 = 1.0;

    pub fn new(width: u32, height: u32) -> Self {
        let dimensions = MapDimensions::new(width, height);
        Self {
            dimensions,
            tile_size: Self::DEFAULT_TILE_SIZE,
            occupancy: vec![None; dimensions.area()],
            roster: Roster::new(),
        }
    }

    #[must_use]
    pub fn with_tile_size(mut self, tile_size: f32) -> Self {
        self.tile_size = tile_size;
        self
    }

    fn index(&self, position: Position) -> Option<usize> {
        self.dimensions
            .contains_position(position)
            .then(|| position.z as usize * self.dimensions.width as usize + position.x as usize)
    }

    /// Places `unit` on its own position and registers it on the roster.
    ///
    /// Ids are unique: a unit already on the roster, defeated or not, cannot
    /// be spawned again.
    pub fn spawn(&mut self, unit: Unit) -> Result<(), PlacementError> {
        if self.roster.contains(unit.id) {
            return Err(PlacementError::DuplicateUnit(unit.id));
        }
        let position = unit.position;
        let index = self
            .index(position)
            .ok_or(PlacementError::OutOfBoundary { position })?;
        if let Some(occupant) = self.occupancy[index] {
            return Err(PlacementError::Occupied { position, occupant });
        }
        self.occupancy[index] = Some(unit.id);
        self.roster.insert(unit);
        Ok(())
    }

    pub fn occupant_at(&self, position: Position) -> Option<UnitId> {
        self.index(position).and_then(|index| self.occupancy[index])
    }

    /// Moves `id` to `to`, honouring the unit's Movement attribute.
    pub fn move_unit(&mut self, id: UnitId, to: Position) -> Result<(), PlacementError> {
        let unit = self.roster.get(id).ok_or(PlacementError::UnknownUnit(id))?;
        let from = unit.position;
        let distance = from.distance(to);
        let movement = unit.movement();
        if distance > movement {
            return Err(PlacementError::BeyondMovement {
                unit: id,
                distance,
                movement,
            });
        }
        let target = self
            .index(to)
            .ok_or(PlacementError::OutOfBoundary { position: to })?;
        match self.occupancy[target] {
            Some(occupant) if occupant != id => {
                return Err(PlacementError::Occupied {
                    position: to,
                    occupant,
                });
            }
            _ => {}
        }

        self.clear_tile(from);
        self.occupancy[target] = Some(id);
        if let Some(unit) = self.roster.get_mut(id) {
            unit.position = to;
        }
        Ok(())
    }

    /// Empties the tile at `position`, returning its previous occupant.
    pub fn clear_tile(&mut self, position: Position) -> Option<UnitId> {
        let index = self.index(position)?;
        self.occupancy[index].take()
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn roster_mut(&mut self) -> &mut Roster {
        &mut self.roster
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.roster.get(id)
    }

    pub fn unit_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.roster.get_mut(id)
    }

    /// Tiles inside the board within `radius` (Manhattan) of `center`,
    /// including `center`, in row-major order.
    pub fn tiles_within(&self, center: Position, radius: u32) -> Vec<Position> {
        let r = radius as i32;
        let mut tiles = Vec::new();
        for z in (center.z - r)..=(center.z + r) {
            for x in (center.x - r)..=(center.x + r) {
                let tile = Position::new(x, z);
                if center.distance(tile) <= radius && self.dimensions.contains(x, z) {
                    tiles.push(tile);
                }
            }
        }
        tiles
    }

    /// Living units standing within `radius` of `center`, in id order.
    pub fn units_within(&self, center: Position, radius: u32) -> Vec<UnitId> {
        let mut ids: Vec<UnitId> = self
            .tiles_within(center, radius)
            .into_iter()
            .filter_map(|tile| self.occupant_at(tile))
            .filter(|id| self.unit(*id).is_some_and(|unit| !unit.is_defeated()))
            .collect();
        ids.sort();
        ids
    }
}

impl TileMap for Battlefield {
    fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    fn tile_size(&self) -> f32 {
        self.tile_size
    }

    fn tile_at(&self, x: i32, z: i32) -> Option<TileData<'_>> {
        let position = Position::new(x, z);
        let index = self.index(position)?;
        Some(TileData {
            position,
            occupant: self.occupancy[index].and_then(|id| self.roster.get(id)),
        })
    }

    fn are_all_enemies_defeated(&self) -> bool {
        self.roster.all_defeated(Faction::Enemy)
    }

    fn are_all_allies_defeated(&self) -> bool {
        self.roster.all_defeated(Faction::Player)
    }
}
