//! Threat detection around units.
//!
//! A unit is threatened when an opposing unit stands within its threat
//! radius (movement plus weapon range). The runtime uses the result to pick
//! between tense and calm music after every turn.

use crate::board::TileMap;
use crate::state::{Position, Unit};

/// Offsets probed for a scan of `radius`, in probe order.
///
/// For each step `i` in `1..=radius` the diagonal cells `(±i, ±j)` for
/// `j` in `1..=radius - i` come first (NE, SE, NW, SW), then the four cardinal
/// cells at distance `i` (N, E, S, W). Together they cover every cell within
/// Manhattan distance `radius` except the centre, each exactly once.
pub fn scan_offsets(radius: u32) -> impl Iterator<Item = (i32, i32)> {
    let radius = radius as i32;
    (1..=radius).flat_map(move |i| {
        (1..=radius - i)
            .flat_map(move |j| [(i, j), (i, -j), (-i, j), (-i, -j)])
            .chain([(0, i), (i, 0), (0, -i), (-i, 0)])
    })
}

/// True when an opposing unit occupies a tile within `unit`'s threat radius.
///
/// Probes outside the board are skipped before any tile lookup.
pub fn unit_threatened<M: TileMap + ?Sized>(unit: &Unit, map: &M) -> bool {
    let Position { x, z } = unit.position;
    scan_offsets(unit.threat_radius()).any(|(dx, dz)| {
        let (px, pz) = (x + dx, z + dz);
        map.is_inside_boundary(px, pz)
            && map
                .tile_at(px, pz)
                .and_then(|tile| tile.occupant)
                .is_some_and(|other| !other.is_defeated() && unit.faction.opposes(other.faction))
    })
}

/// True when any living unit in `units` is threatened.
pub fn is_enemy_nearby<'a, M, I>(units: I, map: &M) -> bool
where
    M: TileMap + ?Sized,
    I: IntoIterator<Item = &'a Unit>,
{
    units
        .into_iter()
        .filter(|unit| !unit.is_defeated())
        .any(|unit| unit_threatened(unit, map))
}
