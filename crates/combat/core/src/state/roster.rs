use std::collections::BTreeMap;

use crate::attribute::AttributeCollection;

use super::{Faction, Unit, UnitId};

/// Owner of every unit taking part in an encounter.
///
/// Units are kept in id order so that scans over the roster are reproducible.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Roster {
    units: BTreeMap<UnitId, Unit>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `unit`, returning the unit previously registered under the same id.
    pub fn insert(&mut self, unit: Unit) -> Option<Unit> {
        self.units.insert(unit.id, unit)
    }

    pub fn get(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(&id)
    }

    pub fn get_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.units.get_mut(&id)
    }

    pub fn contains(&self, id: UnitId) -> bool {
        self.units.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Unit> {
        self.units.values()
    }

    /// Units of `faction` that have not been defeated.
    pub fn living(&self, faction: Faction) -> impl Iterator<Item = &Unit> {
        self.iter()
            .filter(move |unit| unit.faction == faction && !unit.is_defeated())
    }

    /// True when no unit of `faction` is left standing.
    pub fn all_defeated(&self, faction: Faction) -> bool {
        self.living(faction).next().is_none()
    }

    /// Deep copies every unit's attributes, keyed by id.
    pub fn snapshot(&self) -> BTreeMap<UnitId, AttributeCollection> {
        self.units
            .iter()
            .map(|(id, unit)| (*id, unit.attributes.deep_copy()))
            .collect()
    }
}
