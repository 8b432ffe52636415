use std::fmt;

use crate::state::UnitId;

/// Ordered queue of units; the head acts next.
///
/// [`TurnOrder::add_unit`] and [`TurnOrder::insert_unit`] do not check for
/// duplicates. A unit queued twice acts twice per cycle, and
/// [`TurnOrder::remove_unit`] removes one entry at a time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnOrder {
    units: Vec<UnitId>,
}

impl TurnOrder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `unit` to the back.
    pub fn add_unit(&mut self, unit: UnitId) {
        self.units.push(unit);
    }

    /// Places `unit` at `index`, or at the back when `index` is past the end.
    pub fn insert_unit(&mut self, unit: UnitId, index: usize) {
        let index = index.min(self.units.len());
        self.units.insert(index, unit);
    }

    /// Removes the first entry for `unit`. Returns false when absent.
    pub fn remove_unit(&mut self, unit: UnitId) -> bool {
        match self.units.iter().position(|queued| *queued == unit) {
            Some(index) => {
                self.units.remove(index);
                true
            }
            None => false,
        }
    }

    /// The unit that acts next, or `None` when the queue is empty.
    pub fn next_up(&self) -> Option<UnitId> {
        self.units.first().copied()
    }

    /// Merges `other` into this order.
    ///
    /// Existing entries keep their positions; units of `other` not yet
    /// present are appended in `other`'s order, each at most once.
    pub fn union(&mut self, other: &TurnOrder) {
        for unit in &other.units {
            if !self.units.contains(unit) {
                self.units.push(*unit);
            }
        }
    }

    pub fn contains(&self, unit: UnitId) -> bool {
        self.units.contains(&unit)
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn clear(&mut self) {
        self.units.clear();
    }

    pub fn as_slice(&self) -> &[UnitId] {
        &self.units
    }

    pub fn iter(&self) -> impl Iterator<Item = UnitId> + '_ {
        self.units.iter().copied()
    }
}

impl FromIterator<UnitId> for TurnOrder {
    fn from_iter<I: IntoIterator<Item = UnitId>>(iter: I) -> Self {
        Self {
            units: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for TurnOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (index, unit) in self.units.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{unit}")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(ids: &[u32]) -> TurnOrder {
        ids.iter().map(|id| UnitId(*id)).collect()
    }

    #[test]
    fn add_then_next_up_returns_the_unit() {
        let mut order = TurnOrder::new();
        assert_eq!(order.next_up(), None);
        order.add_unit(UnitId(4));
        assert_eq!(order.next_up(), Some(UnitId(4)));
        assert_eq!(order.len(), 1);
    }

    #[test]
    fn removing_an_absent_unit_is_a_no_op() {
        let mut queue = order(&[1, 2, 3]);
        assert!(!queue.remove_unit(UnitId(9)));
        assert_eq!(queue, order(&[1, 2, 3]));
    }

    #[test]
    fn remove_takes_the_first_match_only() {
        let mut queue = order(&[1, 2, 1]);
        assert!(queue.remove_unit(UnitId(1)));
        assert_eq!(queue, order(&[2, 1]));
    }

    #[test]
    fn insert_clamps_past_the_end() {
        let mut queue = order(&[1, 2]);
        queue.insert_unit(UnitId(5), 1);
        queue.insert_unit(UnitId(6), 99);
        assert_eq!(queue, order(&[1, 5, 2, 6]));
    }

    #[test]
    fn union_never_duplicates() {
        let mut queue = order(&[3, 1]);
        queue.union(&order(&[1, 4, 3, 2, 4]));
        assert_eq!(queue, order(&[3, 1, 4, 2]));

        queue.union(&order(&[2, 3]));
        assert_eq!(queue.len(), 4);
    }

    #[test]
    fn display_lists_ids() {
        assert_eq!(order(&[2, 7]).to_string(), "[#2, #7]");
        assert_eq!(TurnOrder::new().to_string(), "[]");
    }
}
