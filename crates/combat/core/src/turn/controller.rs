use std::cmp::Reverse;

use crate::attribute::AttributeKind;
use crate::state::{Roster, UnitId};

use super::TurnOrder;

/// Owner of an encounter's turn order.
///
/// Every living unit stays in the queue, so repeatedly finishing the head's
/// turn cycles through all of them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnOrderController {
    order: TurnOrder,
    turns_finished: u64,
}

impl TurnOrderController {
    pub fn new(order: TurnOrder) -> Self {
        Self {
            order,
            turns_finished: 0,
        }
    }

    /// Opening order for `roster`: living units by Speed, fastest first, ties
    /// broken by id.
    pub fn from_roster(roster: &Roster) -> Self {
        let mut units: Vec<_> = roster.iter().filter(|unit| !unit.is_defeated()).collect();
        units.sort_by_key(|unit| (Reverse(unit.attributes.current(AttributeKind::Speed)), unit.id));
        Self::new(units.into_iter().map(|unit| unit.id).collect())
    }

    pub fn order(&self) -> &TurnOrder {
        &self.order
    }

    pub fn order_mut(&mut self) -> &mut TurnOrder {
        &mut self.order
    }

    pub fn next_up(&self) -> Option<UnitId> {
        self.order.next_up()
    }

    pub fn all_units(&self) -> &[UnitId] {
        self.order.as_slice()
    }

    /// Moves `unit` to the back of the queue.
    ///
    /// Returns false, leaving the queue untouched, when `unit` is not queued.
    pub fn finish_turn(&mut self, unit: UnitId) -> bool {
        if !self.order.remove_unit(unit) {
            return false;
        }
        self.order.add_unit(unit);
        self.turns_finished += 1;
        true
    }

    /// Number of successful [`TurnOrderController::finish_turn`] calls.
    pub fn turns_finished(&self) -> u64 {
        self.turns_finished
    }

    /// Merges a reinforcement order into the queue.
    pub fn reinforce(&mut self, order: &TurnOrder) {
        self.order.union(order);
    }

    pub fn remove(&mut self, unit: UnitId) -> bool {
        self.order.remove_unit(unit)
    }

    /// Drops every queued unit that is defeated or unknown to `roster`.
    ///
    /// Returns the dropped ids in queue order.
    pub fn remove_defeated(&mut self, roster: &Roster) -> Vec<UnitId> {
        let dropped: Vec<UnitId> = self
            .order
            .iter()
            .filter(|id| roster.get(*id).is_none_or(|unit| unit.is_defeated()))
            .collect();
        for id in &dropped {
            self.order.remove_unit(*id);
        }
        dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Faction, Position, Unit};

    fn roster() -> Roster {
        let mut roster = Roster::new();
        for (id, speed) in [(1, 3), (2, 7), (3, 3), (4, 5)] {
            roster.insert(
                Unit::new(UnitId(id), format!("u{id}"), Faction::Player, Position::ORIGIN)
                    .with_attribute(AttributeKind::Health, 5)
                    .with_attribute(AttributeKind::Speed, speed),
            );
        }
        roster
    }

    #[test]
    fn opening_order_is_by_speed_then_id() {
        let controller = TurnOrderController::from_roster(&roster());
        assert_eq!(
            controller.all_units(),
            &[UnitId(2), UnitId(4), UnitId(1), UnitId(3)]
        );
    }

    #[test]
    fn finishing_a_turn_requeues_at_the_back() {
        let mut controller = TurnOrderController::from_roster(&roster());
        assert!(controller.finish_turn(UnitId(2)));
        assert_eq!(controller.next_up(), Some(UnitId(4)));
        assert_eq!(controller.all_units().last(), Some(&UnitId(2)));
        assert_eq!(controller.turns_finished(), 1);
    }

    #[test]
    fn finishing_an_unknown_unit_changes_nothing() {
        let mut controller = TurnOrderController::from_roster(&roster());
        let before = controller.order().clone();
        assert!(!controller.finish_turn(UnitId(9)));
        assert_eq!(controller.order(), &before);
        assert_eq!(controller.turns_finished(), 0);
    }

    #[test]
    fn every_unit_gets_a_turn_each_cycle() {
        let mut controller = TurnOrderController::from_roster(&roster());
        let mut acted = Vec::new();
        for _ in 0..4 {
            let unit = controller.next_up().expect("unit");
            acted.push(unit);
            controller.finish_turn(unit);
        }
        acted.sort();
        assert_eq!(acted, vec![UnitId(1), UnitId(2), UnitId(3), UnitId(4)]);
    }

    #[test]
    fn defeated_units_drop_out() {
        let mut roster = roster();
        roster.get_mut(UnitId(4)).expect("unit").mark_defeated();
        let mut controller = TurnOrderController::new(
            [2, 4, 9, 1].into_iter().map(UnitId).collect(),
        );
        assert_eq!(controller.remove_defeated(&roster), vec![UnitId(4), UnitId(9)]);
        assert_eq!(controller.all_units(), &[UnitId(2), UnitId(1)]);
    }

    #[test]
    fn reinforcements_join_at_the_back() {
        let mut controller = TurnOrderController::new([1, 2].into_iter().map(UnitId).collect());
        controller.reinforce(&[2, 5].into_iter().map(UnitId).collect());
        assert_eq!(controller.all_units(), &[UnitId(1), UnitId(2), UnitId(5)]);
    }
}
