//! A queued use of an ability or an item.
//!
//! [`Action`] carries the aiming context (movement path, target tile and the
//! units caught by it) and, after resolution, the per-target damage and effect
//! maps that presentation collaborators read back.

use std::collections::BTreeMap;
use std::fmt;

use crate::ability::{Ability, Effect, Item};
use crate::state::{Position, Unit, UnitId};

/// What an action uses. Exactly one payload is ever present.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionKind {
    Ability(Ability),
    Item(Item),
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Action {
    kind: ActionKind,
    /// Tiles walked before acting, in order.
    pub path: Vec<Position>,
    pub target_tile: Option<Position>,
    targets: Vec<UnitId>,
    damage_to_targets: Vec<i32>,
    damage_by_unit: BTreeMap<UnitId, i32>,
    effects_by_unit: BTreeMap<UnitId, Vec<Effect>>,
}

impl Action {
    pub fn new(kind: ActionKind) -> Self {
        Self {
            kind,
            path: Vec::new(),
            target_tile: None,
            targets: Vec::new(),
            damage_to_targets: Vec::new(),
            damage_by_unit: BTreeMap::new(),
            effects_by_unit: BTreeMap::new(),
        }
    }

    pub fn ability(ability: Ability) -> Self {
        Self::new(ActionKind::Ability(ability))
    }

    pub fn item(item: Item) -> Self {
        Self::new(ActionKind::Item(item))
    }

    pub fn kind(&self) -> &ActionKind {
        &self.kind
    }

    pub fn as_ability(&self) -> Option<&Ability> {
        match &self.kind {
            ActionKind::Ability(ability) => Some(ability),
            ActionKind::Item(_) => None,
        }
    }

    pub fn as_item(&self) -> Option<&Item> {
        match &self.kind {
            ActionKind::Item(item) => Some(item),
            ActionKind::Ability(_) => None,
        }
    }

    /// True when the action needs no target selection.
    ///
    /// Items always target their user.
    pub fn is_self_only(&self) -> bool {
        match &self.kind {
            ActionKind::Ability(ability) => ability.is_self_only(),
            ActionKind::Item(_) => true,
        }
    }

    /// Reach of the action when used by `actor`.
    ///
    /// The basic attack reaches as far as the actor's weapon regardless of its
    /// declared range; items reach as far as their own `Range` attribute.
    pub fn range(&self, actor: &Unit) -> u32 {
        match &self.kind {
            ActionKind::Ability(ability) if ability.is_basic_attack() => actor.weapon_range(),
            ActionKind::Ability(ability) => ability.range,
            ActionKind::Item(item) => item.range().unwrap_or(0),
        }
    }

    /// Area-of-effect radius around the target tile. Only non-attack abilities
    /// have one.
    pub fn aoe_range(&self, _actor: &Unit) -> u32 {
        match &self.kind {
            ActionKind::Ability(ability) if !ability.is_basic_attack() => ability.aoe_range,
            _ => 0,
        }
    }

    pub fn targets(&self) -> &[UnitId] {
        &self.targets
    }

    /// Damage queued for each entry of [`Action::targets`], in the same order.
    pub fn damage_to_targets(&self) -> &[i32] {
        &self.damage_to_targets
    }

    pub fn add_target(&mut self, unit: UnitId, damage: i32) {
        self.targets.push(unit);
        self.damage_to_targets.push(damage);
    }

    /// Drops the targets together with their queued damage.
    pub fn clear_targets(&mut self) {
        self.targets.clear();
        self.damage_to_targets.clear();
    }

    pub fn add_damage_by_unit(&mut self, unit: UnitId, amount: i32) {
        self.damage_by_unit.insert(unit, amount);
    }

    pub fn damage_by_unit(&self) -> &BTreeMap<UnitId, i32> {
        &self.damage_by_unit
    }

    pub fn add_effects_by_unit(&mut self, unit: UnitId, effects: Vec<Effect>) {
        self.effects_by_unit.insert(unit, effects);
    }

    pub fn effects_by_unit(&self) -> &BTreeMap<UnitId, Vec<Effect>> {
        &self.effects_by_unit
    }

    pub(crate) fn clear_results(&mut self) {
        self.damage_by_unit.clear();
        self.effects_by_unit.clear();
    }

    /// Name of the ability or item.
    pub fn label(&self) -> &str {
        match &self.kind {
            ActionKind::Ability(ability) => &ability.name,
            ActionKind::Item(item) => &item.name,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ActionKind::Ability(ability) => write!(f, "{} ({})", ability.name, ability.id)?,
            ActionKind::Item(item) => write!(f, "{} ({})", item.name, item.id)?,
        }
        if let Some(tile) = self.target_tile {
            write!(f, " at {tile}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ability::{AbilityId, ItemId, TargetType};
    use crate::attribute::AttributeKind;
    use crate::state::Faction;

    fn archer() -> Unit {
        let bow = Item::new(ItemId(9), "Bow").with_attribute(AttributeKind::Range, 4);
        Unit::new(UnitId(1), "Archer", Faction::Player, Position::ORIGIN).with_weapon(bow)
    }

    fn fireball() -> Ability {
        Ability::new(AbilityId(7), "Fireball", TargetType::Area)
            .with_range(3)
            .with_aoe(1)
    }

    #[test]
    fn items_are_always_self_only() {
        let empty = Action::item(Item::new(ItemId(1), "Rock"));
        let ranged =
            Action::item(Item::new(ItemId(2), "Javelin").with_attribute(AttributeKind::Range, 5));
        assert!(empty.is_self_only());
        assert!(ranged.is_self_only());
    }

    #[test]
    fn abilities_are_self_only_only_for_self_targets() {
        let focus = Ability::new(AbilityId(3), "Focus", TargetType::SelfOnly);
        assert!(Action::ability(focus).is_self_only());
        for target_type in [TargetType::Single, TargetType::Area, TargetType::Ally] {
            let ability = Ability::new(AbilityId(3), "Other", target_type);
            assert!(!Action::ability(ability).is_self_only());
        }
    }

    #[test]
    fn range_dispatches_on_kind() {
        let actor = archer();
        assert_eq!(Action::ability(fireball()).range(&actor), 3);

        let attack = Ability::basic_attack().with_range(9);
        assert_eq!(Action::ability(attack).range(&actor), 4);

        let javelin = Item::new(ItemId(2), "Javelin").with_attribute(AttributeKind::Range, 5);
        assert_eq!(Action::item(javelin).range(&actor), 5);
        assert_eq!(Action::item(Item::new(ItemId(1), "Potion")).range(&actor), 0);
    }

    #[test]
    fn aoe_is_ability_only_and_excludes_the_attack() {
        let actor = archer();
        assert_eq!(Action::ability(fireball()).aoe_range(&actor), 1);
        assert_eq!(Action::ability(Ability::basic_attack().with_aoe(2)).aoe_range(&actor), 0);
        assert_eq!(Action::item(Item::new(ItemId(1), "Bomb")).aoe_range(&actor), 0);
    }

    #[test]
    fn clear_targets_drops_damage_with_targets() {
        let mut action = Action::ability(fireball());
        action.add_target(UnitId(2), 5);
        action.add_target(UnitId(3), 4);
        assert_eq!(action.damage_to_targets(), &[5, 4]);

        action.clear_targets();
        assert!(action.targets().is_empty());
        assert!(action.damage_to_targets().is_empty());
    }

    #[test]
    fn damage_map_is_last_write_wins() {
        let mut action = Action::ability(fireball());
        action.add_damage_by_unit(UnitId(2), 5);
        action.add_damage_by_unit(UnitId(2), 8);
        assert_eq!(action.damage_by_unit().get(&UnitId(2)), Some(&8));
        assert_eq!(action.damage_by_unit().len(), 1);
    }
}
