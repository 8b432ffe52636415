use arrayvec::ArrayVec;
use bitflags::bitflags;

use crate::ability::{Ability, AbilityId, Item, ItemId};
use crate::attribute::{Attribute, AttributeCollection, AttributeKind};
use crate::config::CombatConfig;

use super::{Faction, Position, UnitId};

bitflags! {
    /// Per-encounter status of a unit.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct UnitFlags: u8 {
        /// Health reached zero; the unit no longer occupies a tile or acts.
        const DEFEATED = 1 << 0;
        /// The unit's action menu is open.
        const MENU_ACTIVE = 1 << 1;
        /// The unit already moved this turn.
        const MOVED = 1 << 2;
    }
}

/// A temporary attribute shift (buff or debuff).
///
/// `remaining_turns` counts down each time the owner starts a turn; the shift
/// is reverted when it reaches zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimedModifier {
    pub attribute: AttributeKind,
    pub amount: i32,
    pub remaining_turns: u32,
}

/// A combatant.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Unit {
    pub id: UnitId,
    pub name: String,
    pub faction: Faction,
    pub position: Position,
    pub attributes: AttributeCollection,
    pub abilities: Vec<Ability>,
    pub inventory: Vec<Item>,
    /// Equipped weapon; its `Range` attribute is the unit's weapon range.
    pub weapon: Option<Item>,
    modifiers: ArrayVec<TimedModifier, { CombatConfig::MAX_MODIFIERS }>,
    flags: UnitFlags,
}

impl Unit {
    pub fn new(id: UnitId, name: impl Into<String>, faction: Faction, position: Position) -> Self {
        Self {
            id,
            name: name.into(),
            faction,
            position,
            attributes: AttributeCollection::new(),
            abilities: Vec::new(),
            inventory: Vec::new(),
            weapon: None,
            modifiers: ArrayVec::new(),
            flags: UnitFlags::empty(),
        }
    }

    #[must_use]
    pub fn with_attribute(mut self, kind: AttributeKind, base: i32) -> Self {
        self.attributes.add(Attribute::new(kind, base));
        self
    }

    #[must_use]
    pub fn with_ability(mut self, ability: Ability) -> Self {
        self.abilities.push(ability);
        self
    }

    #[must_use]
    pub fn with_item(mut self, item: Item) -> Self {
        self.inventory.push(item);
        self
    }

    #[must_use]
    pub fn with_weapon(mut self, weapon: Item) -> Self {
        self.weapon = Some(weapon);
        self
    }

    pub const fn is_player_controlled(&self) -> bool {
        self.faction.is_player()
    }

    pub fn flags(&self) -> UnitFlags {
        self.flags
    }

    pub fn is_defeated(&self) -> bool {
        self.flags.contains(UnitFlags::DEFEATED)
    }

    pub fn mark_defeated(&mut self) {
        self.flags.insert(UnitFlags::DEFEATED);
        self.flags.remove(UnitFlags::MENU_ACTIVE);
    }

    pub fn activate_menu(&mut self) {
        self.flags.insert(UnitFlags::MENU_ACTIVE);
    }

    pub fn deactivate_menu(&mut self) {
        self.flags.remove(UnitFlags::MENU_ACTIVE);
    }

    pub fn is_menu_active(&self) -> bool {
        self.flags.contains(UnitFlags::MENU_ACTIVE)
    }

    pub fn has_moved(&self) -> bool {
        self.flags.contains(UnitFlags::MOVED)
    }

    pub fn set_moved(&mut self, moved: bool) {
        self.flags.set(UnitFlags::MOVED, moved);
    }

    pub fn health(&self) -> i32 {
        self.attributes.current(AttributeKind::Health)
    }

    pub fn movement_attribute(&self) -> Option<&Attribute> {
        self.attributes.get(AttributeKind::Movement)
    }

    /// Tiles this unit may move this turn (0 when it has no Movement attribute).
    pub fn movement(&self) -> u32 {
        self.movement_attribute()
            .map_or(0, |attribute| attribute.current().max(0) as u32)
    }

    /// Reach of the equipped weapon, or [`CombatConfig::DEFAULT_WEAPON_RANGE`]
    /// when unarmed or when the weapon declares no range.
    pub fn weapon_range(&self) -> u32 {
        self.weapon
            .as_ref()
            .and_then(Item::range)
            .unwrap_or(CombatConfig::DEFAULT_WEAPON_RANGE)
    }

    /// Radius scanned by the proximity evaluator: movement plus weapon range.
    pub fn threat_radius(&self) -> u32 {
        self.movement() + self.weapon_range()
    }

    /// Physical damage bonus including the equipped weapon's Attack attribute.
    pub fn attack_power(&self) -> i32 {
        let weapon = self
            .weapon
            .as_ref()
            .map_or(0, |weapon| weapon.attributes().current(AttributeKind::Attack));
        self.attributes.current(AttributeKind::Attack) + weapon
    }

    /// Looks up an ability by id.
    ///
    /// Every unit can basic-attack: [`AbilityId::ATTACK`] falls back to
    /// [`Ability::basic_attack`] when the unit does not define its own.
    pub fn find_ability(&self, id: AbilityId) -> Option<Ability> {
        self.abilities
            .iter()
            .find(|ability| ability.id == id)
            .cloned()
            .or_else(|| (id == AbilityId::ATTACK).then(Ability::basic_attack))
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.inventory
            .iter()
            .find(|item| item.id == id && item.quantity > 0)
    }

    /// Uses up one of item `id`; the stack is dropped when it runs out.
    pub fn consume_item(&mut self, id: ItemId) -> bool {
        let Some(index) = self.inventory.iter().position(|item| item.id == id) else {
            return false;
        };
        let item = &mut self.inventory[index];
        item.quantity = item.quantity.saturating_sub(1);
        if item.quantity == 0 {
            self.inventory.remove(index);
        }
        true
    }

    pub fn modifiers(&self) -> &[TimedModifier] {
        &self.modifiers
    }

    /// Shifts `attribute` by `amount` for `turns` of this unit's turns.
    ///
    /// Returns false (and changes nothing) when the unit lacks the attribute,
    /// `turns` is zero, or the modifier list is full.
    pub fn apply_modifier(&mut self, attribute: AttributeKind, amount: i32, turns: u32) -> bool {
        if turns == 0 || self.modifiers.is_full() {
            return false;
        }
        let Some(target) = self.attributes.get_mut(attribute) else {
            return false;
        };
        target.adjust(amount);
        self.modifiers.push(TimedModifier {
            attribute,
            amount,
            remaining_turns: turns,
        });
        true
    }

    /// Counts every modifier down by one turn, reverting those that expire.
    ///
    /// Returns the number of modifiers that expired.
    pub fn tick_modifiers(&mut self) -> usize {
        let before = self.modifiers.len();
        let attributes = &mut self.attributes;
        self.modifiers.retain(|modifier| {
            modifier.remaining_turns = modifier.remaining_turns.saturating_sub(1);
            if modifier.remaining_turns > 0 {
                return true;
            }
            if let Some(target) = attributes.get_mut(modifier.attribute) {
                target.adjust(-modifier.amount);
            }
            false
        });
        before - self.modifiers.len()
    }
}
