//! Usable things: abilities and items.
//!
//! An [`Ability`] is a learned technique with its own range, area of effect
//! and damage profile. An [`Item`] is a consumable or a piece of equipment
//! whose reach is read from its own attribute collection.

mod effect;
mod item;

pub use effect::Effect;
pub use item::{Item, ItemId};

use core::fmt;

/// Identifier of an ability definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityId(pub u16);

impl AbilityId {
    /// Reserved id of the basic attack. Its reach is the actor's weapon range
    /// and it never has an area of effect.
    pub const ATTACK: Self = Self(0);

    pub const fn is_attack(self) -> bool {
        self.0 == Self::ATTACK.0
    }
}

impl fmt::Display for AbilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ability:{}", self.0)
    }
}

/// Who an ability may be aimed at.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TargetType {
    /// Only the user; no tile selection.
    #[strum(serialize = "self")]
    SelfOnly,
    /// Opposing units around the chosen tile.
    Single,
    /// Opposing units around the chosen tile, usually with a wider area.
    Area,
    /// Friendly units around the chosen tile.
    Ally,
}

/// Which attribute pair an ability's damage is computed from.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum DamageKind {
    /// Attack against Defense.
    #[default]
    Physical,
    /// Magic against Resistance.
    Magical,
    /// Deals no damage; effects only.
    None,
}

/// An ability definition.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ability {
    pub id: AbilityId,
    pub name: String,
    pub target_type: TargetType,
    pub damage_kind: DamageKind,
    /// Flat damage added before the target's mitigation.
    pub power: i32,
    /// Declared reach in tiles. Ignored for the basic attack.
    pub range: u32,
    /// Radius around the target tile. Ignored for the basic attack.
    pub aoe_range: u32,
    /// Applied to every target in order.
    pub effects: Vec<Effect>,
}

impl Ability {
    pub fn new(id: AbilityId, name: impl Into<String>, target_type: TargetType) -> Self {
        Self {
            id,
            name: name.into(),
            target_type,
            damage_kind: DamageKind::Physical,
            power: 0,
            range: 0,
            aoe_range: 0,
            effects: Vec::new(),
        }
    }

    /// The attack every unit knows: single target, physical, weapon reach.
    pub fn basic_attack() -> Self {
        Self::new(AbilityId::ATTACK, "Attack", TargetType::Single)
    }

    #[must_use]
    pub fn with_power(mut self, power: i32) -> Self {
        self.power = power;
        self
    }

    #[must_use]
    pub fn with_range(mut self, range: u32) -> Self {
        self.range = range;
        self
    }

    #[must_use]
    pub fn with_aoe(mut self, aoe_range: u32) -> Self {
        self.aoe_range = aoe_range;
        self
    }

    #[must_use]
    pub fn with_damage_kind(mut self, damage_kind: DamageKind) -> Self {
        self.damage_kind = damage_kind;
        self
    }

    #[must_use]
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub const fn is_basic_attack(&self) -> bool {
        self.id.is_attack()
    }

    pub const fn is_self_only(&self) -> bool {
        matches!(self.target_type, TargetType::SelfOnly)
    }
}
