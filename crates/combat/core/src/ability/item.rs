use core::fmt;

use crate::attribute::{Attribute, AttributeCollection, AttributeKind};

use super::Effect;

/// Identifier of an item definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemId(pub u16);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item:{}", self.0)
    }
}

/// An inventory stack or an equipped weapon.
///
/// Using an item always targets the user. Its reach, when it has one, is the
/// `Range` attribute of its own collection.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    attributes: AttributeCollection,
    pub effects: Vec<Effect>,
    pub quantity: u32,
}

impl Item {
    pub fn new(id: ItemId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            attributes: AttributeCollection::new(),
            effects: Vec::new(),
            quantity: 1,
        }
    }

    #[must_use]
    pub fn with_attribute(mut self, kind: AttributeKind, base: i32) -> Self {
        self.attributes.add(Attribute::new(kind, base));
        self
    }

    #[must_use]
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    #[must_use]
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn attributes(&self) -> &AttributeCollection {
        &self.attributes
    }

    /// The item's `Range` attribute, clamped at zero.
    pub fn range(&self) -> Option<u32> {
        self.attributes
            .get(AttributeKind::Range)
            .map(|range| range.current().max(0) as u32)
    }
}
