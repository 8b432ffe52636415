use std::collections::BTreeMap;
use std::fmt;

use super::{Attribute, AttributeKind};

/// Keyed store of attributes, at most one per [`AttributeKind`].
///
/// Insertion never overwrites: the first attribute added for a kind wins and
/// later adds for the same kind are ignored. Iteration follows kind order so
/// that anything derived from a collection is reproducible.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttributeCollection {
    attributes: BTreeMap<AttributeKind, Attribute>,
}

impl AttributeCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a collection from `attributes`, keeping the first of any duplicates.
    pub fn from_attributes(attributes: impl IntoIterator<Item = Attribute>) -> Self {
        let mut collection = Self::new();
        for attribute in attributes {
            collection.add(attribute);
        }
        collection
    }

    /// Adds `attribute` under its own kind unless that kind is already present.
    pub fn add(&mut self, attribute: Attribute) {
        self.add_as(attribute.kind(), attribute);
    }

    /// Adds `attribute` under `kind` unless that kind is already present.
    pub fn add_as(&mut self, kind: AttributeKind, attribute: Attribute) {
        self.attributes.entry(kind).or_insert(attribute);
    }

    pub fn get(&self, kind: AttributeKind) -> Option<&Attribute> {
        self.attributes.get(&kind)
    }

    pub fn get_mut(&mut self, kind: AttributeKind) -> Option<&mut Attribute> {
        self.attributes.get_mut(&kind)
    }

    pub fn has_type(&self, kind: AttributeKind) -> bool {
        self.attributes.contains_key(&kind)
    }

    /// Current value of `kind`, or 0 when absent.
    pub fn current(&self, kind: AttributeKind) -> i32 {
        self.get(kind).map_or(0, Attribute::current)
    }

    /// Returns a collection that shares nothing with `self`.
    ///
    /// Used to snapshot a unit's baseline before combat mutates it.
    pub fn deep_copy(&self) -> Self {
        let attributes = self
            .attributes
            .iter()
            .map(|(kind, attribute)| (*kind, *attribute))
            .collect();
        Self { attributes }
    }

    /// Number of distinct kinds held.
    pub fn count(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes.values()
    }
}

impl fmt::Display for AttributeCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for attribute in self.iter() {
            write!(f, "{attribute}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_add_wins() {
        let mut collection = AttributeCollection::new();
        collection.add(Attribute::new(AttributeKind::Health, 30));
        collection.add(Attribute::new(AttributeKind::Health, 99));
        collection.add_as(AttributeKind::Health, Attribute::new(AttributeKind::Mana, 5));

        assert_eq!(collection.count(), 1);
        assert_eq!(collection.current(AttributeKind::Health), 30);
        assert_eq!(collection.get(AttributeKind::Health).map(Attribute::base), Some(30));
    }

    #[test]
    fn add_as_stores_under_the_given_kind() {
        let mut collection = AttributeCollection::new();
        collection.add_as(AttributeKind::Range, Attribute::new(AttributeKind::Movement, 3));
        assert!(collection.has_type(AttributeKind::Range));
        assert!(!collection.has_type(AttributeKind::Movement));
    }

    #[test]
    fn missing_kinds_are_absent_not_errors() {
        let collection = AttributeCollection::new();
        assert!(collection.get(AttributeKind::Speed).is_none());
        assert_eq!(collection.current(AttributeKind::Speed), 0);
        assert!(collection.is_empty());
    }

    #[test]
    fn deep_copy_is_independent() {
        let source = AttributeCollection::from_attributes([
            Attribute::new(AttributeKind::Health, 20),
            Attribute::new(AttributeKind::Defense, 4),
        ]);
        let mut copy = source.deep_copy();

        copy.get_mut(AttributeKind::Health)
            .expect("copied health")
            .deplete(15);
        copy.get_mut(AttributeKind::Defense)
            .expect("copied defense")
            .adjust(3);

        assert_eq!(source.current(AttributeKind::Health), 20);
        assert_eq!(source.current(AttributeKind::Defense), 4);
        assert_eq!(copy.current(AttributeKind::Health), 5);
        assert_eq!(copy.count(), source.count());
    }

    #[test]
    fn display_lists_attributes_in_kind_order() {
        let collection = AttributeCollection::from_attributes([
            Attribute::new(AttributeKind::Movement, 3),
            Attribute::new(AttributeKind::Health, 12),
        ]);
        assert_eq!(collection.to_string(), "[health: 12/12][movement: 3/3]");
    }
}
