//! Numeric combat attributes.
//!
//! Every unit and item carries an [`AttributeCollection`]: a keyed store of
//! [`Attribute`] values (a base value plus the current value that damage,
//! healing and timed modifiers move around).

mod collection;

pub use collection::AttributeCollection;

use core::fmt;

/// Attribute identifiers.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AttributeKind {
    Health,
    Mana,
    /// Physical damage bonus.
    Attack,
    /// Physical damage reduction.
    Defense,
    /// Magical damage bonus.
    Magic,
    /// Magical damage reduction.
    Resistance,
    /// Tiles a unit may move per turn.
    Movement,
    /// Initiative; higher acts earlier in the opening turn order.
    Speed,
    /// Reach of an item or weapon in tiles.
    Range,
}

/// A base/current value pair.
///
/// Values are integers so that resolution stays deterministic across
/// platforms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attribute {
    kind: AttributeKind,
    base: i32,
    current: i32,
}

impl Attribute {
    /// Creates an attribute whose current value starts at `base`.
    pub const fn new(kind: AttributeKind, base: i32) -> Self {
        Self {
            kind,
            base,
            current: base,
        }
    }

    #[must_use]
    pub const fn with_current(mut self, current: i32) -> Self {
        self.current = current;
        self
    }

    pub const fn kind(&self) -> AttributeKind {
        self.kind
    }

    pub const fn base(&self) -> i32 {
        self.base
    }

    pub const fn current(&self) -> i32 {
        self.current
    }

    pub fn set_current(&mut self, value: i32) {
        self.current = value;
    }

    /// Shifts the current value by `delta` without clamping.
    ///
    /// Used by timed modifiers, which must be able to undo exactly what they
    /// applied.
    pub fn adjust(&mut self, delta: i32) -> i32 {
        self.current = self.current.saturating_add(delta);
        self.current
    }

    /// Removes up to `amount` from the current value, never going below zero.
    ///
    /// Returns the amount actually removed.
    pub fn deplete(&mut self, amount: u32) -> u32 {
        let before = self.current.max(0);
        let amount = i32::try_from(amount).unwrap_or(i32::MAX);
        self.current = self.current.saturating_sub(amount).max(0);
        (before - self.current) as u32
    }

    /// Adds up to `amount` to the current value, capped at the base value.
    ///
    /// A current value already above base (a buffed attribute) is left as is.
    /// Returns the amount actually restored.
    pub fn restore(&mut self, amount: u32) -> u32 {
        if self.current >= self.base {
            return 0;
        }
        let before = self.current;
        let amount = i32::try_from(amount).unwrap_or(i32::MAX);
        self.current = self.current.saturating_add(amount).min(self.base);
        (self.current - before) as u32
    }

    /// Resets the current value to the base value.
    pub fn reset(&mut self) {
        self.current = self.base;
    }

    pub const fn is_depleted(&self) -> bool {
        self.current <= 0
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}: {}/{}]", self.kind, self.current, self.base)
    }
}
