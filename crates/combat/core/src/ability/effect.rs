use crate::attribute::AttributeKind;

/// A side effect an action applies to each of its targets after damage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Effect {
    /// Restores up to `amount`, capped at the attribute's base value.
    Restore { attribute: AttributeKind, amount: u32 },
    /// Shifts the attribute by `amount` for `turns` of the target's turns.
    Modify {
        attribute: AttributeKind,
        amount: i32,
        turns: u32,
    },
    /// Depletes the target's attribute and restores the actor's by the amount
    /// actually removed.
    Drain { attribute: AttributeKind, amount: u32 },
}

impl Effect {
    pub const fn attribute(&self) -> AttributeKind {
        match self {
            Self::Restore { attribute, .. }
            | Self::Modify { attribute, .. }
            | Self::Drain { attribute, .. } => *attribute,
        }
    }
}
