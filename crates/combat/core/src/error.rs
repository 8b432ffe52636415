//! Error infrastructure for combat-core.
//!
//! Ordinary absences (a missing attribute, an empty turn order, a probe that
//! falls outside the board, an action with zero targets) are modelled as
//! `Option`, `bool` or empty results and never surface here. The enums below
//! cover requests that cannot be honoured at all, such as aiming outside an
//! action's range or placing a unit on an occupied tile.

use crate::state::{Position, UnitId};

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the caller may retry with different input (another tile,
///   another target)
/// - **Validation**: the request references something that does not exist
/// - **Internal**: an inconsistency between the roster and the board
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    Recoverable,
    Validation,
    Internal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Common trait for all combat-core errors.
///
/// Use `#[derive(thiserror::Error)]` for the Display/Error impl and classify
/// severity by recoverability, not impact.
pub trait CombatError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Static identifier for the error variant, used in logs and tests.
    fn error_code(&self) -> &'static str;
}

/// Errors raised while placing or moving units on the board.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PlacementError {
    #[error("position {position} is outside the board")]
    OutOfBoundary { position: Position },

    #[error("position {position} is already occupied by {occupant}")]
    Occupied {
        position: Position,
        occupant: UnitId,
    },

    #[error("unit {0} is not on the roster")]
    UnknownUnit(UnitId),

    #[error("unit {0} is already on the roster")]
    DuplicateUnit(UnitId),

    #[error("unit {unit} cannot move {distance} tiles (movement {movement})")]
    BeyondMovement {
        unit: UnitId,
        distance: u32,
        movement: u32,
    },
}

impl CombatError for PlacementError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::OutOfBoundary { .. } | Self::Occupied { .. } | Self::BeyondMovement { .. } => {
                ErrorSeverity::Recoverable
            }
            Self::UnknownUnit(_) | Self::DuplicateUnit(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::OutOfBoundary { .. } => "placement.out_of_boundary",
            Self::Occupied { .. } => "placement.occupied",
            Self::UnknownUnit(_) => "placement.unknown_unit",
            Self::DuplicateUnit(_) => "placement.duplicate_unit",
            Self::BeyondMovement { .. } => "placement.beyond_movement",
        }
    }
}

/// Errors raised while aiming, resolving or applying an action.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("unit {0} is not on the roster")]
    UnknownUnit(UnitId),

    #[error("target tile {tile} is outside the board")]
    OutOfBoundary { tile: Position },

    #[error("target tile {tile} is {distance} tiles away but the action reaches {range}")]
    OutOfRange {
        tile: Position,
        distance: u32,
        range: u32,
    },

    #[error("self-only actions cannot be aimed at a tile")]
    SelfOnly,
}

impl CombatError for ResolveError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::OutOfBoundary { .. } | Self::OutOfRange { .. } | Self::SelfOnly => {
                ErrorSeverity::Recoverable
            }
            Self::UnknownUnit(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownUnit(_) => "resolve.unknown_unit",
            Self::OutOfBoundary { .. } => "resolve.out_of_boundary",
            Self::OutOfRange { .. } => "resolve.out_of_range",
            Self::SelfOnly => "resolve.self_only",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aiming_errors_are_recoverable() {
        let err = ResolveError::OutOfRange {
            tile: Position::new(4, 0),
            distance: 4,
            range: 2,
        };
        assert!(err.severity().is_recoverable());
        assert_eq!(err.error_code(), "resolve.out_of_range");
        assert_eq!(
            err.to_string(),
            "target tile (4, 0) is 4 tiles away but the action reaches 2"
        );
    }

    #[test]
    fn unknown_units_are_not_recoverable() {
        assert_eq!(
            ResolveError::UnknownUnit(UnitId(3)).severity(),
            ErrorSeverity::Internal
        );
        assert_eq!(
            PlacementError::UnknownUnit(UnitId(3)).severity().as_str(),
            "validation"
        );
    }
}
