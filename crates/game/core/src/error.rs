//! Common error infrastructure for game-core.
//!
//! Construction errors ([`MapError`], [`SetupError`]) live here. Errors for
//! player-facing engine calls (`MoveError`, `AttackError`, `AbilityError`) are
//! defined next to the engine in [`crate::engine`].
//!
//! Every error enum implements [`GameError`] so callers can decide how to
//! surface a failure without matching on each variant.

use crate::state::{FieldCoord, Position};

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// The request was rejected; another action may succeed.
    ///
    /// Examples: destination blocked, ability on cooldown
    Recoverable,

    /// Invalid input, should not retry without changes.
    ///
    /// Examples: malformed map, field too small
    Validation,

    /// The session reached a terminal state.
    Terminal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Terminal => "terminal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Shared behaviour of every game-core error enum.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Static identifier for the variant, useful for logs and tests.
    fn error_code(&self) -> &'static str;
}

/// Structural problems in a generated or loaded map.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MapError {
    #[error("field size {width}x{height} is too small (minimum 3x3)")]
    FieldTooSmall { width: u32, height: u32 },

    #[error("map must contain at least one field (got {width}x{height})")]
    EmptyMap { width: u32, height: u32 },

    #[error("expected {expected} fields, got {actual}")]
    FieldCountMismatch { expected: usize, actual: usize },

    #[error("field at index {index} reports coordinate {found}, expected {expected}")]
    FieldCoordMismatch {
        index: usize,
        expected: FieldCoord,
        found: FieldCoord,
    },

    #[error("field {field} is {found_width}x{found_height}, expected {width}x{height}")]
    FieldSizeMismatch {
        field: FieldCoord,
        width: u32,
        height: u32,
        found_width: u32,
        found_height: u32,
    },

    #[error("field {field} has {actual} tiles, expected {expected}")]
    TileCountMismatch {
        field: FieldCoord,
        expected: usize,
        actual: usize,
    },

    #[error("tile at index {index} of field {field} reports position {found}")]
    TilePositionMismatch {
        field: FieldCoord,
        index: usize,
        found: Position,
    },

    #[error("field {field} violates the border layout at {position}")]
    InvalidBorder { field: FieldCoord, position: Position },
}

impl GameError for MapError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::FieldTooSmall { .. } => "MAP_FIELD_TOO_SMALL",
            Self::EmptyMap { .. } => "MAP_EMPTY",
            Self::FieldCountMismatch { .. } => "MAP_FIELD_COUNT_MISMATCH",
            Self::FieldCoordMismatch { .. } => "MAP_FIELD_COORD_MISMATCH",
            Self::FieldSizeMismatch { .. } => "MAP_FIELD_SIZE_MISMATCH",
            Self::TileCountMismatch { .. } => "MAP_TILE_COUNT_MISMATCH",
            Self::TilePositionMismatch { .. } => "MAP_TILE_POSITION_MISMATCH",
            Self::InvalidBorder { .. } => "MAP_INVALID_BORDER",
        }
    }
}

/// Failures while preparing a session.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SetupError {
    #[error(transparent)]
    Map(#[from] MapError),

    #[error("start field {0} is outside the map")]
    StartFieldOutOfMap(FieldCoord),

    #[error("field {0} has no walkable cell for the player")]
    NoWalkableCell(FieldCoord),

    #[error("position {0} is not walkable")]
    NotWalkable(Position),
}

impl GameError for SetupError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Map(error) => error.error_code(),
            Self::StartFieldOutOfMap(_) => "SETUP_START_FIELD_OUT_OF_MAP",
            Self::NoWalkableCell(_) => "SETUP_NO_WALKABLE_CELL",
            Self::NotWalkable(_) => "SETUP_NOT_WALKABLE",
        }
    }
}
