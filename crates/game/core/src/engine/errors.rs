//! Errors and outcomes of player-facing engine calls.
//!
//! A call that returns an error has not changed the state.

use crate::combat::AttackResult;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{EntityId, FieldCoord, ItemId, ItemSlot, Position};

/// What a successful [`move_player`](super::GameEngine::move_player) did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveOutcome {
    Moved { to: Position },
    /// The destination held an enemy, which was attacked instead.
    Attacked {
        target: EntityId,
        result: AttackResult,
    },
    PickedUp { item: ItemId, to: Position },
    /// The player stepped on an exit and entered another field.
    Transitioned { field: FieldCoord, to: Position },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveError {
    #[error("the game is over")]
    GameOver,

    #[error("destination {destination} is out of bounds")]
    OutOfBounds { destination: Position },

    #[error("destination {destination} is blocked")]
    Blocked { destination: Position },

    #[error("inventory cannot take the item at {destination}")]
    InventoryFull { destination: Position },
}

impl GameError for MoveError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::GameOver => ErrorSeverity::Terminal,
            _ => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::GameOver => "MOVE_GAME_OVER",
            Self::OutOfBounds { .. } => "MOVE_OUT_OF_BOUNDS",
            Self::Blocked { .. } => "MOVE_BLOCKED",
            Self::InventoryFull { .. } => "MOVE_INVENTORY_FULL",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackError {
    #[error("the game is over")]
    GameOver,

    #[error("entity {0} does not exist in the current field")]
    UnknownEntity(EntityId),

    #[error("entity {0} cannot attack itself")]
    SelfTarget(EntityId),

    #[error("entity {0} cannot take part in combat")]
    NotCombatant(EntityId),
}

impl GameError for AttackError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::GameOver => ErrorSeverity::Terminal,
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::GameOver => "ATTACK_GAME_OVER",
            Self::UnknownEntity(_) => "ATTACK_UNKNOWN_ENTITY",
            Self::SelfTarget(_) => "ATTACK_SELF_TARGET",
            Self::NotCombatant(_) => "ATTACK_NOT_COMBATANT",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AbilityError {
    #[error("the game is over")]
    GameOver,

    #[error("no enemy at {0}")]
    NoEnemyAt(Position),

    #[error("ability is on cooldown for {remaining} more turns")]
    OnCooldown { remaining: u32 },

    #[error("no enemy within range")]
    NoTargetsInRange,
}

impl GameError for AbilityError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::GameOver => ErrorSeverity::Terminal,
            _ => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::GameOver => "ABILITY_GAME_OVER",
            Self::NoEnemyAt(_) => "ABILITY_NO_ENEMY",
            Self::OnCooldown { .. } => "ABILITY_ON_COOLDOWN",
            Self::NoTargetsInRange => "ABILITY_NO_TARGETS",
        }
    }
}

/// Equipment changes requested by the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InventoryError {
    #[error("the game is over")]
    GameOver,

    #[error("item {0:?} cannot be equipped")]
    NotEquippable(ItemId),

    #[error("nothing to unequip in the {0} slot")]
    EmptySlot(ItemSlot),
}

impl GameError for InventoryError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::GameOver => ErrorSeverity::Terminal,
            _ => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::GameOver => "INVENTORY_GAME_OVER",
            Self::NotEquippable(_) => "INVENTORY_NOT_EQUIPPABLE",
            Self::EmptySlot(_) => "INVENTORY_EMPTY_SLOT",
        }
    }
}

/// Error for calls that only advance time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnError {
    #[error("the game is over")]
    GameOver,
}

impl GameError for TurnError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Terminal
    }

    fn error_code(&self) -> &'static str {
        "TURN_GAME_OVER"
    }
}
