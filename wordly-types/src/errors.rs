use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

use crate::game::GameDescriptor;

/// Request-recoverable failures surfaced to clients as structured
/// responses. None of these should ever crash the process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, Error)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum GameError {
    /// Malformed or missing input. Names the offending field only.
    #[error("{message}")]
    Validation { field: String, message: String },
    /// The active game changed underneath the caller. Carries the fresh
    /// descriptor so the client can resynchronize without guessing.
    #[error("Game has reset. Please start a new game.")]
    GameMismatch { game: GameDescriptor },
    /// Guess submitted past game-over or beyond the guess budget —
    /// client/state desync, not transient.
    #[error("{message}")]
    Sequence { message: String },
    /// Display-name collision within the active game. User-correctable.
    #[error("The name {name} is already in use. Please choose another")]
    NameConflict { name: String },
    /// Duplicate score submission. Clients should treat as success-once.
    #[error("Score already submitted for this device.")]
    ScoreConflict,
}

impl GameError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        GameError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn sequence(message: impl Into<String>) -> Self {
        GameError::Sequence {
            message: message.into(),
        }
    }
}
