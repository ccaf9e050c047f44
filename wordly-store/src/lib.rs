pub mod connection;
pub mod entities;
pub mod repositories;

use sea_orm::DbErr;
use thiserror::Error;
use wordly_types::GameError;

pub use repositories::{rank_scores, GameRepository, ScoreRepository, SessionRepository};

/// Failure of a store operation: either a typed domain condition the
/// caller surfaces to the client, or an internal storage fault that must
/// not leak past the request boundary.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Game(#[from] GameError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<DbErr> for StoreError {
    fn from(err: DbErr) -> Self {
        StoreError::Internal(err.into())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Internal(err.into())
    }
}
