pub mod game_repository;
pub mod score_repository;
pub mod session_repository;

pub use game_repository::GameRepository;
pub use score_repository::{rank_scores, ScoreRepository};
pub use session_repository::SessionRepository;

/// sqlite reports lost uniqueness races as constraint failures; the
/// repositories map those onto the same typed conflicts as their
/// application-level pre-checks.
pub(crate) fn is_unique_violation(err: &sea_orm::DbErr) -> bool {
    err.to_string().contains("UNIQUE constraint failed")
}
