use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    TransactionTrait,
};
use wordly_types::{GameError, ScoreEntry};

use crate::entities::{games, prelude::Scores, scores};
use crate::repositories::is_unique_violation;
use crate::StoreError;

/// Ledger of finishing results: at most one entry per (game, player),
/// immutable once recorded.
pub struct ScoreRepository {
    db: DatabaseConnection,
}

impl ScoreRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Record a finishing result, at most once per (game, player). The
    /// existence check and the insert share one transaction; the unique
    /// (game_id, uid) index turns a lost race into the same conflict.
    pub async fn record_if_absent(
        &self,
        game: &games::Model,
        uid: &str,
        name: &str,
        tries: u32,
        duration: f64,
        now: i64,
    ) -> Result<ScoreEntry, StoreError> {
        let txn = self.db.begin().await?;
        let existing = Scores::find()
            .filter(scores::Column::GameId.eq(game.id))
            .filter(scores::Column::Uid.eq(uid))
            .one(&txn)
            .await?;
        if existing.is_some() {
            return Err(GameError::ScoreConflict.into());
        }

        let entry = scores::ActiveModel {
            game_id: Set(game.id),
            uid: Set(uid.to_string()),
            name: Set(name.to_string()),
            tries: Set(tries as i32),
            duration: Set(duration),
            recorded_at: Set(now),
            ..Default::default()
        };
        let model = match entry.insert(&txn).await {
            Ok(model) => model,
            Err(err) if is_unique_violation(&err) => {
                return Err(GameError::ScoreConflict.into());
            }
            Err(err) => return Err(err.into()),
        };
        txn.commit().await?;

        Ok(entry_of(&model))
    }

    /// Ranked board for one game.
    pub async fn load_ranked(&self, game: &games::Model) -> Result<Vec<ScoreEntry>, StoreError> {
        let entries = Scores::find()
            .filter(scores::Column::GameId.eq(game.id))
            .all(&self.db)
            .await?
            .iter()
            .map(entry_of)
            .collect();
        Ok(rank_scores(entries))
    }
}

/// Rank finishing results: fewer tries wins, then faster duration, then
/// earliest submission. `total_cmp` keeps the ordering total even for
/// pathological float durations.
pub fn rank_scores(mut entries: Vec<ScoreEntry>) -> Vec<ScoreEntry> {
    entries.sort_by(|a, b| {
        a.tries
            .cmp(&b.tries)
            .then_with(|| a.duration.total_cmp(&b.duration))
            .then_with(|| a.recorded_at.cmp(&b.recorded_at))
    });
    entries
}

fn entry_of(model: &scores::Model) -> ScoreEntry {
    ScoreEntry {
        uid: model.uid.clone(),
        name: model.name.clone(),
        tries: model.tries as u32,
        duration: model.duration,
        recorded_at: model.recorded_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::connect_to_memory_database;
    use crate::repositories::GameRepository;
    use wordly_core::WordPool;

    async fn setup() -> (ScoreRepository, games::Model) {
        let db = connect_to_memory_database().await.unwrap();
        let games = GameRepository::new(db.clone());
        let pool = WordPool::parse("crate A storage container.");
        let game = games.get_or_create_active(&pool, 6).await.unwrap();
        (ScoreRepository::new(db), game)
    }

    fn entry(uid: &str, tries: u32, duration: f64, recorded_at: i64) -> ScoreEntry {
        ScoreEntry {
            uid: uid.to_string(),
            name: uid.to_uppercase(),
            tries,
            duration,
            recorded_at,
        }
    }

    #[test]
    fn ranking_is_tries_then_duration_then_time() {
        let ranked = rank_scores(vec![
            entry("a", 3, 50.0, 1),
            entry("b", 2, 70.0, 2),
            entry("c", 3, 40.0, 3),
        ]);
        let order: Vec<&str> = ranked.iter().map(|e| e.uid.as_str()).collect();
        assert_eq!(order, vec!["b", "c", "a"]);
    }

    #[test]
    fn equal_scores_rank_by_submission_time() {
        let ranked = rank_scores(vec![
            entry("late", 3, 40.0, 200),
            entry("early", 3, 40.0, 100),
        ]);
        assert_eq!(ranked[0].uid, "early");
    }

    #[tokio::test]
    async fn duplicate_submission_conflicts() {
        let (scores, game) = setup().await;
        scores
            .record_if_absent(&game, "p1", "Alice", 3, 42.0, 1_000)
            .await
            .unwrap();

        let err = scores
            .record_if_absent(&game, "p1", "Alice", 4, 99.0, 2_000)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Game(GameError::ScoreConflict)));

        // the first entry is untouched
        let board = scores.load_ranked(&game).await.unwrap();
        assert_eq!(board.len(), 1);
        assert_eq!(board[0].tries, 3);
    }

    #[tokio::test]
    async fn concurrent_submissions_record_exactly_once() {
        let (scores, game) = setup().await;

        let first = scores.record_if_absent(&game, "p1", "Alice", 3, 42.0, 1_000);
        let second = scores.record_if_absent(&game, "p1", "Alice", 3, 42.0, 1_000);
        let (a, b) = tokio::join!(first, second);

        let successes = [&a, &b].iter().filter(|r| r.is_ok()).count();
        assert_eq!(successes, 1);
        let conflicts = [a, b]
            .into_iter()
            .filter(|r| {
                matches!(
                    r,
                    Err(StoreError::Game(GameError::ScoreConflict))
                )
            })
            .count();
        assert_eq!(conflicts, 1);

        let board = scores.load_ranked(&game).await.unwrap();
        assert_eq!(board.len(), 1);
    }

    #[tokio::test]
    async fn scores_are_scoped_to_their_game() {
        let db = connect_to_memory_database().await.unwrap();
        let games = GameRepository::new(db.clone());
        let scores = ScoreRepository::new(db);
        let pool = WordPool::parse("crate A storage container.");

        let first = games.get_or_create_active(&pool, 6).await.unwrap();
        scores
            .record_if_absent(&first, "p1", "Alice", 3, 42.0, 1_000)
            .await
            .unwrap();

        let next = games.create_game(&pool, 6).await.unwrap();
        assert!(scores.load_ranked(&next).await.unwrap().is_empty());

        // same player may submit again in the successor game
        scores
            .record_if_absent(&next, "p1", "Alice", 2, 30.0, 2_000)
            .await
            .unwrap();
        assert_eq!(scores.load_ranked(&next).await.unwrap().len(), 1);
        assert_eq!(scores.load_ranked(&first).await.unwrap().len(), 1);
    }
}
