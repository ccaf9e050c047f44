use sea_orm::{ActiveModelTrait, ActiveValue::Set, DatabaseConnection, EntityTrait, QueryOrder};
use uuid::Uuid;
use wordly_core::WordPool;

use crate::entities::{games, prelude::Games};
use crate::StoreError;

/// Owns the "current active game": the most recently created row. Games
/// are immutable once created; a reset simply inserts a successor, so
/// there is never a window with two active games.
pub struct GameRepository {
    db: DatabaseConnection,
}

impl GameRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// The active game, creating one from the pool when the store is
    /// empty. Idempotent bootstrap.
    pub async fn get_or_create_active(
        &self,
        pool: &WordPool,
        max_guesses: u32,
    ) -> Result<games::Model, StoreError> {
        if let Some(game) = self.find_active().await? {
            return Ok(game);
        }
        self.create_game(pool, max_guesses).await
    }

    pub async fn find_active(&self) -> Result<Option<games::Model>, StoreError> {
        Ok(Games::find()
            .order_by_desc(games::Column::CreatedAt)
            .order_by_desc(games::Column::Id)
            .one(&self.db)
            .await?)
    }

    /// Create a brand-new game, which becomes the active one the moment
    /// the insert commits. Prior games and their sessions turn historical
    /// and are never mutated.
    pub async fn create_game(
        &self,
        pool: &WordPool,
        max_guesses: u32,
    ) -> Result<games::Model, StoreError> {
        let (word, definition) = pool.choose();
        let game = games::ActiveModel {
            uid: Set(Uuid::new_v4().simple().to_string()),
            word: Set(word),
            definition: Set(definition),
            max_guesses: Set(max_guesses as i32),
            created_at: Set(chrono::Utc::now().into()),
            ..Default::default()
        };
        let game = game.insert(&self.db).await?;
        tracing::info!(game_uid = %game.uid, word_length = game.word_length(), "created new active game");
        Ok(game)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::connect_to_memory_database;

    fn test_pool() -> WordPool {
        WordPool::parse("crate A storage container.")
    }

    async fn setup() -> GameRepository {
        let db = connect_to_memory_database().await.unwrap();
        GameRepository::new(db)
    }

    #[tokio::test]
    async fn bootstrap_creates_a_game_once() {
        let repo = setup().await;
        assert!(repo.find_active().await.unwrap().is_none());

        let first = repo.get_or_create_active(&test_pool(), 6).await.unwrap();
        assert_eq!(first.word, "CRATE");
        assert_eq!(first.max_guesses, 6);

        let second = repo.get_or_create_active(&test_pool(), 6).await.unwrap();
        assert_eq!(second.uid, first.uid);
    }

    #[tokio::test]
    async fn reset_supersedes_the_active_game() {
        let repo = setup().await;
        let first = repo.get_or_create_active(&test_pool(), 6).await.unwrap();
        let next = repo.create_game(&test_pool(), 6).await.unwrap();
        assert_ne!(next.uid, first.uid);

        let active = repo.find_active().await.unwrap().unwrap();
        assert_eq!(active.uid, next.uid);
    }

    #[tokio::test]
    async fn descriptor_hides_the_word() {
        let repo = setup().await;
        let game = repo.get_or_create_active(&test_pool(), 6).await.unwrap();
        let descriptor = game.descriptor();
        assert_eq!(descriptor.game_uid, game.uid);
        assert_eq!(descriptor.word_length, 5);
        assert_eq!(descriptor.max_guesses, 6);
        assert!(!serde_json::to_string(&descriptor).unwrap().contains("CRATE"));
    }
}
