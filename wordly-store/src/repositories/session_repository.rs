use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, QueryFilter, TransactionTrait,
};
use wordly_core::PlayerSession;
use wordly_types::{ClientState, GameError, SessionView};

use crate::entities::{games, player_sessions, prelude::PlayerSessions};
use crate::repositories::is_unique_violation;
use crate::StoreError;

/// Persists one [`PlayerSession`] per (game, player). Every mutation is a
/// single transaction so two requests racing on the same key cannot both
/// pass an invariant check.
pub struct SessionRepository {
    db: DatabaseConnection,
}

impl SessionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find(
        &self,
        game: &games::Model,
        uid: &str,
    ) -> Result<Option<SessionView>, StoreError> {
        let record = find_record(&self.db, game.id, uid).await?;
        record.map(|model| view_of(&model, game)).transpose()
    }

    /// Append one evaluated guess to the player's session, creating the
    /// session on the first guess. The name-conflict check, the sequence
    /// checks and the write share one transaction.
    pub async fn apply_guess(
        &self,
        game: &games::Model,
        uid: &str,
        name: &str,
        guess: &str,
        now: i64,
    ) -> Result<SessionView, StoreError> {
        let txn = self.db.begin().await?;
        let model = get_or_create(&txn, game, uid, name, now).await?;

        let mut session = decode_session(&model)?;
        session.validate_sequence(game.max_guesses as u32)?;
        session.apply_guess(guess, &game.word, game.max_guesses as u32, now)?;

        let mut active: player_sessions::ActiveModel = model.into();
        active.is_winner = Set(session.is_winner);
        active.finish_time = Set(session.finished_at);
        active.guesses = Set(serde_json::to_value(&session.guesses)?);
        active.keyboard_hints = Set(serde_json::to_value(&session.keyboard_hints)?);
        let model = active.update(&txn).await?;
        txn.commit().await?;

        view_of(&model, game)
    }

    /// Whole-object replace of the client-declared progress fields. The
    /// server stores what the client asserts without reinterpreting any
    /// game rules (lower-trust compatibility mode).
    pub async fn upsert_state(
        &self,
        game: &games::Model,
        uid: &str,
        name: &str,
        state: ClientState,
        now: i64,
    ) -> Result<SessionView, StoreError> {
        let txn = self.db.begin().await?;
        let model = get_or_create(&txn, game, uid, name, now).await?;

        let mut active: player_sessions::ActiveModel = model.into();
        if let Some(is_winner) = state.is_winner {
            active.is_winner = Set(is_winner);
        }
        active.client_state = Set(Some(serde_json::to_value(&state)?));
        let model = active.update(&txn).await?;
        txn.commit().await?;

        view_of(&model, game)
    }
}

async fn find_record<C: ConnectionTrait>(
    conn: &C,
    game_id: i32,
    uid: &str,
) -> Result<Option<player_sessions::Model>, StoreError> {
    Ok(PlayerSessions::find()
        .filter(player_sessions::Column::GameId.eq(game_id))
        .filter(player_sessions::Column::Uid.eq(uid))
        .one(conn)
        .await?)
}

async fn has_name_conflict<C: ConnectionTrait>(
    conn: &C,
    game_id: i32,
    uid: &str,
    name: &str,
) -> Result<bool, StoreError> {
    Ok(PlayerSessions::find()
        .filter(player_sessions::Column::GameId.eq(game_id))
        .filter(player_sessions::Column::Name.eq(name))
        .filter(player_sessions::Column::Uid.ne(uid))
        .one(conn)
        .await?
        .is_some())
}

/// Find-or-create inside the caller's transaction, with the name-conflict
/// check performed in the same atomic boundary as creation. The unique
/// (game_id, name) index is the backstop for first-writes racing past the
/// check.
async fn get_or_create<C: ConnectionTrait>(
    conn: &C,
    game: &games::Model,
    uid: &str,
    name: &str,
    now: i64,
) -> Result<player_sessions::Model, StoreError> {
    if let Some(record) = find_record(conn, game.id, uid).await? {
        if record.name != name {
            if has_name_conflict(conn, game.id, uid, name).await? {
                return Err(GameError::NameConflict {
                    name: name.to_string(),
                }
                .into());
            }
            let mut active: player_sessions::ActiveModel = record.into();
            active.name = Set(name.to_string());
            return Ok(active.update(conn).await?);
        }
        return Ok(record);
    }

    if has_name_conflict(conn, game.id, uid, name).await? {
        return Err(GameError::NameConflict {
            name: name.to_string(),
        }
        .into());
    }

    let record = player_sessions::ActiveModel {
        game_id: Set(game.id),
        uid: Set(uid.to_string()),
        name: Set(name.to_string()),
        is_winner: Set(false),
        start_time: Set(now),
        finish_time: Set(None),
        guesses: Set(serde_json::json!([])),
        keyboard_hints: Set(serde_json::json!({})),
        client_state: Set(None),
        ..Default::default()
    };
    match record.insert(conn).await {
        Ok(model) => Ok(model),
        Err(err) if is_unique_violation(&err) => Err(GameError::NameConflict {
            name: name.to_string(),
        }
        .into()),
        Err(err) => Err(err.into()),
    }
}

fn decode_session(model: &player_sessions::Model) -> Result<PlayerSession, StoreError> {
    Ok(PlayerSession {
        name: model.name.clone(),
        guesses: serde_json::from_value(model.guesses.clone())?,
        keyboard_hints: serde_json::from_value(model.keyboard_hints.clone())?,
        started_at: model.start_time,
        finished_at: model.finish_time,
        is_winner: model.is_winner,
    })
}

fn view_of(model: &player_sessions::Model, game: &games::Model) -> Result<SessionView, StoreError> {
    let session = decode_session(model)?;
    let mut view = session.view(game.max_guesses as u32, game.word_length());
    if let Some(raw) = &model.client_state {
        view.declared = Some(serde_json::from_value(raw.clone())?);
    }
    Ok(view)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::connect_to_memory_database;
    use crate::repositories::GameRepository;
    use wordly_core::WordPool;
    use wordly_types::LetterStatus;

    async fn setup() -> (GameRepository, SessionRepository, games::Model) {
        let db = connect_to_memory_database().await.unwrap();
        let games = GameRepository::new(db.clone());
        let sessions = SessionRepository::new(db);
        let pool = WordPool::parse("crate A storage container.");
        let game = games.get_or_create_active(&pool, 6).await.unwrap();
        (games, sessions, game)
    }

    #[tokio::test]
    async fn first_guess_creates_the_session() {
        let (_, sessions, game) = setup().await;

        assert!(sessions.find(&game, "p1").await.unwrap().is_none());
        let view = sessions
            .apply_guess(&game, "p1", "Alice", "SPORE", 1_000)
            .await
            .unwrap();
        assert_eq!(view.name, "Alice");
        assert_eq!(view.current_row, 1);
        assert_eq!(view.guesses[0].number, 1);
        assert!(!view.game_over);

        let found = sessions.find(&game, "p1").await.unwrap().unwrap();
        assert_eq!(found, view);
    }

    #[tokio::test]
    async fn winning_guess_persists_the_terminal_state() {
        let (_, sessions, game) = setup().await;
        let view = sessions
            .apply_guess(&game, "p1", "Alice", "CRATE", 1_000)
            .await
            .unwrap();
        assert!(view.is_winner);
        assert!(view.game_over);
        assert_eq!(view.finish_time, Some(1_000));

        let err = sessions
            .apply_guess(&game, "p1", "Alice", "SPORE", 2_000)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Game(GameError::Sequence { .. })
        ));
    }

    #[tokio::test]
    async fn keyboard_hints_survive_the_round_trip() {
        let (_, sessions, game) = setup().await;
        sessions
            .apply_guess(&game, "p1", "Alice", "TEPID", 1_000)
            .await
            .unwrap();
        let view = sessions
            .apply_guess(&game, "p1", "Alice", "BRACE", 2_000)
            .await
            .unwrap();
        assert_eq!(view.keyboard_hints.get(&'E'), Some(&LetterStatus::Correct));
        assert_eq!(view.keyboard_hints.get(&'T'), Some(&LetterStatus::Present));
    }

    #[tokio::test]
    async fn duplicate_name_is_rejected_for_another_player() {
        let (_, sessions, game) = setup().await;
        sessions
            .apply_guess(&game, "p1", "Alice", "SPORE", 1_000)
            .await
            .unwrap();

        let err = sessions
            .apply_guess(&game, "p2", "Alice", "SPORE", 2_000)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Game(GameError::NameConflict { .. })
        ));
    }

    #[tokio::test]
    async fn name_is_freed_by_a_new_game() {
        let (games, sessions, game) = setup().await;
        sessions
            .apply_guess(&game, "p1", "Alice", "SPORE", 1_000)
            .await
            .unwrap();

        let pool = WordPool::parse("crate A storage container.");
        let next = games.create_game(&pool, 6).await.unwrap();
        let view = sessions
            .apply_guess(&next, "p2", "Alice", "SPORE", 2_000)
            .await
            .unwrap();
        assert_eq!(view.name, "Alice");
    }

    #[tokio::test]
    async fn rename_checks_for_conflicts() {
        let (_, sessions, game) = setup().await;
        sessions
            .apply_guess(&game, "p1", "Alice", "SPORE", 1_000)
            .await
            .unwrap();
        sessions
            .apply_guess(&game, "p2", "Bob", "SPORE", 1_000)
            .await
            .unwrap();

        // p2 renaming to Alice collides
        let err = sessions
            .apply_guess(&game, "p2", "Alice", "TRAIN", 2_000)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Game(GameError::NameConflict { .. })
        ));

        // renaming to a free name is fine
        let view = sessions
            .apply_guess(&game, "p2", "Robert", "TRAIN", 2_000)
            .await
            .unwrap();
        assert_eq!(view.name, "Robert");
    }

    #[tokio::test]
    async fn upsert_state_stores_declared_fields_verbatim() {
        let (_, sessions, game) = setup().await;
        let state: ClientState = serde_json::from_str(
            r#"{"currentRow": 2, "gameOver": false, "keyboardStatuses": {"C": "correct"}}"#,
        )
        .unwrap();

        let view = sessions
            .upsert_state(&game, "p1", "Sam", state.clone(), 1_000)
            .await
            .unwrap();
        assert_eq!(view.name, "Sam");
        assert_eq!(view.declared, Some(state));

        // authoritative fields are untouched by declared progress
        assert_eq!(view.current_row, 0);
        assert!(view.guesses.is_empty());
    }

    #[tokio::test]
    async fn losing_uses_up_the_guess_budget() {
        let (_, sessions, game) = setup().await;
        for i in 0..6 {
            sessions
                .apply_guess(&game, "p1", "Alice", "SPORE", 1_000 + i)
                .await
                .unwrap();
        }
        let view = sessions.find(&game, "p1").await.unwrap().unwrap();
        assert!(view.game_over);
        assert!(!view.is_winner);
        assert_eq!(view.current_row, 6);

        let err = sessions
            .apply_guess(&game, "p1", "Alice", "SPORE", 9_000)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Game(GameError::Sequence { .. })
        ));
    }
}
