use std::sync::Arc;

use sea_orm::DatabaseConnection;
use thiserror::Error;

use wordly_core::{Validity, WordPool, WordValidityOracle};
use wordly_store::entities::games;
use wordly_store::{GameRepository, ScoreRepository, SessionRepository, StoreError};
use wordly_types::{
    ClientState, GameDescriptor, GameError, RevealedGame, ScoreEntry, ScoreboardReveal,
    SessionView,
};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Game(#[from] GameError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<StoreError> for EngineError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Game(e) => EngineError::Game(e),
            StoreError::Internal(e) => EngineError::Internal(e),
        }
    }
}

/// The game session engine: validates claimed game identities against the
/// active game, scores guesses, folds them into persisted player
/// sessions, and keeps the ledger. One instance serves every request.
pub struct GameEngine {
    games: GameRepository,
    sessions: SessionRepository,
    scores: ScoreRepository,
    oracle: Arc<dyn WordValidityOracle>,
    pool: WordPool,
    max_guesses: u32,
}

impl GameEngine {
    pub fn new(
        db: DatabaseConnection,
        pool: WordPool,
        oracle: Arc<dyn WordValidityOracle>,
        max_guesses: u32,
    ) -> Self {
        Self {
            games: GameRepository::new(db.clone()),
            sessions: SessionRepository::new(db.clone()),
            scores: ScoreRepository::new(db),
            oracle,
            pool,
            max_guesses,
        }
    }

    /// Public fields of the active game, bootstrapping one if the store
    /// is empty.
    pub async fn config(&self) -> Result<GameDescriptor, EngineError> {
        let game = self.active_game().await?;
        Ok(game.descriptor())
    }

    /// Score one guess and fold it into the player's session
    /// (server-authoritative mode). A transition into the winning state
    /// enters the ledger exactly once, even against racing duplicates.
    pub async fn submit_guess(
        &self,
        claimed_uid: &str,
        player_uid: &str,
        name: &str,
        guess: &str,
    ) -> Result<SessionView, EngineError> {
        let claimed_uid = require_text(claimed_uid, "gameUid")?;
        let player_uid = require_text(player_uid, "uid")?;
        let name = require_text(name, "name")?;
        let guess = require_text(guess, "guess")?.to_uppercase();

        let game = self.require_active(&claimed_uid).await?;
        if guess.chars().count() != game.word_length() as usize {
            return Err(GameError::validation("guess", "Invalid guess length.").into());
        }
        if self.oracle.check(&guess).await == Validity::Invalid {
            return Err(GameError::validation("guess", "That is not a word.").into());
        }

        let now = now_millis();
        let view = self
            .sessions
            .apply_guess(&game, &player_uid, &name, &guess, now)
            .await?;

        if view.game_over && view.is_winner {
            let finish = view.finish_time.unwrap_or(now);
            let duration = duration_secs(view.start_time, finish);
            match self
                .scores
                .record_if_absent(&game, &player_uid, &name, view.current_row, duration, now)
                .await
            {
                // a racing duplicate already recorded this win
                Ok(_) | Err(StoreError::Game(GameError::ScoreConflict)) => {}
                Err(err) => return Err(err.into()),
            }
        }

        Ok(view)
    }

    /// Ranked board for the active game.
    pub async fn leaderboard(&self) -> Result<Vec<ScoreEntry>, EngineError> {
        let game = self.active_game().await?;
        Ok(self.scores.load_ranked(&game).await?)
    }

    /// Client-declared finishing path: record the reported result
    /// at-most-once and reveal the word to the finished player.
    pub async fn submit_score(
        &self,
        claimed_uid: &str,
        player_uid: &str,
        name: &str,
        tries: i64,
        duration: f64,
    ) -> Result<ScoreboardReveal, EngineError> {
        let claimed_uid = require_text(claimed_uid, "gameUid")?;
        let player_uid = require_text(player_uid, "uid")?;
        let name = require_text(name, "name")?;
        if tries <= 0 {
            return Err(GameError::validation("tries", "tries must be positive.").into());
        }
        if !duration.is_finite() || duration <= 0.0 {
            return Err(GameError::validation("duration", "duration must be positive.").into());
        }

        let game = self.require_active(&claimed_uid).await?;
        let entry = self
            .scores
            .record_if_absent(
                &game,
                &player_uid,
                &name,
                tries as u32,
                duration,
                now_millis(),
            )
            .await?;
        let scores = self.scores.load_ranked(&game).await?;

        Ok(ScoreboardReveal {
            entry,
            scores,
            word: game.word.clone(),
            definition: game.definition.clone(),
        })
    }

    /// The player's progress within the active game, if any.
    pub async fn player_state(&self, player_uid: &str) -> Result<Option<SessionView>, EngineError> {
        let player_uid = require_text(player_uid, "uid")?;
        let game = self.active_game().await?;
        Ok(self.sessions.find(&game, &player_uid).await?)
    }

    /// Store client-declared progress fields without reinterpreting them
    /// (lower-trust compatibility mode).
    pub async fn upsert_state(
        &self,
        claimed_uid: &str,
        player_uid: &str,
        name: &str,
        state: ClientState,
    ) -> Result<SessionView, EngineError> {
        let claimed_uid = require_text(claimed_uid, "gameUid")?;
        let player_uid = require_text(player_uid, "uid")?;
        let name = require_text(name, "name")?;

        let game = self.require_active(&claimed_uid).await?;
        Ok(self
            .sessions
            .upsert_state(&game, &player_uid, &name, state, now_millis())
            .await?)
    }

    /// Admin reset: a brand-new game becomes active the moment the insert
    /// commits; every prior session and score turns historical. The
    /// secret word is revealed to the admin caller only.
    pub async fn reset(&self) -> Result<RevealedGame, EngineError> {
        let game = self.games.create_game(&self.pool, self.max_guesses).await?;
        Ok(RevealedGame {
            word: game.word,
            definition: game.definition,
        })
    }

    async fn active_game(&self) -> Result<games::Model, EngineError> {
        Ok(self
            .games
            .get_or_create_active(&self.pool, self.max_guesses)
            .await?)
    }

    /// Guard against requests that reference a superseded game. The
    /// mismatch error carries the fresh descriptor so clients recover
    /// without guessing why their session vanished.
    async fn require_active(&self, claimed_uid: &str) -> Result<games::Model, EngineError> {
        let game = self.active_game().await?;
        if game.uid != claimed_uid {
            return Err(GameError::GameMismatch {
                game: game.descriptor(),
            }
            .into());
        }
        Ok(game)
    }
}

fn require_text(value: &str, field: &str) -> Result<String, GameError> {
    let text = value.trim();
    if text.is_empty() {
        return Err(GameError::validation(field, format!("{field} is required")));
    }
    Ok(text.to_string())
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

// Floored at 1ms so the ledger's positive-duration invariant holds even
// for a same-millisecond win.
fn duration_secs(start: i64, finish: i64) -> f64 {
    (finish - start).max(1) as f64 / 1000.0
}
