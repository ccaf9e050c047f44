use std::collections::BTreeMap;

use wordly_types::{GameError, GuessRecord, LetterStatus, SessionView};

use crate::evaluate::evaluate;

/// One player's progress within a single game.
///
/// A session is `Active` until `finished_at` is set, after which it is
/// terminal (`Won` or `Lost`) and accepts no further guesses. Guess
/// numbers always form the contiguous range `1..=guesses.len()`.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerSession {
    pub name: String,
    pub guesses: Vec<GuessRecord>,
    pub keyboard_hints: BTreeMap<char, LetterStatus>,
    pub started_at: i64,
    pub finished_at: Option<i64>,
    pub is_winner: bool,
}

impl PlayerSession {
    pub fn new(name: impl Into<String>, started_at: i64) -> Self {
        Self {
            name: name.into(),
            guesses: Vec::new(),
            keyboard_hints: BTreeMap::new(),
            started_at,
            finished_at: None,
            is_winner: false,
        }
    }

    pub fn is_over(&self) -> bool {
        self.finished_at.is_some()
    }

    /// Re-check the stored guess sequence. Sessions are rehydrated from
    /// storage on every request; a sparse or over-long sequence means the
    /// stored state is corrupt and must not be extended.
    pub fn validate_sequence(&self, max_guesses: u32) -> Result<(), GameError> {
        if self.guesses.len() as u32 > max_guesses {
            return Err(GameError::sequence("Too many guesses for this game."));
        }
        for (index, guess) in self.guesses.iter().enumerate() {
            if guess.number != index as u32 + 1 {
                return Err(GameError::sequence(
                    "Guesses must form a contiguous sequence starting at 1.",
                ));
            }
        }
        Ok(())
    }

    /// Apply one guess to the session. `guess` must already be uppercase
    /// and the same length as `secret`.
    pub fn apply_guess(
        &mut self,
        guess: &str,
        secret: &str,
        max_guesses: u32,
        now: i64,
    ) -> Result<(), GameError> {
        if self.is_over() {
            return Err(GameError::sequence("Game is already over for this player."));
        }
        let number = self.guesses.len() as u32 + 1;
        if number > max_guesses {
            return Err(GameError::sequence("Maximum guesses reached for this game."));
        }

        let statuses = evaluate(guess, secret);
        self.merge_hints(guess, &statuses);
        self.guesses.push(GuessRecord {
            number,
            word: guess.to_string(),
            statuses,
        });

        if guess == secret {
            self.is_winner = true;
            self.finished_at = Some(now);
        } else if number >= max_guesses {
            self.is_winner = false;
            self.finished_at = Some(now);
        }
        Ok(())
    }

    // A keyboard hint only improves: absent < present < correct.
    fn merge_hints(&mut self, guess: &str, statuses: &[LetterStatus]) {
        for (letter, &status) in guess.chars().zip(statuses) {
            match self.keyboard_hints.get(&letter) {
                Some(current) if current.priority() >= status.priority() => {}
                _ => {
                    self.keyboard_hints.insert(letter, status);
                }
            }
        }
    }

    pub fn view(&self, max_guesses: u32, word_length: u32) -> SessionView {
        SessionView {
            name: self.name.clone(),
            is_winner: self.is_winner,
            start_time: self.started_at,
            finish_time: self.finished_at,
            current_row: self.guesses.len() as u32,
            current_col: 0,
            game_over: self.is_over(),
            max_guesses,
            word_length,
            guesses: self.guesses.clone(),
            keyboard_hints: self.keyboard_hints.clone(),
            declared: None,
        }
    }
}
