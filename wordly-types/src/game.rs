use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum LetterStatus {
    Correct, // correct letter in correct position
    Present, // correct letter in wrong position
    Absent,  // letter not in word
}

impl LetterStatus {
    /// Rank used when merging keyboard hints: a stored hint is only ever
    /// replaced by a higher-ranked one.
    pub fn priority(self) -> u8 {
        match self {
            LetterStatus::Absent => 1,
            LetterStatus::Present => 2,
            LetterStatus::Correct => 3,
        }
    }
}

/// One evaluated guess in a player's session. Immutable once appended;
/// `number` is 1-based and contiguous within the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct GuessRecord {
    pub number: u32,
    pub word: String,
    pub statuses: Vec<LetterStatus>,
}

/// Public fields of the active game. Safe to hand to any client — the
/// secret word itself never leaves the server outside admin responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct GameDescriptor {
    pub game_uid: String,
    pub word_length: u32,
    pub max_guesses: u32,
}

/// Admin-only view of a game, revealing the secret word and its definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RevealedGame {
    pub word: String,
    pub definition: String,
}
