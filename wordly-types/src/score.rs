use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// One finishing result on the leaderboard. At most one per
/// (game, player); immutable once recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ScoreEntry {
    pub uid: String,
    pub name: String,
    pub tries: u32,
    pub duration: f64,
    pub recorded_at: i64,
}

/// Response to a score submission: the accepted entry, the refreshed
/// board, and the revealed word (the game is over for this player).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ScoreboardReveal {
    pub entry: ScoreEntry,
    pub scores: Vec<ScoreEntry>,
    pub word: String,
    pub definition: String,
}
