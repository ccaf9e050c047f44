use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::game::{GuessRecord, LetterStatus};

/// Serialized view of one player's progress within the active game.
///
/// In server-authoritative mode every field is derived from the stored
/// guess history; `declared` carries the raw client-declared payload for
/// sessions written through the pass-through state endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub name: String,
    pub is_winner: bool,
    pub start_time: i64,
    pub finish_time: Option<i64>,
    pub current_row: u32,
    pub current_col: u32,
    pub game_over: bool,
    pub max_guesses: u32,
    pub word_length: u32,
    pub guesses: Vec<GuessRecord>,
    pub keyboard_hints: BTreeMap<char, LetterStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub declared: Option<ClientState>,
}

/// One cell of a client-rendered guess grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct GridCell {
    pub letter: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<LetterStatus>,
}

/// Client-declared progress fields (pass-through store mode).
///
/// This is a trust boundary: the server validates shapes but does not
/// reinterpret game rules for any of these fields. Unknown fields are
/// rejected outright.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ClientState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid: Option<Vec<Vec<GridCell>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_row: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_col: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyboard_statuses: Option<BTreeMap<char, LetterStatus>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_over: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_winner: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_guesses: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_length: Option<u32>,
}
