pub mod games;
pub mod player_sessions;
pub mod prelude;
pub mod scores;
