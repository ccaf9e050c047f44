pub use super::games::Entity as Games;
pub use super::player_sessions::Entity as PlayerSessions;
pub use super::scores::Entity as Scores;
