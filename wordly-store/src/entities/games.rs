use sea_orm::entity::prelude::*;
use wordly_types::GameDescriptor;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "games")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub uid: String,
    pub word: String,
    pub definition: String,
    pub max_guesses: i32,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::player_sessions::Entity")]
    PlayerSessions,
    #[sea_orm(has_many = "super::scores::Entity")]
    Scores,
}

impl Related<super::player_sessions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PlayerSessions.def()
    }
}

impl Related<super::scores::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Scores.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn word_length(&self) -> u32 {
        self.word.chars().count() as u32
    }

    /// Public fields only; never exposes the secret word.
    pub fn descriptor(&self) -> GameDescriptor {
        GameDescriptor {
            game_uid: self.uid.clone(),
            word_length: self.word_length(),
            max_guesses: self.max_guesses as u32,
        }
    }
}
