use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Games::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Games::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Games::Uid).string().not_null().unique_key())
                    .col(ColumnDef::new(Games::Word).string().not_null())
                    .col(
                        ColumnDef::new(Games::Definition)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Games::MaxGuesses).integer().not_null())
                    .col(
                        ColumnDef::new(Games::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Index for picking the active game (most recently created)
        manager
            .create_index(
                Index::create()
                    .name("idx_games_created_at")
                    .table(Games::Table)
                    .col(Games::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PlayerSessions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PlayerSessions::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PlayerSessions::GameId).integer().not_null())
                    .col(ColumnDef::new(PlayerSessions::Uid).string().not_null())
                    .col(ColumnDef::new(PlayerSessions::Name).string().not_null())
                    .col(
                        ColumnDef::new(PlayerSessions::IsWinner)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(PlayerSessions::StartTime)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PlayerSessions::FinishTime).big_integer())
                    .col(ColumnDef::new(PlayerSessions::Guesses).json().not_null())
                    .col(
                        ColumnDef::new(PlayerSessions::KeyboardHints)
                            .json()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PlayerSessions::ClientState).json())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_player_sessions_game")
                            .from(PlayerSessions::Table, PlayerSessions::GameId)
                            .to(Games::Table, Games::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // One session per (game, player)
        manager
            .create_index(
                Index::create()
                    .name("idx_player_sessions_game_uid")
                    .table(PlayerSessions::Table)
                    .col(PlayerSessions::GameId)
                    .col(PlayerSessions::Uid)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Display names are unique within a game; backstop for concurrent
        // first-writes racing past the application-level check
        manager
            .create_index(
                Index::create()
                    .name("idx_player_sessions_game_name")
                    .table(PlayerSessions::Table)
                    .col(PlayerSessions::GameId)
                    .col(PlayerSessions::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Scores::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Scores::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Scores::GameId).integer().not_null())
                    .col(ColumnDef::new(Scores::Uid).string().not_null())
                    .col(ColumnDef::new(Scores::Name).string().not_null())
                    .col(ColumnDef::new(Scores::Tries).integer().not_null())
                    .col(ColumnDef::new(Scores::Duration).double().not_null())
                    .col(ColumnDef::new(Scores::RecordedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_scores_game")
                            .from(Scores::Table, Scores::GameId)
                            .to(Games::Table, Games::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // At most one submission per (game, player)
        manager
            .create_index(
                Index::create()
                    .name("idx_scores_game_uid")
                    .table(Scores::Table)
                    .col(Scores::GameId)
                    .col(Scores::Uid)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Scores::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PlayerSessions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Games::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Games {
    Table,
    Id,
    Uid,
    Word,
    Definition,
    MaxGuesses,
    CreatedAt,
}

#[derive(DeriveIden)]
enum PlayerSessions {
    Table,
    Id,
    GameId,
    Uid,
    Name,
    IsWinner,
    StartTime,
    FinishTime,
    Guesses,
    KeyboardHints,
    ClientState,
}

#[derive(DeriveIden)]
enum Scores {
    Table,
    Id,
    GameId,
    Uid,
    Name,
    Tries,
    Duration,
    RecordedAt,
}
