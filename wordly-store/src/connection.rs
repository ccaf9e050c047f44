use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection, DbErr};

/// Connect to the configured database and bring the schema up to date.
pub async fn connect_and_migrate(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(database_url).await?;
    Migrator::up(&db, None).await?;
    Ok(db)
}

/// Fresh in-memory database, migrated; used by tests.
pub async fn connect_to_memory_database() -> Result<DatabaseConnection, DbErr> {
    connect_and_migrate("sqlite::memory:").await
}
