use migration::MigratorTrait;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

pub async fn setup_db() -> anyhow::Result<DatabaseConnection> {
    let mut options = ConnectOptions::new("sqlite::memory:");
    // A single pooled connection keeps the in-memory database alive for the
    // duration of the test.
    options.max_connections(1);
    let db = Database::connect(options).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}
