use anyhow::Result;
use sqlx::migrate::MigrateDatabase;

#[tracing::instrument(skip(config))]
pub async fn migrate(config: restomenu::config::Config) -> Result<()> {
    tracing::info!("Running database migrations...");

    if !sqlx::Sqlite::database_exists(&config.database.url).await? {
        tracing::info!(url = config.database.url, "Database does not exist, creating");
        sqlx::Sqlite::create_database(&config.database.url).await?;
    }

    let pool = restomenu::create_pool(&config.database.url, 1).await?;
    restomenu::migrate(&pool).await?;
    pool.close().await;

    tracing::info!("Migrations completed successfully");

    Ok(())
}

#[tracing::instrument(skip(config))]
pub async fn reset(config: restomenu::config::Config) -> Result<()> {
    tracing::info!("Resetting database...");

    if sqlx::Sqlite::database_exists(&config.database.url).await? {
        tracing::warn!(url = config.database.url, "Dropping existing database");
        sqlx::Sqlite::drop_database(&config.database.url).await?;
    } else {
        tracing::info!("Database does not exist, nothing to drop");
    }

    migrate(config).await?;

    tracing::info!("Database reset completed successfully");

    Ok(())
}
