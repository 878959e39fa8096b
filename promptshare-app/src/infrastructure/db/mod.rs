pub mod entities;
mod prompt_repository;
mod user_repository;

pub use prompt_repository::PromptRepository;
pub use user_repository::UserRepository;

use promptshare_errors::AppError;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, SqlErr, Statement,
};
use std::time::Duration;

pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(database_url);
    opt.max_connections(10)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(10))
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(600))
        .sqlx_logging(false);

    Database::connect(opt).await
}

/// Statements are `IF NOT EXISTS`; any failure aborts start-up.
pub async fn run_migrations(db: &DatabaseConnection) -> Result<(), DbErr> {
    let migration = include_str!("../../../../migrations/001_initial.sql");

    for statement in migration.split(';') {
        let statement = statement.trim();
        if statement.is_empty() {
            continue;
        }

        db.execute(Statement::from_string(
            sea_orm::DatabaseBackend::Postgres,
            statement.to_string(),
        ))
        .await
        .inspect_err(|e| tracing::error!("Migration statement failed: {}: {}", statement, e))?;
    }

    Ok(())
}

pub(crate) fn db_error(e: DbErr) -> AppError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => AppError::Conflict(detail),
        _ => AppError::Database(e.to_string()),
    }
}
