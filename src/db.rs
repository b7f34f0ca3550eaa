use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;

use crate::error::BenchError;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Connect to the benchmark database named by `DATABASE_URL`.
///
/// The pool is the only store handle in the program; it is built here once
/// and passed explicitly to whoever needs it.
pub async fn connect() -> Result<PgPool, BenchError> {
    let database_url = std::env::var("DATABASE_URL").map_err(|_| BenchError::MissingDatabaseUrl)?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    Ok(pool)
}

/// Apply pending migrations. Idempotent; already-applied migrations are
/// skipped and checksums are verified.
pub async fn run_migrations(pool: &PgPool) -> Result<(), BenchError> {
    log::info!("checking database migration state");
    MIGRATOR.run(pool).await?;
    log::info!("database migrations up to date");
    Ok(())
}
