use thiserror::Error;

/// Errors surfaced by the benchmark pipeline. Every variant is fatal: the run
/// aborts at the first failure and nothing is retried.
#[derive(Debug, Error)]
pub enum BenchError {
    #[error("DATABASE_URL not set")]
    MissingDatabaseUrl,
    #[error("home directory not found")]
    MissingHomeDir,
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("dataset error: {0}")]
    Csv(#[from] csv::Error),
    #[error("record {row}: missing field '{field}'")]
    MissingField { row: usize, field: &'static str },
    #[error("record {row}: invalid quantity '{value}'")]
    InvalidQuantity { row: usize, value: String },
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}
