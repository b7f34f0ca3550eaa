pub mod dataset;
pub mod db;
pub mod error;
pub mod insert;
pub mod models;
pub mod timelog;

use std::path::Path;

use sqlx::PgPool;

use crate::error::BenchError;
use crate::insert::BulkInserter;

/// Outcome of one benchmark run.
#[derive(Debug, Clone)]
pub struct BenchReport {
    pub rows: u64,
    pub elapsed_secs: f64,
}

/// Run the pipeline once: load the dataset, map it to products, bulk insert,
/// and append the timing to the log.
///
/// Any failure aborts before the next stage; in particular the logger never
/// runs when the insert fails.
pub async fn run_benchmark(
    pool: PgPool,
    dataset_path: &Path,
    log_path: &Path,
    label: &str,
) -> Result<BenchReport, BenchError> {
    let records = dataset::load(dataset_path)?;
    let products = models::to_products(&records)?;
    log::info!("mapped {} products from {}", products.len(), dataset_path.display());

    let inserter = BulkInserter::new(pool);
    let elapsed_secs = inserter.insert_all(&products).await?;
    log::info!("insert finished in {}s", elapsed_secs);

    let rows = products.len() as u64;
    timelog::log_result(rows, elapsed_secs, log_path, label)?;

    Ok(BenchReport { rows, elapsed_secs })
}

#[cfg_attr(not(test), allow(dead_code))]
pub mod test_support {
    use sqlx::PgPool;
    use sqlx::postgres::PgPoolOptions;
    use testcontainers::ContainerAsync;
    use testcontainers::core::error::TestcontainersError;
    use testcontainers::runners::AsyncRunner;
    use testcontainers_modules::postgres::Postgres;
    use thiserror::Error;

    static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

    #[derive(Debug, Error)]
    pub enum TestDatabaseError {
        #[error("database error: {0}")]
        Sqlx(#[from] sqlx::Error),
        #[error("migration error: {0}")]
        Migration(#[from] sqlx::migrate::MigrateError),
        #[error("container error: {0}")]
        Container(#[from] TestcontainersError),
    }

    /// Ephemeral database factory for integration tests: one disposable
    /// Postgres container per instance, migrated and ready.
    pub struct TestDatabase {
        pool: Option<PgPool>,
        container: Option<ContainerAsync<Postgres>>,
    }

    impl TestDatabase {
        /// Launch a disposable Postgres container and migrate it.
        pub async fn new() -> Result<Self, TestDatabaseError> {
            let container = Postgres::default().start().await?;

            let host = container.get_host().await?.to_string();
            let port = container.get_host_port_ipv4(5432).await?;
            let url = format!("postgres://postgres:postgres@{}:{}/postgres", host, port);

            let pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(&url)
                .await?;

            MIGRATOR.run(&pool).await?;

            Ok(Self {
                pool: Some(pool),
                container: Some(container),
            })
        }

        /// Borrow the pooled connection handle.
        pub fn pool(&self) -> &PgPool {
            self.pool.as_ref().expect("test database pool is available")
        }

        /// Convenience method returning a clone of the pooled handle.
        pub fn pool_clone(&self) -> PgPool {
            self.pool().clone()
        }

        /// Close pool connections and tear the container down.
        pub async fn close(mut self) -> Result<(), TestDatabaseError> {
            if let Some(pool) = self.pool.take() {
                pool.close().await;
            }

            if let Some(container) = self.container.take() {
                container.stop().await?;
            }

            Ok(())
        }
    }

    /// Start a test database, or `None` when no container runtime is
    /// reachable (the caller should skip the test in that case).
    pub async fn test_database_or_skip(test_name: &str) -> Option<TestDatabase> {
        match TestDatabase::new().await {
            Ok(db) => Some(db),
            Err(TestDatabaseError::Container(err)) => {
                eprintln!("skipping {test_name}: could not start postgres container: {err}");
                None
            }
            Err(err) => panic!("failed to provision test database: {err:?}"),
        }
    }
}
