use std::time::Instant;

use sqlx::PgPool;

use crate::error::BenchError;
use crate::models::NewProduct;

/// Strategy name recorded next to each timing in the log.
pub const STRATEGY_LABEL: &str = "sqlx bulk_insert";

/// Submits product batches to the store over an explicitly injected pool.
pub struct BulkInserter {
    pool: PgPool,
}

impl BulkInserter {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert the whole batch as one UNNEST-backed statement and return the
    /// elapsed wall-clock seconds, rounded to 3 decimal places.
    ///
    /// The single statement makes the batch atomic: either every row is
    /// persisted or the store error propagates and the table is unchanged.
    /// The clock covers bind-array preparation and the round trip, the cost
    /// of the strategy itself.
    pub async fn insert_all(&self, products: &[NewProduct]) -> Result<f64, BenchError> {
        if products.is_empty() {
            return Ok(0.0);
        }

        let tic = Instant::now();

        let mut titles = Vec::with_capacity(products.len());
        let mut quantities = Vec::with_capacity(products.len());
        for product in products {
            titles.push(product.title.clone());
            quantities.push(product.quantity);
        }

        sqlx::query(
            r#"INSERT INTO products (title, quantity)
               SELECT * FROM UNNEST($1::text[], $2::int[])"#,
        )
        .bind(&titles)
        .bind(&quantities)
        .execute(&self.pool)
        .await?;

        let elapsed = round3(tic.elapsed().as_secs_f64());
        log::trace!("bulk inserted {} products in {}s", products.len(), elapsed);
        Ok(elapsed)
    }
}

fn round3(secs: f64) -> f64 {
    (secs * 1000.0).round() / 1000.0
}
