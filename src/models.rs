use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::dataset::CsvRecord;
use crate::error::BenchError;

/// Row of the `products` table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: i32,
    pub title: String,
    pub quantity: i32,
}

/// Product pending insertion; the database assigns `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub title: String,
    pub quantity: i32,
}

/// Row of the `shops` table. Defined by the shared schema migration; the
/// benchmark never writes it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[allow(dead_code)]
pub struct Shop {
    pub id: i32,
    pub name: String,
    pub data: Option<serde_json::Value>,
    pub created: Option<DateTime<Utc>>,
}

impl NewProduct {
    /// Build a product from one raw CSV record. `row` is the 1-based data row
    /// number, used only for error messages.
    pub fn from_record(row: usize, record: &CsvRecord) -> Result<Self, BenchError> {
        let title = record
            .get("title")
            .ok_or(BenchError::MissingField { row, field: "title" })?;
        let raw_quantity = record
            .get("quantity")
            .ok_or(BenchError::MissingField { row, field: "quantity" })?;

        let quantity: i32 = raw_quantity.trim().parse().map_err(|_| BenchError::InvalidQuantity {
            row,
            value: raw_quantity.clone(),
        })?;
        if quantity < 0 {
            return Err(BenchError::InvalidQuantity {
                row,
                value: raw_quantity.clone(),
            });
        }

        Ok(Self {
            title: title.clone(),
            quantity,
        })
    }
}

/// Map every loaded record into a typed product. Fails on the first malformed
/// record, before anything reaches the database.
pub fn to_products(records: &[CsvRecord]) -> Result<Vec<NewProduct>, BenchError> {
    records
        .iter()
        .enumerate()
        .map(|(idx, record)| NewProduct::from_record(idx + 1, record))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn record(pairs: &[(&str, &str)]) -> CsvRecord {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>()
    }

    #[test]
    fn maps_title_verbatim_and_parses_quantity() {
        let records = vec![
            record(&[("title", "caneta azul"), ("quantity", "10")]),
            record(&[("title", "caderno"), ("quantity", "0")]),
        ];

        let products = to_products(&records).expect("valid records");

        assert_eq!(products.len(), 2);
        assert_eq!(products[0].title, "caneta azul");
        assert_eq!(products[0].quantity, 10);
        assert_eq!(products[1].quantity, 0);
    }

    #[test]
    fn rejects_non_numeric_quantity() {
        let records = vec![record(&[("title", "caneta"), ("quantity", "abc")])];

        let err = to_products(&records).expect_err("must fail");
        assert!(matches!(err, BenchError::InvalidQuantity { row: 1, .. }));
    }

    #[test]
    fn rejects_negative_quantity() {
        let records = vec![record(&[("title", "caneta"), ("quantity", "-5")])];

        let err = to_products(&records).expect_err("must fail");
        assert!(matches!(err, BenchError::InvalidQuantity { row: 1, .. }));
    }

    #[test]
    fn rejects_missing_columns() {
        let records = vec![record(&[("quantity", "1")])];
        let err = to_products(&records).expect_err("must fail");
        assert!(matches!(err, BenchError::MissingField { field: "title", .. }));

        let records = vec![record(&[("title", "caneta")])];
        let err = to_products(&records).expect_err("must fail");
        assert!(matches!(err, BenchError::MissingField { field: "quantity", .. }));
    }

    #[test]
    fn reports_the_failing_row_number() {
        let records = vec![
            record(&[("title", "ok"), ("quantity", "1")]),
            record(&[("title", "ruim"), ("quantity", "um")]),
        ];

        let err = to_products(&records).expect_err("must fail");
        assert!(matches!(err, BenchError::InvalidQuantity { row: 2, .. }));
    }
}
