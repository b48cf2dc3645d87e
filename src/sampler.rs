//! Samples one value per document column and reads its top-level keys.

use futures::future::try_join_all;
use jsonflat_common::{Error, Result, TableRef};
use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::dialect::SqlDialect;
use crate::warehouse::{SampleQuery, Warehouse};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SamplingMode {
    /// One sample query at a time, in column order.
    #[default]
    Sequential,
    /// All sample queries in flight together; results keep column order.
    Concurrent,
}

/// Field names discovered across `columns`, in column order then key order.
#[instrument(
    skip(warehouse, dialect, table, columns),
    fields(table = %table, columns = columns.len())
)]
pub async fn discover_fields<W: Warehouse>(
    warehouse: &W,
    dialect: SqlDialect,
    table: &TableRef,
    columns: &[String],
    mode: SamplingMode,
) -> Result<Vec<String>> {
    let per_column = match mode {
        SamplingMode::Sequential => {
            let mut fields = Vec::with_capacity(columns.len());
            for column in columns {
                fields.push(sample_column(warehouse, dialect, table, column).await?);
            }
            fields
        }
        SamplingMode::Concurrent => {
            try_join_all(
                columns
                    .iter()
                    .map(|column| sample_column(warehouse, dialect, table, column)),
            )
            .await?
        }
    };

    let fields: Vec<String> = per_column.into_iter().flatten().collect();
    info!(count = fields.len(), "Discovered document fields");
    Ok(fields)
}

/// Top-level keys of one non-null value of `column`; empty when the column has no such value.
pub async fn sample_column<W: Warehouse>(
    warehouse: &W,
    dialect: SqlDialect,
    table: &TableRef,
    column: &str,
) -> Result<Vec<String>> {
    let query = SampleQuery::new(dialect, table, column);
    debug!(sql = %query.sql, "Sampling column");
    let result = warehouse.execute(&query).await?;

    if result.is_empty() {
        debug!(column, "No non-null value, skipping");
        return Ok(Vec::new());
    }

    let value = result
        .get_by_name(0, column)
        .ok_or_else(|| Error::column_not_found(column))?;
    document_keys(column, value)
}

/// Decodes a sampled cell and lists its top-level keys in document order.
///
/// JSON columns usually arrive as text; a cell that is already an object is
/// read as-is. Anything that is not an object is rejected.
pub fn document_keys(column: &str, value: &Value) -> Result<Vec<String>> {
    let decoded;
    let document = match value {
        Value::String(text) => {
            decoded = serde_json::from_str::<Value>(text)
                .map_err(|e| Error::document_decode(column, e.to_string()))?;
            &decoded
        }
        other => other,
    };

    match document {
        Value::Object(map) => Ok(map.keys().cloned().collect()),
        other => Err(Error::not_a_document(column, json_kind(other))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
