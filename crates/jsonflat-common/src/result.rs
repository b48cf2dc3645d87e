use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// Field carrying the column name in `INFORMATION_SCHEMA.COLUMNS` results.
pub const CATALOG_COLUMN_NAME: &str = "column_name";

/// A column descriptor: name plus declared type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: String,
}

impl ColumnInfo {
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    values: Vec<Value>,
}

impl Row {
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.values.iter()
    }
}

/// Rows returned by a warehouse query, with the schema that names their cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResult {
    pub schema: Vec<ColumnInfo>,
    pub rows: Vec<Row>,
}

impl QueryResult {
    pub fn from_values(schema: Vec<ColumnInfo>, rows: Vec<Vec<Value>>) -> Self {
        Self {
            schema,
            rows: rows.into_iter().map(Row::new).collect(),
        }
    }

    pub fn with_schema(schema: Vec<ColumnInfo>) -> Self {
        Self {
            schema,
            rows: Vec::new(),
        }
    }

    /// A catalog-shaped result: one `column_name` STRING cell per row.
    pub fn column_names<S: AsRef<str>>(names: &[S]) -> Self {
        Self::from_values(
            vec![ColumnInfo::new(CATALOG_COLUMN_NAME, "STRING")],
            names
                .iter()
                .map(|n| vec![Value::String(n.as_ref().to_string())])
                .collect(),
        )
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, col_name: &str) -> Option<usize> {
        self.schema.iter().position(|c| c.name == col_name)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Value> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    pub fn get_by_name(&self, row: usize, col_name: &str) -> Option<&Value> {
        let col_idx = self.column_index(col_name)?;
        self.get(row, col_idx)
    }

    /// Collects a STRING column in row order.
    pub fn string_column(&self, col_name: &str) -> Result<Vec<String>> {
        let col_idx = self
            .column_index(col_name)
            .ok_or_else(|| Error::column_not_found(col_name))?;
        self.rows
            .iter()
            .map(|row| match row.get(col_idx) {
                Some(Value::String(s)) => Ok(s.clone()),
                other => Err(Error::internal(format!(
                    "expected STRING in column {}, got {:?}",
                    col_name, other
                ))),
            })
            .collect()
    }
}
