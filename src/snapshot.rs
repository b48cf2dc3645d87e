//! An offline warehouse answering from a JSON snapshot of catalog and rows.
//!
//! ```json
//! {
//!   "tables": [
//!     {
//!       "project": "proj", "dataset": "ds", "table": "orders",
//!       "columns": [{"name": "id", "type": "INT64"}, {"name": "props", "type": "JSON"}],
//!       "rows": [{"id": 1, "props": "{\"status\": \"open\"}"}]
//!     }
//!   ]
//! }
//! ```

use std::path::Path;

use indexmap::IndexMap;
use jsonflat_common::{ColumnInfo, Error, QueryResult, Result, TableRef};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::warehouse::{CatalogQuery, SampleQuery, Warehouse};

/// One table of a snapshot: its declared columns and some of its rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotTable {
    pub project: String,
    pub dataset: String,
    pub table: String,
    pub columns: Vec<ColumnInfo>,
    #[serde(default)]
    pub rows: Vec<Map<String, Value>>,
}

impl SnapshotTable {
    pub fn table_ref(&self) -> Result<TableRef> {
        TableRef::new(&self.project, &self.dataset, &self.table)
    }

    fn column(&self, name: &str) -> Option<&ColumnInfo> {
        self.columns.iter().find(|c| c.name == name)
    }
}

#[derive(Debug, Deserialize)]
struct SnapshotFile {
    tables: Vec<SnapshotTable>,
}

#[derive(Debug, Clone, Default)]
pub struct SnapshotWarehouse {
    tables: IndexMap<TableRef, SnapshotTable>,
}

impl SnapshotWarehouse {
    pub fn from_tables(tables: Vec<SnapshotTable>) -> Result<Self> {
        let mut by_ref = IndexMap::with_capacity(tables.len());
        for table in tables {
            let table_ref = table.table_ref().map_err(|e| Error::snapshot(e.to_string()))?;
            if by_ref.contains_key(&table_ref) {
                return Err(Error::snapshot(format!("duplicate table {}", table_ref)));
            }
            by_ref.insert(table_ref, table);
        }
        Ok(Self { tables: by_ref })
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: SnapshotFile =
            serde_json::from_str(json).map_err(|e| Error::snapshot(e.to_string()))?;
        Self::from_tables(file.tables)
    }

    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| Error::snapshot(format!("could not read {}: {}", path.display(), e)))?;
        let warehouse = Self::from_json_str(&content)?;
        debug!(path = %path.display(), tables = warehouse.tables.len(), "Loaded snapshot");
        Ok(warehouse)
    }

    fn has_dataset(&self, project: &str, dataset: &str) -> bool {
        self.tables
            .keys()
            .any(|t| t.project() == project && t.dataset() == dataset)
    }
}

impl Warehouse for SnapshotWarehouse {
    async fn catalog_columns(&self, query: &CatalogQuery) -> Result<QueryResult> {
        let table = &query.table;
        if !self.has_dataset(table.project(), table.dataset()) {
            return Err(Error::dataset_not_found(format!(
                "{}:{}",
                table.project(),
                table.dataset()
            )));
        }

        // An unknown table in a known dataset just has no catalog rows.
        let names: Vec<&str> = self
            .tables
            .get(table)
            .map(|t| {
                t.columns
                    .iter()
                    .filter(|c| {
                        query
                            .data_type
                            .as_deref()
                            .is_none_or(|ty| c.data_type.eq_ignore_ascii_case(ty))
                    })
                    .map(|c| c.name.as_str())
                    .collect()
            })
            .unwrap_or_default();
        Ok(QueryResult::column_names(&names))
    }

    async fn execute(&self, query: &SampleQuery) -> Result<QueryResult> {
        let table = self
            .tables
            .get(&query.table)
            .ok_or_else(|| Error::table_not_found(query.table.to_string()))?;
        let column = table
            .column(&query.column)
            .ok_or_else(|| Error::column_not_found(format!("{} in {}", query.column, query.table)))?;

        let sample = table
            .rows
            .iter()
            .filter_map(|row| row.get(&query.column))
            .find(|value| !value.is_null());

        let schema = vec![column.clone()];
        Ok(match sample {
            Some(value) => QueryResult::from_values(schema, vec![vec![value.clone()]]),
            None => QueryResult::with_schema(schema),
        })
    }
}
