#![allow(dead_code)]

use std::collections::HashMap;

use jsonflat::{CatalogQuery, SampleQuery, Warehouse};
use jsonflat_common::{ColumnInfo, DOCUMENT_TYPE, Error, QueryResult, Result, TableRef};
use parking_lot::Mutex;
use serde_json::Value;

/// A query the mock received, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedQuery {
    Catalog { data_type: Option<String>, sql: String },
    Sample { column: String, sql: String },
}

impl RecordedQuery {
    pub fn sql(&self) -> &str {
        match self {
            RecordedQuery::Catalog { sql, .. } | RecordedQuery::Sample { sql, .. } => sql,
        }
    }
}

/// Canned warehouse for one table. Catalog answers come from the declared
/// columns; sample answers come from `with_sample` / `without_sample`.
pub struct MockWarehouse {
    table: TableRef,
    columns: Vec<ColumnInfo>,
    samples: HashMap<String, Option<Value>>,
    catalog_failure: Option<Error>,
    sample_failures: HashMap<String, Error>,
    log: Mutex<Vec<RecordedQuery>>,
}

impl MockWarehouse {
    pub fn new(table: TableRef) -> Self {
        Self {
            table,
            columns: Vec::new(),
            samples: HashMap::new(),
            catalog_failure: None,
            sample_failures: HashMap::new(),
            log: Mutex::new(Vec::new()),
        }
    }

    pub fn with_columns(mut self, columns: &[(&str, &str)]) -> Self {
        for (name, data_type) in columns {
            self.columns.push(ColumnInfo::new(*name, *data_type));
        }
        self
    }

    /// The first non-null value of `column`, as the warehouse returns it.
    pub fn with_sample(mut self, column: &str, value: Value) -> Self {
        self.samples.insert(column.to_string(), Some(value));
        self
    }

    /// `column` has no non-null value: its sample query returns zero rows.
    pub fn without_sample(mut self, column: &str) -> Self {
        self.samples.insert(column.to_string(), None);
        self
    }

    pub fn failing_catalog(mut self, error: Error) -> Self {
        self.catalog_failure = Some(error);
        self
    }

    pub fn failing_sample(mut self, column: &str, error: Error) -> Self {
        self.sample_failures.insert(column.to_string(), error);
        self
    }

    pub fn queries(&self) -> Vec<RecordedQuery> {
        self.log.lock().clone()
    }

    pub fn sample_count(&self) -> usize {
        self.log
            .lock()
            .iter()
            .filter(|q| matches!(q, RecordedQuery::Sample { .. }))
            .count()
    }

    fn check_table(&self, table: &TableRef) -> Result<()> {
        if table == &self.table {
            Ok(())
        } else {
            Err(Error::table_not_found(table.to_string()))
        }
    }
}

impl Warehouse for MockWarehouse {
    async fn catalog_columns(&self, query: &CatalogQuery) -> Result<QueryResult> {
        self.log.lock().push(RecordedQuery::Catalog {
            data_type: query.data_type.clone(),
            sql: query.sql.clone(),
        });
        if let Some(err) = &self.catalog_failure {
            return Err(err.clone());
        }
        self.check_table(&query.table)?;

        let names: Vec<&str> = self
            .columns
            .iter()
            .filter(|c| {
                query
                    .data_type
                    .as_deref()
                    .is_none_or(|ty| c.data_type == ty)
            })
            .map(|c| c.name.as_str())
            .collect();
        Ok(QueryResult::column_names(&names))
    }

    async fn execute(&self, query: &SampleQuery) -> Result<QueryResult> {
        self.log.lock().push(RecordedQuery::Sample {
            column: query.column.clone(),
            sql: query.sql.clone(),
        });
        if let Some(err) = self.sample_failures.get(&query.column) {
            return Err(err.clone());
        }
        self.check_table(&query.table)?;

        let column = self
            .columns
            .iter()
            .find(|c| c.name == query.column)
            .cloned()
            .ok_or_else(|| Error::column_not_found(&query.column))?;
        Ok(match self.samples.get(&query.column).cloned().flatten() {
            Some(value) => QueryResult::from_values(vec![column], vec![vec![value]]),
            None => QueryResult::with_schema(vec![column]),
        })
    }
}

pub fn table(project: &str, dataset: &str, name: &str) -> TableRef {
    TableRef::new(project, dataset, name).expect("valid table reference")
}

/// `proj.ds.orders` with `id, created_at, props` and `props` sampled as
/// `{"status": "open", "id": 7}`.
pub fn orders_warehouse() -> MockWarehouse {
    MockWarehouse::new(table("proj", "ds", "orders"))
        .with_columns(&[
            ("id", "INT64"),
            ("created_at", "TIMESTAMP"),
            ("props", DOCUMENT_TYPE),
        ])
        .with_sample("props", Value::String(r#"{"status": "open", "id": 7}"#.to_string()))
}

pub fn assert_error_contains<T: std::fmt::Debug>(result: Result<T>, keywords: &[&str]) {
    match result {
        Ok(value) => panic!("Expected error but got Ok result: {:?}", value),
        Err(e) => {
            let error_msg = e.to_string().to_lowercase();
            let found = keywords
                .iter()
                .any(|keyword| error_msg.contains(&keyword.to_lowercase()));
            assert!(
                found,
                "Error message '{}' does not contain any of the expected keywords: {:?}",
                e, keywords
            );
        }
    }
}
