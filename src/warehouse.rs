//! The query capability the pipeline needs from a data warehouse.

use std::future::Future;

use jsonflat_common::{QueryResult, Result, TableRef};

use crate::dialect::SqlDialect;

/// Metadata lookup against the catalog view for one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogQuery {
    pub table: TableRef,
    /// Restricts the lookup to columns of this declared type.
    pub data_type: Option<String>,
    pub sql: String,
}

impl CatalogQuery {
    pub fn new(dialect: SqlDialect, table: &TableRef, data_type: Option<&str>) -> Self {
        Self {
            table: table.clone(),
            data_type: data_type.map(str::to_string),
            sql: dialect.catalog_columns_sql(table, data_type),
        }
    }
}

/// A single-row, non-null selection of one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleQuery {
    pub table: TableRef,
    pub column: String,
    pub sql: String,
}

impl SampleQuery {
    pub fn new(dialect: SqlDialect, table: &TableRef, column: &str) -> Self {
        Self {
            table: table.clone(),
            column: column.to_string(),
            sql: dialect.sample_sql(table, column),
        }
    }
}

/// Both query shapes carry the rendered SQL for backends that ship text, and
/// the structured request for backends that answer in-process.
pub trait Warehouse {
    /// Returns rows exposing a `column_name` field.
    fn catalog_columns(
        &self,
        query: &CatalogQuery,
    ) -> impl Future<Output = Result<QueryResult>> + Send;

    /// Returns rows whose cells are addressable by the selected column name.
    fn execute(&self, query: &SampleQuery) -> impl Future<Output = Result<QueryResult>> + Send;
}
