//! Finds the document-valued columns of a table.

use jsonflat_common::{CATALOG_COLUMN_NAME, Result, TableRef};
use tracing::{debug, info, instrument};

use crate::dialect::SqlDialect;
use crate::warehouse::{CatalogQuery, Warehouse};

/// Names of the columns of `table` declared as `document_type`, in catalog order.
#[instrument(skip(warehouse, dialect, table), fields(table = %table))]
pub async fn document_columns<W: Warehouse>(
    warehouse: &W,
    dialect: SqlDialect,
    table: &TableRef,
    document_type: &str,
) -> Result<Vec<String>> {
    let columns = catalog_column_names(warehouse, dialect, table, Some(document_type)).await?;
    info!(count = columns.len(), "Found document columns");
    Ok(columns)
}

pub(crate) async fn catalog_column_names<W: Warehouse>(
    warehouse: &W,
    dialect: SqlDialect,
    table: &TableRef,
    data_type: Option<&str>,
) -> Result<Vec<String>> {
    let query = CatalogQuery::new(dialect, table, data_type);
    debug!(sql = %query.sql, "Catalog lookup");
    let result = warehouse.catalog_columns(&query).await?;
    result.string_column(CATALOG_COLUMN_NAME)
}
