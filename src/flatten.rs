use std::path::{Path, PathBuf};

use jsonflat_common::Result;
use tracing::{debug, info, instrument};

use crate::assembler::{assemble_columns, declared_columns};
use crate::config::FlattenConfig;
use crate::emitter::{FlattenedStatement, write_statement};
use crate::prober::document_columns;
use crate::sampler::discover_fields;
use crate::warehouse::Warehouse;

/// Probes, samples and assembles, returning the statement without writing it.
///
/// Warehouse and decode failures abort the whole run.
#[instrument(skip_all, fields(table = %config.table))]
pub async fn construct_flattened_sql<W: Warehouse>(
    warehouse: &W,
    config: &FlattenConfig,
) -> Result<FlattenedStatement> {
    let table = &config.table;

    let json_columns =
        document_columns(warehouse, config.dialect, table, &config.document_type).await?;
    let discovered =
        discover_fields(warehouse, config.dialect, table, &json_columns, config.sampling).await?;
    let declared = declared_columns(warehouse, config.dialect, table).await?;

    let columns = assemble_columns(declared, discovered);
    let sql = config.dialect.select_statement(&columns, table);
    debug!(sql = %sql, "Built flattened statement");
    info!(columns = columns.len(), "Flattened table");

    Ok(FlattenedStatement {
        table: table.clone(),
        columns,
        sql,
    })
}

/// [`construct_flattened_sql`] followed by [`write_statement`] into `dir`.
pub async fn flatten_to_file<W: Warehouse>(
    warehouse: &W,
    config: &FlattenConfig,
    dir: impl AsRef<Path>,
) -> Result<(FlattenedStatement, PathBuf)> {
    let statement = construct_flattened_sql(warehouse, config).await?;
    let path = write_statement(&statement, dir).await?;
    Ok((statement, path))
}
