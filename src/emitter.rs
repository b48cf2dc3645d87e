//! Writes the flattened statement next to the caller.

use std::path::{Path, PathBuf};

use jsonflat_common::{Result, TableRef};
use tracing::{info, instrument};

/// The generated selection and the column list it was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlattenedStatement {
    pub table: TableRef,
    pub columns: Vec<String>,
    pub sql: String,
}

impl FlattenedStatement {
    /// `<table_id>_flattened.sql`
    pub fn file_name(&self) -> String {
        format!("{}_flattened.sql", self.table.table())
    }
}

/// Truncates and writes the statement to `dir/<table_id>_flattened.sql`.
///
/// An empty `dir` writes into the working directory and returns the bare file name.
#[instrument(skip(statement, dir), fields(table = %statement.table))]
pub async fn write_statement(
    statement: &FlattenedStatement,
    dir: impl AsRef<Path>,
) -> Result<PathBuf> {
    let path = dir.as_ref().join(statement.file_name());
    tokio::fs::write(&path, statement.sql.as_bytes()).await?;
    info!(path = %path.display(), bytes = statement.sql.len(), "Wrote flattened SQL");
    Ok(path)
}

pub fn confirmation(path: &Path) -> String {
    format!("SQL saved to {}", path.display())
}
