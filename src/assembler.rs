//! Builds the final, ordered and de-duplicated column list.

use std::collections::HashMap;

use jsonflat_common::{Result, TableRef};
use tracing::{info, instrument};

use crate::dialect::SqlDialect;
use crate::prober::catalog_column_names;
use crate::warehouse::Warehouse;

/// Every declared column of `table`, regardless of type, in catalog order.
#[instrument(skip(warehouse, dialect, table), fields(table = %table))]
pub async fn declared_columns<W: Warehouse>(
    warehouse: &W,
    dialect: SqlDialect,
    table: &TableRef,
) -> Result<Vec<String>> {
    let columns = catalog_column_names(warehouse, dialect, table, None).await?;
    info!(count = columns.len(), "Found declared columns");
    Ok(columns)
}

/// Concatenates declared and discovered names, sorts them by byte order and
/// renames repeats.
pub fn assemble_columns(declared: Vec<String>, discovered: Vec<String>) -> Vec<String> {
    let mut combined = declared;
    combined.extend(discovered);
    combined.sort();
    disambiguate(&combined)
}

/// Keeps the first occurrence of a repeated name bare and suffixes the k-th
/// later occurrence with `_k`.
///
/// Suffixed names are not checked against names already in the list, so a
/// declared `id_1` next to two `id`s is emitted twice.
pub fn disambiguate<S: AsRef<str>>(names: &[S]) -> Vec<String> {
    let mut totals: HashMap<&str, usize> = HashMap::new();
    for name in names {
        *totals.entry(name.as_ref()).or_default() += 1;
    }

    let mut seen: HashMap<&str, usize> = HashMap::new();
    let mut out = Vec::with_capacity(names.len());
    for name in names {
        let name = name.as_ref();
        let repeated = totals.get(name).copied().unwrap_or_default() > 1;
        match (repeated, seen.get(name).copied()) {
            (true, Some(count)) => {
                let next = count + 1;
                seen.insert(name, next);
                out.push(format!("{}_{}", name, next));
            }
            _ => {
                seen.insert(name, 0);
                out.push(name.to_string());
            }
        }
    }
    out
}
