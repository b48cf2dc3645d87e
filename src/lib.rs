//! jsonflat - flattens the JSON columns of a BigQuery table into a SELECT.
//!
//! The pipeline is:
//! ```text
//! catalog (JSON columns) → sample one value each → top-level keys
//!     → declared columns ∪ keys → sort → rename repeats → SELECT ... FROM `p.d.t`;
//! ```
//!
//! The warehouse is reached through the [`Warehouse`] trait. [`SnapshotWarehouse`]
//! answers from a JSON snapshot of catalog and rows; tests use a mock.
//!
//! # Example
//!
//! ```rust,ignore
//! use jsonflat::{FlattenConfig, SnapshotWarehouse, TableRef, construct_flattened_sql};
//!
//! #[tokio::main]
//! async fn main() -> jsonflat::Result<()> {
//!     let warehouse = SnapshotWarehouse::load("snapshot.json").await?;
//!     let config = FlattenConfig::new(TableRef::new("proj", "ds", "orders")?);
//!     let statement = construct_flattened_sql(&warehouse, &config).await?;
//!     println!("{}", statement.sql);
//!     Ok(())
//! }
//! ```

pub mod assembler;
pub mod config;
pub mod dialect;
pub mod emitter;
pub mod flatten;
pub mod prober;
pub mod sampler;
pub mod snapshot;
pub mod warehouse;

pub use assembler::{assemble_columns, declared_columns, disambiguate};
pub use config::FlattenConfig;
pub use dialect::SqlDialect;
pub use emitter::{FlattenedStatement, confirmation, write_statement};
pub use flatten::{construct_flattened_sql, flatten_to_file};
pub use jsonflat_common::error::{Error, Result};
pub use jsonflat_common::result::{CATALOG_COLUMN_NAME, ColumnInfo, QueryResult, Row};
pub use jsonflat_common::{DOCUMENT_TYPE, TableRef};
pub use prober::document_columns;
pub use sampler::{SamplingMode, discover_fields, document_keys, sample_column};
pub use snapshot::{SnapshotTable, SnapshotWarehouse};
pub use warehouse::{CatalogQuery, SampleQuery, Warehouse};
