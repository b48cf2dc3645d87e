//! Common types and error handling for jsonflat (BigQuery dialect).

#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod error;
pub mod result;
pub mod table_ref;

pub use error::{Error, Result};
pub use result::{CATALOG_COLUMN_NAME, ColumnInfo, QueryResult, Row};
pub use table_ref::TableRef;

/// Declared type of document-valued (semi-structured) columns in BigQuery.
pub const DOCUMENT_TYPE: &str = "JSON";
