use jsonflat_common::{DOCUMENT_TYPE, TableRef};

use crate::dialect::SqlDialect;
use crate::sampler::SamplingMode;

/// Everything one flattening run needs besides the warehouse itself.
#[derive(Debug, Clone, PartialEq)]
pub struct FlattenConfig {
    /// Table to inspect
    pub table: TableRef,
    /// Quoting and statement formatting
    pub dialect: SqlDialect,
    /// Declared type that marks document-valued columns
    pub document_type: String,
    /// How sample queries are issued
    pub sampling: SamplingMode,
}

impl FlattenConfig {
    /// BigQuery dialect, `JSON` document columns, sequential sampling.
    pub fn new(table: TableRef) -> Self {
        Self {
            table,
            dialect: SqlDialect::default(),
            document_type: DOCUMENT_TYPE.to_string(),
            sampling: SamplingMode::default(),
        }
    }

    pub fn with_dialect(mut self, dialect: SqlDialect) -> Self {
        self.dialect = dialect;
        self
    }

    pub fn with_document_type(mut self, document_type: impl Into<String>) -> Self {
        self.document_type = document_type.into();
        self
    }

    pub fn with_sampling(mut self, sampling: SamplingMode) -> Self {
        self.sampling = sampling;
        self
    }
}
