use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("Warehouse error: {0}")]
    Warehouse(String),
    #[error("Dataset not found: {0}")]
    DatasetNotFound(String),
    #[error("Table not found: {0}")]
    TableNotFound(String),
    #[error("Column not found: {0}")]
    ColumnNotFound(String),
    #[error("Failed to decode JSON sampled from column {column}: {message}")]
    DocumentDecode { column: String, message: String },
    #[error("Value sampled from column {column} is not a JSON object (got {kind})")]
    NotADocument { column: String, kind: String },
    #[error("Invalid table reference: {0}")]
    InvalidTableRef(String),
    #[error("Unknown SQL dialect: {0}")]
    UnknownDialect(String),
    #[error("Invalid snapshot: {0}")]
    Snapshot(String),
    #[error("I/O error: {0}")]
    Io(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn warehouse(msg: impl Into<String>) -> Self {
        Error::Warehouse(msg.into())
    }

    pub fn dataset_not_found(name: impl Into<String>) -> Self {
        Error::DatasetNotFound(name.into())
    }

    pub fn table_not_found(name: impl Into<String>) -> Self {
        Error::TableNotFound(name.into())
    }

    pub fn column_not_found(name: impl Into<String>) -> Self {
        Error::ColumnNotFound(name.into())
    }

    pub fn document_decode(column: impl Into<String>, message: impl Into<String>) -> Self {
        Error::DocumentDecode {
            column: column.into(),
            message: message.into(),
        }
    }

    pub fn not_a_document(column: impl Into<String>, kind: impl Into<String>) -> Self {
        Error::NotADocument {
            column: column.into(),
            kind: kind.into(),
        }
    }

    pub fn invalid_table_ref(msg: impl Into<String>) -> Self {
        Error::InvalidTableRef(msg.into())
    }

    pub fn unknown_dialect(name: impl Into<String>) -> Self {
        Error::UnknownDialect(name.into())
    }

    pub fn snapshot(msg: impl Into<String>) -> Self {
        Error::Snapshot(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Error::Internal(msg.into())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}
