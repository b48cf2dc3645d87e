//! Identifier quoting and statement formatting, the only place SQL text is built.

use std::fmt;
use std::str::FromStr;

use jsonflat_common::{Error, Result, TableRef};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SqlDialect {
    /// Backtick-quoted `project.dataset.table` as a single unit.
    #[default]
    BigQuery,
    /// Double-quoted identifiers, one per name part.
    Ansi,
}

impl SqlDialect {
    pub fn quote_identifier(&self, ident: &str) -> String {
        match self {
            SqlDialect::BigQuery => format!("`{}`", escape_backticks(ident)),
            SqlDialect::Ansi => format!("\"{}\"", ident.replace('"', "\"\"")),
        }
    }

    pub fn quote_table(&self, table: &TableRef) -> String {
        match self {
            SqlDialect::BigQuery => format!(
                "`{}.{}.{}`",
                escape_backticks(table.project()),
                escape_backticks(table.dataset()),
                escape_backticks(table.table())
            ),
            SqlDialect::Ansi => format!(
                "{}.{}.{}",
                self.quote_identifier(table.project()),
                self.quote_identifier(table.dataset()),
                self.quote_identifier(table.table())
            ),
        }
    }

    pub fn string_literal(&self, value: &str) -> String {
        match self {
            SqlDialect::BigQuery => {
                format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
            }
            SqlDialect::Ansi => format!("'{}'", value.replace('\'', "''")),
        }
    }

    /// Catalog lookup for the columns of `table`, optionally restricted to one declared type.
    pub fn catalog_columns_sql(&self, table: &TableRef, data_type: Option<&str>) -> String {
        let mut sql = match self {
            SqlDialect::BigQuery => format!(
                "SELECT column_name FROM `{}.{}.INFORMATION_SCHEMA.COLUMNS` WHERE table_name = {}",
                escape_backticks(table.project()),
                escape_backticks(table.dataset()),
                self.string_literal(table.table())
            ),
            SqlDialect::Ansi => format!(
                "SELECT column_name FROM {}.information_schema.columns WHERE table_schema = {} AND table_name = {}",
                self.quote_identifier(table.project()),
                self.string_literal(table.dataset()),
                self.string_literal(table.table())
            ),
        };
        if let Some(data_type) = data_type {
            sql.push_str(&format!(" AND data_type = {}", self.string_literal(data_type)));
        }
        sql
    }

    /// One non-null value of `column`.
    pub fn sample_sql(&self, table: &TableRef, column: &str) -> String {
        let column = self.quote_identifier(column);
        format!(
            "SELECT {} FROM {} WHERE {} IS NOT NULL LIMIT 1",
            column,
            self.quote_table(table),
            column
        )
    }

    /// The emitted statement. Column names are written bare.
    pub fn select_statement<S: AsRef<str>>(&self, columns: &[S], table: &TableRef) -> String {
        let columns = columns
            .iter()
            .map(|c| c.as_ref())
            .collect::<Vec<_>>()
            .join(", ");
        format!("SELECT {} FROM {};", columns, self.quote_table(table))
    }
}

fn escape_backticks(ident: &str) -> String {
    ident.replace('\\', "\\\\").replace('`', "\\`")
}

impl fmt::Display for SqlDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlDialect::BigQuery => write!(f, "bigquery"),
            SqlDialect::Ansi => write!(f, "ansi"),
        }
    }
}

impl FromStr for SqlDialect {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "bigquery" | "bq" => Ok(SqlDialect::BigQuery),
            "ansi" | "postgres" | "postgresql" => Ok(SqlDialect::Ansi),
            other => Err(Error::unknown_dialect(other)),
        }
    }
}
