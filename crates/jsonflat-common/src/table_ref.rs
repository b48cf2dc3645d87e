use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A fully qualified BigQuery table: `project.dataset.table`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableRef {
    project: String,
    dataset: String,
    table: String,
}

impl TableRef {
    pub fn new(
        project: impl Into<String>,
        dataset: impl Into<String>,
        table: impl Into<String>,
    ) -> Result<Self> {
        let table_ref = Self {
            project: project.into(),
            dataset: dataset.into(),
            table: table.into(),
        };
        for (part, value) in [
            ("project", &table_ref.project),
            ("dataset", &table_ref.dataset),
            ("table", &table_ref.table),
        ] {
            if value.trim().is_empty() {
                return Err(Error::invalid_table_ref(format!("{} must not be empty", part)));
            }
        }
        Ok(table_ref)
    }

    /// Parses `project.dataset.table`. Surrounding backticks are accepted.
    ///
    /// Domain-scoped projects (`example.com:proj.ds.t`) keep the dots of their
    /// domain; anywhere else a fourth segment is rejected.
    pub fn parse(qualified: &str) -> Result<Self> {
        let unquoted = qualified.trim().trim_matches('`');
        let parts: Vec<&str> = unquoted.rsplitn(3, '.').collect();
        match parts.as_slice() {
            [table, dataset, project] if is_project_id(project) => {
                Self::new(*project, *dataset, *table)
            }
            _ => Err(Error::invalid_table_ref(format!(
                "expected project.dataset.table, got '{}'",
                qualified
            ))),
        }
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn dataset(&self) -> &str {
        &self.dataset
    }

    pub fn table(&self) -> &str {
        &self.table
    }
}

fn is_project_id(project: &str) -> bool {
    match project.split_once(':') {
        Some((_domain, id)) => !id.contains('.'),
        None => !project.contains('.'),
    }
}

impl fmt::Display for TableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.project, self.dataset, self.table)
    }
}
