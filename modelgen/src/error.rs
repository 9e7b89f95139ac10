//! # Error Module
//!
//! Every fatal condition of a generation run surfaces as an [`Error`].
//! Per-table file open failures are not errors: the writer logs them and
//! moves on to the next table.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal failures of a generation run.
#[derive(Debug, Error)]
pub enum Error {
    /// No connection string was configured.
    #[error("no connection string provided")]
    MissingConnection,

    /// The database could not be reached.
    #[error("can not connect to database: {source}")]
    Connect {
        #[source]
        source: sqlx::Error,
    },

    /// An introspection query failed or returned an unreadable row.
    #[error("could not query {what}{}: {source}", table_suffix(.table))]
    Query {
        /// Which catalog lookup failed.
        what: &'static str,
        /// The table being introspected, if any.
        table: Option<String>,
        #[source]
        source: sqlx::Error,
    },

    /// A model file was opened but its contents could not be written.
    #[error("could not write model file to '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

fn table_suffix(table: &Option<String>) -> String {
    table.as_deref().map(|t| format!(" for table `{t}`")).unwrap_or_default()
}

impl Error {
    pub(crate) fn query(what: &'static str, table: Option<&str>, source: sqlx::Error) -> Self {
        Error::Query { what, table: table.map(str::to_string), source }
    }
}
