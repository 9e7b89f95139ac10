//! # Config Module
//!
//! The settings of one generation run, fixed before the run starts.

use std::path::{Path, PathBuf};

use crate::naming::database_name;
use crate::{Error, Result};

/// Immutable settings of a generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub(crate) conn: String,
    pub(crate) tables: Vec<String>,
    pub(crate) fields: Option<String>,
    pub(crate) out_dir: PathBuf,
    pub(crate) format: bool,
}

impl Config {
    /// Starts a builder for the given connection string.
    pub fn builder(conn: impl Into<String>) -> ConfigBuilder {
        ConfigBuilder::new(conn)
    }

    pub fn conn(&self) -> &str {
        &self.conn
    }

    /// Selected tables. Empty means every table of the database.
    pub fn tables(&self) -> &[String] {
        &self.tables
    }

    /// Field selection passed on the command line. Not used by generation.
    pub fn fields(&self) -> Option<&str> {
        self.fields.as_deref()
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Whether written files are passed through `gofmt`.
    pub fn format(&self) -> bool {
        self.format
    }

    /// Database name taken from the connection string.
    pub fn database_name(&self) -> String {
        database_name(&self.conn)
    }
}

/// Builder for [`Config`].
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    conn: String,
    tables: Vec<String>,
    fields: Option<String>,
    out_dir: PathBuf,
    format: bool,
}

impl ConfigBuilder {
    pub fn new(conn: impl Into<String>) -> Self {
        Self { conn: conn.into(), tables: Vec::new(), fields: None, out_dir: PathBuf::from("."), format: true }
    }

    /// Restricts generation to a comma-separated list of tables.
    pub fn tables(mut self, list: &str) -> Self {
        self.tables = parse_table_list(list);
        self
    }

    pub fn fields(mut self, fields: impl Into<String>) -> Self {
        self.fields = Some(fields.into());
        self
    }

    pub fn out_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.out_dir = dir.into();
        self
    }

    pub fn format(mut self, format: bool) -> Self {
        self.format = format;
        self
    }

    pub fn build(self) -> Result<Config> {
        if self.conn.trim().is_empty() {
            return Err(Error::MissingConnection);
        }
        Ok(Config {
            conn: self.conn,
            tables: self.tables,
            fields: self.fields,
            out_dir: self.out_dir,
            format: self.format,
        })
    }
}

/// Splits a comma-separated table list. Entries are trimmed, blanks are
/// dropped and repeated names keep their first position.
pub fn parse_table_list(list: &str) -> Vec<String> {
    let mut tables: Vec<String> = Vec::new();
    for name in list.split(',').map(str::trim).filter(|n| !n.is_empty()) {
        if !tables.iter().any(|t| t == name) {
            tables.push(name.to_string());
        }
    }
    tables
}
