//! # Schema Reader Module
//!
//! Read-only access to the database catalog. Three query shapes are
//! issued against `information_schema`: the table list, the key
//! constraints of one table, and the column definitions of one table.

// ============================================================================
// External Crate Imports
// ============================================================================

use futures::future::BoxFuture;
use sqlx::{MySqlPool, Row, mysql::MySqlPoolOptions, mysql::MySqlRow};

// ============================================================================
// Internal Crate Imports
// ============================================================================

use crate::{Error, Result};

// ============================================================================
// Catalog Rows
// ============================================================================

/// One row of `table_constraints` joined with `key_column_usage`.
///
/// NULL catalog values are represented as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstraintRow {
    /// `PRIMARY KEY`, `UNIQUE` or `FOREIGN KEY`.
    pub constraint_type: String,
    pub column_name: String,
    pub ref_schema: String,
    pub ref_table: String,
    pub ref_column: String,
    /// 1-based position of the column within its key.
    pub ordinal_position: u32,
}

/// One row of `information_schema.columns`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnRow {
    pub name: String,
    /// Bare type name, e.g. `int` or `varchar`.
    pub data_type: String,
    /// Full type, e.g. `varchar(255)` or `decimal(10,2)`.
    pub column_type: String,
    /// `YES` or `NO`.
    pub is_nullable: String,
    pub default: String,
    /// E.g. `auto_increment`.
    pub extra: String,
    pub comment: String,
}

// ============================================================================
// SchemaReader Trait
// ============================================================================

/// Source of raw catalog rows.
///
/// Calls are issued one at a time by the generator; implementations do
/// not need to support concurrent use.
pub trait SchemaReader: Send + Sync {
    /// Names of all tables in the current database, in catalog order.
    fn list_tables(&self) -> BoxFuture<'_, Result<Vec<String>>>;
    /// PRIMARY KEY, UNIQUE and FOREIGN KEY rows of `table`.
    fn table_constraints<'a>(&'a self, table: &'a str) -> BoxFuture<'a, Result<Vec<ConstraintRow>>>;
    /// Column definitions of `table` in declaration order.
    fn table_columns<'a>(&'a self, table: &'a str) -> BoxFuture<'a, Result<Vec<ColumnRow>>>;
}

// ============================================================================
// MySQL Reader
// ============================================================================

const LIST_TABLES: &str = "SELECT table_name FROM information_schema.tables \
     WHERE table_schema = DATABASE() ORDER BY table_name";

const TABLE_CONSTRAINTS: &str = "SELECT c.constraint_type, u.column_name, u.referenced_table_schema, \
     u.referenced_table_name, u.referenced_column_name, CAST(u.ordinal_position AS CHAR) \
     FROM information_schema.table_constraints c \
     INNER JOIN information_schema.key_column_usage u \
     ON c.constraint_name = u.constraint_name \
     AND c.table_schema = u.table_schema AND c.table_name = u.table_name \
     WHERE c.table_schema = DATABASE() AND c.table_name = ? \
     AND u.table_schema = DATABASE() AND u.table_name = ?";

const TABLE_COLUMNS: &str = "SELECT column_name, data_type, column_type, is_nullable, \
     column_default, extra, column_comment \
     FROM information_schema.columns \
     WHERE table_schema = DATABASE() AND table_name = ? \
     ORDER BY ordinal_position";

/// Reads the catalog of a MySQL database over a single connection.
#[derive(Debug, Clone)]
pub struct MySqlReader {
    pool: MySqlPool,
}

impl MySqlReader {
    /// Opens the connection. The pool never holds more than one
    /// connection, so every query runs serially.
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = MySqlPoolOptions::new()
            .max_connections(1)
            .connect(url)
            .await
            .map_err(|source| Error::Connect { source })?;
        Ok(Self { pool })
    }

    /// Closes the underlying connection.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

impl SchemaReader for MySqlReader {
    fn list_tables(&self) -> BoxFuture<'_, Result<Vec<String>>> {
        Box::pin(async move {
            let rows = sqlx::query(LIST_TABLES)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| Error::query("tables", None, e))?;

            rows.iter()
                .map(|row| text(row, 0).map_err(|e| Error::query("tables", None, e)))
                .collect::<Result<Vec<_>>>()
        })
    }

    fn table_constraints<'a>(&'a self, table: &'a str) -> BoxFuture<'a, Result<Vec<ConstraintRow>>> {
        Box::pin(async move {
            let rows = sqlx::query(TABLE_CONSTRAINTS)
                .bind(table)
                .bind(table)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| Error::query("PK/UK/FK information", Some(table), e))?;

            rows.iter()
                .map(|row| constraint_row(row).map_err(|e| Error::query("PK/UK/FK information", Some(table), e)))
                .collect::<Result<Vec<_>>>()
        })
    }

    fn table_columns<'a>(&'a self, table: &'a str) -> BoxFuture<'a, Result<Vec<ColumnRow>>> {
        Box::pin(async move {
            let rows = sqlx::query(TABLE_COLUMNS)
                .bind(table)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| Error::query("column information", Some(table), e))?;

            rows.iter()
                .map(|row| column_row(row).map_err(|e| Error::query("column information", Some(table), e)))
                .collect::<Result<Vec<_>>>()
        })
    }
}

// ============================================================================
// Row Decoding
// ============================================================================

/// Reads a nullable text field as raw bytes so catalog columns with a
/// binary collation decode as well. NULL becomes `""`.
fn text(row: &MySqlRow, index: usize) -> std::result::Result<String, sqlx::Error> {
    let bytes: Option<Vec<u8>> = row.try_get(index)?;
    Ok(bytes.map(|b| String::from_utf8_lossy(&b).into_owned()).unwrap_or_default())
}

fn constraint_row(row: &MySqlRow) -> std::result::Result<ConstraintRow, sqlx::Error> {
    Ok(ConstraintRow {
        constraint_type: text(row, 0)?,
        column_name: text(row, 1)?,
        ref_schema: text(row, 2)?,
        ref_table: text(row, 3)?,
        ref_column: text(row, 4)?,
        ordinal_position: parse_ordinal(&text(row, 5)?)?,
    })
}

/// Parses the ordinal position. An unreadable value is a decode error
/// rather than a guess, since it decides whether a key is composite.
pub fn parse_ordinal(value: &str) -> std::result::Result<u32, sqlx::Error> {
    value.trim().parse::<u32>().map_err(|e| sqlx::Error::Decode(format!("ordinal position `{value}`: {e}").into()))
}

fn column_row(row: &MySqlRow) -> std::result::Result<ColumnRow, sqlx::Error> {
    Ok(ColumnRow {
        name: text(row, 0)?,
        data_type: text(row, 1)?,
        column_type: text(row, 2)?,
        is_nullable: text(row, 3)?,
        default: text(row, 4)?,
        extra: text(row, 5)?,
        comment: text(row, 6)?,
    })
}
