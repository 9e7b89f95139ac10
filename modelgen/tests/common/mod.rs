#![allow(dead_code)]

use std::collections::HashMap;

use futures::future::BoxFuture;
use modelgen::{ColumnRow, ConstraintRow, Error, Result, SchemaReader};

/// Catalog held in memory, answering the same three lookups as MySQL.
#[derive(Debug, Default)]
pub struct MemoryReader {
    pub tables: Vec<String>,
    pub constraints: HashMap<String, Vec<ConstraintRow>>,
    pub columns: HashMap<String, Vec<ColumnRow>>,
    pub failing_table: Option<String>,
}

impl MemoryReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn table(mut self, name: &str, constraints: Vec<ConstraintRow>, columns: Vec<ColumnRow>) -> Self {
        self.tables.push(name.to_string());
        self.constraints.insert(name.to_string(), constraints);
        self.columns.insert(name.to_string(), columns);
        self
    }

    pub fn failing(mut self, name: &str) -> Self {
        self.failing_table = Some(name.to_string());
        self
    }
}

impl SchemaReader for MemoryReader {
    fn list_tables(&self) -> BoxFuture<'_, Result<Vec<String>>> {
        Box::pin(async move { Ok(self.tables.clone()) })
    }

    fn table_constraints<'a>(&'a self, table: &'a str) -> BoxFuture<'a, Result<Vec<ConstraintRow>>> {
        Box::pin(async move { Ok(self.constraints.get(table).cloned().unwrap_or_default()) })
    }

    fn table_columns<'a>(&'a self, table: &'a str) -> BoxFuture<'a, Result<Vec<ColumnRow>>> {
        Box::pin(async move {
            if self.failing_table.as_deref() == Some(table) {
                return Err(Error::Query {
                    what: "column information",
                    table: Some(table.to_string()),
                    source: sqlx::Error::RowNotFound,
                });
            }
            Ok(self.columns.get(table).cloned().unwrap_or_default())
        })
    }
}

pub fn pk(column: &str, position: u32) -> ConstraintRow {
    ConstraintRow {
        constraint_type: "PRIMARY KEY".to_string(),
        column_name: column.to_string(),
        ordinal_position: position,
        ..ConstraintRow::default()
    }
}

pub fn unique(column: &str) -> ConstraintRow {
    ConstraintRow {
        constraint_type: "UNIQUE".to_string(),
        column_name: column.to_string(),
        ordinal_position: 1,
        ..ConstraintRow::default()
    }
}

pub fn fk(column: &str, schema: &str, table: &str, ref_column: &str) -> ConstraintRow {
    ConstraintRow {
        constraint_type: "FOREIGN KEY".to_string(),
        column_name: column.to_string(),
        ref_schema: schema.to_string(),
        ref_table: table.to_string(),
        ref_column: ref_column.to_string(),
        ordinal_position: 1,
    }
}

pub fn column(name: &str, data_type: &str) -> ColumnRow {
    ColumnRow {
        name: name.to_string(),
        data_type: data_type.to_string(),
        column_type: data_type.to_string(),
        is_nullable: "NO".to_string(),
        ..ColumnRow::default()
    }
}
