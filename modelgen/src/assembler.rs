//! # Model Assembler Module

use crate::model::{Column, Table};
use crate::naming::strip_db_prefix;
use crate::resolver::Constraints;

/// Combines the resolved constraints and mapped columns of one table.
///
/// A table named `"<db_name>_..."` loses that prefix (once, at the start
/// only) and is flagged for the prefixed registration variant.
pub fn assemble(table_name: &str, db_name: &str, constraints: Constraints, columns: Vec<Column>) -> Table {
    let (name, prefixed) = strip_db_prefix(table_name, db_name);

    Table {
        name,
        source_name: table_name.to_string(),
        prefixed,
        pk: constraints.pk,
        unique_keys: constraints.unique_keys,
        foreign_keys: constraints.foreign_keys,
        columns,
    }
}
