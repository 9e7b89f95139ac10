//! # Constraint Resolver Module
//!
//! Classifies the raw constraint rows of a table into its primary key,
//! unique keys and foreign keys, and decides whether the table can be
//! used as a foreign-key reference target.

use std::collections::{HashMap, HashSet};

use crate::model::ForeignKey;
use crate::reader::ConstraintRow;

/// Tables that must not be treated as foreign-key reference targets
/// because they lack a single-column primary key.
///
/// Membership does not stop the table itself from being generated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Blacklist(HashSet<String>);

impl Blacklist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, table: impl Into<String>) {
        self.0.insert(table.into());
    }

    pub fn contains(&self, table: &str) -> bool {
        self.0.contains(table)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Key information of a single table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Constraints {
    /// Single-column primary key, empty when missing or composite.
    pub pk: String,
    pub composite_pk: bool,
    pub unique_keys: Vec<String>,
    pub foreign_keys: HashMap<String, ForeignKey>,
}

impl Constraints {
    /// Whether `column` is covered by a UNIQUE constraint.
    pub fn is_unique(&self, column: &str) -> bool {
        self.unique_keys.iter().any(|k| k == column)
    }
}

/// Resolves the constraint rows of `table`.
///
/// A PRIMARY KEY row at ordinal position 1 names the primary key; any row
/// at a later position marks the key as composite and clears it for good.
/// Tables left without a primary key are added to `blacklist`.
pub fn resolve_constraints(table: &str, rows: &[ConstraintRow], blacklist: &mut Blacklist) -> Constraints {
    let mut constraints = Constraints::default();

    for row in rows {
        match row.constraint_type.as_str() {
            "PRIMARY KEY" => {
                if row.ordinal_position == 1 && !constraints.composite_pk {
                    constraints.pk = row.column_name.clone();
                } else {
                    constraints.pk.clear();
                    constraints.composite_pk = true;
                }
            }
            "UNIQUE" => constraints.unique_keys.push(row.column_name.clone()),
            "FOREIGN KEY" => {
                constraints.foreign_keys.insert(
                    row.column_name.clone(),
                    ForeignKey {
                        name: row.column_name.clone(),
                        ref_schema: row.ref_schema.clone(),
                        ref_table: row.ref_table.clone(),
                        ref_column: row.ref_column.clone(),
                    },
                );
            }
            other => log::debug!("{table}: ignoring constraint of type `{other}`"),
        }
    }

    if constraints.pk.is_empty() {
        log::debug!("{table}: no single-column primary key, excluded from references");
        blacklist.insert(table);
    }

    constraints
}
