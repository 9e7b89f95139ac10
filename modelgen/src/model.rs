//! # Model Module
//!
//! In-memory description of the models produced by a generation run.
//! Values are built once from the live schema, handed to the renderer
//! and dropped; nothing here is mutated after assembly.

use std::collections::HashMap;
use std::fmt;

use crate::naming::camel_case;

// ============================================================================
// Table
// ============================================================================

/// A generated model, one per database table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    /// Type name source: the table name with any `"<db>_"` prefix removed.
    pub name: String,
    /// The table name as returned by the catalog.
    pub source_name: String,
    /// Whether `source_name` carried the database-name prefix. Selects the
    /// prefixed registration variant when rendering.
    pub prefixed: bool,
    /// Resolved single-column primary key. Empty when missing or composite.
    pub pk: String,
    /// Columns covered by UNIQUE constraints.
    pub unique_keys: Vec<String>,
    /// Foreign keys keyed by their source column name.
    pub foreign_keys: HashMap<String, ForeignKey>,
    /// Fields in catalog declaration order.
    pub columns: Vec<Column>,
}

impl Table {
    /// Name of the generated type.
    pub fn type_name(&self) -> String {
        camel_case(&self.name)
    }
}

/// Renders the struct declaration of the model.
impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "type {} struct {{", self.type_name())?;
        for column in &self.columns {
            writeln!(f, "{column}")?;
        }
        writeln!(f, "}}")
    }
}

// ============================================================================
// Column
// ============================================================================

/// A single generated field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// PascalCase field name.
    pub name: String,
    pub field_type: FieldType,
    pub tag: OrmTag,
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.name, self.field_type, self.tag)
    }
}

/// The two field types the mapping policy produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Int,
    String,
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Int => f.write_str("int"),
            FieldType::String => f.write_str("string"),
        }
    }
}

// ============================================================================
// ForeignKey
// ============================================================================

/// A foreign key declared on one column. Descriptive only: it never
/// influences the field type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKey {
    /// Source column name.
    pub name: String,
    pub ref_schema: String,
    pub ref_table: String,
    pub ref_column: String,
}

// ============================================================================
// OrmTag
// ============================================================================

/// Relation kinds understood by the ORM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationKind {
    ForeignKey,
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelationKind::ForeignKey => f.write_str("fk"),
        }
    }
}

/// ORM annotation attached to a field.
///
/// Serializes as `` `orm:"column(x);auto;pk;..."` `` with the options in a
/// fixed order, followed by ` description:"..."` when a comment is set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrmTag {
    /// Raw catalog column name, before case conversion.
    pub column: String,
    pub auto: bool,
    pub pk: bool,
    pub null: bool,
    pub unique: bool,
    pub size: Option<u32>,
    pub digits: Option<u32>,
    pub decimals: Option<u32>,
    pub default: Option<String>,
    /// Only valid on fields typed as a pointer to another model.
    pub rel: Option<RelationKind>,
    pub comment: String,
}

impl OrmTag {
    /// The option tokens, in serialization order.
    pub fn options(&self) -> Vec<String> {
        let mut options = Vec::new();

        if !self.column.is_empty() {
            options.push(format!("column({})", self.column));
        }
        if self.auto {
            options.push("auto".to_string());
        }
        if self.pk {
            options.push("pk".to_string());
        }
        if self.null {
            options.push("null".to_string());
        }
        if self.unique {
            options.push("unique".to_string());
        }
        if let Some(size) = self.size {
            options.push(format!("size({size})"));
        }
        if let Some(digits) = self.digits {
            options.push(format!("digits({digits})"));
        }
        if let Some(decimals) = self.decimals {
            options.push(format!("decimals({decimals})"));
        }
        if let Some(default) = &self.default {
            options.push(format!("default({default})"));
        }
        if let Some(rel) = self.rel {
            options.push(format!("rel({rel})"));
        }

        options
    }
}

impl fmt::Display for OrmTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let options = self.options();
        if options.is_empty() {
            return Ok(());
        }

        let options = options.join(";");
        if self.comment.is_empty() {
            write!(f, "`orm:\"{options}\"`")
        } else {
            write!(f, "`orm:\"{options}\" description:\"{}\"`", escape_tag_value(&self.comment))
        }
    }
}

/// Escapes text for a quoted value inside a Go raw-string struct tag.
/// Backticks cannot appear in a raw string at all and become `'`.
fn escape_tag_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '`' => out.push('\''),
            c => out.push(c),
        }
    }
    out
}
