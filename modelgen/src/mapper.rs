//! # Column Mapper Module
//!
//! Turns catalog column rows into generated fields.

use crate::model::{Column, FieldType, OrmTag};
use crate::naming::camel_case;
use crate::reader::ColumnRow;
use crate::resolver::Constraints;

/// Maps a native type to a field type: anything containing `int` is an
/// integer, everything else is text.
pub fn native_field_type(data_type: &str) -> FieldType {
    if data_type.contains("int") { FieldType::Int } else { FieldType::String }
}

/// Maps every column of a table, preserving the catalog order.
pub fn map_columns(rows: &[ColumnRow], constraints: &Constraints) -> Vec<Column> {
    rows.iter().map(|row| map_column(row, constraints)).collect()
}

/// Maps one column.
///
/// A column named like the resolved primary key, or literally named `id`,
/// becomes a `string` primary-key field whatever its native type.
///
/// Foreign keys never show up on the field: its type stays scalar and
/// the ORM only accepts `rel(fk)` on model pointers.
pub fn map_column(row: &ColumnRow, constraints: &Constraints) -> Column {
    let is_pk = (!constraints.pk.is_empty() && row.name == constraints.pk) || row.name == "id";

    let field_type = if is_pk { FieldType::String } else { native_field_type(&row.data_type) };

    let mut tag = OrmTag {
        column: row.name.clone(),
        auto: row.extra.contains("auto_increment"),
        pk: is_pk,
        comment: row.comment.clone(),
        ..OrmTag::default()
    };

    if !is_pk {
        tag.null = row.is_nullable.eq_ignore_ascii_case("YES");
        tag.unique = constraints.is_unique(&row.name);
        if !row.default.is_empty() {
            if is_tag_safe(&row.default) {
                tag.default = Some(row.default.clone());
            } else {
                log::warn!("{}: default `{}` can not be expressed in a tag, dropped", row.name, row.default);
            }
        }
    }

    let (size, precision) = type_params(&row.column_type);
    match row.data_type.as_str() {
        "varchar" | "char" => tag.size = size,
        "decimal" => {
            tag.digits = size;
            tag.decimals = precision;
        }
        _ => {}
    }

    Column { name: camel_case(&row.name), field_type, tag }
}

/// Whether a value can sit inside `default(...)` without ending the
/// option early or breaking the quoted tag.
fn is_tag_safe(value: &str) -> bool {
    !value.contains([';', '(', ')', '"', '`', '\\', '\n', '\r'])
}

/// Parses the parenthesised parameters of a column type, e.g.
/// `decimal(10,2)` gives `(Some(10), Some(2))`.
fn type_params(column_type: &str) -> (Option<u32>, Option<u32>) {
    let Some(open) = column_type.find('(') else {
        return (None, None);
    };
    let Some(close) = column_type[open..].find(')') else {
        return (None, None);
    };

    let mut params = column_type[open + 1..open + close].split(',').map(|p| p.trim().parse::<u32>().ok());
    let first = params.next().flatten();
    let second = params.next().flatten();
    (first, second)
}
