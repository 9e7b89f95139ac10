//! # Naming Module
//!
//! Identifier conversions shared by the column mapper, the assembler and
//! the writer.

/// Converts an underscore delimited identifier to PascalCase.
///
/// Each `_`-separated token is trimmed, its first character is uppercased
/// and the rest is kept as written, then the tokens are concatenated.
///
/// ```
/// assert_eq!(modelgen::naming::camel_case("very_important_person"), "VeryImportantPerson");
/// assert_eq!(modelgen::naming::camel_case("total_amount"), "TotalAmount");
/// ```
pub fn camel_case(input: &str) -> String {
    input.split('_').map(|token| title(token.trim_matches(' '))).collect()
}

fn title(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Splits a PascalCase identifier back into lowercase, underscore
/// delimited words.
///
/// An underscore is inserted before every uppercase ASCII letter that
/// follows at least one non-underscore character.
///
/// ```
/// assert_eq!(modelgen::naming::underline_string("XxYy"), "xx_yy");
/// ```
pub fn underline_string(input: &str) -> String {
    let mut out = String::with_capacity(input.len() * 2);
    let mut seen_word = false;

    for (i, c) in input.chars().enumerate() {
        if i > 0 && c.is_ascii_uppercase() && seen_word {
            out.push('_');
        }
        if c != '_' {
            seen_word = true;
        }
        out.push(c);
    }

    out.to_lowercase()
}

/// Removes one leading `"<db_name>_"` from a table name.
///
/// Returns the stripped name and whether the prefix was present.
pub fn strip_db_prefix(table_name: &str, db_name: &str) -> (String, bool) {
    if db_name.is_empty() {
        return (table_name.to_string(), false);
    }

    let prefix = format!("{db_name}_");
    match table_name.strip_prefix(&prefix) {
        Some(rest) => (rest.to_string(), true),
        None => (table_name.to_string(), false),
    }
}

/// Extracts the database name from a connection string: the last
/// `/`-separated segment, without any `?` query parameters.
pub fn database_name(conn: &str) -> String {
    let path = conn.split('?').next().unwrap_or_default();
    let path = path.trim_end_matches('/');
    path.rsplit('/').next().unwrap_or_default().to_string()
}
