//! # Generator Module
//!
//! Drives a generation run: read the catalog, resolve constraints, map
//! columns, assemble tables, then hand them to the writer.
//!
//! The run is strictly sequential. Constraints of every table are
//! resolved before any column is mapped, so the blacklist is complete
//! by the time foreign keys are checked against it. Any catalog error
//! aborts the run before a single file is written.

// ============================================================================
// Internal Crate Imports
// ============================================================================

use crate::{
    Result,
    assembler::assemble,
    config::Config,
    mapper::map_columns,
    model::{ForeignKey, Table},
    reader::{MySqlReader, SchemaReader},
    render::BeegoRenderer,
    resolver::{Blacklist, Constraints, resolve_constraints},
    writer::{WriteReport, write_models},
};

// ============================================================================
// Assembled Schema
// ============================================================================

/// Every table of a run, plus the tables excluded as reference targets.
#[derive(Debug, Clone, Default)]
pub struct SchemaModel {
    pub tables: Vec<Table>,
    pub blacklist: Blacklist,
}

impl SchemaModel {
    /// Foreign keys of `table` whose target can be referenced, i.e. is not
    /// blacklisted.
    pub fn references<'a>(&'a self, table: &'a Table) -> impl Iterator<Item = &'a ForeignKey> + 'a {
        table.foreign_keys.values().filter(|fk| !self.blacklist.contains(&fk.ref_table))
    }
}

// ============================================================================
// Pipeline
// ============================================================================

/// Returns the tables to generate: the selection if any, otherwise every
/// table the catalog lists, in catalog order.
pub async fn select_tables<R: SchemaReader + ?Sized>(reader: &R, selection: &[String]) -> Result<Vec<String>> {
    if selection.is_empty() {
        reader.list_tables().await
    } else {
        Ok(selection.to_vec())
    }
}

/// Introspects and assembles the named tables.
pub async fn build_tables<R: SchemaReader + ?Sized>(
    reader: &R,
    table_names: &[String],
    db_name: &str,
) -> Result<SchemaModel> {
    let mut blacklist = Blacklist::new();

    let mut resolved: Vec<(&str, Constraints)> = Vec::with_capacity(table_names.len());
    for name in table_names {
        let rows = reader.table_constraints(name).await?;
        let constraints = resolve_constraints(name, &rows, &mut blacklist);
        resolved.push((name.as_str(), constraints));
    }

    let mut tables = Vec::with_capacity(resolved.len());
    for (name, constraints) in resolved {
        let rows = reader.table_columns(name).await?;
        if rows.is_empty() {
            log::warn!("{name}: no columns found, does the table exist?");
        }
        let columns = map_columns(&rows, &constraints);
        log::debug!("{name}: {} columns, pk `{}`", columns.len(), constraints.pk);
        tables.push(assemble(name, db_name, constraints, columns));
    }

    Ok(SchemaModel { tables, blacklist })
}

/// Runs a full generation against the configured database.
pub async fn generate(config: &Config) -> Result<WriteReport> {
    if let Some(fields) = config.fields() {
        log::debug!("field selection `{fields}` is not used");
    }

    let reader = MySqlReader::connect(config.conn()).await?;
    let db_name = config.database_name();

    let result = run(&reader, config, &db_name).await;
    reader.close().await;
    result
}

async fn run(reader: &MySqlReader, config: &Config, db_name: &str) -> Result<WriteReport> {
    let names = select_tables(reader, config.tables()).await?;
    let schema = build_tables(reader, &names, db_name).await?;

    for table in &schema.tables {
        for fk in schema.references(table) {
            log::debug!("{}.{} references {}.{}", table.source_name, fk.name, fk.ref_table, fk.ref_column);
        }
    }

    write_models(&schema.tables, db_name, config.out_dir(), &BeegoRenderer, config.format())
}
