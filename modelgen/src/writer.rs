//! # Writer Module
//!
//! Persists rendered models as one file per table under a directory named
//! after the database.
//!
//! Failure policy: a file that cannot be opened or created is logged and
//! its table skipped; a file that was opened but cannot be written aborts
//! the run with [`Error::Write`].

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::model::Table;
use crate::naming::{camel_case, strip_db_prefix};
use crate::render::Render;
use crate::{Error, Result};

/// Outcome of [`write_models`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteReport {
    /// Files written, in table order.
    pub written: Vec<PathBuf>,
    /// Tables whose file could not be opened.
    pub skipped: Vec<String>,
}

/// File name of a table's model: `Camel(<name>_model).go`, with the
/// database-name prefix removed.
pub fn model_file_name(table_name: &str, db_name: &str) -> String {
    let (name, _) = strip_db_prefix(table_name, db_name);
    format!("{}.go", camel_case(&format!("{name}_model")))
}

/// Renders and writes every table into `<out_dir>/<db_name>/`.
///
/// When `format` is set, `gofmt -w` runs on each written file; a formatter
/// failure is only logged.
pub fn write_models<R: Render + ?Sized>(
    tables: &[Table],
    db_name: &str,
    out_dir: &Path,
    renderer: &R,
    format: bool,
) -> Result<WriteReport> {
    let dir = out_dir.join(db_name);
    if let Err(e) = fs::create_dir(&dir) {
        log::warn!("{}: {e}", dir.display());
    }

    let mut report = WriteReport::default();

    for table in tables {
        let path = dir.join(model_file_name(&table.source_name, db_name));

        let mut file = match OpenOptions::new().write(true).create(true).truncate(true).open(&path) {
            Ok(file) => file,
            Err(e) => {
                log::error!("{}: {e}", path.display());
                report.skipped.push(table.source_name.clone());
                continue;
            }
        };

        let contents = renderer.render(table, db_name);
        file.write_all(contents.as_bytes()).map_err(|source| Error::Write { path: path.clone(), source })?;
        drop(file);

        log::info!("create {}", path.display());

        if format {
            format_source(&path);
        }
        report.written.push(path);
    }

    Ok(report)
}

fn format_source(path: &Path) {
    match Command::new("gofmt").arg("-w").arg(path).status() {
        Ok(status) if status.success() => {}
        Ok(status) => log::warn!("gofmt exited with {status} for {}", path.display()),
        Err(e) => log::warn!("error while running gofmt: {e}"),
    }
}
