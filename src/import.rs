//! # CSV Import
//!
//! Loads a comma-delimited text file onto a disk. The first non-empty
//! line becomes the schema and every following non-empty line becomes one
//! inserted record, with commas replaced by the internal field separator
//! throughout. The disk core has no CSV-specific logic; this module is a
//! caller of `set_schema` and `insert` like any other.
//!
//! Rows that no longer fit on the disk are skipped and counted rather
//! than aborting the import.

use std::fs;
use std::path::Path;

use eyre::{bail, Result, WrapErr};
use log::warn;

use crate::config::{CSV_SEPARATOR, FIELD_SEPARATOR};
use crate::disk::{Disk, InsertOutcome};

/// What an import did: how many data rows landed and how many were
/// dropped for lack of space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub rows_inserted: usize,
    pub rows_skipped: usize,
}

/// Imports `path` onto `disk`: the header row overwrites the schema, each
/// data row becomes one record.
pub fn import_csv<P: AsRef<Path>>(disk: &mut Disk, path: P) -> Result<ImportSummary> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read CSV file '{}'", path.display()))?;

    let mut lines = contents.lines().filter(|line| !line.trim().is_empty());
    let header = match lines.next() {
        Some(line) => transcode_line(line),
        None => bail!("CSV file '{}' has no header row", path.display()),
    };
    disk.set_schema(&header)?;

    let mut summary = ImportSummary {
        rows_inserted: 0,
        rows_skipped: 0,
    };
    for line in lines {
        let row = transcode_line(line);
        match disk.insert(&row)? {
            InsertOutcome::Stored { .. } => summary.rows_inserted += 1,
            InsertOutcome::DiskFull => {
                warn!("disk full, skipping CSV row '{}'", row);
                summary.rows_skipped += 1;
            }
        }
    }
    Ok(summary)
}

/// Substitutes the CSV delimiter with the internal field separator.
fn transcode_line(line: &str) -> String {
    line.chars()
        .map(|c| if c == CSV_SEPARATOR { FIELD_SEPARATOR } else { c })
        .collect()
}
