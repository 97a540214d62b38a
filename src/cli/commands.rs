//! # Command Handler
//!
//! Parses and executes CLI commands against a disk. Each command is one
//! line; the first word selects the operation and the remainder, where
//! present, is its argument (the record payload for `insert`, an id for
//! `get`/`delete`, a path for `import`).
//!
//! Failed operations produce an error message and leave the REPL
//! running; only `quit`/`exit` terminate it.

use std::fmt::Write as _;

use crate::cli::table::TableFormatter;
use crate::disk::{DeleteOutcome, Disk, InsertOutcome};
use crate::import::import_csv;

#[derive(Debug, PartialEq)]
pub enum CommandResult {
    Output(String),
    Exit,
    Continue,
    Error(String),
}

pub struct CommandHandler;

impl CommandHandler {
    pub fn execute(input: &str, disk: &mut Disk) -> CommandResult {
        let input = input.trim();
        let (command, argument) = match input.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (input, ""),
        };

        if command.is_empty() {
            return CommandResult::Continue;
        }

        match command.to_lowercase().as_str() {
            "quit" | "exit" | "q" => CommandResult::Exit,
            "help" | "?" => CommandResult::Output(help_text()),
            "schema" => show_schema(disk),
            "map" => show_map(disk),
            "directory" | "dir" => show_directory(disk),
            "insert" => insert_record(disk, argument),
            "get" => retrieve_record(disk, argument),
            "delete" => delete_record(disk, argument),
            "import" => import_file(disk, argument),
            _ => CommandResult::Error(format!(
                "Unknown command: {}. Type 'help' for available commands.",
                command
            )),
        }
    }
}

fn help_text() -> String {
    r#"Spindle CLI Commands:

  insert FIELDS        Store one record (fields separated by '#')
  get ID               Retrieve a record by id
  delete ID            Delete a record by id (logical, id is never reused)
  import PATH          Load a CSV file; its header row becomes the schema
  schema               Show the current schema
  map                  Show the sector allocation map
  directory, dir       Show the record directory, tombstones included
  help, ?              Show this help message
  quit, exit, q        Leave the CLI"#
        .to_string()
}

fn show_schema(disk: &Disk) -> CommandResult {
    if disk.schema().is_empty() {
        CommandResult::Output(
            "No schema set. Import a CSV to define one, or records are schema-free.".to_string(),
        )
    } else {
        CommandResult::Output(format!("Schema: {}", disk.schema()))
    }
}

fn show_map(disk: &Disk) -> CommandResult {
    let geometry = *disk.geometry();
    let last_sector = geometry.sectors_per_track - 1;

    let mut out = String::new();
    for (address, state) in disk.sector_states() {
        if address.surface == 0 && address.track == 0 && address.sector == 0 {
            let _ = writeln!(out, "Platter {}:", address.platter);
        }
        if address.track == 0 && address.sector == 0 {
            let _ = writeln!(out, "  Surface {}:", address.surface);
        }
        if address.sector == 0 {
            let _ = write!(out, "    Track {}: ", address.track);
        }
        out.push(state.glyph());
        if address.sector == last_sector {
            out.push('\n');
        }
    }
    out.push_str("Legend: O=occupied, L=free, F=full, R=reserved");
    CommandResult::Output(out)
}

fn show_directory(disk: &Disk) -> CommandResult {
    let records = disk.records();
    if records.is_empty() {
        return CommandResult::Output("The record directory is empty.".to_string());
    }

    let headers = [
        "id", "platter", "surface", "track", "sector", "offset", "length", "occupied",
    ]
    .iter()
    .map(|h| h.to_string())
    .collect();

    let rows = records
        .iter()
        .map(|r| {
            vec![
                r.id().to_string(),
                r.address().platter.to_string(),
                r.address().surface.to_string(),
                r.address().track.to_string(),
                r.address().sector.to_string(),
                r.offset().to_string(),
                r.length().to_string(),
                if r.is_occupied() { "yes" } else { "no" }.to_string(),
            ]
        })
        .collect();

    let formatter = TableFormatter::new(headers, rows);
    let occupied = records.iter().filter(|r| r.is_occupied()).count();
    CommandResult::Output(format!(
        "{}{} record{} ({} occupied)",
        formatter.render(),
        formatter.row_count(),
        if formatter.row_count() == 1 { "" } else { "s" },
        occupied
    ))
}

fn insert_record(disk: &mut Disk, payload: &str) -> CommandResult {
    if payload.is_empty() {
        return CommandResult::Error("Usage: insert FIELD1#FIELD2#...".to_string());
    }

    match disk.insert(payload) {
        Ok(InsertOutcome::Stored {
            id,
            address,
            offset,
        }) => CommandResult::Output(format!(
            "Record {} stored at {} offset {}",
            id, address, offset
        )),
        Ok(InsertOutcome::DiskFull) => {
            CommandResult::Output("No space left on the disk for this record.".to_string())
        }
        Err(err) => CommandResult::Error(format!("{:#}", err)),
    }
}

fn retrieve_record(disk: &Disk, argument: &str) -> CommandResult {
    let id = match parse_id(argument, "get") {
        Ok(id) => id,
        Err(message) => return CommandResult::Error(message),
    };

    match disk.retrieve(id) {
        Ok(Some(payload)) => CommandResult::Output(payload),
        Ok(None) => CommandResult::Output(format!("Record {} not found (or deleted).", id)),
        Err(err) => CommandResult::Error(format!("{:#}", err)),
    }
}

fn delete_record(disk: &mut Disk, argument: &str) -> CommandResult {
    let id = match parse_id(argument, "delete") {
        Ok(id) => id,
        Err(message) => return CommandResult::Error(message),
    };

    match disk.delete(id) {
        Ok(DeleteOutcome::Deleted) => CommandResult::Output(format!("Record {} deleted.", id)),
        Ok(DeleteOutcome::AlreadyDeleted) => {
            CommandResult::Output(format!("Record {} is already deleted.", id))
        }
        Ok(DeleteOutcome::NotFound) => {
            CommandResult::Output(format!("Record {} not found.", id))
        }
        Err(err) => CommandResult::Error(format!("{:#}", err)),
    }
}

fn import_file(disk: &mut Disk, path: &str) -> CommandResult {
    if path.is_empty() {
        return CommandResult::Error("Usage: import PATH/TO/FILE.csv".to_string());
    }

    match import_csv(disk, path) {
        Ok(summary) => {
            let mut message = format!(
                "Imported {} record{}",
                summary.rows_inserted,
                if summary.rows_inserted == 1 { "" } else { "s" }
            );
            if summary.rows_skipped > 0 {
                let _ = write!(message, " ({} skipped, disk full)", summary.rows_skipped);
            }
            let _ = write!(message, ". Schema: {}", disk.schema());
            CommandResult::Output(message)
        }
        Err(err) => CommandResult::Error(format!("{:#}", err)),
    }
}

fn parse_id(argument: &str, command: &str) -> Result<u64, String> {
    if argument.is_empty() {
        return Err(format!("Usage: {} ID", command));
    }
    argument
        .parse()
        .map_err(|_| format!("'{}' is not a valid record id", argument))
}
