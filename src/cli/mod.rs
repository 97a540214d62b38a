//! # Spindle CLI Module
//!
//! Interactive command-line interface for a spindle disk. Every input
//! line is one command; there is no statement accumulation.
//!
//! ## Commands
//!
//! | Command             | Description                                   |
//! |---------------------|-----------------------------------------------|
//! | `insert <FIELDS>`   | Store one `#`-delimited record                |
//! | `get <ID>`          | Retrieve a record by id                       |
//! | `delete <ID>`       | Tombstone a record by id                      |
//! | `import <PATH>`     | Load a CSV file (header row becomes schema)   |
//! | `schema`            | Show the current schema                       |
//! | `map`               | Show the sector allocation map                |
//! | `directory`, `dir`  | Show the record directory, tombstones included|
//! | `help`              | Show available commands                       |
//! | `quit`, `exit`      | Leave the CLI                                 |
//!
//! ## Directory Display
//!
//! The directory is rendered as an ASCII table:
//!
//! ```text
//! +----+---------+---------+-------+--------+--------+--------+----------+
//! | id | platter | surface | track | sector | offset | length | occupied |
//! +----+---------+---------+-------+--------+--------+--------+----------+
//! |  1 |       0 |       0 |     0 |      2 |      0 |      9 | yes      |
//! +----+---------+---------+-------+--------+--------+--------+----------+
//! ```
//!
//! ## History
//!
//! Command history is persisted to `~/.spindle_history` by default and
//! can be redirected with the `SPINDLE_HISTORY` environment variable.
//!
//! ## Module Organization
//!
//! - `repl`: main read-eval-print loop with rustyline integration
//! - `commands`: command parsing and execution
//! - `table`: ASCII table formatter for the directory listing
//! - `history`: history file path resolution

pub mod commands;
pub mod history;
pub mod repl;
pub mod table;

pub use repl::Repl;
