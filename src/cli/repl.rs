//! # REPL - Read-Eval-Print Loop
//!
//! The main interactive loop for the spindle CLI. Reads one command per
//! line via rustyline, dispatches it to the command handler and prints
//! the result. Errors are displayed and the loop continues; only
//! `quit`/`exit` or Ctrl+D terminate it.

use eyre::{Result, WrapErr};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::cli::commands::{CommandHandler, CommandResult};
use crate::cli::history::history_path;
use crate::disk::Disk;

const PROMPT: &str = "spindle> ";

pub struct Repl {
    disk: Disk,
    editor: DefaultEditor,
}

impl Repl {
    pub fn new(disk: Disk) -> Result<Self> {
        let mut editor = DefaultEditor::new().wrap_err("failed to initialize line editor")?;

        if let Some(history_file) = history_path() {
            let _ = editor.load_history(&history_file);
        }

        Ok(Self { disk, editor })
    }

    pub fn run(&mut self) -> Result<()> {
        self.print_welcome();

        loop {
            match self.editor.readline(PROMPT) {
                Ok(line) => {
                    if !self.handle_line(&line) {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye");
                    break;
                }
                Err(err) => {
                    eprintln!("Error reading input: {}", err);
                    break;
                }
            }
        }

        self.save_history();
        Ok(())
    }

    fn handle_line(&mut self, line: &str) -> bool {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return true;
        }
        self.editor.add_history_entry(trimmed).ok();

        match CommandHandler::execute(trimmed, &mut self.disk) {
            CommandResult::Exit => false,
            CommandResult::Output(text) => {
                println!("{}", text);
                true
            }
            CommandResult::Continue => true,
            CommandResult::Error(message) => {
                eprintln!("Error: {}", message);
                true
            }
        }
    }

    fn print_welcome(&self) {
        let g = self.disk.geometry();
        println!(
            "spindle {} - disk '{}' ({} platters x {} surfaces x {} tracks x {} sectors, {} B/sector)",
            env!("CARGO_PKG_VERSION"),
            self.disk.name(),
            g.platters,
            g.surfaces_per_platter,
            g.tracks_per_surface,
            g.sectors_per_track,
            g.sector_capacity
        );
        println!("Type 'help' for available commands.");
    }

    fn save_history(&mut self) {
        if let Some(history_file) = history_path() {
            let _ = self.editor.save_history(&history_file);
        }
    }
}
