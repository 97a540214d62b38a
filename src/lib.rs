//! # Spindle - Mechanical-Disk Record Storage Engine
//!
//! Spindle models a mechanical disk as a record-oriented storage engine
//! backed by a plain filesystem: a fixed geometry of platters, surfaces,
//! tracks and sectors, a free-space allocator that favors cylinder
//! locality, and an in-memory directory of record locations persisted to
//! a reserved sector. It is a teaching/simulation engine, not a
//! production database, but its allocation policy, addressing scheme and
//! directory-persistence protocol are real systems design.
//!
//! ## Quick Start
//!
//! ```ignore
//! use spindle::{Disk, InsertOutcome};
//! use spindle::storage::Geometry;
//!
//! let geometry = Geometry {
//!     platters: 2,
//!     surfaces_per_platter: 2,
//!     tracks_per_surface: 4,
//!     sectors_per_track: 8,
//!     sector_capacity: 512,
//! };
//! let mut disk = Disk::create("./mydisk", geometry, "mydisk")?;
//!
//! disk.set_schema("id#name#age")?;
//! if let InsertOutcome::Stored { id, .. } = disk.insert("1#alice#30")? {
//!     assert_eq!(disk.retrieve(id)?.as_deref(), Some("1#alice#30"));
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │     CLI / REPL (bin + cli)          │
//! ├─────────────────────────────────────┤
//! │  CSV Import (import)                │
//! ├─────────────────────────────────────┤
//! │  Disk: CRUD, schema, allocation     │
//! │  cursor, directory persistence      │
//! ├───────────────────┬─────────────────┤
//! │ Record Directory  │ Cylindrical     │
//! │ (directory)       │ Allocator       │
//! ├───────────────────┴─────────────────┤
//! │  Geometry Tree: Platter → Surface   │
//! │  → Track → Sector (storage)         │
//! ├─────────────────────────────────────┤
//! │  One plain file per sector          │
//! └─────────────────────────────────────┘
//! ```
//!
//! ## File Layout
//!
//! Every sector is one file at a path computed from its address:
//!
//! ```text
//! disk_dir/
//! ├── P0/S0/Track0/Sector0.txt   # reserved: schema line
//! ├── P0/S0/Track0/Sector1.txt   # reserved: geometry header + directory
//! ├── P0/S0/Track0/Sector2.txt   # data
//! └── ...
//! ```
//!
//! ## Semantics
//!
//! - Records are raw `#`-delimited lines; boundaries are known only via
//!   the directory's offset/length, never by scanning sector contents.
//! - Ids are assigned as `1 + max(existing ids)` and never reused within
//!   a session; deletion is logical (a tombstone flag).
//! - The full persisted directory is rewritten after every mutation, and
//!   only occupied entries are serialized.
//! - The engine is strictly single-threaded and synchronous.
//!
//! ## Module Overview
//!
//! - [`storage`]: geometry, sector addressing, the containment tree
//! - [`directory`]: record metadata and the persisted row format
//! - [`disk`]: the `Disk` orchestrator and the cylindrical allocator
//! - [`import`]: CSV ingestion
//! - [`cli`]: interactive REPL, command dispatch, table rendering

pub mod cli;
pub mod config;
pub mod directory;
pub mod disk;
pub mod import;
pub mod storage;

pub use directory::{Directory, RecordMetadata};
pub use disk::{DeleteOutcome, Disk, InsertOutcome, Placement, SectorState};
pub use import::{import_csv, ImportSummary};
pub use storage::{Geometry, SectorAddress};
