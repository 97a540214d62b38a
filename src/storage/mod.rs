//! # Storage Module
//!
//! This module provides the physical layer for spindle: the fixed disk
//! geometry, deterministic sector addressing, and the value-owned
//! containment tree of platters, surfaces, tracks and sectors.
//!
//! ## Directory Layout
//!
//! Every sector is backed by one plain file at a path computable from its
//! address alone, with no lookup structure:
//!
//! ```text
//! disk_dir/
//! ├── P0/
//! │   ├── S0/
//! │   │   ├── Track0/
//! │   │   │   ├── Sector0.txt   # reserved: schema
//! │   │   │   ├── Sector1.txt   # reserved: geometry header + directory
//! │   │   │   └── Sector2.txt   # first data sector
//! │   │   └── Track1/
//! │   │       └── ...
//! │   └── S1/
//! │       └── ...
//! └── P1/
//!     └── ...
//! ```
//!
//! ## Containment Tree
//!
//! `Platter` owns its `Surface`s, a `Surface` owns its `Track`s, and a
//! `Track` owns its `Sector`s, as plain nested `Vec`s. Construction
//! materializes every track directory and every `Sector` value for the
//! full declared geometry up front; there is no lazy allocation. Sector
//! backing files appear on first write.
//!
//! ## I/O Model
//!
//! Sectors open and close their backing file on every call rather than
//! holding descriptors. This bounds open-file usage to one at a time at
//! the cost of a per-call open/close, which suits the strictly
//! single-threaded, synchronous engine built on top.
//!
//! ## Module Organization
//!
//! - `geometry`: `Geometry`, `SectorAddress`, `DiskConfig` header line
//! - `sector`: the fixed-capacity leaf storage unit
//! - `platter`: the `Track`/`Surface`/`Platter` containment layers

mod geometry;
mod platter;
mod sector;

pub use geometry::{DiskConfig, Geometry, SectorAddress};
pub use platter::{Platter, Surface, Track};
pub use sector::Sector;
