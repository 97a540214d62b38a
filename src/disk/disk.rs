//! # Disk Orchestrator
//!
//! `Disk` owns the full containment tree, the schema string, the
//! in-memory record directory and the allocation cursor. It is the only
//! type that mutates sectors, and the only one that writes the reserved
//! bookkeeping sectors.
//!
//! ## Create vs Load
//!
//! `Disk::create` builds the directory tree for a declared geometry,
//! touches the schema sector and writes the directory sector with its
//! header line and an empty directory. `Disk::load` reconstructs a disk
//! from the header line alone, then replays every persisted directory
//! row; a malformed header or row fails the load outright with no
//! partial recovery.

use std::fs;
use std::path::{Path, PathBuf};

use eyre::{bail, ensure, Result, WrapErr};
use log::info;

use super::alloc::AllocationCursor;
use super::{DeleteOutcome, InsertOutcome, SectorState};
use crate::config::{FIELD_SEPARATOR, RECORD_TERMINATOR, SCHEMA_TAG};
use crate::directory::{Directory, RecordMetadata};
use crate::storage::{DiskConfig, Geometry, Platter, Sector, SectorAddress};

pub struct Disk {
    config: DiskConfig,
    base_path: PathBuf,
    platters: Vec<Platter>,
    schema: String,
    directory: Directory,
    cursor: AllocationCursor,
}

impl Disk {
    /// Creates a fresh disk at `path` with the declared geometry,
    /// initializing both reserved sectors: the schema sector empty, the
    /// directory sector with the geometry header and an empty directory.
    pub fn create<P: AsRef<Path>>(path: P, geometry: Geometry, name: &str) -> Result<Self> {
        geometry.validate()?;
        ensure!(!name.is_empty(), "disk name must not be empty");
        ensure!(
            !name.contains(FIELD_SEPARATOR),
            "disk name must not contain '{}'",
            FIELD_SEPARATOR
        );

        let base_path = path.as_ref().to_path_buf();
        fs::create_dir_all(&base_path).wrap_err_with(|| {
            format!("failed to create disk directory '{}'", base_path.display())
        })?;
        let platters = build_platters(&base_path, &geometry)?;

        let disk = Self {
            config: DiskConfig {
                geometry,
                name: name.to_string(),
            },
            base_path,
            platters,
            schema: String::new(),
            directory: Directory::default(),
            cursor: AllocationCursor::default(),
        };

        disk.schema_sector().overwrite(b"")?;
        disk.persist_directory()?;

        info!(
            "created disk '{}' at {} ({} sectors)",
            disk.config.name,
            disk.base_path.display(),
            geometry.total_sectors()
        );
        Ok(disk)
    }

    /// Reconstructs a disk from its base path by parsing the geometry
    /// header and replaying every persisted directory row, then reloading
    /// the schema. Never writes during the load.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let base_path = path.as_ref().to_path_buf();
        let directory_path = SectorAddress::DIRECTORY.sector_file(&base_path);
        let contents = fs::read_to_string(&directory_path).wrap_err_with(|| {
            format!(
                "failed to read disk directory sector '{}'",
                directory_path.display()
            )
        })?;

        let mut lines = contents.lines();
        let header = match lines.next() {
            Some(line) => line,
            None => bail!(
                "disk directory sector '{}' is empty",
                directory_path.display()
            ),
        };
        let config = DiskConfig::parse_header(header)?;
        config.geometry.validate()?;

        let platters = build_platters(&base_path, &config.geometry)?;

        let mut directory = Directory::default();
        for line in lines {
            if line.trim().is_empty() {
                continue;
            }
            let record = RecordMetadata::parse_line(line)?;
            ensure!(
                config.geometry.contains(record.address()),
                "directory row addresses {} outside the disk geometry",
                record.address()
            );
            directory.push(record);
        }

        let mut disk = Self {
            config,
            base_path,
            platters,
            schema: String::new(),
            directory,
            cursor: AllocationCursor::default(),
        };
        disk.schema = disk.load_schema()?;

        info!(
            "loaded disk '{}' from {} ({} occupied records)",
            disk.config.name,
            disk.base_path.display(),
            disk.directory.occupied_count()
        );
        Ok(disk)
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn geometry(&self) -> &Geometry {
        &self.config.geometry
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// The sector at `address`. The address must lie within the geometry;
    /// every address handed out by the allocator or accepted by `load`
    /// already is.
    pub fn sector(&self, address: SectorAddress) -> &Sector {
        &self.platters[address.platter].surfaces()[address.surface].tracks()[address.track]
            .sectors()[address.sector]
    }

    /// Stores one record: finds a placement in cylinder order, appends
    /// the payload plus one terminator byte, records the directory entry
    /// and rewrites the persisted directory.
    pub fn insert(&mut self, payload: &str) -> Result<InsertOutcome> {
        let required = payload.len() as u64 + 1;

        let placement = match self.find_free_slot(required) {
            Some(placement) => placement,
            None => return Ok(InsertOutcome::DiskFull),
        };

        let mut bytes = Vec::with_capacity(payload.len() + 1);
        bytes.extend_from_slice(payload.as_bytes());
        bytes.push(RECORD_TERMINATOR);
        self.sector(placement.address).append(&bytes)?;

        let id = self.directory.next_id();
        self.directory.push(RecordMetadata::new(
            id,
            placement.address,
            placement.offset,
            required,
        ));
        self.persist_directory()?;

        Ok(InsertOutcome::Stored {
            id,
            address: placement.address,
            offset: placement.offset,
        })
    }

    /// The payload of the occupied record with this id, with its trailing
    /// terminator stripped, or `None` when the id is unknown or deleted.
    pub fn retrieve(&self, id: u64) -> Result<Option<String>> {
        let record = match self.directory.find_occupied(id) {
            Some(record) => record,
            None => return Ok(None),
        };

        let bytes = self
            .sector(record.address())
            .read_range(record.offset(), record.length())?;
        let mut payload = String::from_utf8(bytes)
            .wrap_err_with(|| format!("record {} is not valid UTF-8", id))?;
        if payload.ends_with(RECORD_TERMINATOR as char) {
            payload.pop();
        }
        Ok(Some(payload))
    }

    /// Tombstones the record with this id. The record's bytes stay in
    /// their sector; only the directory changes, and it is re-persisted
    /// for both found outcomes.
    pub fn delete(&mut self, id: u64) -> Result<DeleteOutcome> {
        let outcome = match self.directory.find_mut(id) {
            Some(record) if record.is_occupied() => {
                record.mark_deleted();
                DeleteOutcome::Deleted
            }
            Some(_) => DeleteOutcome::AlreadyDeleted,
            None => return Ok(DeleteOutcome::NotFound),
        };

        self.persist_directory()?;
        Ok(outcome)
    }

    /// The delimiter-joined field names of the logical table, empty when
    /// no schema has been set.
    pub fn schema(&self) -> &str {
        &self.schema
    }

    /// Overwrites the schema sector and the in-memory schema wholesale.
    /// `header` is the already-delimiter-joined field-name line.
    pub fn set_schema(&mut self, header: &str) -> Result<()> {
        let line = format!("{}{}{}\n", SCHEMA_TAG, FIELD_SEPARATOR, header);
        self.schema_sector().overwrite(line.as_bytes())?;
        self.schema = header.to_string();
        Ok(())
    }

    /// The full in-memory directory, tombstones included.
    pub fn records(&self) -> &[RecordMetadata] {
        self.directory.entries()
    }

    /// Classifies every sector of the geometry, in address order.
    pub fn sector_states(&self) -> Vec<(SectorAddress, SectorState)> {
        self.config
            .geometry
            .addresses()
            .map(|address| {
                let state = if address.is_reserved() {
                    SectorState::Reserved
                } else {
                    let sector = self.sector(address);
                    if sector.size() >= sector.capacity() {
                        SectorState::Full
                    } else if self.directory.has_occupied_record_at(address) {
                        SectorState::Occupied
                    } else {
                        SectorState::Free
                    }
                };
                (address, state)
            })
            .collect()
    }

    pub(crate) fn cursor(&self) -> AllocationCursor {
        self.cursor
    }

    pub(crate) fn set_cursor(&mut self, cursor: AllocationCursor) {
        self.cursor = cursor;
    }

    fn schema_sector(&self) -> &Sector {
        self.sector(SectorAddress::SCHEMA)
    }

    fn directory_sector(&self) -> &Sector {
        self.sector(SectorAddress::DIRECTORY)
    }

    fn load_schema(&self) -> Result<String> {
        let contents = self.schema_sector().read_all()?;
        let first = contents.lines().next().unwrap_or("");
        let fields = first
            .strip_prefix(SCHEMA_TAG)
            .and_then(|rest| rest.strip_prefix(FIELD_SEPARATOR))
            .unwrap_or("");
        Ok(fields.to_string())
    }

    /// Rewrites the persisted directory wholesale: the geometry header
    /// followed by one row per currently-occupied entry.
    ///
    /// Tombstones are not serialized, so deletion history does not
    /// survive a reload: after a later `load`, a deleted id is gone from
    /// the directory and the `1 + max(ids)` high-water mark may hand it
    /// out again.
    fn persist_directory(&self) -> Result<()> {
        let mut out = String::new();
        out.push_str(&self.config.header_line());
        out.push('\n');
        for record in self.directory.entries() {
            if record.is_occupied() {
                out.push_str(&record.to_line());
                out.push('\n');
            }
        }
        self.directory_sector().overwrite(out.as_bytes())
    }
}

fn build_platters(base: &Path, geometry: &Geometry) -> Result<Vec<Platter>> {
    (0..geometry.platters)
        .map(|platter| Platter::create(base, platter, geometry))
        .collect()
}
