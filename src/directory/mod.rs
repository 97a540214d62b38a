//! # Record Directory
//!
//! The directory maps record ids to physical locations. It lives in
//! memory as an insertion-ordered sequence of [`RecordMetadata`] and is
//! mirrored to the reserved directory sector after every mutation.
//!
//! ## Row Format
//!
//! One line per record in the persisted form:
//!
//! ```text
//! R#<id>#<platter>#<surface>#<track>#<sector>#<offset>#<length>#<occupied>
//! ```
//!
//! `length` counts payload bytes including the trailing record
//! terminator. Only occupied entries are ever written back to disk; a
//! deleted entry survives in memory as a tombstone for the rest of the
//! session but is dropped from the persisted form.
//!
//! ## Identifiers
//!
//! Ids are assigned as `1 + max(existing ids)` over the whole in-memory
//! sequence, tombstones included, so an id is never reused within a
//! session even after its record is deleted.

use std::fmt;

use eyre::{ensure, Result, WrapErr};

use crate::config::{FIELD_SEPARATOR, RECORD_FIELD_COUNT, RECORD_TAG};
use crate::storage::SectorAddress;

/// Directory entry for one stored record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordMetadata {
    id: u64,
    address: SectorAddress,
    offset: u64,
    length: u64,
    occupied: bool,
}

impl RecordMetadata {
    pub(crate) fn new(id: u64, address: SectorAddress, offset: u64, length: u64) -> Self {
        Self {
            id,
            address,
            offset,
            length,
            occupied: true,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn address(&self) -> SectorAddress {
        self.address
    }

    /// Byte offset of the record within its sector.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Payload bytes including the trailing terminator.
    pub fn length(&self) -> u64 {
        self.length
    }

    pub fn is_occupied(&self) -> bool {
        self.occupied
    }

    pub(crate) fn mark_deleted(&mut self) {
        self.occupied = false;
    }

    /// Serializes the entry as one persisted directory row.
    pub fn to_line(&self) -> String {
        format!(
            "{}{sep}{}{sep}{}{sep}{}{sep}{}{sep}{}{sep}{}{sep}{}{sep}{}",
            RECORD_TAG,
            self.id,
            self.address.platter,
            self.address.surface,
            self.address.track,
            self.address.sector,
            self.offset,
            self.length,
            u8::from(self.occupied),
            sep = FIELD_SEPARATOR
        )
    }

    /// Parses a persisted directory row.
    ///
    /// Fails when the tag is not `R` or fewer than nine fields are
    /// present; a disk cannot be loaded from a malformed directory.
    pub fn parse_line(line: &str) -> Result<Self> {
        let fields: Vec<&str> = line.trim_end().split(FIELD_SEPARATOR).collect();
        ensure!(
            fields.len() >= RECORD_FIELD_COUNT,
            "directory row has {} fields, expected at least {}: '{}'",
            fields.len(),
            RECORD_FIELD_COUNT,
            line
        );
        ensure!(
            fields[0] == RECORD_TAG,
            "directory row tag '{}' is not '{}'",
            fields[0],
            RECORD_TAG
        );

        Ok(Self {
            id: parse_field(fields[1], "record id")?,
            address: SectorAddress::new(
                parse_field(fields[2], "platter index")?,
                parse_field(fields[3], "surface index")?,
                parse_field(fields[4], "track index")?,
                parse_field(fields[5], "sector index")?,
            ),
            offset: parse_field(fields[6], "offset")?,
            length: parse_field(fields[7], "length")?,
            occupied: fields[8] == "1",
        })
    }
}

impl fmt::Display for RecordMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "record {} at {} offset {} length {}",
            self.id, self.address, self.offset, self.length
        )
    }
}

fn parse_field<T: std::str::FromStr>(field: &str, what: &str) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    field
        .parse()
        .wrap_err_with(|| format!("invalid {} '{}' in directory row", what, field))
}

/// Insertion-ordered in-memory directory. Entries are never removed
/// during a session; deletion flips the occupied flag.
#[derive(Debug, Default)]
pub struct Directory {
    entries: Vec<RecordMetadata>,
}

impl Directory {
    pub fn entries(&self) -> &[RecordMetadata] {
        &self.entries
    }

    pub fn occupied_count(&self) -> usize {
        self.entries.iter().filter(|e| e.occupied).count()
    }

    /// Next id to assign: one past the highest id ever seen, tombstones
    /// included.
    pub fn next_id(&self) -> u64 {
        self.entries.iter().map(|e| e.id).max().unwrap_or(0) + 1
    }

    pub(crate) fn push(&mut self, record: RecordMetadata) {
        self.entries.push(record);
    }

    pub fn find_occupied(&self, id: u64) -> Option<&RecordMetadata> {
        self.entries.iter().find(|e| e.id == id && e.occupied)
    }

    pub(crate) fn find_mut(&mut self, id: u64) -> Option<&mut RecordMetadata> {
        self.entries.iter_mut().find(|e| e.id == id)
    }

    /// True when at least one occupied entry addresses the sector.
    pub fn has_occupied_record_at(&self, address: SectorAddress) -> bool {
        self.entries
            .iter()
            .any(|e| e.occupied && e.address == address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RecordMetadata {
        RecordMetadata::new(7, SectorAddress::new(1, 0, 3, 5), 42, 12)
    }

    #[test]
    fn row_round_trip() {
        let record = sample();
        let line = record.to_line();
        assert_eq!(line, "R#7#1#0#3#5#42#12#1");
        assert_eq!(RecordMetadata::parse_line(&line).unwrap(), record);
    }

    #[test]
    fn row_with_wrong_tag_is_rejected() {
        assert!(RecordMetadata::parse_line("X#7#1#0#3#5#42#12#1").is_err());
    }

    #[test]
    fn row_with_missing_fields_is_rejected() {
        assert!(RecordMetadata::parse_line("R#7#1#0#3#5#42#12").is_err());
    }

    #[test]
    fn row_with_non_numeric_field_is_rejected() {
        assert!(RecordMetadata::parse_line("R#7#1#0#three#5#42#12#1").is_err());
    }

    #[test]
    fn next_id_is_one_past_the_maximum_even_with_tombstones() {
        let mut directory = Directory::default();
        assert_eq!(directory.next_id(), 1);

        directory.push(RecordMetadata::new(1, SectorAddress::new(0, 0, 0, 2), 0, 4));
        directory.push(RecordMetadata::new(2, SectorAddress::new(0, 0, 0, 2), 4, 4));
        assert_eq!(directory.next_id(), 3);

        directory.find_mut(2).unwrap().mark_deleted();
        assert_eq!(directory.next_id(), 3);
    }

    #[test]
    fn find_occupied_skips_tombstones() {
        let mut directory = Directory::default();
        directory.push(RecordMetadata::new(1, SectorAddress::new(0, 0, 0, 2), 0, 4));
        directory.find_mut(1).unwrap().mark_deleted();

        assert!(directory.find_occupied(1).is_none());
        assert_eq!(directory.entries().len(), 1);
        assert_eq!(directory.occupied_count(), 0);
    }
}
