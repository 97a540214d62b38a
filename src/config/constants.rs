//! # Spindle Format and Addressing Constants
//!
//! Every constant that defines the on-disk text formats or the reserved
//! addressing scheme lives here. The persistence layer, the allocator and
//! the CSV importer all import from this module rather than defining
//! their own copies.
//!
//! ## Reserved Addressing
//!
//! Platter 0 / surface 0 / track 0 carries the two bookkeeping sectors:
//!
//! ```text
//! Sector0.txt   schema line:   R1#<field1>#...#<fieldN>
//! Sector1.txt   header line:   CONFIG#<platters>#<surfaces>#<tracks>#<sectors>#<capacity>#<name>
//!               one row per occupied record:
//!                              R#<id>#<platter>#<surface>#<track>#<sector>#<offset>#<length>#1
//! ```
//!
//! Both sectors are permanently excluded from record allocation.

// ============================================================================
// FIELD AND RECORD FRAMING
// ============================================================================

/// Separator between fields inside a record and inside bookkeeping lines.
pub const FIELD_SEPARATOR: char = '#';

/// Separator replaced by [`FIELD_SEPARATOR`] during CSV import.
pub const CSV_SEPARATOR: char = ',';

/// Terminator appended to every stored record. A record's persisted
/// length always includes this byte.
pub const RECORD_TERMINATOR: u8 = b'\n';

// ============================================================================
// RESERVED ADDRESSING
// All bookkeeping lives on platter 0 / surface 0 / track 0
// ============================================================================

/// Platter holding the reserved sectors.
pub const RESERVED_PLATTER: usize = 0;

/// Surface holding the reserved sectors.
pub const RESERVED_SURFACE: usize = 0;

/// Track holding the reserved sectors.
pub const RESERVED_TRACK: usize = 0;

/// Sector index of the schema sector.
pub const SCHEMA_SECTOR: usize = 0;

/// Sector index of the directory sector.
pub const DIRECTORY_SECTOR: usize = 1;

/// Number of reserved sectors on the reserved track. Every geometry must
/// provide at least this many sectors per track.
pub const RESERVED_SECTOR_COUNT: usize = 2;

const _: () = assert!(
    SCHEMA_SECTOR != DIRECTORY_SECTOR,
    "schema and directory sectors must be distinct"
);

const _: () = assert!(
    SCHEMA_SECTOR < RESERVED_SECTOR_COUNT && DIRECTORY_SECTOR < RESERVED_SECTOR_COUNT,
    "reserved sector indices must be covered by RESERVED_SECTOR_COUNT"
);

// ============================================================================
// LINE TAGS AND FIELD COUNTS
// ============================================================================

/// Tag of the geometry header line in the directory sector.
pub const CONFIG_TAG: &str = "CONFIG";

/// Tag of a directory row.
pub const RECORD_TAG: &str = "R";

/// Tag of the schema line in the schema sector.
pub const SCHEMA_TAG: &str = "R1";

/// Fields in the header line: tag, five geometry counts, disk name.
pub const CONFIG_FIELD_COUNT: usize = 7;

/// Fields in a directory row: tag, id, four address indices, offset,
/// length, occupied flag.
pub const RECORD_FIELD_COUNT: usize = 9;
