//! # Geometry and Addressing
//!
//! Defines the fixed geometry of a disk, the 4-tuple sector address, and
//! the `CONFIG` header line that persists both alongside the directory.
//!
//! A `SectorAddress` maps to its backing file path without any lookup:
//! `<base>/P<platter>/S<surface>/Track<track>/Sector<sector>.txt`.

use std::fmt;
use std::path::{Path, PathBuf};

use eyre::{ensure, Result, WrapErr};

use crate::config::{
    CONFIG_FIELD_COUNT, CONFIG_TAG, DIRECTORY_SECTOR, FIELD_SEPARATOR, RESERVED_PLATTER,
    RESERVED_SECTOR_COUNT, RESERVED_SURFACE, RESERVED_TRACK, SCHEMA_SECTOR,
};

/// Fixed geometry of a disk. All counts are set at construction and never
/// change for the disk's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub platters: usize,
    pub surfaces_per_platter: usize,
    pub tracks_per_surface: usize,
    pub sectors_per_track: usize,
    /// Maximum size in bytes of every sector's backing file.
    pub sector_capacity: u64,
}

impl Geometry {
    pub fn validate(&self) -> Result<()> {
        ensure!(self.platters > 0, "geometry must have at least one platter");
        ensure!(
            self.surfaces_per_platter > 0,
            "geometry must have at least one surface per platter"
        );
        ensure!(
            self.tracks_per_surface > 0,
            "geometry must have at least one track per surface"
        );
        ensure!(
            self.sectors_per_track >= RESERVED_SECTOR_COUNT,
            "geometry must have at least {} sectors per track to hold the reserved sectors",
            RESERVED_SECTOR_COUNT
        );
        ensure!(self.sector_capacity > 0, "sector capacity must be positive");
        Ok(())
    }

    pub fn total_sectors(&self) -> usize {
        self.platters * self.surfaces_per_platter * self.tracks_per_surface * self.sectors_per_track
    }

    /// True when the address lies within this geometry.
    pub fn contains(&self, address: SectorAddress) -> bool {
        address.platter < self.platters
            && address.surface < self.surfaces_per_platter
            && address.track < self.tracks_per_surface
            && address.sector < self.sectors_per_track
    }

    /// Every address of the geometry in platter/surface/track/sector order.
    pub fn addresses(self) -> impl Iterator<Item = SectorAddress> {
        (0..self.platters).flat_map(move |platter| {
            (0..self.surfaces_per_platter).flat_map(move |surface| {
                (0..self.tracks_per_surface).flat_map(move |track| {
                    (0..self.sectors_per_track)
                        .map(move |sector| SectorAddress::new(platter, surface, track, sector))
                })
            })
        })
    }
}

/// Physical address of one sector: platter, surface, track and sector
/// index within the track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SectorAddress {
    pub platter: usize,
    pub surface: usize,
    pub track: usize,
    pub sector: usize,
}

impl SectorAddress {
    /// Address of the reserved schema sector.
    pub const SCHEMA: SectorAddress = SectorAddress {
        platter: RESERVED_PLATTER,
        surface: RESERVED_SURFACE,
        track: RESERVED_TRACK,
        sector: SCHEMA_SECTOR,
    };

    /// Address of the reserved directory sector.
    pub const DIRECTORY: SectorAddress = SectorAddress {
        platter: RESERVED_PLATTER,
        surface: RESERVED_SURFACE,
        track: RESERVED_TRACK,
        sector: DIRECTORY_SECTOR,
    };

    pub fn new(platter: usize, surface: usize, track: usize, sector: usize) -> Self {
        Self {
            platter,
            surface,
            track,
            sector,
        }
    }

    /// True for the two bookkeeping sectors excluded from allocation.
    pub fn is_reserved(&self) -> bool {
        self.platter == RESERVED_PLATTER
            && self.surface == RESERVED_SURFACE
            && self.track == RESERVED_TRACK
            && (self.sector == SCHEMA_SECTOR || self.sector == DIRECTORY_SECTOR)
    }

    /// Directory holding this address's track.
    pub fn track_dir(&self, base: &Path) -> PathBuf {
        base.join(format!("P{}", self.platter))
            .join(format!("S{}", self.surface))
            .join(format!("Track{}", self.track))
    }

    /// Backing file of this address's sector.
    pub fn sector_file(&self, base: &Path) -> PathBuf {
        self.track_dir(base).join(format!("Sector{}.txt", self.sector))
    }
}

impl fmt::Display for SectorAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "P{}/S{}/T{}/Sec{}",
            self.platter, self.surface, self.track, self.sector
        )
    }
}

/// Geometry plus disk name, as persisted in the directory sector's
/// `CONFIG` header line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiskConfig {
    pub geometry: Geometry,
    pub name: String,
}

impl DiskConfig {
    pub fn header_line(&self) -> String {
        let g = &self.geometry;
        format!(
            "{}{sep}{}{sep}{}{sep}{}{sep}{}{sep}{}{sep}{}",
            CONFIG_TAG,
            g.platters,
            g.surfaces_per_platter,
            g.tracks_per_surface,
            g.sectors_per_track,
            g.sector_capacity,
            self.name,
            sep = FIELD_SEPARATOR
        )
    }

    /// Parses the header line written by [`DiskConfig::header_line`].
    ///
    /// Fails when the tag is not `CONFIG` or fewer than seven fields are
    /// present; a disk cannot be loaded from a malformed header.
    pub fn parse_header(line: &str) -> Result<Self> {
        let fields: Vec<&str> = line.trim_end().split(FIELD_SEPARATOR).collect();
        ensure!(
            fields.len() >= CONFIG_FIELD_COUNT,
            "disk header has {} fields, expected at least {}: '{}'",
            fields.len(),
            CONFIG_FIELD_COUNT,
            line
        );
        ensure!(
            fields[0] == CONFIG_TAG,
            "disk header tag '{}' is not '{}'",
            fields[0],
            CONFIG_TAG
        );

        let geometry = Geometry {
            platters: parse_count(fields[1], "platter count")?,
            surfaces_per_platter: parse_count(fields[2], "surface count")?,
            tracks_per_surface: parse_count(fields[3], "track count")?,
            sectors_per_track: parse_count(fields[4], "sector count")?,
            sector_capacity: fields[5]
                .parse()
                .wrap_err_with(|| format!("invalid sector capacity '{}' in disk header", fields[5]))?,
        };

        Ok(Self {
            geometry,
            name: fields[6].to_string(),
        })
    }
}

fn parse_count(field: &str, what: &str) -> Result<usize> {
    field
        .parse()
        .wrap_err_with(|| format!("invalid {} '{}' in disk header", what, field))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry() -> Geometry {
        Geometry {
            platters: 2,
            surfaces_per_platter: 2,
            tracks_per_surface: 4,
            sectors_per_track: 8,
            sector_capacity: 512,
        }
    }

    #[test]
    fn sector_path_is_deterministic() {
        let addr = SectorAddress::new(1, 0, 3, 7);
        let path = addr.sector_file(Path::new("/tmp/demo"));
        assert_eq!(path, PathBuf::from("/tmp/demo/P1/S0/Track3/Sector7.txt"));
    }

    #[test]
    fn only_the_two_bookkeeping_sectors_are_reserved() {
        assert!(SectorAddress::SCHEMA.is_reserved());
        assert!(SectorAddress::DIRECTORY.is_reserved());
        assert!(!SectorAddress::new(0, 0, 0, 2).is_reserved());
        assert!(!SectorAddress::new(0, 0, 1, 0).is_reserved());
        assert!(!SectorAddress::new(1, 0, 0, 0).is_reserved());
    }

    #[test]
    fn header_round_trip() {
        let config = DiskConfig {
            geometry: geometry(),
            name: "demo".to_string(),
        };
        let line = config.header_line();
        assert_eq!(line, "CONFIG#2#2#4#8#512#demo");
        assert_eq!(DiskConfig::parse_header(&line).unwrap(), config);
    }

    #[test]
    fn header_with_wrong_tag_is_rejected() {
        assert!(DiskConfig::parse_header("BOGUS#2#2#4#8#512#demo").is_err());
    }

    #[test]
    fn header_with_missing_fields_is_rejected() {
        assert!(DiskConfig::parse_header("CONFIG#2#2#4#8#512").is_err());
    }

    #[test]
    fn header_with_non_numeric_count_is_rejected() {
        assert!(DiskConfig::parse_header("CONFIG#two#2#4#8#512#demo").is_err());
    }

    #[test]
    fn geometry_requires_room_for_reserved_sectors() {
        let mut g = geometry();
        g.sectors_per_track = 1;
        assert!(g.validate().is_err());
        g.sectors_per_track = 2;
        assert!(g.validate().is_ok());
    }

    #[test]
    fn addresses_cover_the_full_geometry_in_order() {
        let g = Geometry {
            platters: 1,
            surfaces_per_platter: 1,
            tracks_per_surface: 2,
            sectors_per_track: 2,
            sector_capacity: 64,
        };
        let all: Vec<SectorAddress> = g.addresses().collect();
        assert_eq!(all.len(), g.total_sectors());
        assert_eq!(all[0], SectorAddress::new(0, 0, 0, 0));
        assert_eq!(all[3], SectorAddress::new(0, 0, 1, 1));
    }
}
