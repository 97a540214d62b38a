//! # Cylindrical Free-Space Search
//!
//! Finds the first sector with enough remaining capacity for a record,
//! visiting addresses in cylinder order: for a fixed track index, every
//! surface of the current platter is tried before the head moves to the
//! next track index. Same-track addresses across the surfaces of one
//! platter form a cylinder and need no seek, so filling a cylinder before
//! moving on approximates zero seek cost.
//!
//! The search resumes from the cursor left by the last successful
//! placement. Each of the platter, track and surface loops is
//! offset-wrapped from the cursor; the sector scan starts from the
//! cursor's sector index only while both the track offset and the surface
//! offset are zero, and from index 0 everywhere else. Reserved addresses
//! are skipped unconditionally.

use log::debug;

use super::Disk;
use crate::storage::SectorAddress;

/// Last successful placement; the next search resumes here.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct AllocationCursor {
    pub platter: usize,
    pub surface: usize,
    pub track: usize,
    pub sector: usize,
}

/// A sector with room for the requested bytes, and the offset at which
/// they will land (the sector's size before the write).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub address: SectorAddress,
    pub offset: u64,
}

impl Disk {
    /// Finds the first address with at least `required` free bytes, in
    /// cylinder order from the cursor. Updates the cursor on success;
    /// mutates nothing on failure.
    pub(crate) fn find_free_slot(&mut self, required: u64) -> Option<Placement> {
        let geometry = *self.geometry();
        let start = self.cursor();

        for platter_offset in 0..geometry.platters {
            let platter = (start.platter + platter_offset) % geometry.platters;

            for track_offset in 0..geometry.tracks_per_surface {
                let track = (start.track + track_offset) % geometry.tracks_per_surface;

                for surface_offset in 0..geometry.surfaces_per_platter {
                    let surface = (start.surface + surface_offset) % geometry.surfaces_per_platter;

                    // The cursor's sector index only applies to the
                    // track/surface pair the cursor points at; every other
                    // pair scans its track from sector 0.
                    let first_sector = if track_offset == 0 && surface_offset == 0 {
                        start.sector
                    } else {
                        0
                    };

                    for sector_offset in 0..geometry.sectors_per_track {
                        let sector = (first_sector + sector_offset) % geometry.sectors_per_track;
                        let address = SectorAddress::new(platter, surface, track, sector);
                        if address.is_reserved() {
                            continue;
                        }

                        let occupied = self.sector(address).size();
                        if occupied + required <= geometry.sector_capacity {
                            self.set_cursor(AllocationCursor {
                                platter,
                                surface,
                                track,
                                sector,
                            });
                            debug!(
                                "allocated {} bytes at {} offset {}",
                                required, address, occupied
                            );
                            return Some(Placement {
                                address,
                                offset: occupied,
                            });
                        }
                    }
                }
            }
        }

        debug!("no sector with {} free bytes", required);
        None
    }
}
