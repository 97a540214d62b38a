//! # Containment Layers
//!
//! `Track`, `Surface` and `Platter` are pure containment layers over the
//! sectors: each owns the layer beneath it outright as a plain `Vec`, so
//! the whole disk forms one value-owned tree addressed by index.
//!
//! Construction is eager. Creating a platter creates every track
//! directory under it and materializes every `Sector` value for the full
//! declared geometry; backing files appear on first write.

use std::fs;
use std::path::Path;

use eyre::{Result, WrapErr};

use super::{Geometry, Sector, SectorAddress};

/// Fixed-size ordered collection of sectors sharing one directory.
#[derive(Debug)]
pub struct Track {
    sectors: Vec<Sector>,
}

impl Track {
    fn create(
        base: &Path,
        platter: usize,
        surface: usize,
        track: usize,
        geometry: &Geometry,
    ) -> Result<Self> {
        let dir = SectorAddress::new(platter, surface, track, 0).track_dir(base);
        fs::create_dir_all(&dir)
            .wrap_err_with(|| format!("failed to create track directory '{}'", dir.display()))?;

        let sectors = (0..geometry.sectors_per_track)
            .map(|sector| {
                let path = SectorAddress::new(platter, surface, track, sector).sector_file(base);
                Sector::new(path, geometry.sector_capacity)
            })
            .collect();
        Ok(Self { sectors })
    }

    pub fn sectors(&self) -> &[Sector] {
        &self.sectors
    }
}

/// Ordered collection of tracks.
#[derive(Debug)]
pub struct Surface {
    tracks: Vec<Track>,
}

impl Surface {
    fn create(base: &Path, platter: usize, surface: usize, geometry: &Geometry) -> Result<Self> {
        let tracks = (0..geometry.tracks_per_surface)
            .map(|track| Track::create(base, platter, surface, track, geometry))
            .collect::<Result<_>>()?;
        Ok(Self { tracks })
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }
}

/// Ordered collection of surfaces.
#[derive(Debug)]
pub struct Platter {
    surfaces: Vec<Surface>,
}

impl Platter {
    pub(crate) fn create(base: &Path, platter: usize, geometry: &Geometry) -> Result<Self> {
        let surfaces = (0..geometry.surfaces_per_platter)
            .map(|surface| Surface::create(base, platter, surface, geometry))
            .collect::<Result<_>>()?;
        Ok(Self { surfaces })
    }

    pub fn surfaces(&self) -> &[Surface] {
        &self.surfaces
    }
}
