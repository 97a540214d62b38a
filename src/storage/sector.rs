//! # Sector
//!
//! The atomic, fixed-capacity storage unit. A sector is backed by one
//! plain file which is opened and closed on every call; the sector holds
//! no descriptor between operations.
//!
//! A sector knows nothing about records. It appends, overwrites and reads
//! raw bytes; capacity is advisory here and enforced by the allocator,
//! which checks `size() + needed <= capacity()` before every write.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use eyre::{ensure, Result, WrapErr};

#[derive(Debug)]
pub struct Sector {
    path: PathBuf,
    capacity: u64,
}

impl Sector {
    pub(crate) fn new(path: PathBuf, capacity: u64) -> Self {
        Self { path, capacity }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Fixed maximum size in bytes. Never checked by the sector itself.
    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    /// Current size of the backing file, or 0 when it does not exist yet.
    /// Never fails.
    pub fn size(&self) -> u64 {
        fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0)
    }

    /// Appends bytes verbatim to the end of the backing file, creating it
    /// if absent. No delimiter is added.
    pub fn append(&self, bytes: &[u8]) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .wrap_err_with(|| format!("failed to open sector {} for append", self.path.display()))?;
        file.write_all(bytes)
            .wrap_err_with(|| format!("failed to append to sector {}", self.path.display()))
    }

    /// Replaces the entire backing file contents. Used only for the
    /// reserved bookkeeping sectors, never for data sectors.
    pub fn overwrite(&self, bytes: &[u8]) -> Result<()> {
        fs::write(&self.path, bytes)
            .wrap_err_with(|| format!("failed to overwrite sector {}", self.path.display()))
    }

    /// Full contents of the backing file, or the empty string when it
    /// does not exist yet.
    pub fn read_all(&self) -> Result<String> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(contents),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(String::new()),
            Err(err) => Err(err)
                .wrap_err_with(|| format!("failed to read sector {}", self.path.display())),
        }
    }

    /// Exactly `length` bytes starting at `offset`.
    ///
    /// Fails with a bounds error when the range extends past the end of
    /// the backing file; a short or padded read is never returned.
    pub fn read_range(&self, offset: u64, length: u64) -> Result<Vec<u8>> {
        let size = self.size();
        ensure!(
            offset.checked_add(length).is_some_and(|end| end <= size),
            "read of {} bytes at offset {} exceeds sector {} ({} bytes)",
            length,
            offset,
            self.path.display(),
            size
        );

        let mut file = File::open(&self.path)
            .wrap_err_with(|| format!("failed to open sector {} for read", self.path.display()))?;
        file.seek(SeekFrom::Start(offset))
            .wrap_err_with(|| format!("failed to seek in sector {}", self.path.display()))?;

        let mut buffer = vec![0u8; length as usize];
        file.read_exact(&mut buffer)
            .wrap_err_with(|| format!("failed to read from sector {}", self.path.display()))?;
        Ok(buffer)
    }
}
