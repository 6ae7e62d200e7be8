//! Index Store
//!
//! Loads and saves the index as one JSON document. Every save truncates the
//! file and writes the complete image; there is no temp file and no rename,
//! so an interrupted save leaves a damaged index behind.

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use crate::error::{KeyDbError, Result};

use super::{Index, IndexEntry};

/// JSON index file
pub struct IndexStore {
    /// Underlying file handle (read + write, not append)
    file: File,
}

impl IndexStore {
    /// Open or create an index file at `path`
    pub fn open(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(path)?;

        Ok(Self { file })
    }

    /// Wrap an already-open, readable and writable file handle
    pub fn from_file(file: File) -> Self {
        Self { file }
    }

    /// Load the entire index.
    ///
    /// An empty (or whitespace-only) file yields an empty index.
    pub fn load(&mut self) -> Result<Index> {
        let mut data = Vec::new();
        self.file
            .seek(SeekFrom::Start(0))
            .and_then(|_| self.file.read_to_end(&mut data))
            .map_err(|e| KeyDbError::IndexUnreadable(e.to_string()))?;

        if data.iter().all(u8::is_ascii_whitespace) {
            return Ok(Index::new());
        }

        let index: Index = serde_json::from_slice(&data)
            .map_err(|e| KeyDbError::IndexCorrupt(e.to_string()))?;

        for (key, entry) in &index {
            if entry.end < entry.location {
                return Err(KeyDbError::InvalidRange {
                    key: key.clone(),
                    location: entry.location,
                    end: entry.end,
                });
            }
        }

        Ok(index)
    }

    /// Overwrite the file with the complete `index` image
    pub fn save(&mut self, index: &Index) -> Result<()> {
        let bytes =
            serde_json::to_vec(index).map_err(|e| KeyDbError::Serialization(e.to_string()))?;

        self.file.set_len(0)?;
        self.file.seek(SeekFrom::Start(0))?;
        self.file.write_all(&bytes)?;
        self.file.flush()?;

        tracing::debug!(keys = index.len(), bytes = bytes.len(), "index saved");
        Ok(())
    }

    /// Load, set `key` to `entry`, and save.
    ///
    /// Returns the image that was written.
    pub fn insert(&mut self, key: &str, entry: IndexEntry) -> Result<Index> {
        let mut index = self.load()?;
        index.insert(key.to_string(), entry);
        self.save(&index)?;
        Ok(index)
    }

    /// Reset the index file to zero length
    pub fn truncate(&mut self) -> Result<()> {
        self.file.set_len(0)?;
        self.file.seek(SeekFrom::Start(0))?;
        Ok(())
    }

    /// Sync and release the file handle
    pub fn close(self) -> Result<()> {
        self.file.sync_all()?;
        Ok(())
    }
}
