//! Log Store
//!
//! Owns the log file handle and performs raw appends and ranged reads.

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use crate::error::{KeyDbError, Result};

/// Outcome of a successful append
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppendResult {
    /// Bytes written by this append
    pub written: u64,
    /// Physical end of the log after the append
    pub end: u64,
}

/// Append-only log file
pub struct LogStore {
    /// Underlying file handle (read + write)
    file: File,
}

impl LogStore {
    /// Open or create a log file at `path`
    pub fn open(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(path)?;

        Ok(Self { file })
    }

    /// Wrap an already-open file handle.
    ///
    /// The handle must be readable and writable. Appends always seek to the
    /// physical end first, so the handle does not need to be in append mode.
    pub fn from_file(file: File) -> Self {
        Self { file }
    }

    /// Append `bytes` at the physical end of the log.
    ///
    /// On error nothing is known about how much reached the file; callers
    /// must not index the record.
    pub fn append(&mut self, bytes: &[u8]) -> Result<AppendResult> {
        self.file.seek(SeekFrom::End(0))?;
        self.file.write_all(bytes)?;
        let end = self.file.stream_position()?;

        tracing::debug!(written = bytes.len(), end, "log append");

        Ok(AppendResult {
            written: bytes.len() as u64,
            end,
        })
    }

    /// Read exactly `len` bytes starting at `offset`.
    ///
    /// Fails with `ReadPastEnd` if the span extends beyond the physical end
    /// of the file.
    pub fn read_range(&mut self, offset: u64, len: u64) -> Result<Vec<u8>> {
        let log_len = self.physical_len()?;
        let past_end = offset
            .checked_add(len)
            .map_or(true, |stop| stop > log_len);
        if past_end {
            return Err(KeyDbError::ReadPastEnd {
                offset,
                len,
                log_len,
            });
        }

        let mut buf = vec![0u8; len as usize];
        if len > 0 {
            self.file.seek(SeekFrom::Start(offset))?;
            self.file.read_exact(&mut buf)?;
        }
        Ok(buf)
    }

    /// Reset the log to zero length.
    ///
    /// Does not touch any length cached by the caller.
    pub fn truncate(&mut self) -> Result<()> {
        self.file.set_len(0)?;
        self.file.seek(SeekFrom::Start(0))?;
        Ok(())
    }

    /// Current size of the file on disk
    pub fn physical_len(&self) -> Result<u64> {
        Ok(self.file.metadata()?.len())
    }

    /// Force sync to disk
    pub fn sync(&mut self) -> Result<()> {
        self.file.sync_all()?;
        Ok(())
    }

    /// Sync and release the file handle
    pub fn close(self) -> Result<()> {
        self.file.sync_all()?;
        Ok(())
    }
}
