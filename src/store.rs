//! Store Module
//!
//! The facade that composes the log and the index into a key-value store.
//!
//! ## Responsibilities
//! - Encode records and append them to the log
//! - Record each append's byte range in the index
//! - Track the log length in memory
//! - Serialize writers so offsets and index updates never interleave

use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

use crate::config::Config;
use crate::error::Result;
use crate::index::{Index, IndexEntry, IndexStore};
use crate::log::LogStore;
use crate::record;

/// Log + index key-value store
///
/// ## Concurrency Model
///
/// - **Writes** (write/flush): Serialized by `write_lock`
///   - Only ONE write operation at a time
///   - Offset computation, append, index save and length update happen
///     under the same guard
///
/// - **Reads**: Take the index and log locks briefly, no `write_lock`
///   - A read sees the index either before or after a concurrent save;
///     both images only reference bytes already in the log
///
/// Multiple processes sharing the same files are not supported.
pub struct Store {
    /// Store configuration
    config: Config,

    /// Append-only record log
    log: Mutex<LogStore>,

    /// Persisted key → range mapping
    index: Mutex<IndexStore>,

    /// In-memory mirror of the log length, captured at construction and
    /// advanced by each append
    log_length: AtomicU64,

    /// Serializes write operations (write/flush)
    write_lock: Mutex<()>,
}

impl Store {
    /// Build a store over already-open log and index handles.
    ///
    /// The log length is read from the log file once, here.
    pub fn new(log: LogStore, index: IndexStore, config: Config) -> Result<Self> {
        let log_length = log.physical_len()?;

        tracing::debug!(log_length, "store opened");

        Ok(Self {
            config,
            log: Mutex::new(log),
            index: Mutex::new(index),
            log_length: AtomicU64::new(log_length),
            write_lock: Mutex::new(()),
        })
    }

    /// Open or create the files named by `config`
    pub fn open(config: Config) -> Result<Self> {
        config.validate()?;

        for path in [&config.log_path, &config.index_path] {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
        }

        let log = LogStore::open(&config.log_path)?;
        let index = IndexStore::open(&config.index_path)?;
        Self::new(log, index, config)
    }

    /// Open with a directory (convenience method)
    ///
    /// Uses default config with both files placed in `dir`
    pub fn open_dir(dir: &Path) -> Result<Self> {
        Self::open(Config::builder().data_dir(dir).build())
    }

    /// Write a key-value pair
    ///
    /// Steps:
    /// 1. Encode `key:value`
    /// 2. Append to the log; if that fails return `Ok(false)` with nothing changed
    /// 3. Compute `[log_length, log_length + written)`
    /// 4. Load the index, set the key's range, save the index
    /// 5. Advance `log_length`
    ///
    /// Index failures are returned as errors rather than `Ok(false)`.
    pub fn write(&self, key: &str, value: &str) -> Result<bool> {
        let _write_guard = self.write_lock.lock();

        let encoded = record::encode(key, value);
        let location = self.log_length.load(Ordering::SeqCst);

        let appended = match self.log.lock().append(&encoded) {
            Ok(appended) => appended,
            Err(e) => {
                tracing::error!(key, error = %e, "could not append record to log");
                return Ok(false);
            }
        };

        let entry = IndexEntry::new(location, location + appended.written);
        if entry.end != appended.end {
            tracing::warn!(
                key,
                location = entry.location,
                end = entry.end,
                physical_end = appended.end,
                "indexed range does not match the physical log"
            );
        }

        let indexed = self.index.lock().insert(key, entry);

        // The bytes are in the log whether or not the index save worked.
        self.log_length.fetch_add(appended.written, Ordering::SeqCst);
        indexed?;

        if self.config.sync_on_write {
            self.log.lock().sync()?;
        }

        Ok(true)
    }

    /// Read the value stored for `key`
    ///
    /// A key that was never written reads as the empty string. A value that
    /// contained `':'` comes back as its final `':'`-separated segment.
    pub fn read(&self, key: &str) -> Result<String> {
        let entry = self.lookup(key)?.unwrap_or_default();
        let bytes = self.log.lock().read_range(entry.location, entry.len())?;

        tracing::debug!(key, location = entry.location, end = entry.end, "read");

        Ok(record::decode_value(&bytes))
    }

    /// Get the indexed range for `key`, if any
    pub fn lookup(&self, key: &str) -> Result<Option<IndexEntry>> {
        Ok(self.snapshot()?.get(key).copied())
    }

    /// Whether the index has an entry for `key`
    pub fn contains_key(&self, key: &str) -> Result<bool> {
        Ok(self.lookup(key)?.is_some())
    }

    /// All indexed keys, in sorted order
    pub fn keys(&self) -> Result<Vec<String>> {
        Ok(self.snapshot()?.into_keys().collect())
    }

    /// Load a copy of the whole index
    pub fn snapshot(&self) -> Result<Index> {
        self.index.lock().load()
    }

    /// Truncate both the log and the index to zero length.
    ///
    /// Unless `reset_length_on_flush` is set, the cached log length keeps its
    /// pre-flush value and later writes index ranges beyond the physical end.
    pub fn flush(&self) -> Result<()> {
        let _write_guard = self.write_lock.lock();

        self.log.lock().truncate()?;
        self.index.lock().truncate()?;

        if self.config.reset_length_on_flush {
            self.log_length.store(0, Ordering::SeqCst);
        } else {
            let stale = self.log_length.load(Ordering::SeqCst);
            if stale != 0 {
                tracing::warn!(log_length = stale, "flushed store keeps stale log length");
            }
        }

        Ok(())
    }

    /// Close the store
    ///
    /// Releases the index, then the log. Both are always released; the first
    /// failure is returned.
    pub fn close(self) -> Result<()> {
        let index_closed = self.index.into_inner().close();
        let log_closed = self.log.into_inner().close();

        if let Err(e) = &index_closed {
            tracing::error!(error = %e, "failed to close index");
        }
        if let Err(e) = &log_closed {
            tracing::error!(error = %e, "failed to close log");
        }

        index_closed.and(log_closed)
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    /// Get the in-memory log length
    pub fn log_length(&self) -> u64 {
        self.log_length.load(Ordering::SeqCst)
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
