//! Tests for LogStore
//!
//! These tests verify:
//! - Appends land at the physical end and report the new end
//! - Ranged reads return exact spans
//! - Reading past the end is an error
//! - Truncation resets the file
//! - Wrapping an existing handle

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use keydb::log::{AppendResult, LogStore};
use keydb::KeyDbError;
use tempfile::{NamedTempFile, TempDir};

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_temp_log() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("logs");
    (temp_dir, log_path)
}

// =============================================================================
// Open Tests
// =============================================================================

#[test]
fn test_open_creates_file() {
    let (_temp, log_path) = setup_temp_log();

    let log = LogStore::open(&log_path).unwrap();

    assert!(log_path.exists());
    assert_eq!(log.physical_len().unwrap(), 0);
}

#[test]
fn test_open_existing_file_keeps_contents() {
    let (_temp, log_path) = setup_temp_log();
    fs::write(&log_path, b"username:phirmware").unwrap();

    let log = LogStore::open(&log_path).unwrap();

    assert_eq!(log.physical_len().unwrap(), 18);
}

// =============================================================================
// Append Tests
// =============================================================================

#[test]
fn test_append_reports_written_and_end() {
    let (_temp, log_path) = setup_temp_log();
    let mut log = LogStore::open(&log_path).unwrap();

    let first = log.append(b"a:1").unwrap();
    let second = log.append(b"bb:22").unwrap();

    assert_eq!(first, AppendResult { written: 3, end: 3 });
    assert_eq!(second, AppendResult { written: 5, end: 8 });
    assert_eq!(fs::read(&log_path).unwrap(), b"a:1bb:22");
}

#[test]
fn test_append_after_existing_contents() {
    let (_temp, log_path) = setup_temp_log();
    fs::write(&log_path, b"key:value").unwrap();
    let mut log = LogStore::open(&log_path).unwrap();

    let appended = log.append(b"x:y").unwrap();

    assert_eq!(appended.end, 12);
    assert_eq!(fs::read(&log_path).unwrap(), b"key:valuex:y");
}

#[test]
fn test_append_to_read_only_handle_fails() {
    let (_temp, log_path) = setup_temp_log();
    fs::write(&log_path, b"").unwrap();
    let file = OpenOptions::new().read(true).open(&log_path).unwrap();
    let mut log = LogStore::from_file(file);

    let result = log.append(b"k:v");

    assert!(matches!(result, Err(KeyDbError::Io(_))));
}

// =============================================================================
// Read Tests
// =============================================================================

#[test]
fn test_read_range_exact_span() {
    let (_temp, log_path) = setup_temp_log();
    let mut log = LogStore::open(&log_path).unwrap();
    log.append(b"a:1").unwrap();
    log.append(b"bb:22").unwrap();

    assert_eq!(log.read_range(0, 3).unwrap(), b"a:1");
    assert_eq!(log.read_range(3, 5).unwrap(), b"bb:22");
    assert_eq!(log.read_range(4, 2).unwrap(), b"b:");
}

#[test]
fn test_read_zero_length() {
    let (_temp, log_path) = setup_temp_log();
    let mut log = LogStore::open(&log_path).unwrap();

    assert!(log.read_range(0, 0).unwrap().is_empty());
}

#[test]
fn test_read_past_end_is_error() {
    let (_temp, log_path) = setup_temp_log();
    let mut log = LogStore::open(&log_path).unwrap();
    log.append(b"a:1").unwrap();

    let result = log.read_range(2, 5);

    match result {
        Err(KeyDbError::ReadPastEnd { offset, len, log_len }) => {
            assert_eq!((offset, len, log_len), (2, 5, 3));
        }
        other => panic!("expected ReadPastEnd, got {:?}", other),
    }
}

#[test]
fn test_read_offset_overflow_is_error() {
    let (_temp, log_path) = setup_temp_log();
    let mut log = LogStore::open(&log_path).unwrap();

    let result = log.read_range(u64::MAX, 2);

    assert!(matches!(result, Err(KeyDbError::ReadPastEnd { .. })));
}

// =============================================================================
// Truncate Tests
// =============================================================================

#[test]
fn test_truncate_empties_file() {
    let (_temp, log_path) = setup_temp_log();
    let mut log = LogStore::open(&log_path).unwrap();
    log.append(b"a:1").unwrap();

    log.truncate().unwrap();

    assert_eq!(log.physical_len().unwrap(), 0);
    assert_eq!(fs::metadata(&log_path).unwrap().len(), 0);
}

#[test]
fn test_append_after_truncate_starts_at_zero() {
    let (_temp, log_path) = setup_temp_log();
    let mut log = LogStore::open(&log_path).unwrap();
    log.append(b"a:1").unwrap();
    log.truncate().unwrap();

    let appended = log.append(b"b:2").unwrap();

    assert_eq!(appended.end, 3);
    assert_eq!(fs::read(&log_path).unwrap(), b"b:2");
}

// =============================================================================
// Handle Tests
// =============================================================================

#[test]
fn test_from_file_non_append_handle_appends_at_end() {
    let mut temp = NamedTempFile::new().unwrap();
    temp.write_all(b"username:phirmware").unwrap();
    temp.flush().unwrap();

    let mut log = LogStore::from_file(temp.reopen().unwrap());
    let appended = log.append(b"k:v").unwrap();

    assert_eq!(appended, AppendResult { written: 3, end: 21 });
    assert_eq!(log.read_range(18, 3).unwrap(), b"k:v");
}

#[test]
fn test_close_syncs() {
    let (_temp, log_path) = setup_temp_log();
    let mut log = LogStore::open(&log_path).unwrap();
    log.append(b"a:1").unwrap();
    log.sync().unwrap();

    log.close().unwrap();

    assert_eq!(fs::read(&log_path).unwrap(), b"a:1");
}
