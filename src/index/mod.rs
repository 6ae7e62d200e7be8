//! Index Module
//!
//! Persisted mapping from key to the byte range of its latest record.
//!
//! ## Responsibilities
//! - Load the whole mapping from disk
//! - Merge a new range and rewrite the whole mapping
//! - Reject ranges that cannot address a record
//!
//! ## File Format
//! A single JSON object, keys in sorted order, each value a half-open range
//! `[Location, Max)` into the log:
//! ```text
//! {"key":{"Location":18,"Max":47},"username":{"Location":0,"Max":18}}
//! ```
//! The file is rewritten in place on every save. An empty file is an empty
//! index.

mod store;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub use store::IndexStore;

/// Full in-memory image of the index.
///
/// A `BTreeMap` so serialization order is the sorted key order.
pub type Index = BTreeMap<String, IndexEntry>;

/// Byte range `[location, end)` of one record in the log
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    /// Log length before the record was appended
    #[serde(rename = "Location", alias = "location")]
    pub location: u64,

    /// `location` plus the number of bytes appended
    #[serde(rename = "Max", alias = "max")]
    pub end: u64,
}

impl IndexEntry {
    pub fn new(location: u64, end: u64) -> Self {
        Self { location, end }
    }

    /// Number of bytes covered by the range
    pub fn len(&self) -> u64 {
        self.end.saturating_sub(self.location)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
