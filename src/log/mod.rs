//! Log Module
//!
//! Append-only byte storage with direct offset addressing.
//!
//! ## Responsibilities
//! - Append encoded records at the physical end of the file
//! - Read an exact byte span back by offset
//! - Truncate the whole log on flush
//!
//! ## File Format
//! ```text
//! ┌──────────────────┬───────────────┬──────────────────┬─────
//! │ key1:value1      │ key2:value2   │ key1:value1b     │ ...
//! └──────────────────┴───────────────┴──────────────────┴─────
//! ```
//! No separators, no checksums, no framing. Superseded records stay in place
//! as dead space; only the index knows where a record starts and ends.

mod store;

pub use store::{AppendResult, LogStore};
