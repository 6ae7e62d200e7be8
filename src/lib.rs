//! # keydb
//!
//! A minimal embedded key-value store:
//! - Append-only log of `key:value` records
//! - JSON index mapping each key to the byte range of its latest record
//! - Single write lock serializing offset bookkeeping and index updates
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                          Store                              │
//! │        write / read / flush / close, log_length             │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │  LogStore   │          │ IndexStore  │
//!   │  (Append)   │          │ (Full JSON) │
//!   └─────────────┘          └─────────────┘
//! ```
//!
//! ```no_run
//! use keydb::{Config, Store};
//!
//! let store = Store::open(Config::default())?;
//! store.write("username", "phirmware")?;
//! assert_eq!(store.read("username")?, "phirmware");
//! store.close()?;
//! # Ok::<(), keydb::KeyDbError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod record;
pub mod log;
pub mod index;
pub mod store;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{KeyDbError, Result};
pub use config::Config;
pub use index::{Index, IndexEntry};
pub use store::Store;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of keydb
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
