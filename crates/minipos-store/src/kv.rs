//! # Key-Value Backends
//!
//! The store persists each collection as one JSON document under a string
//! key. The backend behind those keys is opaque: anything that can get and
//! put strings works.
//!
//! ## Backends
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        KvStore Implementations                          │
//! │                                                                         │
//! │  MemoryKv                          FileKv                               │
//! │  ├── HashMap<String, String>       ├── One file per key: <key>.json     │
//! │  ├── No durability                 ├── Write temp file, then rename     │
//! │  └── Tests, previews               └── Production data directory        │
//! │                                                                         │
//! │  Keys in use: "products", "receipts", "clients", "debts"               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Whole-collection writes keep the backend trivial; at single-terminal
//! scale (hundreds of products, thousands of receipts) serializing the full
//! collection per mutation is well under a millisecond.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use crate::error::{StoreError, StoreResult};

/// Opaque string-keyed storage for serialized collections.
///
/// `get` returns `None` for a key that has never been written - callers
/// treat that as an empty collection, so first launch needs no setup step.
pub trait KvStore: Send {
    /// Reads the document stored under `key`, if any.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Writes (or replaces) the document under `key`.
    fn put(&mut self, key: &str, value: &str) -> StoreResult<()>;
}

// =============================================================================
// MemoryKv
// =============================================================================

/// In-memory backend. State is lost on drop; used in tests.
#[derive(Debug, Default)]
pub struct MemoryKv {
    entries: HashMap<String, String>,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryKv {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// =============================================================================
// FileKv
// =============================================================================

/// File-backed store: one `<key>.json` file per collection inside a data
/// directory.
///
/// Writes go to a temp file in the same directory followed by a rename, so
/// a crash mid-write leaves the previous document intact rather than a
/// truncated one.
#[derive(Debug)]
pub struct FileKv {
    dir: PathBuf,
}

impl FileKv {
    /// Opens (creating if needed) a data directory.
    pub fn open(dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(FileKv { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KvStore for FileKv {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StoreError::Persistence(format!(
                "reading {}: {}",
                path.display(),
                err
            ))),
        }
    }

    fn put(&mut self, key: &str, value: &str) -> StoreResult<()> {
        let path = self.path_for(key);
        let tmp = self.dir.join(format!("{}.json.tmp", key));
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
