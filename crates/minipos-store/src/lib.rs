//! # MiniPOS Store
//!
//! Persistence layer for MiniPOS. Owns all durable state and the rules that
//! need the full collection view to enforce.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        minipos-store                                    │
//! │                                                                         │
//! │   ┌──────────────────────────────────────────────────────────────┐     │
//! │   │                      DomainStore                              │     │
//! │   │   catalog · receipt history · clients · debt ledgers          │     │
//! │   │   (validation → policy check → persist staged copy → swap)    │     │
//! │   └──────────────────────┬───────────────────────────────────────┘     │
//! │                          │                                              │
//! │                          ▼                                              │
//! │   ┌──────────────────────────────────────────────────────────────┐     │
//! │   │                   KvStore (trait)                             │     │
//! │   │   get/put JSON documents under string keys                    │     │
//! │   │   ├── MemoryKv   in-memory, for tests                         │     │
//! │   │   └── FileKv     one <key>.json per collection, atomic swap   │     │
//! │   └──────────────────────────────────────────────────────────────┘     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. One enforcement point: every mutation goes through `DomainStore`
//! 2. The backend is opaque - the store never knows about files
//! 3. Lookup misses are typed errors, never silent no-ops
//! 4. Behavioral forks (double cancel, duplicate barcodes, negative debt)
//!    are [`StorePolicy`] flags with strict defaults

pub mod error;
pub mod kv;
pub mod policy;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use kv::{FileKv, KvStore, MemoryKv};
pub use policy::StorePolicy;
pub use store::DomainStore;
