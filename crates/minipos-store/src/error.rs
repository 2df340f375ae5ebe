//! # Store Error Types
//!
//! Error types for persistence and store-level rule enforcement.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  I/O or JSON error (std::io / serde_json)                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds context and categorization            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (app layer) ← Serialized for the frontend                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Frontend displays user-friendly message                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use minipos_core::error::ValidationError;

/// Store operation errors.
///
/// Cover lookup misses, policy rejections, and persistence failures.
/// Lookup misses are explicit errors rather than silent no-ops so a stale
/// frontend id surfaces immediately instead of being swallowed.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Entity not found in a collection.
    ///
    /// ## When This Occurs
    /// - Product/receipt/client id does not exist
    /// - Paying a debt for a client with no ledger
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Unique constraint violation.
    ///
    /// ## When This Occurs
    /// - Registering a product with a barcode another product already has
    ///   (only when the policy enforces barcode uniqueness)
    #[error("Duplicate {field}: '{value}' already exists")]
    UniqueViolation { field: String, value: String },

    /// Cancelling a receipt that is already cancelled.
    ///
    /// The original reason is preserved either way; whether this is an
    /// error or a no-op is a [`StorePolicy`](crate::policy::StorePolicy)
    /// decision.
    #[error("Receipt {number} is already cancelled")]
    AlreadyCancelled { number: String },

    /// Input validation failure (wraps the core validators).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Backing storage read or write failed.
    ///
    /// ## When This Occurs
    /// - Data directory not writable
    /// - Disk full
    #[error("Persistence failed: {0}")]
    Persistence(String),

    /// Stored data could not be decoded.
    ///
    /// ## When This Occurs
    /// - Hand-edited or truncated JSON file
    /// - Collection written by an incompatible version
    #[error("Corrupt data in collection '{collection}': {message}")]
    Corrupt { collection: String, message: String },
}

impl StoreError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Creates a UniqueViolation error.
    pub fn duplicate(field: impl Into<String>, value: impl Into<String>) -> Self {
        StoreError::UniqueViolation {
            field: field.into(),
            value: value.into(),
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Persistence(err.to_string())
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
