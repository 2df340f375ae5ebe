//! # API Error Type
//!
//! Unified error type for the command surface.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in MiniPOS                                │
//! │                                                                         │
//! │  Frontend                    Rust Backend                               │
//! │  ────────                    ────────────                               │
//! │                                                                         │
//! │  invoke('pay_cash')                                                     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Store Error?  ──── StoreError::NotFound ──────┐                │  │
//! │  │         │                                      │                 │  │
//! │  │         ▼                                      ▼                 │  │
//! │  │  Cart Error?   ──── CoreError::EmptyCart ── ApiError ──────────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  catch (e) { e.code = "NOT_FOUND", e.message = "Product not found..." } │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;

use minipos_core::error::CoreError;
use minipos_store::StoreError;

/// API error returned from commands.
///
/// ## Serialization
/// This is what the frontend receives when a command fails:
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Product not found: p-123"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Persistence operation failed
    StorageError,

    /// Business rule violation (e.g., double cancel)
    BusinessLogic,

    /// Cart operation failed
    CartError,

    /// No cashier signed in, or bad credentials
    AuthError,

    /// Internal error
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an authentication error.
    pub fn auth(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::AuthError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts store errors to API errors.
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match &err {
            StoreError::NotFound { .. } => ApiError::new(ErrorCode::NotFound, err.to_string()),
            StoreError::UniqueViolation { .. } | StoreError::Validation(_) => {
                ApiError::new(ErrorCode::ValidationError, err.to_string())
            }
            StoreError::AlreadyCancelled { .. } => {
                ApiError::new(ErrorCode::BusinessLogic, err.to_string())
            }
            StoreError::Persistence(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Persistence failed: {}", e);
                ApiError::new(ErrorCode::StorageError, "Storage operation failed")
            }
            StoreError::Corrupt { collection, message } => {
                tracing::error!("Corrupt collection {}: {}", collection, message);
                ApiError::new(ErrorCode::StorageError, "Stored data is corrupt")
            }
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match &err {
            CoreError::CartTooLarge { .. }
            | CoreError::ItemNotInCart(_)
            | CoreError::EmptyCart => ApiError::new(ErrorCode::CartError, err.to_string()),
            CoreError::QuantityTooLarge { .. } | CoreError::Validation(_) => {
                ApiError::new(ErrorCode::ValidationError, err.to_string())
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_mapping() {
        let err: ApiError = StoreError::not_found("Product", "p-1").into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Product not found: p-1");
    }

    #[test]
    fn test_core_error_mapping() {
        let err: ApiError = CoreError::EmptyCart.into();
        assert_eq!(err.code, ErrorCode::CartError);
    }
}
