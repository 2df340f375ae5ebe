//! # Store Policy
//!
//! Configurable behavior at the store's decision points. Each flag covers a
//! case where two reasonable behaviors exist; the defaults pick the stricter
//! one and deployments can relax them through configuration.

use serde::{Deserialize, Serialize};

/// Tunable store behavior.
///
/// ## Flags
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  floor_debt_at_zero       false  Negative balances shown as customer    │
/// │                                  credit; true clamps reads to zero.     │
/// │  reject_double_cancel     true   Second cancel of a receipt is an       │
/// │                                  error; false makes it a no-op. The     │
/// │                                  first reason is kept either way.       │
/// │  enforce_unique_barcodes  true   Duplicate barcode registration is      │
/// │                                  rejected; false allows it (lookups     │
/// │                                  then resolve to the first match).      │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct StorePolicy {
    pub floor_debt_at_zero: bool,
    pub reject_double_cancel: bool,
    pub enforce_unique_barcodes: bool,
}

impl Default for StorePolicy {
    fn default() -> Self {
        StorePolicy {
            floor_debt_at_zero: false,
            reject_double_cancel: true,
            enforce_unique_barcodes: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let policy = StorePolicy::default();
        assert!(!policy.floor_debt_at_zero);
        assert!(policy.reject_double_cancel);
        assert!(policy.enforce_unique_barcodes);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let policy: StorePolicy = serde_json::from_str(r#"{"floor_debt_at_zero":true}"#).unwrap();
        assert!(policy.floor_debt_at_zero);
        assert!(policy.reject_double_cancel);
    }
}
