//! # Validation Module
//!
//! Input validation utilities for MiniPOS.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend                                                     │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE - business rule validation                       │
//! │  ├── Price sign, quantity bounds, discount bounds                      │
//! │  └── Mandatory cancel reason, positive debt amounts                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Store policy                                                 │
//! │  ├── Barcode uniqueness                                                │
//! │  └── Double-cancel rejection                                           │
//! │                                                                         │
//! │  Defense in depth: the source of these rules was UI affordances only;  │
//! │  the store now refuses what the UI merely discouraged.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use minipos_core::money::Money;
//! use minipos_core::validation::{validate_price, validate_quantity};
//!
//! validate_price(Money::from_minor(5000)).unwrap();
//! validate_quantity(5).unwrap();
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::MAX_ITEM_QTY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty
/// - Must be between 1 and 200 characters
///
/// ## Example
/// ```rust
/// use minipos_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Cola 0.5l").is_ok());
/// assert!(validate_product_name("").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a client name.
pub fn validate_client_name(name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "client name".to_string(),
        });
    }

    Ok(())
}

/// Validates a client phone number.
///
/// ## Rules
/// - Must not be empty
/// - Digits, spaces, `+`, `-`, parentheses only
pub fn validate_phone(phone: &str) -> ValidationResult<()> {
    let phone = phone.trim();

    if phone.is_empty() {
        return Err(ValidationError::Required {
            field: "phone".to_string(),
        });
    }

    if !phone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | ' ' | '(' | ')'))
    {
        return Err(ValidationError::InvalidFormat {
            field: "phone".to_string(),
            reason: "must contain only digits, spaces, +, -, ( and )".to_string(),
        });
    }

    Ok(())
}

/// Validates a barcode string.
///
/// ## Rules
/// - Must not be empty
/// - Maximum 64 characters
/// - Alphanumeric characters only (covers EAN/UPC digits and Code-128 text)
///
/// ## Example
/// ```rust
/// use minipos_core::validation::validate_barcode;
///
/// assert!(validate_barcode("4870001234567").is_ok());
/// assert!(validate_barcode("").is_err());
/// assert!(validate_barcode("has space").is_err());
/// ```
pub fn validate_barcode(barcode: &str) -> ValidationResult<()> {
    let barcode = barcode.trim();

    if barcode.is_empty() {
        return Err(ValidationError::Required {
            field: "barcode".to_string(),
        });
    }

    if barcode.len() > 64 {
        return Err(ValidationError::TooLong {
            field: "barcode".to_string(),
            max: 64,
        });
    }

    if !barcode.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ValidationError::InvalidFormat {
            field: "barcode".to_string(),
            reason: "must contain only letters and digits".to_string(),
        });
    }

    Ok(())
}

/// Validates a cancellation reason.
///
/// ## Rules
/// - Must not be empty or whitespace (cancelling without a reason is not
///   allowed - the reason is the audit trail)
///
/// ## Returns
/// The trimmed reason string.
pub fn validate_cancel_reason(reason: &str) -> ValidationResult<String> {
    let reason = reason.trim();

    if reason.is_empty() {
        return Err(ValidationError::Required {
            field: "cancel reason".to_string(),
        });
    }

    Ok(reason.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity value.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QTY (999)
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Cart: Set Quantity                                                     │
/// │                                                                         │
/// │  User enters quantity: 5                                               │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_quantity(5) ← THIS FUNCTION                                  │
/// │       │                                                                 │
/// │       ├── qty <= 0? → Error: "quantity must be positive"               │
/// │       │                                                                 │
/// │       ├── qty > 999? → Error: "quantity must be between 1 and 999"     │
/// │       │                                                                 │
/// │       └── OK → Proceed with cart update                                │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QTY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QTY,
        });
    }

    Ok(())
}

/// Validates a product price.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
///
/// ## Example
/// ```rust
/// use minipos_core::money::Money;
/// use minipos_core::validation::validate_price;
///
/// assert!(validate_price(Money::from_minor(1099)).is_ok());
/// assert!(validate_price(Money::zero()).is_ok());       // Free item
/// assert!(validate_price(Money::from_minor(-100)).is_err());
/// ```
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::MustBeNonNegative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates a discount against the current subtotal.
///
/// ## Rules
/// - Must be non-negative
/// - Must not exceed the subtotal
pub fn validate_discount(discount: Money, subtotal: Money) -> ValidationResult<()> {
    if discount.is_negative() {
        return Err(ValidationError::MustBeNonNegative {
            field: "discount".to_string(),
        });
    }

    if discount > subtotal {
        return Err(ValidationError::OutOfRange {
            field: "discount".to_string(),
            min: 0,
            max: subtotal.minor(),
        });
    }

    Ok(())
}

/// Validates a debt amount (goods taken on credit).
///
/// ## Rules
/// - Must be positive (> 0); a zero or negative debt entry is meaningless
pub fn validate_debt_amount(amount: Money) -> ValidationResult<()> {
    if !amount.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "debt amount".to_string(),
        });
    }

    Ok(())
}

/// Validates a payment amount towards a debt.
///
/// ## Rules
/// - Must be positive (> 0)
pub fn validate_payment_amount(amount: Money) -> ValidationResult<()> {
    if !amount.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "payment amount".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Cola 0.5l").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name("   ").is_err());
        assert!(validate_product_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_barcode() {
        assert!(validate_barcode("4870001234567").is_ok());
        assert!(validate_barcode("ABC123").is_ok());

        assert!(validate_barcode("").is_err());
        assert!(validate_barcode("has space").is_err());
        assert!(validate_barcode(&"9".repeat(100)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Money::zero()).is_ok());
        assert!(validate_price(Money::from_minor(1099)).is_ok());
        assert!(validate_price(Money::from_minor(-100)).is_err());
    }

    #[test]
    fn test_validate_discount_bounds() {
        let subtotal = Money::from_minor(20000);
        assert!(validate_discount(Money::zero(), subtotal).is_ok());
        assert!(validate_discount(Money::from_minor(20000), subtotal).is_ok());
        assert!(validate_discount(Money::from_minor(20001), subtotal).is_err());
        assert!(validate_discount(Money::from_minor(-1), subtotal).is_err());
    }

    #[test]
    fn test_validate_cancel_reason() {
        assert_eq!(
            validate_cancel_reason("  wrong item  ").unwrap(),
            "wrong item"
        );
        assert!(validate_cancel_reason("").is_err());
        assert!(validate_cancel_reason("   ").is_err());
    }

    #[test]
    fn test_validate_debt_and_payment_amounts() {
        assert!(validate_debt_amount(Money::from_minor(100)).is_ok());
        assert!(validate_debt_amount(Money::zero()).is_err());
        assert!(validate_debt_amount(Money::from_minor(-100)).is_err());

        assert!(validate_payment_amount(Money::from_minor(100)).is_ok());
        assert!(validate_payment_amount(Money::zero()).is_err());
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("+996 (555) 12-34-56").is_ok());
        assert!(validate_phone("").is_err());
        assert!(validate_phone("call me").is_err());
    }
}
