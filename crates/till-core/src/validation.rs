//! # Validation Module
//!
//! Input validation for sale creation requests.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Deserialization (serde)                                      │
//! │  └── Type and shape validation                                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE - field-level business rules                     │
//! │  └── Ranges, magnitudes, required fields                               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / CHECK constraints                                      │
//! │  ├── UNIQUE(sale_id)                                                   │
//! │  └── Foreign key constraints                                           │
//! │                                                                         │
//! │  A rejected request writes nothing: validation runs before any I/O.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::money::MAX_AMOUNT_CENTS;
use crate::types::Discount;
use crate::{MAX_ITEM_QUANTITY, MAX_PERCENT_BPS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a line item's product name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be at most 200 characters
///
/// The name is a denormalized free-text label; there is no catalog to check
/// it against.
///
/// ## Example
/// ```rust
/// use till_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Coca-Cola 330ml").is_ok());
/// assert!(validate_product_name("").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "product_name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "product_name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line item quantity.
///
/// ## Rules
/// - Must be positive (>= 1); a zero-quantity line is meaningless
/// - Must not exceed MAX_ITEM_QUANTITY (999)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a unit price in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (promotional items)
/// - Bounded by the DECIMAL(10,2) magnitude of the reference schema
///
/// ## Example
/// ```rust
/// use till_core::validation::validate_price_cents;
///
/// assert!(validate_price_cents(1099).is_ok());  // $10.99
/// assert!(validate_price_cents(0).is_ok());     // Free item
/// assert!(validate_price_cents(-100).is_err()); // Invalid
/// ```
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 || cents > MAX_AMOUNT_CENTS {
        return Err(ValidationError::OutOfRange {
            field: "unit_price".to_string(),
            min: 0,
            max: MAX_AMOUNT_CENTS,
        });
    }

    Ok(())
}

/// Validates a payment amount in cents, when one is supplied.
///
/// ## Rules
/// - Must be non-negative; whether it covers the total is the totals
///   engine's decision, not a field-level rule
pub fn validate_payment_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 || cents > MAX_AMOUNT_CENTS {
        return Err(ValidationError::OutOfRange {
            field: "payment_received".to_string(),
            min: 0,
            max: MAX_AMOUNT_CENTS,
        });
    }

    Ok(())
}

/// Validates a discount's raw value.
///
/// ## Rules
/// - Percentage: 0 to 10000 basis points (0% to 100%)
/// - Amount: non-negative cents within the magnitude bound; whether it
///   exceeds the subtotal is handled by the engine's cap, not rejected here
pub fn validate_discount(discount: &Discount) -> ValidationResult<()> {
    match discount {
        Discount::Percentage(bps) => {
            if *bps > MAX_PERCENT_BPS {
                return Err(ValidationError::OutOfRange {
                    field: "discount_value".to_string(),
                    min: 0,
                    max: MAX_PERCENT_BPS as i64,
                });
            }
        }
        Discount::Amount(cents) => {
            if *cents < 0 || *cents > MAX_AMOUNT_CENTS {
                return Err(ValidationError::OutOfRange {
                    field: "discount_value".to_string(),
                    min: 0,
                    max: MAX_AMOUNT_CENTS,
                });
            }
        }
    }

    Ok(())
}

// =============================================================================
// UUID Validators
// =============================================================================

/// Validates a UUID string format.
///
/// ## Example
/// ```rust
/// use till_core::validation::validate_uuid;
///
/// assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_uuid("not-a-uuid").is_err());
/// ```
pub fn validate_uuid(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

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
        assert!(validate_product_name("Coca-Cola 330ml").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name("   ").is_err());
        assert!(validate_product_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(100).is_ok());
        assert!(validate_quantity(999).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_price_cents() {
        assert!(validate_price_cents(0).is_ok());
        assert!(validate_price_cents(1099).is_ok());
        assert!(validate_price_cents(-100).is_err());
        assert!(validate_price_cents(MAX_AMOUNT_CENTS + 1).is_err());
    }

    #[test]
    fn test_validate_payment_cents() {
        assert!(validate_payment_cents(0).is_ok());
        assert!(validate_payment_cents(10000).is_ok());
        assert!(validate_payment_cents(-1).is_err());
    }

    #[test]
    fn test_validate_discount_percentage_bounds() {
        assert!(validate_discount(&Discount::Percentage(0)).is_ok());
        assert!(validate_discount(&Discount::Percentage(10000)).is_ok());
        assert!(validate_discount(&Discount::Percentage(10001)).is_err());
    }

    #[test]
    fn test_validate_discount_amount_bounds() {
        assert!(validate_discount(&Discount::Amount(0)).is_ok());
        assert!(validate_discount(&Discount::Amount(1500)).is_ok());
        assert!(validate_discount(&Discount::Amount(-1)).is_err());
        assert!(validate_discount(&Discount::Amount(MAX_AMOUNT_CENTS + 1)).is_err());
    }

    #[test]
    fn test_validate_uuid() {
        assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_uuid("").is_err());
        assert!(validate_uuid("not-a-uuid").is_err());
        assert!(validate_uuid("123").is_err());
    }
}
