//! # Sale Totals Engine
//!
//! The finalization math for a sale: line totals, subtotal, discount,
//! amount due, and change. Pure functions, no I/O; persistence is the
//! repository's job.
//!
//! ## The Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      compute_totals()                                   │
//! │                                                                         │
//! │  items ──► line_total(price, qty) per line ──► Σ = subtotal            │
//! │                                                      │                  │
//! │  discount ──────────────────────────────────────────►│                  │
//! │     percentage: subtotal × bps / 10000 (half-up)     │                  │
//! │     amount:     min(value, subtotal)    ← cap        │                  │
//! │                                                      ▼                  │
//! │                              total = subtotal − discount  (≥ 0)        │
//! │                                                      │                  │
//! │  payment_received ──────────────────────────────────►│                  │
//! │     None:            change = 0                      │                  │
//! │     Some(p) < total: InsufficientPayment             │                  │
//! │     Some(p) ≥ total: change = p − total              ▼                  │
//! │                                               SaleTotals               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Authority
//! The caller never supplies a subtotal, discount amount, total, or change;
//! all four are derived here from the line items and discount parameters.
//! The original system trusted caller-supplied totals, which let the stored
//! subtotal drift from the items it allegedly summed.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::{Money, MAX_AMOUNT_CENTS};
use crate::types::{Discount, NewSaleItem};
use crate::validation::{
    validate_discount, validate_payment_cents, validate_price_cents, validate_product_name,
    validate_quantity,
};
use crate::{error::ValidationError, MAX_SALE_ITEMS};

/// The four derived amounts of a finalized sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleTotals {
    /// Sum of all line totals, before discount.
    pub subtotal: Money,
    /// Derived discount, never more than the subtotal.
    pub discount_amount: Money,
    /// `subtotal - discount_amount`; never negative.
    pub total_amount: Money,
    /// `payment_received - total_amount` when payment was taken, else zero.
    pub change_amount: Money,
}

impl SaleTotals {
    /// All-zero totals: the result for an empty item list with no payment.
    pub const fn zero() -> Self {
        SaleTotals {
            subtotal: Money::zero(),
            discount_amount: Money::zero(),
            total_amount: Money::zero(),
            change_amount: Money::zero(),
        }
    }
}

/// Derives a line item's total price from its factors.
///
/// ## Contract
/// - `unit_price` must be >= 0 (zero is legal: promotional items)
/// - `quantity` must be >= 1
/// - Result is exact: integer cents times integer quantity
///
/// This is the only way a `total_price` comes into existence; it is
/// recomputed on every write of the item, never stored independently of
/// its inputs.
///
/// ## Example
/// ```rust
/// use till_core::money::Money;
/// use till_core::totals::line_total;
///
/// let total = line_total(Money::from_cents(299), 3).unwrap();
/// assert_eq!(total.cents(), 897); // $2.99 × 3 = $8.97
/// ```
pub fn line_total(unit_price: Money, quantity: i64) -> CoreResult<Money> {
    validate_price_cents(unit_price.cents())?;
    validate_quantity(quantity)?;

    Ok(unit_price.multiply_quantity(quantity))
}

/// Runs the full totals pipeline for a proposed sale.
///
/// ## Contract
/// 1. Subtotal = sum of recomputed line totals (authoritative).
/// 2. Discount:
///    - percentage: `subtotal × bps / 10000`, rounded half up;
///    - flat amount: the value, capped at the subtotal.
/// 3. Total = subtotal − discount. The cap keeps it non-negative.
/// 4. Payment: strict validation. A supplied payment below the total fails
///    with [`CoreError::InsufficientPayment`]; otherwise change is the
///    excess. No payment means no change.
///
/// Pure computation: nothing is persisted, nothing is read from outside the
/// arguments.
///
/// ## Edge Cases
/// - Empty item list → all-zero totals (a percentage of zero is zero).
/// - A zero-price line is accepted; a zero-quantity line is rejected.
///
/// ## Example
/// ```rust
/// use till_core::money::Money;
/// use till_core::totals::compute_totals;
/// use till_core::types::{Discount, NewSaleItem};
///
/// let items = vec![NewSaleItem {
///     product_name: "Widget".into(),
///     unit_price_cents: 5000,
///     quantity: 2,
/// }];
/// let totals = compute_totals(
///     &items,
///     Discount::Percentage(1000), // 10%
///     Some(Money::from_cents(10000)),
/// )
/// .unwrap();
/// assert_eq!(totals.subtotal.cents(), 10000);
/// assert_eq!(totals.discount_amount.cents(), 1000);
/// assert_eq!(totals.total_amount.cents(), 9000);
/// assert_eq!(totals.change_amount.cents(), 1000);
/// ```
pub fn compute_totals(
    items: &[NewSaleItem],
    discount: Discount,
    payment_received: Option<Money>,
) -> CoreResult<SaleTotals> {
    if items.len() > MAX_SALE_ITEMS {
        return Err(CoreError::TooManyItems {
            max: MAX_SALE_ITEMS,
        });
    }
    validate_discount(&discount)?;
    if let Some(payment) = payment_received {
        validate_payment_cents(payment.cents())?;
    }

    // 1. Authoritative subtotal from recomputed line totals.
    let mut subtotal = Money::zero();
    for item in items {
        validate_product_name(&item.product_name)?;
        subtotal += line_total(Money::from_cents(item.unit_price_cents), item.quantity)?;
    }

    if subtotal.cents() > MAX_AMOUNT_CENTS {
        return Err(CoreError::Validation(ValidationError::OutOfRange {
            field: "subtotal".to_string(),
            min: 0,
            max: MAX_AMOUNT_CENTS,
        }));
    }

    // 2. Discount derivation.
    let discount_amount = match discount {
        Discount::Percentage(bps) => subtotal.percentage(bps),
        // Flat discounts are capped at the subtotal so the total cannot
        // go negative.
        Discount::Amount(cents) => Money::from_cents(cents).min(subtotal),
    };

    // 3. Amount due.
    let total_amount = subtotal - discount_amount;

    // 4. Change, under strict payment validation.
    let change_amount = match payment_received {
        None => Money::zero(),
        Some(payment) => {
            if payment < total_amount {
                return Err(CoreError::InsufficientPayment {
                    total_cents: total_amount.cents(),
                    received_cents: payment.cents(),
                });
            }
            payment - total_amount
        }
    };

    Ok(SaleTotals {
        subtotal,
        discount_amount,
        total_amount,
        change_amount,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, unit_price_cents: i64, quantity: i64) -> NewSaleItem {
        NewSaleItem {
            product_name: name.to_string(),
            unit_price_cents,
            quantity,
        }
    }

    #[test]
    fn test_line_total_basic() {
        let total = line_total(Money::from_cents(1099), 2).unwrap();
        assert_eq!(total.cents(), 2198);
    }

    #[test]
    fn test_line_total_zero_price_is_legal() {
        // Promotional giveaway line
        let total = line_total(Money::zero(), 5).unwrap();
        assert_eq!(total.cents(), 0);
    }

    #[test]
    fn test_line_total_rejects_zero_quantity() {
        assert!(line_total(Money::from_cents(100), 0).is_err());
        assert!(line_total(Money::from_cents(100), -3).is_err());
    }

    #[test]
    fn test_line_total_rejects_negative_price() {
        assert!(line_total(Money::from_cents(-100), 1).is_err());
    }

    #[test]
    fn test_percentage_discount_basic() {
        // subtotal 100.00, 10% → discount 10.00, total 90.00
        let items = vec![item("A", 10000, 1)];
        let totals = compute_totals(&items, Discount::Percentage(1000), None).unwrap();
        assert_eq!(totals.subtotal.cents(), 10000);
        assert_eq!(totals.discount_amount.cents(), 1000);
        assert_eq!(totals.total_amount.cents(), 9000);
        assert_eq!(totals.change_amount.cents(), 0);
    }

    #[test]
    fn test_amount_discount_below_subtotal() {
        // subtotal 50.00, amount discount 15.00 → total 35.00
        let items = vec![item("A", 5000, 1)];
        let totals = compute_totals(&items, Discount::Amount(1500), None).unwrap();
        assert_eq!(totals.discount_amount.cents(), 1500);
        assert_eq!(totals.total_amount.cents(), 3500);
    }

    #[test]
    fn test_amount_discount_capped_at_subtotal() {
        // Cap policy: discount 80.00 on subtotal 50.00 → discount 50.00, total 0
        let items = vec![item("A", 5000, 1)];
        let totals = compute_totals(&items, Discount::Amount(8000), None).unwrap();
        assert_eq!(totals.discount_amount.cents(), 5000);
        assert_eq!(totals.total_amount.cents(), 0);
    }

    #[test]
    fn test_change_computation() {
        // total 90.00, payment 100.00 → change 10.00
        let items = vec![item("A", 10000, 1)];
        let totals = compute_totals(
            &items,
            Discount::Percentage(1000),
            Some(Money::from_cents(10000)),
        )
        .unwrap();
        assert_eq!(totals.total_amount.cents(), 9000);
        assert_eq!(totals.change_amount.cents(), 1000);
    }

    #[test]
    fn test_exact_payment_zero_change() {
        let items = vec![item("A", 9000, 1)];
        let totals =
            compute_totals(&items, Discount::none(), Some(Money::from_cents(9000))).unwrap();
        assert_eq!(totals.change_amount.cents(), 0);
    }

    #[test]
    fn test_insufficient_payment_rejected() {
        let items = vec![item("A", 10000, 1)];
        let err = compute_totals(
            &items,
            Discount::Percentage(1000),
            Some(Money::from_cents(5000)),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CoreError::InsufficientPayment {
                total_cents: 9000,
                received_cents: 5000,
            }
        ));
    }

    #[test]
    fn test_empty_item_list_all_zeros() {
        let totals = compute_totals(&[], Discount::Percentage(1000), None).unwrap();
        assert_eq!(totals, SaleTotals::zero());
    }

    #[test]
    fn test_empty_items_amount_discount_capped_to_zero() {
        // Even a flat discount collapses to zero on an empty sale.
        let totals = compute_totals(&[], Discount::Amount(1500), None).unwrap();
        assert_eq!(totals.discount_amount.cents(), 0);
        assert_eq!(totals.total_amount.cents(), 0);
    }

    #[test]
    fn test_multi_line_subtotal() {
        let items = vec![item("A", 350, 2), item("B", 1250, 1), item("C", 0, 3)];
        let totals = compute_totals(&items, Discount::none(), None).unwrap();
        assert_eq!(totals.subtotal.cents(), 700 + 1250);
        assert_eq!(totals.total_amount.cents(), 1950);
    }

    #[test]
    fn test_percentage_rounding_half_up() {
        // subtotal 10.01, 12.5% = 1.25125 → 1.25; 10.00 at 8.25% = .825 → .83
        let items = vec![item("A", 1000, 1)];
        let totals = compute_totals(&items, Discount::Percentage(825), None).unwrap();
        assert_eq!(totals.discount_amount.cents(), 83);
        assert_eq!(totals.total_amount.cents(), 917);
    }

    #[test]
    fn test_invalid_discount_rejected() {
        let items = vec![item("A", 1000, 1)];
        assert!(compute_totals(&items, Discount::Percentage(10001), None).is_err());
        assert!(compute_totals(&items, Discount::Amount(-5), None).is_err());
    }

    #[test]
    fn test_invalid_item_rejects_whole_sale() {
        let items = vec![item("A", 1000, 1), item("", 500, 1)];
        assert!(compute_totals(&items, Discount::none(), None).is_err());

        let items = vec![item("A", 1000, 1), item("B", 500, 0)];
        assert!(compute_totals(&items, Discount::none(), None).is_err());
    }

    #[test]
    fn test_too_many_items_rejected() {
        let items: Vec<NewSaleItem> = (0..=MAX_SALE_ITEMS)
            .map(|i| item(&format!("P{i}"), 100, 1))
            .collect();
        assert!(matches!(
            compute_totals(&items, Discount::none(), None),
            Err(CoreError::TooManyItems { .. })
        ));
    }
}
