//! # Domain Types
//!
//! Core domain types for Till.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Sale       │   │    SaleItem     │   │    Discount     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  Percentage     │       │
//! │  │  sale_id (biz)  │   │  product_name   │   │    { bps }      │       │
//! │  │  subtotal       │   │  unit_price     │   │  Amount         │       │
//! │  │  total_amount   │   │  quantity       │   │    { cents }    │       │
//! │  │  change_amount  │   │  total_price    │   └─────────────────┘       │
//! │  └─────────────────┘   └─────────────────┘                             │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │  PaymentStatus  │   │  DiscountType   │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  Pending        │   │  Percentage     │                             │
//! │  │  Completed      │   │  Amount         │                             │
//! │  │  Cancelled      │   └─────────────────┘                             │
//! │  └─────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Every sale has:
//! - `id`: UUID v4 - immutable, used for database relations
//! - `sale_id`: business identifier (`SALE-YYYYMMDDHHMMSS`) - human-readable,
//!   printed on receipts, unique across all sales

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Payment Status
// =============================================================================

/// The payment status of a sale.
///
/// No transition graph is enforced: any status may be set at creation or
/// through an update. Summaries only ever count `Completed` sales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Sale recorded, payment not yet settled.
    Pending,
    /// Sale has been paid. Counted by the daily/weekly summaries.
    Completed,
    /// Sale was cancelled.
    Cancelled,
}

impl Default for PaymentStatus {
    fn default() -> Self {
        PaymentStatus::Pending
    }
}

// =============================================================================
// Discount
// =============================================================================

/// The kind of discount applied to a sale's subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    /// Percentage of the subtotal.
    Percentage,
    /// Flat amount off the subtotal.
    Amount,
}

/// A discount as the totals engine consumes it.
///
/// ## Storage Representation
/// The database stores the `(discount_type, discount_value)` pair; the raw
/// value is basis points for percentage discounts (1000 = 10%) and cents for
/// flat discounts. `from_parts`/`raw_value` convert between the two shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "discount_type", content = "discount_value", rename_all = "lowercase")]
pub enum Discount {
    /// Percentage of subtotal, in basis points (1000 = 10%).
    Percentage(u32),
    /// Flat amount off the subtotal, in cents.
    Amount(i64),
}

impl Discount {
    /// No discount at all (0%).
    pub const fn none() -> Self {
        Discount::Percentage(0)
    }

    /// Reassembles a discount from its stored `(type, value)` pair.
    pub fn from_parts(discount_type: DiscountType, value: i64) -> Self {
        match discount_type {
            DiscountType::Percentage => Discount::Percentage(value.clamp(0, u32::MAX as i64) as u32),
            DiscountType::Amount => Discount::Amount(value),
        }
    }

    /// The stored discriminant.
    pub fn discount_type(&self) -> DiscountType {
        match self {
            Discount::Percentage(_) => DiscountType::Percentage,
            Discount::Amount(_) => DiscountType::Amount,
        }
    }

    /// The stored raw value (bps or cents, depending on type).
    pub fn raw_value(&self) -> i64 {
        match self {
            Discount::Percentage(bps) => *bps as i64,
            Discount::Amount(cents) => *cents,
        }
    }
}

impl Default for Discount {
    fn default() -> Self {
        Discount::none()
    }
}

// =============================================================================
// Sale
// =============================================================================

/// A persisted sale transaction with its computed totals.
///
/// All monetary fields are cents. The totals are derived by the engine in
/// [`crate::totals`] before the record ever reaches storage; callers never
/// author `subtotal_cents`, `discount_amount_cents`, `total_amount_cents` or
/// `change_amount_cents` directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Sale {
    /// Unique identifier (UUID v4).
    pub id: String,
    /// Business identifier, `SALE-YYYYMMDDHHMMSS` (unique).
    pub sale_id: String,
    /// Sum of all item total prices, before discount.
    pub subtotal_cents: i64,
    /// How the discount value is interpreted.
    pub discount_type: DiscountType,
    /// Raw discount value: bps for percentage, cents for flat amount.
    pub discount_value: i64,
    /// Derived discount in cents.
    pub discount_amount_cents: i64,
    /// `subtotal - discount_amount`; never negative.
    pub total_amount_cents: i64,
    /// What the customer handed over, if payment was taken at creation.
    pub payment_received_cents: Option<i64>,
    /// `payment_received - total_amount` when payment was taken, else 0.
    pub change_amount_cents: i64,
    pub payment_status: PaymentStatus,
    /// Defaults to creation time; caller-overridable (e.g. imports).
    pub created_at: DateTime<Utc>,
    /// Refreshed on every persisted mutation.
    pub updated_at: DateTime<Utc>,
}

impl Sale {
    /// Returns the subtotal as Money.
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_cents(self.subtotal_cents)
    }

    /// Returns the derived discount as Money.
    #[inline]
    pub fn discount_amount(&self) -> Money {
        Money::from_cents(self.discount_amount_cents)
    }

    /// Returns the amount due as Money.
    #[inline]
    pub fn total_amount(&self) -> Money {
        Money::from_cents(self.total_amount_cents)
    }

    /// Returns the change as Money.
    #[inline]
    pub fn change_amount(&self) -> Money {
        Money::from_cents(self.change_amount_cents)
    }

    /// Returns the discount in engine form.
    pub fn discount(&self) -> Discount {
        Discount::from_parts(self.discount_type, self.discount_value)
    }
}

// =============================================================================
// Sale Item
// =============================================================================

/// One product line within a sale.
///
/// `product_name` is a denormalized free-text label; there is no foreign key
/// to a product catalog. `total_price_cents` is derived from
/// `unit_price × quantity` on every write and is never independently
/// authored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SaleItem {
    pub id: String,
    /// Owning sale (UUID). Items are destroyed with their sale.
    pub sale_id: String,
    pub product_name: String,
    pub unit_price_cents: i64,
    pub quantity: i64,
    /// Invariant: `total_price_cents == unit_price_cents * quantity`.
    pub total_price_cents: i64,
    pub created_at: DateTime<Utc>,
}

impl SaleItem {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Returns the line total as Money.
    #[inline]
    pub fn total_price(&self) -> Money {
        Money::from_cents(self.total_price_cents)
    }
}

// =============================================================================
// Creation Inputs
// =============================================================================

/// One proposed line item in a sale creation request.
///
/// Note there is no `total_price` field: the engine derives it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSaleItem {
    pub product_name: String,
    pub unit_price_cents: i64,
    pub quantity: i64,
}

/// A sale creation request, before the engine has run.
///
/// Deliberately missing: `subtotal`, `discount_amount`, `total_amount`,
/// `change_amount`. The original system accepted those from the caller and
/// trusted them; here they are always recomputed server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSale {
    pub items: Vec<NewSaleItem>,
    #[serde(flatten)]
    pub discount: Discount,
    /// Cents handed over by the customer, if payment is taken now.
    #[serde(default)]
    pub payment_received_cents: Option<i64>,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    /// Caller-overridable creation timestamp; defaults to the clock.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

// =============================================================================
// Projections
// =============================================================================

/// Compact sale listing entry (no line items, just a count).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SaleSummary {
    pub id: String,
    pub sale_id: String,
    pub total_amount_cents: i64,
    pub payment_status: PaymentStatus,
    pub created_at: DateTime<Utc>,
    pub items_count: i64,
}

/// A sale together with its line items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleDetail {
    #[serde(flatten)]
    pub sale: Sale,
    pub items: Vec<SaleItem>,
}

// =============================================================================
// Reporting
// =============================================================================

/// Aggregate of completed sales for the current UTC day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub total_sales_cents: i64,
    pub total_transactions: i64,
}

/// Aggregate of completed sales over a 7-day lookback window
/// (inclusive on both ends; not a calendar week).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklySummary {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_sales_cents: i64,
    pub total_transactions: i64,
}

// =============================================================================
// Unit Tests
// =============================================================================
