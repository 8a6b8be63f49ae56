//! # till-core: Pure Business Logic for Till
//!
//! This crate is the **heart** of Till. It contains the sale finalization
//! engine as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Till Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Consumers (HTTP layer, CLI, imports)               │   │
//! │  │                      — out of scope here —                      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                till-db (SalesService, repository)               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ till-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐ │   │
//! │  │   │  money  │ │ totals  │ │ sale_id │ │  clock  │ │validation│ │   │
//! │  │   │  Money  │ │ engine  │ │ SALE-.. │ │  trait  │ │  rules  │ │   │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └─────────┘ └─────────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Sale, SaleItem, Discount, summaries)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`totals`] - The finalization engine: subtotal → discount → total → change
//! - [`sale_id`] - Business identifier generation and collision regeneration
//! - [`clock`] - Injected time source for deterministic tests
//! - [`error`] - Domain error types
//! - [`validation`] - Field-level validation rules
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic given its inputs
//!    (the clock is an input)
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid
//!    float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use till_core::money::Money;
//! use till_core::totals::compute_totals;
//! use till_core::types::{Discount, NewSaleItem};
//!
//! let items = vec![NewSaleItem {
//!     product_name: "Espresso".into(),
//!     unit_price_cents: 350,
//!     quantity: 2,
//! }];
//!
//! // 10% off, customer pays $10.00
//! let totals = compute_totals(
//!     &items,
//!     Discount::Percentage(1000),
//!     Some(Money::from_cents(1000)),
//! )
//! .unwrap();
//!
//! assert_eq!(totals.subtotal.cents(), 700);
//! assert_eq!(totals.discount_amount.cents(), 70);
//! assert_eq!(totals.total_amount.cents(), 630);
//! assert_eq!(totals.change_amount.cents(), 370);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod clock;
pub mod error;
pub mod money;
pub mod sale_id;
pub mod totals;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use till_core::Money` instead of
// `use till_core::money::Money`

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use totals::{compute_totals, line_total, SaleTotals};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum line items allowed in a single sale
///
/// ## Business Reason
/// Prevents runaway requests and keeps transactions printable on a receipt.
pub const MAX_SALE_ITEMS: usize = 100;

/// Maximum quantity of a single line item
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// 100% expressed in basis points; percentage discounts may not exceed this.
pub const MAX_PERCENT_BPS: u32 = 10_000;
