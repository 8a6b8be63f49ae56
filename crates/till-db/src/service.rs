//! # Sales Service
//!
//! The orchestration layer tying the pure totals engine to persistence.
//! Anything that exposes Till to the outside (an HTTP layer, a CLI, an
//! import job) talks to [`SalesService`] and never to the repository
//! directly.
//!
//! ## Sale Creation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     create_sale(NewSale)                                │
//! │                                                                         │
//! │  1. compute_totals()      ← pure, till-core; rejects bad input          │
//! │  2. sale_id::generate()   ← SALE-YYYYMMDDHHMMSS from injected clock     │
//! │  3. insert_sale()         ← one transaction: sale + items               │
//! │        │                                                                │
//! │        ├── ok ───────────────────────────► SaleDetail                   │
//! │        │                                                                │
//! │        └── DuplicateSaleId                                              │
//! │              │  regenerate with entropy suffix, attempt += 1            │
//! │              └──► retry insert (bounded, MAX_SALE_ID_ATTEMPTS)          │
//! │                     │                                                   │
//! │                     └── still colliding ──► SaleIdExhausted             │
//! │                                                                         │
//! │  The collision is resolved by the storage layer's UNIQUE constraint,   │
//! │  never by application-level locking.                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use chrono::{Days, NaiveTime};
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::DbError;
use crate::pool::Database;
use till_core::{
    compute_totals, line_total, sale_id, Clock, CoreError, DailySummary, Money, NewSale,
    PaymentStatus, Sale, SaleDetail, SaleItem, SaleSummary, SystemClock, WeeklySummary,
};

/// Insert attempts per creation request before giving up on a unique ID.
/// The first attempt uses the plain second-resolution ID; retries carry an
/// entropy suffix, so exhausting this means something is badly wrong.
const MAX_SALE_ID_ATTEMPTS: u32 = 3;

// =============================================================================
// Service Error
// =============================================================================

/// Errors surfaced to API consumers.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Rejected input: validation failure or insufficient payment.
    /// Nothing was written.
    #[error(transparent)]
    Invalid(#[from] CoreError),

    /// Lookup of a sale that does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Could not find a free sale ID within the retry budget.
    /// Maps to "service unavailable, try again" at the API edge.
    #[error("could not allocate a unique sale_id after {attempts} attempts")]
    SaleIdExhausted { attempts: u32 },

    /// Any other persistence failure, propagated untouched.
    #[error(transparent)]
    Db(#[from] DbError),
}

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

// =============================================================================
// Sales Service
// =============================================================================

/// High-level sales API: creation, lookup, listing, status updates,
/// deletion, and the two reporting summaries.
///
/// Cheap to clone. Time flows through the injected [`Clock`] so tests can
/// freeze it.
#[derive(Clone)]
pub struct SalesService {
    db: Database,
    clock: Arc<dyn Clock>,
}

impl SalesService {
    /// Creates a service on the real wall clock.
    pub fn new(db: Database) -> Self {
        SalesService::with_clock(db, Arc::new(SystemClock))
    }

    /// Creates a service with an explicit clock (tests, replays).
    pub fn with_clock(db: Database, clock: Arc<dyn Clock>) -> Self {
        SalesService { db, clock }
    }

    /// Creates a sale: runs the totals engine, allocates a sale ID, and
    /// persists the sale with its items atomically.
    ///
    /// ## Errors
    /// - [`ServiceError::Invalid`] for malformed input or a payment below
    ///   the total; nothing is written
    /// - [`ServiceError::SaleIdExhausted`] if every ID attempt collided
    pub async fn create_sale(&self, new_sale: NewSale) -> ServiceResult<SaleDetail> {
        // 1. Pure computation; any rejection happens before I/O.
        let totals = compute_totals(
            &new_sale.items,
            new_sale.discount,
            new_sale.payment_received_cents.map(Money::from_cents),
        )?;

        let now = self.clock.now();
        let created_at = new_sale.created_at.unwrap_or(now);
        let sale_uuid = Uuid::new_v4().to_string();

        let items: Vec<SaleItem> = new_sale
            .items
            .iter()
            .map(|item| {
                // Already validated by compute_totals; recompute rather than
                // trust any earlier figure.
                let total_price =
                    line_total(Money::from_cents(item.unit_price_cents), item.quantity)?;
                Ok(SaleItem {
                    id: Uuid::new_v4().to_string(),
                    sale_id: sale_uuid.clone(),
                    product_name: item.product_name.trim().to_string(),
                    unit_price_cents: item.unit_price_cents,
                    quantity: item.quantity,
                    total_price_cents: total_price.cents(),
                    created_at,
                })
            })
            .collect::<Result<_, CoreError>>()?;

        let mut sale = Sale {
            id: sale_uuid,
            sale_id: sale_id::generate(self.clock.as_ref()),
            subtotal_cents: totals.subtotal.cents(),
            discount_type: new_sale.discount.discount_type(),
            discount_value: new_sale.discount.raw_value(),
            discount_amount_cents: totals.discount_amount.cents(),
            total_amount_cents: totals.total_amount.cents(),
            payment_received_cents: new_sale.payment_received_cents,
            change_amount_cents: totals.change_amount.cents(),
            payment_status: new_sale.payment_status,
            created_at,
            updated_at: now,
        };

        // 2. Insert, regenerating the business ID on collision. The UNIQUE
        // constraint is the arbiter; we just retry with a fresh ID.
        let mut attempt: u32 = 0;
        loop {
            match self.db.sales().insert_sale(&sale, &items).await {
                Ok(()) => break,
                Err(DbError::DuplicateSaleId { sale_id: taken }) => {
                    attempt += 1;
                    if attempt >= MAX_SALE_ID_ATTEMPTS {
                        warn!(sale_id = %taken, attempts = attempt, "Sale ID allocation exhausted");
                        return Err(ServiceError::SaleIdExhausted { attempts: attempt });
                    }
                    debug!(sale_id = %taken, attempt = attempt, "Sale ID collision, regenerating");
                    sale.sale_id = sale_id::regenerate(self.clock.as_ref(), attempt);
                }
                Err(other) => return Err(other.into()),
            }
        }

        info!(
            sale_id = %sale.sale_id,
            total = %totals.total_amount,
            items = items.len(),
            "Sale created"
        );

        Ok(SaleDetail { sale, items })
    }

    /// Fetches a sale and its items by persistent UUID.
    pub async fn get_sale(&self, id: &str) -> ServiceResult<SaleDetail> {
        let sale = self
            .db
            .sales()
            .get_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound {
                entity: "Sale".to_string(),
                id: id.to_string(),
            })?;
        let items = self.db.sales().get_items(&sale.id).await?;

        Ok(SaleDetail { sale, items })
    }

    /// Lists all sales as summaries, newest first.
    pub async fn list_sales(&self) -> ServiceResult<Vec<SaleSummary>> {
        Ok(self.db.sales().list().await?)
    }

    /// Replaces a sale's payment status (no transition graph is enforced).
    pub async fn update_status(
        &self,
        id: &str,
        status: PaymentStatus,
    ) -> ServiceResult<SaleDetail> {
        self.db
            .sales()
            .update_status(id, status, self.clock.now())
            .await
            .map_err(|e| match e {
                DbError::NotFound { .. } => ServiceError::NotFound {
                    entity: "Sale".to_string(),
                    id: id.to_string(),
                },
                other => other.into(),
            })?;

        self.get_sale(id).await
    }

    /// Deletes a sale; its items are removed by the cascade.
    pub async fn delete_sale(&self, id: &str) -> ServiceResult<()> {
        self.db.sales().delete(id).await.map_err(|e| match e {
            DbError::NotFound { .. } => ServiceError::NotFound {
                entity: "Sale".to_string(),
                id: id.to_string(),
            },
            other => other.into(),
        })
    }

    /// Aggregates completed sales for the current UTC day: the half-open
    /// window `[midnight, now)`.
    ///
    /// Zero completed sales is not an error; the summary is all zeros.
    pub async fn daily_summary(&self) -> ServiceResult<DailySummary> {
        let now = self.clock.now();
        let date = now.date_naive();
        let from = date.and_time(NaiveTime::MIN).and_utc();

        let (total, count) = self
            .db
            .sales()
            .sum_and_count(PaymentStatus::Completed, from, now)
            .await?;

        debug!(date = %date, total = total, transactions = count, "Daily summary");

        Ok(DailySummary {
            date,
            total_sales_cents: total,
            total_transactions: count,
        })
    }

    /// Aggregates completed sales over the trailing week: the 7-day
    /// lookback `[today − 7 days, today]`, inclusive on both ends
    /// (eight calendar days, not a calendar week).
    pub async fn weekly_summary(&self) -> ServiceResult<WeeklySummary> {
        let now = self.clock.now();
        let end_date = now.date_naive();
        let start_date = end_date
            .checked_sub_days(Days::new(7))
            .unwrap_or(end_date);

        let from = start_date.and_time(NaiveTime::MIN).and_utc();
        // Inclusive end: half-open bound at the following midnight
        let to = end_date
            .checked_add_days(Days::new(1))
            .unwrap_or(end_date)
            .and_time(NaiveTime::MIN)
            .and_utc();

        let (total, count) = self
            .db
            .sales()
            .sum_and_count(PaymentStatus::Completed, from, to)
            .await?;

        debug!(
            start = %start_date,
            end = %end_date,
            total = total,
            transactions = count,
            "Weekly summary"
        );

        Ok(WeeklySummary {
            start_date,
            end_date,
            total_sales_cents: total,
            total_transactions: count,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
