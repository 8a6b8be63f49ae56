//! # Sale Repository
//!
//! Database operations for sales and sale items.
//!
//! ## Write Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Sale Persistence                                    │
//! │                                                                         │
//! │  insert_sale(sale, items)                                              │
//! │     └── BEGIN                                                          │
//! │         INSERT INTO sales ...        ← UNIQUE(sale_id) enforced here   │
//! │         INSERT INTO sale_items ...   (one per line)                    │
//! │         COMMIT                                                         │
//! │                                                                         │
//! │  All-or-nothing: a sale without its items, or items without their      │
//! │  parent, are never observable. A UNIQUE violation on sale_id rolls     │
//! │  the whole transaction back and surfaces as DuplicateSaleId.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use till_core::{PaymentStatus, Sale, SaleItem, SaleSummary};

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Inserts a sale and all of its items in one transaction.
    ///
    /// ## Errors
    /// - [`DbError::DuplicateSaleId`] if `sale.sale_id` already exists;
    ///   nothing is written in that case
    pub async fn insert_sale(&self, sale: &Sale, items: &[SaleItem]) -> DbResult<()> {
        debug!(id = %sale.id, sale_id = %sale.sale_id, items = items.len(), "Inserting sale");

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO sales (
                id, sale_id,
                subtotal_cents, discount_type, discount_value,
                discount_amount_cents, total_amount_cents,
                payment_received_cents, change_amount_cents,
                payment_status, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            "#,
        )
        .bind(&sale.id)
        .bind(&sale.sale_id)
        .bind(sale.subtotal_cents)
        .bind(sale.discount_type)
        .bind(sale.discount_value)
        .bind(sale.discount_amount_cents)
        .bind(sale.total_amount_cents)
        .bind(sale.payment_received_cents)
        .bind(sale.change_amount_cents)
        .bind(sale.payment_status)
        .bind(sale.created_at)
        .bind(sale.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| match DbError::from(e) {
            // Attach the colliding ID; the sqlx message only names the column
            DbError::DuplicateSaleId { .. } => DbError::DuplicateSaleId {
                sale_id: sale.sale_id.clone(),
            },
            other => other,
        })?;

        for item in items {
            sqlx::query(
                r#"
                INSERT INTO sale_items (
                    id, sale_id, product_name,
                    unit_price_cents, quantity, total_price_cents,
                    created_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                "#,
            )
            .bind(&item.id)
            .bind(&item.sale_id)
            .bind(&item.product_name)
            .bind(item.unit_price_cents)
            .bind(item.quantity)
            .bind(item.total_price_cents)
            .bind(item.created_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(())
    }

    /// Gets a sale by its persistent UUID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Sale>> {
        let sale = sqlx::query_as::<_, Sale>(
            r#"
            SELECT
                id, sale_id,
                subtotal_cents, discount_type, discount_value,
                discount_amount_cents, total_amount_cents,
                payment_received_cents, change_amount_cents,
                payment_status, created_at, updated_at
            FROM sales
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(sale)
    }

    /// Gets a sale by its business identifier (`SALE-...`).
    pub async fn get_by_sale_id(&self, sale_id: &str) -> DbResult<Option<Sale>> {
        let sale = sqlx::query_as::<_, Sale>(
            r#"
            SELECT
                id, sale_id,
                subtotal_cents, discount_type, discount_value,
                discount_amount_cents, total_amount_cents,
                payment_received_cents, change_amount_cents,
                payment_status, created_at, updated_at
            FROM sales
            WHERE sale_id = ?1
            "#,
        )
        .bind(sale_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(sale)
    }

    /// Gets all items for a sale, in insertion order.
    pub async fn get_items(&self, sale_uuid: &str) -> DbResult<Vec<SaleItem>> {
        let items = sqlx::query_as::<_, SaleItem>(
            r#"
            SELECT
                id, sale_id, product_name,
                unit_price_cents, quantity, total_price_cents,
                created_at
            FROM sale_items
            WHERE sale_id = ?1
            ORDER BY created_at, id
            "#,
        )
        .bind(sale_uuid)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Lists all sales as summaries (newest first) with their item counts.
    pub async fn list(&self) -> DbResult<Vec<SaleSummary>> {
        let summaries = sqlx::query_as::<_, SaleSummary>(
            r#"
            SELECT
                s.id, s.sale_id, s.total_amount_cents, s.payment_status,
                s.created_at,
                (SELECT COUNT(*) FROM sale_items i WHERE i.sale_id = s.id)
                    AS items_count
            FROM sales s
            ORDER BY s.created_at DESC, s.sale_id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(summaries)
    }

    /// Updates a sale's payment status, refreshing `updated_at`.
    ///
    /// No transition graph is enforced: any status may replace any other.
    pub async fn update_status(
        &self,
        id: &str,
        status: PaymentStatus,
        now: DateTime<Utc>,
    ) -> DbResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE sales SET
                payment_status = ?2,
                updated_at = ?3
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(status)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Sale", id));
        }

        Ok(())
    }

    /// Deletes a sale. Its items go with it (ON DELETE CASCADE).
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting sale");

        let result = sqlx::query("DELETE FROM sales WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Sale", id));
        }

        Ok(())
    }

    /// Counts all sales.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Sums `total_amount_cents` and counts sales with the given status in
    /// the half-open window `[from, to)`.
    ///
    /// An empty window is not an error: both aggregates coalesce to zero.
    pub async fn sum_and_count(
        &self,
        status: PaymentStatus,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> DbResult<(i64, i64)> {
        let (total, count): (i64, i64) = sqlx::query_as(
            r#"
            SELECT
                COALESCE(SUM(total_amount_cents), 0),
                COUNT(*)
            FROM sales
            WHERE payment_status = ?1
              AND created_at >= ?2
              AND created_at < ?3
            "#,
        )
        .bind(status)
        .bind(from)
        .bind(to)
        .fetch_one(&self.pool)
        .await?;

        Ok((total, count))
    }

    /// Counts items whose parent sale no longer exists. Always zero while
    /// the cascade holds; exists for tests and diagnostics.
    pub async fn orphan_item_count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM sale_items i
            WHERE NOT EXISTS (SELECT 1 FROM sales s WHERE s.id = i.sale_id)
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::TimeZone;
    use till_core::{DiscountType, PaymentStatus};
    use uuid::Uuid;

    fn sale_at(sale_id: &str, total_cents: i64, created_at: DateTime<Utc>) -> Sale {
        Sale {
            id: Uuid::new_v4().to_string(),
            sale_id: sale_id.to_string(),
            subtotal_cents: total_cents,
            discount_type: DiscountType::Percentage,
            discount_value: 0,
            discount_amount_cents: 0,
            total_amount_cents: total_cents,
            payment_received_cents: Some(total_cents),
            change_amount_cents: 0,
            payment_status: PaymentStatus::Completed,
            created_at,
            updated_at: created_at,
        }
    }

    fn item_for(sale: &Sale, name: &str, unit_price_cents: i64, quantity: i64) -> SaleItem {
        SaleItem {
            id: Uuid::new_v4().to_string(),
            sale_id: sale.id.clone(),
            product_name: name.to_string(),
            unit_price_cents,
            quantity,
            total_price_cents: unit_price_cents * quantity,
            created_at: sale.created_at,
        }
    }

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn ts(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, h, m, s).unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_get_round_trip() {
        let db = test_db().await;
        let sale = sale_at("SALE-20260301100000", 2500, ts(10, 0, 0));
        let items = vec![item_for(&sale, "Espresso", 500, 5)];

        db.sales().insert_sale(&sale, &items).await.unwrap();

        let fetched = db.sales().get_by_id(&sale.id).await.unwrap().unwrap();
        assert_eq!(fetched.sale_id, sale.sale_id);
        assert_eq!(fetched.total_amount_cents, 2500);
        assert_eq!(fetched.payment_status, PaymentStatus::Completed);

        let fetched_items = db.sales().get_items(&sale.id).await.unwrap();
        assert_eq!(fetched_items.len(), 1);
        assert_eq!(fetched_items[0].product_name, "Espresso");
        assert_eq!(fetched_items[0].total_price_cents, 2500);
    }

    #[tokio::test]
    async fn test_get_by_sale_id() {
        let db = test_db().await;
        let sale = sale_at("SALE-20260301100001", 100, ts(10, 0, 1));
        db.sales().insert_sale(&sale, &[]).await.unwrap();

        let fetched = db
            .sales()
            .get_by_sale_id("SALE-20260301100001")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched.id, sale.id);

        assert!(db
            .sales()
            .get_by_sale_id("SALE-19700101000000")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_duplicate_sale_id_rejected_atomically() {
        let db = test_db().await;
        let first = sale_at("SALE-20260301100000", 1000, ts(10, 0, 0));
        db.sales()
            .insert_sale(&first, &[item_for(&first, "A", 1000, 1)])
            .await
            .unwrap();

        let second = sale_at("SALE-20260301100000", 2000, ts(10, 0, 0));
        let err = db
            .sales()
            .insert_sale(&second, &[item_for(&second, "B", 2000, 1)])
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::DuplicateSaleId { ref sale_id } if sale_id == "SALE-20260301100000"));

        // The losing transaction wrote nothing
        assert_eq!(db.sales().count().await.unwrap(), 1);
        assert!(db.sales().get_by_id(&second.id).await.unwrap().is_none());
        assert!(db.sales().get_items(&second.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_newest_first_with_item_counts() {
        let db = test_db().await;
        let older = sale_at("SALE-20260301090000", 500, ts(9, 0, 0));
        let newer = sale_at("SALE-20260301110000", 700, ts(11, 0, 0));
        db.sales()
            .insert_sale(&older, &[item_for(&older, "A", 500, 1)])
            .await
            .unwrap();
        db.sales()
            .insert_sale(
                &newer,
                &[item_for(&newer, "B", 200, 2), item_for(&newer, "C", 300, 1)],
            )
            .await
            .unwrap();

        let listing = db.sales().list().await.unwrap();
        assert_eq!(listing.len(), 2);
        assert_eq!(listing[0].sale_id, "SALE-20260301110000");
        assert_eq!(listing[0].items_count, 2);
        assert_eq!(listing[1].sale_id, "SALE-20260301090000");
        assert_eq!(listing[1].items_count, 1);
    }

    #[tokio::test]
    async fn test_update_status_refreshes_updated_at() {
        let db = test_db().await;
        let sale = sale_at("SALE-20260301100000", 100, ts(10, 0, 0));
        db.sales().insert_sale(&sale, &[]).await.unwrap();

        let later = ts(12, 30, 0);
        db.sales()
            .update_status(&sale.id, PaymentStatus::Cancelled, later)
            .await
            .unwrap();

        let fetched = db.sales().get_by_id(&sale.id).await.unwrap().unwrap();
        assert_eq!(fetched.payment_status, PaymentStatus::Cancelled);
        assert_eq!(fetched.updated_at, later);
        // created_at is untouched
        assert_eq!(fetched.created_at, sale.created_at);
    }

    #[tokio::test]
    async fn test_update_status_missing_sale() {
        let db = test_db().await;
        let err = db
            .sales()
            .update_status("no-such-id", PaymentStatus::Completed, ts(10, 0, 0))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_cascades_to_items() {
        let db = test_db().await;
        let sale = sale_at("SALE-20260301100000", 900, ts(10, 0, 0));
        let items = vec![
            item_for(&sale, "A", 300, 1),
            item_for(&sale, "B", 300, 2),
        ];
        db.sales().insert_sale(&sale, &items).await.unwrap();

        db.sales().delete(&sale.id).await.unwrap();

        assert!(db.sales().get_by_id(&sale.id).await.unwrap().is_none());
        assert!(db.sales().get_items(&sale.id).await.unwrap().is_empty());
        assert_eq!(db.sales().orphan_item_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_missing_sale() {
        let db = test_db().await;
        let err = db.sales().delete("no-such-id").await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_sum_and_count_filters_status_and_window() {
        let db = test_db().await;

        // In window, completed
        let a = sale_at("SALE-20260301100000", 1000, ts(10, 0, 0));
        // In window, but pending
        let mut b = sale_at("SALE-20260301100500", 2000, ts(10, 5, 0));
        b.payment_status = PaymentStatus::Pending;
        // Completed, but after the window
        let c = sale_at("SALE-20260301230000", 4000, ts(23, 0, 0));
        for (sale, items) in [(&a, vec![]), (&b, vec![]), (&c, vec![])] {
            db.sales().insert_sale(sale, &items).await.unwrap();
        }

        let (total, count) = db
            .sales()
            .sum_and_count(PaymentStatus::Completed, ts(0, 0, 0), ts(12, 0, 0))
            .await
            .unwrap();
        assert_eq!(total, 1000);
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_sum_and_count_empty_window_is_zero() {
        let db = test_db().await;
        let (total, count) = db
            .sales()
            .sum_and_count(PaymentStatus::Completed, ts(0, 0, 0), ts(23, 59, 59))
            .await
            .unwrap();
        assert_eq!(total, 0);
        assert_eq!(count, 0);
    }
}
