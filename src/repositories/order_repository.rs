use crate::error::RepositoryResult;
use crate::models::{NewOrder, Order, OrderItem, OrderSummary, PlacedOrder};
use crate::repositories::OrderStore;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

const ORDER_ITEM_COLUMNS: &str = "id, order_id, menu_item_id, quantity, unit_price, line_total";

/// Repository for orders and their line items
pub struct OrderRepository {
    pool: PgPool,
}

impl OrderRepository {
    /// Create a new OrderRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderStore for OrderRepository {
    async fn insert_order(&self, new_order: &NewOrder) -> RepositoryResult<PlacedOrder> {
        // Start transaction; dropping it on any error rolls everything back
        let mut tx = self.pool.begin().await?;

        let order = sqlx::query_as::<_, Order>(
            r#"
            INSERT INTO orders (created_at, total_amount)
            VALUES ($1, $2)
            RETURNING id, created_at, total_amount
            "#,
        )
        .bind(new_order.created_at)
        .bind(new_order.total_amount)
        .fetch_one(&mut *tx)
        .await?;

        let insert_item = format!(
            r#"
            INSERT INTO order_items (order_id, menu_item_id, quantity, unit_price, line_total)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            ORDER_ITEM_COLUMNS
        );

        let mut items = Vec::with_capacity(new_order.items.len());
        for line in &new_order.items {
            let item = sqlx::query_as::<_, OrderItem>(&insert_item)
                .bind(order.id)
                .bind(line.menu_item_id)
                .bind(line.quantity)
                .bind(line.unit_price)
                .bind(line.line_total)
                .fetch_one(&mut *tx)
                .await?;
            items.push(item);
        }

        tx.commit().await?;

        Ok(PlacedOrder { order, items })
    }

    async fn list_summaries(&self) -> RepositoryResult<Vec<OrderSummary>> {
        let summaries = sqlx::query_as::<_, OrderSummary>(
            r#"
            SELECT
                o.id,
                o.created_at,
                COALESCE(SUM(oi.quantity), 0)::BIGINT AS item_count,
                o.total_amount
            FROM orders o
            LEFT JOIN order_items oi ON oi.order_id = o.id
            GROUP BY o.id, o.created_at, o.total_amount
            ORDER BY o.id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(summaries)
    }

    async fn find_order(&self, id: i32) -> RepositoryResult<Option<Order>> {
        let order = sqlx::query_as::<_, Order>(
            "SELECT id, created_at, total_amount FROM orders WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(order)
    }

    async fn items_for_order(&self, order_id: i32) -> RepositoryResult<Vec<OrderItem>> {
        let items = sqlx::query_as::<_, OrderItem>(&format!(
            "SELECT {} FROM order_items WHERE order_id = $1 ORDER BY id",
            ORDER_ITEM_COLUMNS
        ))
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    async fn orders_created_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> RepositoryResult<Vec<Order>> {
        let orders = sqlx::query_as::<_, Order>(
            r#"
            SELECT id, created_at, total_amount
            FROM orders
            WHERE created_at >= $1 AND created_at < $2
            ORDER BY id
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;
        Ok(orders)
    }

    async fn items_for_orders(&self, order_ids: &[i32]) -> RepositoryResult<Vec<OrderItem>> {
        if order_ids.is_empty() {
            return Ok(Vec::new());
        }

        let items = sqlx::query_as::<_, OrderItem>(&format!(
            "SELECT {} FROM order_items WHERE order_id = ANY($1) ORDER BY id",
            ORDER_ITEM_COLUMNS
        ))
        .bind(order_ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }
}
