//! Store seams for the catalog and the order book.
//!
//! The Postgres repositories are used by the running service; `InMemoryStore`
//! enforces the same referential rules and backs tests and local runs.

pub mod memory;
pub mod menu_item_repository;
pub mod order_repository;

// Re-export all repositories for convenient access
pub use memory::InMemoryStore;
pub use menu_item_repository::MenuItemRepository;
pub use order_repository::OrderRepository;

use crate::error::RepositoryResult;
use crate::models::{
    MenuFilter, MenuItem, MenuItemInput, NewOrder, Order, OrderItem, OrderSummary, PlacedOrder,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Durable collection of menu items
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Items matching every filter predicate, ascending by id
    async fn search(&self, filter: &MenuFilter) -> RepositoryResult<Vec<MenuItem>>;

    async fn find_by_id(&self, id: i32) -> RepositoryResult<Option<MenuItem>>;

    /// Batch lookup; unknown ids are simply absent from the result
    async fn find_by_ids(&self, ids: &[i32]) -> RepositoryResult<Vec<MenuItem>>;

    async fn count(&self) -> RepositoryResult<i64>;

    async fn create(&self, input: &MenuItemInput) -> RepositoryResult<MenuItem>;

    /// Full replacement; `None` when the id does not exist
    async fn update(&self, id: i32, input: &MenuItemInput) -> RepositoryResult<Option<MenuItem>>;

    /// `Ok(false)` when the id does not exist. Fails with
    /// `RepositoryError::ConstraintViolation` while any order item references it.
    async fn delete(&self, id: i32) -> RepositoryResult<bool>;
}

/// Durable collection of orders and their priced items
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Commit the order and all of its items as one unit
    async fn insert_order(&self, order: &NewOrder) -> RepositoryResult<PlacedOrder>;

    /// Newest first by id
    async fn list_summaries(&self) -> RepositoryResult<Vec<OrderSummary>>;

    async fn find_order(&self, id: i32) -> RepositoryResult<Option<Order>>;

    /// Items of one order in insertion order
    async fn items_for_order(&self, order_id: i32) -> RepositoryResult<Vec<OrderItem>>;

    /// Orders with `start <= created_at < end`
    async fn orders_created_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> RepositoryResult<Vec<Order>>;

    async fn items_for_orders(&self, order_ids: &[i32]) -> RepositoryResult<Vec<OrderItem>>;
}
