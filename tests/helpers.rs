#![allow(dead_code)]

use async_trait::async_trait;
use restaurant_backend::error::RepositoryResult;
use restaurant_backend::models::*;
use restaurant_backend::repositories::{CatalogStore, InMemoryStore};
use restaurant_backend::AppState;
use rust_decimal::Decimal;
use std::sync::Arc;

/// Services wired over one shared in-memory store
pub struct TestApp {
    pub store: Arc<InMemoryStore>,
    pub state: AppState,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(InMemoryStore::new());
        let state = AppState::new(store.clone(), store.clone());
        Self { store, state }
    }

    /// Catalog with item A (10.00) and item B (5.50); returns their ids
    pub async fn with_two_items() -> (Self, i32, i32) {
        let app = Self::new();
        let a = app.create_item("Item A", "Test", money(1000)).await;
        let b = app.create_item("Item B", "Test", money(550)).await;
        (app, a.id, b.id)
    }

    pub async fn create_item(&self, name: &str, category: &str, price: Decimal) -> MenuItem {
        self.state
            .catalog
            .create_menu_item(&MenuItemInput::new(name, category, price))
            .await
            .expect("Failed to create menu item")
    }

    pub async fn place(&self, lines: &[(i32, i32)]) -> OrderCreated {
        self.state
            .orders
            .create_order(&order_request(lines))
            .await
            .expect("Failed to create order")
    }
}

/// Amount from cents
pub fn money(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

pub fn order_request(lines: &[(i32, i32)]) -> CreateOrderRequest {
    CreateOrderRequest::new(
        lines
            .iter()
            .map(|&(menu_item_id, quantity)| OrderLineRequest::new(menu_item_id, quantity))
            .collect(),
    )
}

/// Catalog that loses every item right after it has been looked up, the way
/// a concurrent delete between lookup and commit would.
pub struct VanishingCatalog {
    pub inner: Arc<InMemoryStore>,
}

#[async_trait]
impl CatalogStore for VanishingCatalog {
    async fn search(&self, filter: &MenuFilter) -> RepositoryResult<Vec<MenuItem>> {
        self.inner.search(filter).await
    }

    async fn find_by_id(&self, id: i32) -> RepositoryResult<Option<MenuItem>> {
        self.inner.find_by_id(id).await
    }

    async fn find_by_ids(&self, ids: &[i32]) -> RepositoryResult<Vec<MenuItem>> {
        let found = self.inner.find_by_ids(ids).await?;
        for item in &found {
            self.inner.delete(item.id).await?;
        }
        Ok(found)
    }

    async fn count(&self) -> RepositoryResult<i64> {
        self.inner.count().await
    }

    async fn create(&self, input: &MenuItemInput) -> RepositoryResult<MenuItem> {
        self.inner.create(input).await
    }

    async fn update(&self, id: i32, input: &MenuItemInput) -> RepositoryResult<Option<MenuItem>> {
        self.inner.update(id, input).await
    }

    async fn delete(&self, id: i32) -> RepositoryResult<bool> {
        self.inner.delete(id).await
    }
}
