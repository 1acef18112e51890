//! In-memory catalog and order store.
//!
//! All tables sit behind one lock, so every trait call is a single atomic
//! step. The foreign-key rules of the SQL schema are enforced by hand:
//! an order item may only point at an existing menu item, and a menu item
//! cannot be deleted while an order item points at it.

use crate::error::{RepositoryError, RepositoryResult};
use crate::models::{
    MenuFilter, MenuItem, MenuItemInput, NewOrder, Order, OrderItem, OrderSummary, PlacedOrder,
};
use crate::repositories::{CatalogStore, OrderStore};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::collections::{BTreeMap, HashSet};

#[derive(Default)]
struct Tables {
    menu_items: BTreeMap<i32, MenuItem>,
    orders: BTreeMap<i32, Order>,
    order_items: BTreeMap<i32, OrderItem>,
    // ids are monotonic and never reused
    last_menu_item_id: i32,
    last_order_id: i32,
    last_order_item_id: i32,
}

impl Tables {
    fn is_referenced(&self, menu_item_id: i32) -> bool {
        self.order_items
            .values()
            .any(|item| item.menu_item_id == menu_item_id)
    }
}

#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogStore for InMemoryStore {
    async fn search(&self, filter: &MenuFilter) -> RepositoryResult<Vec<MenuItem>> {
        let tables = self.tables.lock();
        Ok(tables
            .menu_items
            .values()
            .filter(|item| filter.matches(item))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: i32) -> RepositoryResult<Option<MenuItem>> {
        Ok(self.tables.lock().menu_items.get(&id).cloned())
    }

    async fn find_by_ids(&self, ids: &[i32]) -> RepositoryResult<Vec<MenuItem>> {
        let wanted: HashSet<i32> = ids.iter().copied().collect();
        let tables = self.tables.lock();
        Ok(tables
            .menu_items
            .values()
            .filter(|item| wanted.contains(&item.id))
            .cloned()
            .collect())
    }

    async fn count(&self) -> RepositoryResult<i64> {
        Ok(self.tables.lock().menu_items.len() as i64)
    }

    async fn create(&self, input: &MenuItemInput) -> RepositoryResult<MenuItem> {
        let mut tables = self.tables.lock();
        tables.last_menu_item_id += 1;
        let item = MenuItem {
            id: tables.last_menu_item_id,
            name: input.name.clone(),
            category: input.category.clone(),
            description: input.description.clone(),
            price: input.price,
            is_available: input.is_available,
        };
        tables.menu_items.insert(item.id, item.clone());
        Ok(item)
    }

    async fn update(&self, id: i32, input: &MenuItemInput) -> RepositoryResult<Option<MenuItem>> {
        let mut tables = self.tables.lock();
        let Some(item) = tables.menu_items.get_mut(&id) else {
            return Ok(None);
        };
        item.name = input.name.clone();
        item.category = input.category.clone();
        item.description = input.description.clone();
        item.price = input.price;
        item.is_available = input.is_available;
        Ok(Some(item.clone()))
    }

    async fn delete(&self, id: i32) -> RepositoryResult<bool> {
        let mut tables = self.tables.lock();
        if !tables.menu_items.contains_key(&id) {
            return Ok(false);
        }
        if tables.is_referenced(id) {
            return Err(RepositoryError::ConstraintViolation(format!(
                "menu item {} is referenced by existing order items",
                id
            )));
        }
        tables.menu_items.remove(&id);
        Ok(true)
    }
}

#[async_trait]
impl OrderStore for InMemoryStore {
    async fn insert_order(&self, new_order: &NewOrder) -> RepositoryResult<PlacedOrder> {
        let mut tables = self.tables.lock();

        // Check every reference before writing anything
        if let Some(missing) = new_order
            .items
            .iter()
            .find(|line| !tables.menu_items.contains_key(&line.menu_item_id))
        {
            return Err(RepositoryError::ConstraintViolation(format!(
                "menu item {} does not exist",
                missing.menu_item_id
            )));
        }

        tables.last_order_id += 1;
        let order = Order {
            id: tables.last_order_id,
            created_at: new_order.created_at,
            total_amount: new_order.total_amount,
        };

        let mut items = Vec::with_capacity(new_order.items.len());
        for line in &new_order.items {
            tables.last_order_item_id += 1;
            items.push(OrderItem {
                id: tables.last_order_item_id,
                order_id: order.id,
                menu_item_id: line.menu_item_id,
                quantity: line.quantity,
                unit_price: line.unit_price,
                line_total: line.line_total,
            });
        }

        tables.orders.insert(order.id, order.clone());
        for item in &items {
            tables.order_items.insert(item.id, item.clone());
        }

        Ok(PlacedOrder { order, items })
    }

    async fn list_summaries(&self) -> RepositoryResult<Vec<OrderSummary>> {
        let tables = self.tables.lock();
        Ok(tables
            .orders
            .values()
            .rev()
            .map(|order| OrderSummary {
                id: order.id,
                created_at: order.created_at,
                item_count: tables
                    .order_items
                    .values()
                    .filter(|item| item.order_id == order.id)
                    .map(|item| i64::from(item.quantity))
                    .sum(),
                total_amount: order.total_amount,
            })
            .collect())
    }

    async fn find_order(&self, id: i32) -> RepositoryResult<Option<Order>> {
        Ok(self.tables.lock().orders.get(&id).cloned())
    }

    async fn items_for_order(&self, order_id: i32) -> RepositoryResult<Vec<OrderItem>> {
        let tables = self.tables.lock();
        Ok(tables
            .order_items
            .values()
            .filter(|item| item.order_id == order_id)
            .cloned()
            .collect())
    }

    async fn orders_created_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> RepositoryResult<Vec<Order>> {
        let tables = self.tables.lock();
        Ok(tables
            .orders
            .values()
            .filter(|order| order.created_at >= start && order.created_at < end)
            .cloned()
            .collect())
    }

    async fn items_for_orders(&self, order_ids: &[i32]) -> RepositoryResult<Vec<OrderItem>> {
        let wanted: HashSet<i32> = order_ids.iter().copied().collect();
        let tables = self.tables.lock();
        Ok(tables
            .order_items
            .values()
            .filter(|item| wanted.contains(&item.order_id))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewOrderItem;
    use rust_decimal::Decimal;

    fn new_order(menu_item_id: i32) -> NewOrder {
        NewOrder {
            created_at: Utc::now(),
            total_amount: Decimal::new(1000, 2),
            items: vec![NewOrderItem {
                menu_item_id,
                quantity: 1,
                unit_price: Decimal::new(1000, 2),
                line_total: Decimal::new(1000, 2),
            }],
        }
    }

    #[test]
    fn test_ids_are_never_reused() {
        tokio_test::block_on(async {
            let store = InMemoryStore::new();
            let first = store
                .create(&MenuItemInput::new("Tea", "Drink", Decimal::ONE))
                .await
                .unwrap();
            assert!(store.delete(first.id).await.unwrap());

            let second = store
                .create(&MenuItemInput::new("Coffee", "Drink", Decimal::ONE))
                .await
                .unwrap();
            assert!(second.id > first.id);
        });
    }

    #[test]
    fn test_insert_rejects_unknown_menu_item_and_writes_nothing() {
        tokio_test::block_on(async {
            let store = InMemoryStore::new();
            let err = store.insert_order(&new_order(42)).await.unwrap_err();
            assert!(matches!(err, RepositoryError::ConstraintViolation(_)));
            assert!(store.list_summaries().await.unwrap().is_empty());
        });
    }

    #[test]
    fn test_delete_restricted_while_referenced() {
        tokio_test::block_on(async {
            let store = InMemoryStore::new();
            let item = store
                .create(&MenuItemInput::new("Soup", "Starter", Decimal::new(590, 2)))
                .await
                .unwrap();
            store.insert_order(&new_order(item.id)).await.unwrap();

            let err = store.delete(item.id).await.unwrap_err();
            assert!(matches!(err, RepositoryError::ConstraintViolation(_)));
            assert!(store.find_by_id(item.id).await.unwrap().is_some());
            assert!(!store.delete(999).await.unwrap());
        });
    }
}
