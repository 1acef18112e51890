use crate::error::{AppError, AppResult, RepositoryError, ValidationErrors};
use crate::models::report::UNKNOWN_ITEM_NAME;
use crate::models::{
    CreateOrderRequest, MenuItem, NewOrder, NewOrderItem, OrderCreated, OrderDetails,
    OrderItemDetails, OrderLineRequest, OrderSummary,
};
use crate::repositories::{CatalogStore, OrderStore};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{info, warn};

/// Validates, prices and persists orders; serves order reads
pub struct OrderService {
    catalog: Arc<dyn CatalogStore>,
    orders: Arc<dyn OrderStore>,
}

/// Price each line at the given catalog state, in request order.
///
/// Availability is informational only and does not block ordering.
pub fn price_order(
    lines: &[OrderLineRequest],
    catalog: &HashMap<i32, MenuItem>,
    created_at: DateTime<Utc>,
) -> AppResult<NewOrder> {
    let mut total_amount = Decimal::ZERO;
    let mut items = Vec::with_capacity(lines.len());

    for line in lines {
        let menu_item = catalog.get(&line.menu_item_id).ok_or_else(|| {
            AppError::Internal(format!(
                "menu item {} was not resolved before pricing",
                line.menu_item_id
            ))
        })?;

        let unit_price = menu_item.price;
        let line_total = unit_price * Decimal::from(line.quantity);
        total_amount += line_total;

        items.push(NewOrderItem {
            menu_item_id: menu_item.id,
            quantity: line.quantity,
            unit_price,
            line_total,
        });
    }

    Ok(NewOrder {
        created_at,
        total_amount,
        items,
    })
}

impl OrderService {
    pub fn new(catalog: Arc<dyn CatalogStore>, orders: Arc<dyn OrderStore>) -> Self {
        Self { catalog, orders }
    }

    /// Create an order from the requested lines.
    ///
    /// Either the order and every item are committed, or nothing is.
    pub async fn create_order(&self, request: &CreateOrderRequest) -> AppResult<OrderCreated> {
        if let Err(errors) = request.validate() {
            warn!(%errors, "Order request rejected");
            return Err(AppError::Validation(errors));
        }

        // One batch lookup for every distinct id
        let ids = request.distinct_menu_item_ids();
        let catalog: HashMap<i32, MenuItem> = self
            .catalog
            .find_by_ids(&ids)
            .await?
            .into_iter()
            .map(|item| (item.id, item))
            .collect();

        let missing: Vec<String> = ids
            .iter()
            .filter(|id| !catalog.contains_key(id))
            .map(|id| id.to_string())
            .collect();
        if !missing.is_empty() {
            warn!(missing = %missing.join(", "), "Order references unknown menu items");
            return Err(AppError::Validation(ValidationErrors::single(
                "items",
                format!("Menu item(s) not found: {}", missing.join(", ")),
            )));
        }

        let new_order = price_order(&request.items, &catalog, Utc::now())?;

        let placed = self
            .orders
            .insert_order(&new_order)
            .await
            .map_err(|e| match e {
                RepositoryError::ConstraintViolation(detail) | RepositoryError::Duplicate(detail) => {
                    warn!(%detail, "Order commit hit a store conflict");
                    AppError::Conflict(
                        "Your order could not be saved due to a conflicting catalog change. Please retry."
                            .to_string(),
                    )
                }
                other => other.into(),
            })?;

        info!(
            order_id = placed.order.id,
            lines = placed.items.len(),
            total = %placed.order.total_amount,
            "Order created"
        );

        Ok(OrderCreated::from(&placed.order))
    }

    /// Order summaries, newest first
    pub async fn list_orders(&self) -> AppResult<Vec<OrderSummary>> {
        Ok(self.orders.list_summaries().await?)
    }

    /// Order with its items; names are resolved from the catalog at read time
    pub async fn get_order(&self, id: i32) -> AppResult<OrderDetails> {
        let order = self
            .orders
            .find_order(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Order {} not found", id)))?;

        let items = self.orders.items_for_order(order.id).await?;

        let mut seen = HashSet::new();
        let menu_item_ids: Vec<i32> = items
            .iter()
            .map(|item| item.menu_item_id)
            .filter(|id| seen.insert(*id))
            .collect();
        let names: HashMap<i32, String> = self
            .catalog
            .find_by_ids(&menu_item_ids)
            .await?
            .into_iter()
            .map(|item| (item.id, item.name))
            .collect();

        let items = items
            .into_iter()
            .map(|item| OrderItemDetails {
                menu_item_id: item.menu_item_id,
                menu_item_name: names
                    .get(&item.menu_item_id)
                    .cloned()
                    .unwrap_or_else(|| UNKNOWN_ITEM_NAME.to_string()),
                quantity: item.quantity,
                unit_price: item.unit_price,
                line_total: item.line_total,
            })
            .collect();

        Ok(OrderDetails {
            id: order.id,
            created_at: order.created_at,
            total_amount: order.total_amount,
            items,
        })
    }
}
