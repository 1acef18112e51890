use crate::error::ValidationErrors;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::HashSet;

/// Largest quantity accepted on a single line
pub const MAX_QUANTITY: i32 = 1000;

/// Persisted order header; immutable after creation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i32,
    pub created_at: DateTime<Utc>,
    pub total_amount: Decimal, // NUMERIC(18, 2)
}

/// Priced line snapshot. `unit_price` is the catalog price at creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: i32,
    pub order_id: i32,
    pub menu_item_id: i32,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub line_total: Decimal,
}

impl OrderItem {
    /// `line_total == unit_price * quantity`
    pub fn is_consistent(&self) -> bool {
        self.line_total == self.unit_price * Decimal::from(self.quantity)
    }
}

/// One requested line of a new order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineRequest {
    pub menu_item_id: i32,
    pub quantity: i32,
}

impl OrderLineRequest {
    pub fn new(menu_item_id: i32, quantity: i32) -> Self {
        Self {
            menu_item_id,
            quantity,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    #[serde(default)]
    pub items: Vec<OrderLineRequest>,
}

impl CreateOrderRequest {
    pub fn new(items: Vec<OrderLineRequest>) -> Self {
        Self { items }
    }

    /// Structural and duplicate-line checks. Every violation is reported.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.items.is_empty() {
            errors.add("items", "At least one order item is required.");
        }

        for (index, line) in self.items.iter().enumerate() {
            if line.menu_item_id <= 0 {
                errors.add(
                    format!("items[{}].menuItemId", index),
                    "MenuItemId must be greater than 0.",
                );
            }
            if line.quantity <= 0 {
                errors.add(
                    format!("items[{}].quantity", index),
                    "Quantity must be greater than 0.",
                );
            } else if line.quantity > MAX_QUANTITY {
                errors.add(
                    format!("items[{}].quantity", index),
                    "Quantity must be 1000 or less.",
                );
            }
        }

        let mut seen = HashSet::new();
        let has_duplicates = self
            .items
            .iter()
            .filter(|line| line.menu_item_id > 0)
            .any(|line| !seen.insert(line.menu_item_id));
        if has_duplicates {
            errors.add(
                "items",
                "Duplicate MenuItemId(s) found. Combine quantities into one line.",
            );
        }

        errors.into_result()
    }

    /// Distinct menu item ids in first-seen order
    pub fn distinct_menu_item_ids(&self) -> Vec<i32> {
        let mut seen = HashSet::new();
        self.items
            .iter()
            .map(|line| line.menu_item_id)
            .filter(|id| seen.insert(*id))
            .collect()
    }
}

/// A fully priced order ready to be committed as one unit
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub created_at: DateTime<Utc>,
    pub total_amount: Decimal,
    pub items: Vec<NewOrderItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewOrderItem {
    pub menu_item_id: i32,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub line_total: Decimal,
}

/// An order as committed, with its items in insertion order
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedOrder {
    pub order: Order,
    pub items: Vec<OrderItem>,
}

/// Response to a successful order submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreated {
    pub id: i32,
    pub created_at: DateTime<Utc>,
    pub total_amount: Decimal,
}

impl From<&Order> for OrderCreated {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id,
            created_at: order.created_at,
            total_amount: order.total_amount,
        }
    }
}

/// Order list entry; `item_count` is the sum of line quantities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub id: i32,
    pub created_at: DateTime<Utc>,
    pub item_count: i64,
    pub total_amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemDetails {
    pub menu_item_id: i32,
    pub menu_item_name: String,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub line_total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetails {
    pub id: i32,
    pub created_at: DateTime<Utc>,
    pub total_amount: Decimal,
    pub items: Vec<OrderItemDetails>,
}
