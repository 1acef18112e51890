//! Domain models for the restaurant backend.
//!
//! Database rows (`MenuItem`, `Order`, `OrderItem`), the inputs accepted by
//! the services, and the projections handed back to the transport shell.

pub mod menu_item;
pub mod order;
pub mod report;

// Re-export all models for convenient access
pub use menu_item::{MenuFilter, MenuItem, MenuItemInput, MAX_PRICE};
pub use order::{
    CreateOrderRequest, NewOrder, NewOrderItem, Order, OrderCreated, OrderDetails, OrderItem,
    OrderItemDetails, OrderLineRequest, OrderSummary, PlacedOrder, MAX_QUANTITY,
};
pub use report::{DailyReport, TopItem};

use rust_decimal::Decimal;

/// Money amounts carry exactly two decimal places
pub const MONEY_SCALE: u32 = 2;

/// Rescale a validated amount to the fixed money scale
pub fn to_money(mut amount: Decimal) -> Decimal {
    amount.rescale(MONEY_SCALE);
    amount
}
