use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Label used when a top seller can no longer be resolved in the catalog
pub const UNKNOWN_ITEM_NAME: &str = "(unknown)";

/// Best-selling item for a reporting day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopItem {
    pub menu_item_id: i32,
    pub name: String,
    pub quantity: i64,
}

/// Aggregates over orders created in `[date 00:00 UTC, date+1 00:00 UTC)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyReport {
    pub date: NaiveDate,
    pub order_count: i64,
    pub total_revenue: Decimal,
    pub top_items: Vec<TopItem>,
}
