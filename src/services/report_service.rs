use crate::error::{AppError, AppResult};
use crate::models::report::UNKNOWN_ITEM_NAME;
use crate::models::{DailyReport, OrderItem, TopItem};
use crate::repositories::{CatalogStore, OrderStore};
use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::debug;

/// Accepted textual date format for reports
pub const REPORT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Number of best sellers in a daily report
pub const TOP_ITEMS_LIMIT: usize = 3;

/// Exactly `dddd-dd-dd`; chrono alone also takes `2024-1-5` and `+2024-01-15`
fn has_date_shape(raw: &str) -> bool {
    raw.len() == 10
        && raw.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// Parse the report date; absent, blank and malformed input are rejected
pub fn parse_report_date(raw: Option<&str>) -> AppResult<NaiveDate> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty()).ok_or_else(|| {
        AppError::validation("date", "date is required. Use format YYYY-MM-DD.")
    })?;

    let invalid = || AppError::validation("date", "Invalid date. Use format YYYY-MM-DD.");
    if !has_date_shape(raw) {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(raw, REPORT_DATE_FORMAT).map_err(|_| invalid())
}

/// Half-open UTC day `[date 00:00, date+1 00:00)`
pub fn reporting_window(date: NaiveDate) -> AppResult<(DateTime<Utc>, DateTime<Utc>)> {
    let next = date
        .checked_add_days(Days::new(1))
        .ok_or_else(|| AppError::validation("date", "date is out of range."))?;

    Ok((
        date.and_time(NaiveTime::MIN).and_utc(),
        next.and_time(NaiveTime::MIN).and_utc(),
    ))
}

/// Summed quantity per menu item, highest first. Equal quantities are
/// ordered by ascending menu item id.
pub fn top_sellers(items: &[OrderItem], limit: usize) -> Vec<(i32, i64)> {
    let mut totals: BTreeMap<i32, i64> = BTreeMap::new();
    for item in items {
        *totals.entry(item.menu_item_id).or_insert(0) += i64::from(item.quantity);
    }

    let mut ranked: Vec<(i32, i64)> = totals.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    ranked.truncate(limit);
    ranked
}

/// Daily revenue and best-seller aggregation
pub struct ReportService {
    catalog: Arc<dyn CatalogStore>,
    orders: Arc<dyn OrderStore>,
}

impl ReportService {
    pub fn new(catalog: Arc<dyn CatalogStore>, orders: Arc<dyn OrderStore>) -> Self {
        Self { catalog, orders }
    }

    pub async fn daily_report(&self, date: Option<&str>) -> AppResult<DailyReport> {
        let date = parse_report_date(date)?;
        let (start, end) = reporting_window(date)?;
        debug!(%date, %start, %end, "Building daily report");

        let orders = self.orders.orders_created_between(start, end).await?;
        let total_revenue: Decimal = orders.iter().map(|order| order.total_amount).sum();

        let order_ids: Vec<i32> = orders.iter().map(|order| order.id).collect();
        let items = self.orders.items_for_orders(&order_ids).await?;
        let ranked = top_sellers(&items, TOP_ITEMS_LIMIT);

        // Current display names, looked up by id
        let top_ids: Vec<i32> = ranked.iter().map(|(id, _)| *id).collect();
        let names: HashMap<i32, String> = self
            .catalog
            .find_by_ids(&top_ids)
            .await?
            .into_iter()
            .map(|item| (item.id, item.name))
            .collect();

        let top_items = ranked
            .into_iter()
            .map(|(menu_item_id, quantity)| TopItem {
                menu_item_id,
                name: names
                    .get(&menu_item_id)
                    .cloned()
                    .unwrap_or_else(|| UNKNOWN_ITEM_NAME.to_string()),
                quantity,
            })
            .collect();

        Ok(DailyReport {
            date,
            order_count: orders.len() as i64,
            total_revenue,
            top_items,
        })
    }
}
