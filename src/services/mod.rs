pub mod catalog_service;
pub mod order_service;
pub mod report_service;

pub use catalog_service::CatalogService;
pub use order_service::{price_order, OrderService};
pub use report_service::{parse_report_date, reporting_window, top_sellers, ReportService};
