//! Restaurant Backend Library
//!
//! Menu catalog queries, server-side order pricing with an immutable price
//! snapshot per line, and daily sales reports. The HTTP shell in [`api`] is a
//! thin layer over the services.

pub mod api;
pub mod config;
pub mod database;
pub mod error;
pub mod models;
pub mod repositories;
pub mod services;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::{AppError, AppResult, RepositoryError, ValidationErrors};

use database::Database;
use repositories::{CatalogStore, InMemoryStore, MenuItemRepository, OrderRepository, OrderStore};
use services::{CatalogService, OrderService, ReportService};
use std::sync::Arc;

/// Application state containing all services
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogService>,
    pub orders: Arc<OrderService>,
    pub reports: Arc<ReportService>,
    /// Include internal error messages in responses (development only)
    pub expose_internal_errors: bool,
}

impl AppState {
    /// Wire the services over the given stores
    pub fn new(catalog_store: Arc<dyn CatalogStore>, order_store: Arc<dyn OrderStore>) -> Self {
        Self {
            catalog: Arc::new(CatalogService::new(catalog_store.clone())),
            orders: Arc::new(OrderService::new(catalog_store.clone(), order_store.clone())),
            reports: Arc::new(ReportService::new(catalog_store, order_store)),
            expose_internal_errors: false,
        }
    }

    /// Postgres-backed state
    pub fn from_database(database: &Database) -> Self {
        let pool = database.pool().clone();
        Self::new(
            Arc::new(MenuItemRepository::new(pool.clone())),
            Arc::new(OrderRepository::new(pool)),
        )
    }

    /// State over a fresh in-memory store
    pub fn in_memory() -> Self {
        let store = Arc::new(InMemoryStore::new());
        Self::new(store.clone(), store)
    }

    pub fn with_internal_error_details(mut self, expose: bool) -> Self {
        self.expose_internal_errors = expose;
        self
    }
}
