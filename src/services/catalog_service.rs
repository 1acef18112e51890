use crate::error::{AppError, AppResult, RepositoryError};
use crate::models::{MenuFilter, MenuItem, MenuItemInput};
use crate::repositories::CatalogStore;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Catalog queries and catalog management
pub struct CatalogService {
    store: Arc<dyn CatalogStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    /// Search the menu. All filters are optional and combined with AND;
    /// results are ordered by ascending id.
    pub async fn search(
        &self,
        name_contains: Option<&str>,
        category: Option<&str>,
        min_price: Option<Decimal>,
        max_price: Option<Decimal>,
    ) -> AppResult<Vec<MenuItem>> {
        let filter = MenuFilter::new(name_contains, category, min_price, max_price)?;
        debug!(?filter, "Searching menu");

        let items = self.store.search(&filter).await?;
        Ok(items)
    }

    pub async fn get_menu_item(&self, id: i32) -> AppResult<MenuItem> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Menu item {} not found", id)))
    }

    pub async fn create_menu_item(&self, input: &MenuItemInput) -> AppResult<MenuItem> {
        input.validate()?;

        let item = self.store.create(&input.normalized()).await?;
        info!(menu_item_id = item.id, name = %item.name, price = %item.price, "Menu item created");
        Ok(item)
    }

    /// Full replacement. Already placed orders keep their own price snapshot.
    pub async fn update_menu_item(&self, id: i32, input: &MenuItemInput) -> AppResult<MenuItem> {
        input.validate()?;

        let item = self
            .store
            .update(id, &input.normalized())
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Menu item {} not found", id)))?;
        info!(menu_item_id = item.id, price = %item.price, "Menu item updated");
        Ok(item)
    }

    /// Refused with a conflict while any order item references the item
    pub async fn delete_menu_item(&self, id: i32) -> AppResult<()> {
        match self.store.delete(id).await {
            Ok(true) => {
                info!(menu_item_id = id, "Menu item deleted");
                Ok(())
            }
            Ok(false) => Err(AppError::NotFound(format!("Menu item {} not found", id))),
            Err(RepositoryError::ConstraintViolation(detail)) => {
                warn!(menu_item_id = id, %detail, "Menu item delete blocked by existing orders");
                Err(AppError::Conflict(format!(
                    "Menu item {} is referenced by existing orders and cannot be deleted.",
                    id
                )))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Number of catalog entries
    pub async fn count(&self) -> AppResult<i64> {
        Ok(self.store.count().await?)
    }
}
