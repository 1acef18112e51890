use crate::error::RepositoryResult;
use crate::models::{MenuFilter, MenuItem, MenuItemInput};
use crate::repositories::CatalogStore;
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

const MENU_ITEM_COLUMNS: &str = "id, name, category, description, price, is_available";

/// Repository for menu item data access
pub struct MenuItemRepository {
    pool: PgPool,
}

impl MenuItemRepository {
    /// Create a new MenuItemRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogStore for MenuItemRepository {
    async fn search(&self, filter: &MenuFilter) -> RepositoryResult<Vec<MenuItem>> {
        let mut query: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "SELECT {} FROM menu_items WHERE TRUE",
            MENU_ITEM_COLUMNS
        ));

        if let Some(needle) = &filter.name_contains {
            query
                .push(" AND POSITION(")
                .push_bind(needle.clone())
                .push(" IN LOWER(name)) > 0");
        }
        if let Some(category) = &filter.category {
            query
                .push(" AND LOWER(category) = ")
                .push_bind(category.clone());
        }
        if let Some(min) = filter.min_price {
            query.push(" AND price >= ").push_bind(min);
        }
        if let Some(max) = filter.max_price {
            query.push(" AND price <= ").push_bind(max);
        }
        query.push(" ORDER BY id");

        let items = query
            .build_query_as::<MenuItem>()
            .fetch_all(&self.pool)
            .await?;
        Ok(items)
    }

    async fn find_by_id(&self, id: i32) -> RepositoryResult<Option<MenuItem>> {
        let item = sqlx::query_as::<_, MenuItem>(&format!(
            "SELECT {} FROM menu_items WHERE id = $1",
            MENU_ITEM_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(item)
    }

    async fn find_by_ids(&self, ids: &[i32]) -> RepositoryResult<Vec<MenuItem>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let items = sqlx::query_as::<_, MenuItem>(&format!(
            "SELECT {} FROM menu_items WHERE id = ANY($1) ORDER BY id",
            MENU_ITEM_COLUMNS
        ))
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    async fn count(&self) -> RepositoryResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM menu_items")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn create(&self, input: &MenuItemInput) -> RepositoryResult<MenuItem> {
        let item = sqlx::query_as::<_, MenuItem>(&format!(
            r#"
            INSERT INTO menu_items (name, category, description, price, is_available)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            MENU_ITEM_COLUMNS
        ))
        .bind(&input.name)
        .bind(&input.category)
        .bind(&input.description)
        .bind(input.price)
        .bind(input.is_available)
        .fetch_one(&self.pool)
        .await?;
        Ok(item)
    }

    async fn update(&self, id: i32, input: &MenuItemInput) -> RepositoryResult<Option<MenuItem>> {
        let item = sqlx::query_as::<_, MenuItem>(&format!(
            r#"
            UPDATE menu_items
            SET name = $2, category = $3, description = $4, price = $5, is_available = $6
            WHERE id = $1
            RETURNING {}
            "#,
            MENU_ITEM_COLUMNS
        ))
        .bind(id)
        .bind(&input.name)
        .bind(&input.category)
        .bind(&input.description)
        .bind(input.price)
        .bind(input.is_available)
        .fetch_optional(&self.pool)
        .await?;
        Ok(item)
    }

    async fn delete(&self, id: i32) -> RepositoryResult<bool> {
        // ON DELETE RESTRICT surfaces as SQLSTATE 23503 -> ConstraintViolation
        let result = sqlx::query("DELETE FROM menu_items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
