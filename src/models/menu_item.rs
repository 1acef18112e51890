use crate::error::ValidationErrors;
use crate::models::{to_money, MONEY_SCALE};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub const MAX_NAME_LEN: usize = 100;
pub const MAX_CATEGORY_LEN: usize = 50;
pub const MAX_DESCRIPTION_LEN: usize = 400;

/// Upper bound for a catalog price
pub const MAX_PRICE: Decimal = Decimal::from_parts(100_000, 0, 0, false, 0);

/// A sellable catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: i32,
    pub name: String,
    pub category: String,
    pub description: Option<String>,
    pub price: Decimal, // NUMERIC(10, 2)
    pub is_available: bool,
}

fn default_available() -> bool {
    true
}

/// Create/update payload for a menu item (full replacement on update)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: String,
    pub description: Option<String>,
    pub price: Decimal,
    #[serde(default = "default_available")]
    pub is_available: bool,
}

impl MenuItemInput {
    pub fn new(name: &str, category: &str, price: Decimal) -> Self {
        Self {
            name: name.to_string(),
            category: category.to_string(),
            description: None,
            price,
            is_available: true,
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn unavailable(mut self) -> Self {
        self.is_available = false;
        self
    }

    /// Check every field rule, collecting all violations
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let name = self.name.trim();
        if name.is_empty() {
            errors.add("name", "Name is required.");
        } else if name.chars().count() > MAX_NAME_LEN {
            errors.add("name", "Name must be 100 characters or less.");
        }

        if self.category.trim().chars().count() > MAX_CATEGORY_LEN {
            errors.add("category", "Category must be 50 characters or less.");
        }

        if let Some(description) = &self.description {
            if description.trim().chars().count() > MAX_DESCRIPTION_LEN {
                errors.add("description", "Description must be 400 characters or less.");
            }
        }

        if self.price <= Decimal::ZERO {
            errors.add("price", "Price must be greater than 0.");
        } else if self.price > MAX_PRICE {
            errors.add("price", "Price must be 100000 or less.");
        }
        if self.price.normalize().scale() > MONEY_SCALE {
            errors.add("price", "Price must have at most 2 decimal places.");
        }

        errors.into_result()
    }

    /// Trimmed copy as it will be stored; call after `validate`
    pub fn normalized(&self) -> Self {
        let description = self
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string);

        Self {
            name: self.name.trim().to_string(),
            category: self.category.trim().to_string(),
            description,
            price: to_money(self.price),
            is_available: self.is_available,
        }
    }
}

/// Conjunctive catalog filter. Blank text filters mean "no filter".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MenuFilter {
    /// Lowercased substring of the name
    pub name_contains: Option<String>,
    /// Lowercased exact category
    pub category: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
}

type Predicate = fn(&MenuFilter, &MenuItem) -> bool;

fn non_blank_lower(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_lowercase)
}

impl MenuFilter {
    /// Build a filter, rejecting an inverted price range
    pub fn new(
        name_contains: Option<&str>,
        category: Option<&str>,
        min_price: Option<Decimal>,
        max_price: Option<Decimal>,
    ) -> Result<Self, ValidationErrors> {
        if let (Some(min), Some(max)) = (min_price, max_price) {
            if min > max {
                return Err(ValidationErrors::single(
                    "price",
                    "minPrice must be less than or equal to maxPrice.",
                ));
            }
        }

        Ok(Self {
            name_contains: non_blank_lower(name_contains),
            category: non_blank_lower(category),
            min_price,
            max_price,
        })
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    fn name_matches(&self, item: &MenuItem) -> bool {
        self.name_contains
            .as_deref()
            .map_or(true, |needle| item.name.to_lowercase().contains(needle))
    }

    fn category_matches(&self, item: &MenuItem) -> bool {
        self.category
            .as_deref()
            .map_or(true, |category| item.category.to_lowercase() == category)
    }

    fn min_price_matches(&self, item: &MenuItem) -> bool {
        self.min_price.map_or(true, |min| item.price >= min)
    }

    fn max_price_matches(&self, item: &MenuItem) -> bool {
        self.max_price.map_or(true, |max| item.price <= max)
    }

    /// All predicates must hold
    pub fn matches(&self, item: &MenuItem) -> bool {
        const PREDICATES: [Predicate; 4] = [
            MenuFilter::name_matches,
            MenuFilter::category_matches,
            MenuFilter::min_price_matches,
            MenuFilter::max_price_matches,
        ];
        PREDICATES.iter().all(|predicate| predicate(self, item))
    }
}
