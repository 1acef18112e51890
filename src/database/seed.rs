use crate::error::AppResult;
use crate::models::MenuItemInput;
use crate::services::CatalogService;
use rust_decimal::Decimal;
use tracing::info;

/// Starter menu used to populate an empty catalog
pub fn sample_menu() -> Vec<MenuItemInput> {
    let item = |name: &str, category: &str, description: &str, cents: i64| {
        MenuItemInput::new(name, category, Decimal::new(cents, 2)).with_description(description)
    };

    vec![
        item("Margherita Pizza", "Pizza", "Tomato, mozzarella, basil", 990),
        item("Pepperoni Pizza", "Pizza", "Pepperoni, mozzarella, tomato sauce", 1150),
        item("Spaghetti Bolognese", "Pasta", "Rich beef ragù, parmesan", 1290),
        item("Penne Arrabbiata", "Pasta", "Spicy tomato sauce, garlic", 1090),
        item("Caesar Salad", "Salad", "Romaine, croutons, parmesan, Caesar dressing", 850),
        item("Cheeseburger", "Burger", "Beef patty, cheddar, lettuce, tomato", 1050),
        item("Chicken Wings", "Starter", "6 pcs, spicy glaze", 790),
        item("Tomato Soup", "Starter", "Creamy tomato soup, basil oil", 590),
        item("Chocolate Brownie", "Dessert", "Warm brownie, vanilla ice cream", 650),
        item("Lemonade", "Drink", "Fresh lemon, lightly sweetened", 350),
    ]
}

/// Insert the sample menu when the catalog is empty. Returns the number of
/// items created.
pub async fn seed_catalog(catalog: &CatalogService) -> AppResult<usize> {
    if catalog.count().await? > 0 {
        return Ok(0);
    }

    let menu = sample_menu();
    for input in &menu {
        catalog.create_menu_item(input).await?;
    }

    info!(items = menu.len(), "Seeded empty catalog with sample menu");
    Ok(menu.len())
}
