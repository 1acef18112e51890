mod helpers;

use helpers::*;
use restaurant_backend::models::*;
use restaurant_backend::repositories::{InMemoryStore, OrderStore};
use restaurant_backend::services::{OrderService, ReportService};
use restaurant_backend::AppError;
use rust_decimal::Decimal;
use std::sync::Arc;

fn expect_validation(result: Result<impl std::fmt::Debug, AppError>, field: &str) {
    match result {
        Err(AppError::Validation(errors)) => assert!(
            errors.contains_field(field),
            "expected an error on {}, got {}",
            field,
            errors
        ),
        other => panic!("expected validation error on {}, got {:?}", field, other),
    }
}

/// Catalog search → order → list → details → report
#[tokio::test]
async fn test_end_to_end_flow() {
    let (app, a, b) = TestApp::with_two_items().await;

    let menu = app.state.catalog.search(None, None, None, None).await.unwrap();
    assert_eq!(menu.len(), 2);

    let created = app.place(&[(a, 2), (b, 1)]).await;
    assert_eq!(created.total_amount, money(2550));

    let orders = app.state.orders.list_orders().await.unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].id, created.id);
    assert_eq!(orders[0].item_count, 3);
    assert_eq!(orders[0].total_amount, money(2550));

    let details = app.state.orders.get_order(created.id).await.unwrap();
    assert_eq!(details.items.len(), 2);
    assert_eq!(details.items[0].menu_item_name, "Item A");
    assert_eq!(details.items[0].unit_price, money(1000));
    assert_eq!(details.items[0].line_total, money(2000));
    assert_eq!(details.items[1].menu_item_name, "Item B");
    assert_eq!(details.items[1].line_total, money(550));

    let date = created.created_at.date_naive().to_string();
    let report = app.state.reports.daily_report(Some(&date)).await.unwrap();
    assert_eq!(report.order_count, 1);
    assert_eq!(report.total_revenue, money(2550));
    assert_eq!(report.top_items.len(), 2);
    assert_eq!(report.top_items[0].menu_item_id, a);
    assert_eq!(report.top_items[0].quantity, 2);
    assert_eq!(report.top_items[1].menu_item_id, b);
}

#[tokio::test]
async fn test_order_total_is_sum_of_line_totals() {
    let (app, a, b) = TestApp::with_two_items().await;
    let created = app.place(&[(b, 3), (a, 1)]).await;

    let items = app.store.items_for_order(created.id).await.unwrap();
    let sum: Decimal = items.iter().map(|item| item.line_total).sum();
    assert_eq!(created.total_amount, sum);
    assert_eq!(created.total_amount, money(2650));
    assert!(items.iter().all(OrderItem::is_consistent));
}

#[tokio::test]
async fn test_empty_order_rejected() {
    let app = TestApp::new();
    expect_validation(app.state.orders.create_order(&order_request(&[])).await, "items");
    assert!(app.state.orders.list_orders().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_quantity_bounds() {
    let (app, a, _) = TestApp::with_two_items().await;

    expect_validation(
        app.state.orders.create_order(&order_request(&[(a, 0)])).await,
        "items[0].quantity",
    );
    expect_validation(
        app.state.orders.create_order(&order_request(&[(a, MAX_QUANTITY + 1)])).await,
        "items[0].quantity",
    );

    let created = app.place(&[(a, MAX_QUANTITY)]).await;
    assert_eq!(created.total_amount, money(1_000_000));
}

#[tokio::test]
async fn test_duplicate_lines_rejected_and_nothing_persisted() {
    let (app, a, _) = TestApp::with_two_items().await;
    app.place(&[(a, 1)]).await;
    let before = app.state.orders.list_orders().await.unwrap();

    let result = app.state.orders.create_order(&order_request(&[(a, 1), (a, 2)])).await;
    match result {
        Err(AppError::Validation(errors)) => assert_eq!(
            errors.messages("items"),
            ["Duplicate MenuItemId(s) found. Combine quantities into one line.".to_string()]
        ),
        other => panic!("expected duplicate-line error, got {:?}", other),
    }

    assert_eq!(app.state.orders.list_orders().await.unwrap(), before);
}

#[tokio::test]
async fn test_unknown_menu_item_persists_nothing() {
    let (app, a, _) = TestApp::with_two_items().await;

    let result = app
        .state
        .orders
        .create_order(&order_request(&[(a, 1), (999, 1)]))
        .await;
    match result {
        Err(AppError::Validation(errors)) => {
            assert_eq!(errors.messages("items"), ["Menu item(s) not found: 999".to_string()])
        }
        other => panic!("expected missing item error, got {:?}", other),
    }

    assert!(app.state.orders.list_orders().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_price_change_does_not_touch_placed_orders() {
    let (app, a, _) = TestApp::with_two_items().await;
    let first = app.place(&[(a, 2)]).await;

    app.state
        .catalog
        .update_menu_item(a, &MenuItemInput::new("Item A", "Test", money(1200)))
        .await
        .unwrap();

    let details = app.state.orders.get_order(first.id).await.unwrap();
    assert_eq!(details.total_amount, money(2000));
    assert_eq!(details.items[0].unit_price, money(1000));
    assert_eq!(details.items[0].line_total, money(2000));

    let second = app.place(&[(a, 2)]).await;
    assert_eq!(second.total_amount, money(2400));
}

#[tokio::test]
async fn test_unavailable_item_can_be_ordered() {
    let app = TestApp::new();
    let item = app
        .state
        .catalog
        .create_menu_item(&MenuItemInput::new("Seasonal Soup", "Starter", money(600)).unavailable())
        .await
        .unwrap();
    assert!(!item.is_available);

    let created = app.place(&[(item.id, 2)]).await;
    assert_eq!(created.total_amount, money(1200));
}

#[tokio::test]
async fn test_catalog_change_during_order_is_conflict() {
    let store = Arc::new(InMemoryStore::new());
    let app = TestApp {
        store: store.clone(),
        state: restaurant_backend::AppState::new(store.clone(), store.clone()),
    };
    let item = app.create_item("Item A", "Test", money(1000)).await;

    let catalog = Arc::new(VanishingCatalog {
        inner: store.clone(),
    });
    let orders = OrderService::new(catalog, store.clone());

    match orders.create_order(&order_request(&[(item.id, 1)])).await {
        Err(AppError::Conflict(_)) => {}
        other => panic!("expected conflict, got {:?}", other),
    }
    assert!(store.list_summaries().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_get_order_not_found() {
    let app = TestApp::new();
    match app.state.orders.get_order(42).await {
        Err(AppError::NotFound(msg)) => assert_eq!(msg, "Order 42 not found"),
        other => panic!("expected not found, got {:?}", other),
    }
}

#[tokio::test]
async fn test_list_orders_newest_first() {
    let (app, a, b) = TestApp::with_two_items().await;
    let first = app.place(&[(a, 1)]).await;
    let second = app.place(&[(b, 4)]).await;

    let orders = app.state.orders.list_orders().await.unwrap();
    let ids: Vec<i32> = orders.iter().map(|o| o.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);
    assert_eq!(orders[0].item_count, 4);
}

#[tokio::test]
async fn test_search_filters() {
    let app = TestApp::new();
    let pizza = app.create_item("Margherita Pizza", "Pizza", money(990)).await;
    let pasta = app.create_item("Penne", "Pasta", money(1090)).await;
    let drink = app.create_item("Lemonade", "Drink", money(350)).await;

    let all = app.state.catalog.search(None, None, None, None).await.unwrap();
    let ids: Vec<i32> = all.iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![pizza.id, pasta.id, drink.id]);

    let by_name = app.state.catalog.search(Some("PIZ"), None, None, None).await.unwrap();
    assert_eq!(by_name, vec![pizza.clone()]);

    let by_category = app.state.catalog.search(None, Some("pasta"), None, None).await.unwrap();
    assert_eq!(by_category, vec![pasta.clone()]);

    let blank = app.state.catalog.search(Some("  "), Some(""), None, None).await.unwrap();
    assert_eq!(blank.len(), 3);

    let range = app
        .state
        .catalog
        .search(None, None, Some(money(350)), Some(money(990)))
        .await
        .unwrap();
    assert_eq!(range, vec![pizza, drink]);

    let none = app.state.catalog.search(Some("sushi"), None, None, None).await.unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn test_search_inverted_price_range_rejected() {
    let app = TestApp::new();
    expect_validation(
        app.state
            .catalog
            .search(None, None, Some(money(1000)), Some(money(500)))
            .await,
        "price",
    );
}

#[tokio::test]
async fn test_get_menu_item_not_found() {
    let app = TestApp::new();
    let err = app.state.catalog.get_menu_item(7).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_invalid_menu_item_rejected() {
    let app = TestApp::new();
    let input = MenuItemInput::new("", "Test", money(-100));

    match app.state.catalog.create_menu_item(&input).await {
        Err(AppError::Validation(errors)) => {
            assert!(errors.contains_field("name"));
            assert!(errors.contains_field("price"));
        }
        other => panic!("expected validation error, got {:?}", other),
    }
    assert_eq!(app.state.catalog.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_delete_referenced_item_is_conflict() {
    let (app, a, b) = TestApp::with_two_items().await;
    app.place(&[(a, 1)]).await;

    match app.state.catalog.delete_menu_item(a).await {
        Err(AppError::Conflict(_)) => {}
        other => panic!("expected conflict, got {:?}", other),
    }
    assert!(app.state.catalog.get_menu_item(a).await.is_ok());

    app.state.catalog.delete_menu_item(b).await.unwrap();
    assert!(app.state.catalog.get_menu_item(b).await.unwrap_err().is_not_found());
    assert!(app.state.catalog.delete_menu_item(b).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_report_for_day_without_orders() {
    let (app, a, _) = TestApp::with_two_items().await;
    app.place(&[(a, 1)]).await;

    let report = app.state.reports.daily_report(Some("2000-01-01")).await.unwrap();
    assert_eq!(report.order_count, 0);
    assert_eq!(report.total_revenue, Decimal::ZERO);
    assert!(report.top_items.is_empty());
}

#[tokio::test]
async fn test_report_date_required() {
    let app = TestApp::new();
    expect_validation(app.state.reports.daily_report(None).await, "date");
    expect_validation(app.state.reports.daily_report(Some("01/15/2024")).await, "date");
}

#[tokio::test]
async fn test_report_keeps_top_three_with_tie_break() {
    let app = TestApp::new();
    let mut ids = Vec::new();
    for n in 1..=4 {
        ids.push(app.create_item(&format!("Item {}", n), "Test", money(100)).await.id);
    }

    // ids[3] and ids[1] tie on 5, ids[0] has 2, ids[2] has 1
    app.place(&[(ids[3], 5), (ids[0], 2)]).await;
    let last = app.place(&[(ids[1], 5), (ids[2], 1)]).await;

    let date = last.created_at.date_naive().to_string();
    let report = app.state.reports.daily_report(Some(&date)).await.unwrap();
    let top: Vec<(i32, i64)> = report
        .top_items
        .iter()
        .map(|item| (item.menu_item_id, item.quantity))
        .collect();
    assert_eq!(top, vec![(ids[1], 5), (ids[3], 5), (ids[0], 2)]);
    assert_eq!(report.total_revenue, money(1300));
}

#[tokio::test]
async fn test_report_uses_placeholder_for_unresolved_names() {
    let (app, a, _) = TestApp::with_two_items().await;
    let created = app.place(&[(a, 3)]).await;

    // Same order book, catalog that knows none of its items
    let reports = ReportService::new(Arc::new(InMemoryStore::new()), app.store.clone());
    let date = created.created_at.date_naive().to_string();
    let report = reports.daily_report(Some(&date)).await.unwrap();

    assert_eq!(report.top_items.len(), 1);
    assert_eq!(report.top_items[0].name, "(unknown)");
    assert_eq!(report.top_items[0].quantity, 3);
}

#[tokio::test]
async fn test_report_window_is_half_open_utc_day() {
    let app = TestApp::new();
    let item = app.create_item("Item A", "Test", money(100)).await;

    let at = |ts: &str| {
        chrono::DateTime::parse_from_rfc3339(ts)
            .unwrap()
            .with_timezone(&chrono::Utc)
    };
    for created_at in [
        at("2024-01-14T23:59:59Z"),
        at("2024-01-15T00:00:00Z"),
        at("2024-01-15T23:59:59.999Z"),
        at("2024-01-16T00:00:00Z"),
    ] {
        app.store
            .insert_order(&NewOrder {
                created_at,
                total_amount: money(100),
                items: vec![NewOrderItem {
                    menu_item_id: item.id,
                    quantity: 1,
                    unit_price: money(100),
                    line_total: money(100),
                }],
            })
            .await
            .unwrap();
    }

    let report = app.state.reports.daily_report(Some("2024-01-15")).await.unwrap();
    assert_eq!(report.order_count, 2);
    assert_eq!(report.total_revenue, money(200));
    assert_eq!(report.top_items[0].quantity, 2);

    let before = app.state.reports.daily_report(Some("2024-01-14")).await.unwrap();
    assert_eq!(before.order_count, 1);

    let after = app.state.reports.daily_report(Some("2024-01-16")).await.unwrap();
    assert_eq!(after.order_count, 1);
}
