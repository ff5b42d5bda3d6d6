// tests/http.rs
//
// Testes de integração sobre o router real, com o Datastore em memória.

mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{TimeZone, Utc};
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use serde_json::Value;
use tower::ServiceExt;

use restaurante_analytics::api_router;
use restaurante_analytics::config::AppState;
use restaurante_analytics::db::DateRange;
use restaurante_analytics::models::inventory::{Ingredient, InventoryLevel, RecipeLink};
use restaurante_analytics::models::menu::Item;
use restaurante_analytics::models::orders::{FulfillmentMode, OrderLine};
use restaurante_analytics::models::staff::{ShiftAssignment, ShiftDefinition, StaffMember};
use restaurante_analytics::services::fallback::FailurePolicy;
use restaurante_analytics::services::InventoryService;

use common::MemoryStore;

async fn get_json(store: MemoryStore, uri: &str) -> (StatusCode, Value) {
    let app = api_router(AppState::with_store(Arc::new(store)));
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn order(
    order_id: i64,
    customer_id: i64,
    item_id: &str,
    quantity: i32,
    mode: FulfillmentMode,
    day: u32,
    hour: u32,
) -> OrderLine {
    OrderLine {
        order_id,
        customer_id: Some(customer_id),
        item_id: Some(item_id.to_string()),
        quantity: Some(quantity),
        fulfillment: Some(mode),
        created_at: Some(Utc.with_ymd_and_hms(2024, 1, day, hour, 0, 0).unwrap()),
    }
}

fn item(item_id: &str, name: &str, price: i64, category: Option<&str>) -> Item {
    Item {
        item_id: item_id.to_string(),
        name: Some(name.to_string()),
        price: Some(Decimal::from(price)),
        category: category.map(str::to_string),
    }
}

#[tokio::test]
async fn health_check_responds() {
    let (status, _) = get_json(MemoryStore::default(), "/api/health").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn order_frequency_buckets_over_http() {
    let mut store = MemoryStore::default();
    // Cliente 1: um pedido (com duas linhas, que contam uma vez só).
    store.orders.push(order(1, 1, "a", 1, FulfillmentMode::Pickup, 2, 12));
    store.orders.push(order(1, 1, "b", 2, FulfillmentMode::Pickup, 2, 12));
    // Cliente 2: três pedidos.
    for order_id in 2..=4 {
        store.orders.push(order(order_id, 2, "a", 1, FulfillmentMode::Delivery, 3, 18));
    }
    // Cliente 3: onze pedidos.
    for order_id in 5..=15 {
        store.orders.push(order(order_id, 3, "a", 1, FulfillmentMode::Pickup, 4, 19));
    }

    let (status, body) =
        get_json(store, "/api/customers/order-frequency?from=2024-01-01&to=2024-01-31").await;

    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 5);
    let labels: Vec<&str> = rows.iter().map(|r| r["frequency"].as_str().unwrap()).collect();
    assert_eq!(labels, vec!["1 order", "2-3 orders", "4-5 orders", "6-10 orders", "11+ orders"]);
    let counts: Vec<i64> = rows.iter().map(|r| r["customers"].as_i64().unwrap()).collect();
    assert_eq!(counts, vec![1, 1, 0, 0, 1]);
}

#[tokio::test]
async fn daily_sales_trend_zero_fills_missing_days() {
    let mut store = MemoryStore::default();
    store.orders.push(order(1, 1, "a", 10, FulfillmentMode::Pickup, 1, 9));
    store.items.push(item("a", "Margherita", 10, None));

    let (status, body) =
        get_json(store, "/api/dashboard/sales-trend?from=2024-01-01&to=2024-01-03").await;

    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["date"], "Jan 01");
    assert_eq!(rows[0]["amount"].as_f64().unwrap(), 100.0);
    assert_eq!(rows[1]["amount"].as_f64().unwrap(), 0.0);
    assert_eq!(rows[2]["date"], "Jan 03");
    assert_eq!(rows[2]["amount"].as_f64().unwrap(), 0.0);
}

#[tokio::test]
async fn best_sellers_rank_by_computed_revenue() {
    let mut store = MemoryStore::default();
    // item1: 5 x $10 = $50; item2: 3 x $20 = $60 -> item2 na frente.
    store.orders.push(order(1, 1, "item1", 5, FulfillmentMode::Pickup, 1, 12));
    store.orders.push(order(2, 1, "item2", 3, FulfillmentMode::Pickup, 1, 13));
    store.items.push(item("item1", "Margherita", 10, Some("Pizza")));
    store.items.push(item("item2", "Quattro Formaggi", 20, Some("Pizza")));

    let (status, body) =
        get_json(store, "/api/sales/best-sellers?from=2024-01-01&to=2024-01-31").await;

    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows[0]["name"], "Quattro Formaggi");
    assert_eq!(rows[0]["sales"].as_f64().unwrap(), 60.0);
    assert_eq!(rows[1]["name"], "Margherita");
    assert_eq!(rows[1]["sales"].as_f64().unwrap(), 50.0);
}

#[tokio::test]
async fn usage_trend_substitutes_synthetic_series_on_failure() {
    let mut store = MemoryStore::default();
    store.fail_orders = true;

    let (status, body) =
        get_json(store, "/api/inventory/usage-trend?from=2024-01-01&to=2024-01-05").await;

    // A falha não vaza: o gráfico recebe uma série completa e marcada.
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["synthetic"], true);
    let series = body["series"].as_array().unwrap();
    assert_eq!(series.len(), 5);
    assert_eq!(series[0]["date"], "Jan 01");
    assert_eq!(series[4]["date"], "Jan 05");
    for point in series {
        let amount = point["amount"].as_f64().unwrap();
        assert!((10.0..25.0).contains(&amount), "valor fora do intervalo: {amount}");
    }
}

#[tokio::test]
async fn usage_trend_flags_real_series_as_not_synthetic() {
    let mut store = MemoryStore::default();
    store.orders.push(order(1, 1, "pizza", 2, FulfillmentMode::Pickup, 2, 19));
    store.recipes.push(RecipeLink {
        item_id: "pizza".to_string(),
        ingredient_id: "flour".to_string(),
        quantity_per_item: Some(Decimal::from(3)),
    });

    let (status, body) =
        get_json(store, "/api/inventory/usage-trend?from=2024-01-01&to=2024-01-05").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["synthetic"], false);
    let series = body["series"].as_array().unwrap();
    assert_eq!(series.len(), 1);
    assert_eq!(series[0]["date"], "Jan 02");
    assert_eq!(series[0]["amount"].as_f64().unwrap(), 6.0);
}

#[tokio::test]
async fn usage_trend_with_propagate_policy_surfaces_failure() {
    let mut store = MemoryStore::default();
    store.fail_orders = true;
    let service = InventoryService::new(Arc::new(store)).with_usage_policy(FailurePolicy::Propagate);
    let range = DateRange::new(
        chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        chrono::NaiveDate::from_ymd_opt(2024, 1, 5),
    );

    let result = service.ingredient_usage_trend(&range, None).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn order_frequency_propagates_store_failure() {
    let mut store = MemoryStore::default();
    store.fail_orders = true;

    let (status, body) =
        get_json(store, "/api/customers/order-frequency?from=2024-01-01&to=2024-01-31").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn best_sellers_reject_zero_limit() {
    let (status, body) = get_json(
        MemoryStore::default(),
        "/api/sales/best-sellers?from=2024-01-01&limit=0",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"]["limit"].is_array());
}

#[tokio::test]
async fn missing_from_parameter_is_rejected() {
    let (status, _) = get_json(MemoryStore::default(), "/api/customers/order-frequency").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn preferences_with_no_orders_return_empty_list() {
    let (status, body) =
        get_json(MemoryStore::default(), "/api/customers/preferences?from=2024-01-01&to=2024-01-31")
            .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!([]));
}

#[tokio::test]
async fn inventory_levels_clamp_and_skip_unresolved() {
    let mut store = MemoryStore::default();
    store.inventory.push(InventoryLevel {
        ingredient_id: "flour".to_string(),
        quantity_on_hand: Some(Decimal::from(500)),
    });
    store.inventory.push(InventoryLevel {
        ingredient_id: "ghost".to_string(),
        quantity_on_hand: Some(Decimal::from(10)),
    });
    store.ingredients.push(Ingredient {
        ingredient_id: "flour".to_string(),
        name: Some("Farinha".to_string()),
        unit: Some("kg".to_string()),
        reference_quantity: Some(Decimal::from(100)),
    });

    let (status, body) = get_json(store, "/api/inventory/levels").await;

    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["name"], "Farinha");
    assert_eq!(rows[0]["level"], 100);
}

#[tokio::test]
async fn shift_coverage_always_has_seven_rows() {
    let (status, body) =
        get_json(MemoryStore::default(), "/api/staff/coverage?from=2024-01-01&to=2024-01-31").await;

    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 7);
    assert_eq!(rows[0]["day"], "Monday");
    assert_eq!(rows[6]["day"], "Sunday");
}

#[tokio::test]
async fn staff_schedule_over_http_seeds_off_days() {
    let mut store = MemoryStore::default();
    store.staff.push(StaffMember {
        staff_id: "ana".to_string(),
        name: Some("Ana Souza".to_string()),
        hourly_rate: Some(Decimal::from(13)),
        role: Some("chef".to_string()),
    });
    store.shifts.push(ShiftDefinition {
        shift_id: "s1".to_string(),
        day_of_week: Some("Monday".to_string()),
        start_time: chrono::NaiveTime::from_hms_opt(9, 0, 0),
        end_time: chrono::NaiveTime::from_hms_opt(17, 0, 0),
    });
    store.assignments.push(ShiftAssignment {
        staff_id: Some("ana".to_string()),
        shift_id: Some("s1".to_string()),
        date: chrono::NaiveDate::from_ymd_opt(2024, 1, 1),
    });

    let (status, body) =
        get_json(store, "/api/staff/schedule?from=2024-01-01&to=2024-01-07").await;

    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["name"], "Ana Souza");
    assert_eq!(rows[0]["monday"], "9AM-5PM");
    assert_eq!(rows[0]["tuesday"], "OFF");
    assert_eq!(rows[0]["sunday"], "OFF");
}
