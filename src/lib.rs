// src/lib.rs
//
// Núcleo analítico do painel do restaurante: modelos, predicados de consulta,
// acesso a dados e os serviços de agregação que alimentam os gráficos.

pub mod common;
pub mod config;
pub mod db;
pub mod docs;
pub mod handlers;
pub mod models;
pub mod services;

use axum::{routing::get, Router};

use crate::config::AppState;

// Monta o router completo da API. Fica na lib para os testes de integração
// conseguirem disparar requisições sem subir um servidor de verdade.
pub fn api_router(app_state: AppState) -> Router {
    let dashboard_routes = Router::new()
        .route("/kpis", get(handlers::dashboard::get_kpis))
        .route("/sales-trend", get(handlers::dashboard::get_sales_trend))
        .route("/top-items", get(handlers::dashboard::get_top_items));

    let sales_routes = Router::new()
        .route("/trend", get(handlers::sales::get_trend))
        .route("/best-sellers", get(handlers::sales::get_best_sellers))
        .route("/by-category", get(handlers::sales::get_by_category))
        .route("/peak-times", get(handlers::sales::get_peak_times));

    let customer_routes = Router::new()
        .route("/order-frequency", get(handlers::customers::get_order_frequency))
        .route("/preferences", get(handlers::customers::get_preferences))
        .route("/delivery-pickup", get(handlers::customers::get_delivery_pickup));

    let inventory_routes = Router::new()
        .route("/levels", get(handlers::inventory::get_levels))
        .route("/usage-trend", get(handlers::inventory::get_usage_trend));

    let staff_routes = Router::new()
        .route("/hours", get(handlers::staff::get_hours))
        .route("/coverage", get(handlers::staff::get_coverage))
        .route("/schedule", get(handlers::staff::get_schedule));

    // Combina tudo no router principal
    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/dashboard", dashboard_routes)
        .nest("/api/sales", sales_routes)
        .nest("/api/customers", customer_routes)
        .nest("/api/inventory", inventory_routes)
        .nest("/api/staff", staff_routes)
        .with_state(app_state)
}
