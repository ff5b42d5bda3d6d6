// src/handlers/dashboard.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    common::error::AppError,
    config::AppState,
    db::DateRange,
    models::charts::{KpiSummary, TopItemEntry, TrendPoint},
};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DashboardQuery {
    // Início do intervalo (YYYY-MM-DD)
    pub from: NaiveDate,
    // Fim do intervalo; ausente significa "até hoje"
    pub to: Option<NaiveDate>,
}

impl DashboardQuery {
    fn range(&self) -> DateRange {
        DateRange::new(self.from, self.to)
    }
}

// GET /api/dashboard/kpis
#[utoipa::path(
    get,
    path = "/api/dashboard/kpis",
    tag = "Dashboard",
    params(DashboardQuery),
    responses(
        (status = 200, description = "Indicadores do período (vendas, pedidos, ticket médio)", body = KpiSummary),
        (status = 500, description = "Falha de acesso aos dados")
    )
)]
pub async fn get_kpis(
    State(app_state): State<AppState>,
    Query(params): Query<DashboardQuery>,
) -> Result<impl IntoResponse, AppError> {
    let kpis = app_state.dashboard_service.kpis(&params.range()).await?;
    Ok((StatusCode::OK, Json(kpis)))
}

// GET /api/dashboard/sales-trend
#[utoipa::path(
    get,
    path = "/api/dashboard/sales-trend",
    tag = "Dashboard",
    params(DashboardQuery),
    responses(
        (status = 200, description = "Receita por dia do intervalo, com dias sem venda zerados", body = Vec<TrendPoint>),
        (status = 500, description = "Falha de acesso aos dados")
    )
)]
pub async fn get_sales_trend(
    State(app_state): State<AppState>,
    Query(params): Query<DashboardQuery>,
) -> Result<impl IntoResponse, AppError> {
    let trend = app_state
        .dashboard_service
        .sales_trend(&params.range())
        .await?;
    Ok((StatusCode::OK, Json(trend)))
}

// GET /api/dashboard/top-items
#[utoipa::path(
    get,
    path = "/api/dashboard/top-items",
    tag = "Dashboard",
    params(DashboardQuery),
    responses(
        (status = 200, description = "Top 5 itens por quantidade vendida", body = Vec<TopItemEntry>),
        (status = 500, description = "Falha de acesso aos dados")
    )
)]
pub async fn get_top_items(
    State(app_state): State<AppState>,
    Query(params): Query<DashboardQuery>,
) -> Result<impl IntoResponse, AppError> {
    let top = app_state.dashboard_service.top_items(&params.range()).await?;
    Ok((StatusCode::OK, Json(top)))
}
