// src/handlers/inventory.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    db::DateRange,
    models::charts::{InventoryLevelEntry, UsageTrendSeries},
};

#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LevelsQuery {
    #[validate(length(min = 1, max = 64))]
    pub category: Option<String>,
}

#[derive(Debug, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct UsageTrendQuery {
    pub from: NaiveDate,
    pub to: Option<NaiveDate>,
    #[validate(length(min = 1, max = 64))]
    pub ingredient_id: Option<String>,
}

// GET /api/inventory/levels
#[utoipa::path(
    get,
    path = "/api/inventory/levels",
    tag = "Inventory",
    params(LevelsQuery),
    responses(
        (status = 200, description = "Nível de cada ingrediente em percentual [0,100]", body = Vec<InventoryLevelEntry>),
        (status = 400, description = "Parâmetros inválidos"),
        (status = 500, description = "Falha de acesso aos dados")
    )
)]
pub async fn get_levels(
    State(app_state): State<AppState>,
    Query(params): Query<LevelsQuery>,
) -> Result<impl IntoResponse, AppError> {
    params.validate()?;
    let category = params.category.as_deref().filter(|c| *c != "all");
    let levels = app_state.inventory_service.inventory_levels(category).await?;
    Ok((StatusCode::OK, Json(levels)))
}

// GET /api/inventory/usage-trend
#[utoipa::path(
    get,
    path = "/api/inventory/usage-trend",
    tag = "Inventory",
    params(UsageTrendQuery),
    responses(
        (status = 200, description = "Uso de ingrediente por dia; em falha, série sintética marcada", body = UsageTrendSeries),
        (status = 400, description = "Parâmetros inválidos")
    )
)]
pub async fn get_usage_trend(
    State(app_state): State<AppState>,
    Query(params): Query<UsageTrendQuery>,
) -> Result<impl IntoResponse, AppError> {
    params.validate()?;
    let range = DateRange::new(params.from, params.to);
    let series = app_state
        .inventory_service
        .ingredient_usage_trend(&range, params.ingredient_id.as_deref())
        .await?;
    Ok((StatusCode::OK, Json(series)))
}
