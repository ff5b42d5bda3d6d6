// src/handlers/customers.rs

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
    models::charts::{FrequencyBucketEntry, MonthlySplitEntry, PreferenceEntry},
};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct CustomerQuery {
    pub from: NaiveDate,
    pub to: Option<NaiveDate>,
    pub customer_id: Option<i64>,
}

impl CustomerQuery {
    fn range(&self) -> DateRange {
        DateRange::new(self.from, self.to)
    }
}

// GET /api/customers/order-frequency
#[utoipa::path(
    get,
    path = "/api/customers/order-frequency",
    tag = "Customers",
    params(CustomerQuery),
    responses(
        (status = 200, description = "Clientes por balde de frequência de pedidos", body = Vec<FrequencyBucketEntry>),
        (status = 500, description = "Falha de acesso aos dados")
    )
)]
pub async fn get_order_frequency(
    State(app_state): State<AppState>,
    Query(params): Query<CustomerQuery>,
) -> Result<impl IntoResponse, AppError> {
    let buckets = app_state
        .customer_service
        .order_frequency(&params.range())
        .await?;
    Ok((StatusCode::OK, Json(buckets)))
}

// GET /api/customers/preferences
#[utoipa::path(
    get,
    path = "/api/customers/preferences",
    tag = "Customers",
    params(CustomerQuery),
    responses(
        (status = 200, description = "Top 5 itens por quantidade, opcionalmente de um cliente", body = Vec<PreferenceEntry>),
        (status = 500, description = "Falha de acesso aos dados")
    )
)]
pub async fn get_preferences(
    State(app_state): State<AppState>,
    Query(params): Query<CustomerQuery>,
) -> Result<impl IntoResponse, AppError> {
    let preferences = app_state
        .customer_service
        .customer_preferences(&params.range(), params.customer_id)
        .await?;
    Ok((StatusCode::OK, Json(preferences)))
}

// GET /api/customers/delivery-pickup
#[utoipa::path(
    get,
    path = "/api/customers/delivery-pickup",
    tag = "Customers",
    params(CustomerQuery),
    responses(
        (status = 200, description = "Split entrega/retirada por mês, em percentuais", body = Vec<MonthlySplitEntry>),
        (status = 500, description = "Falha de acesso aos dados")
    )
)]
pub async fn get_delivery_pickup(
    State(app_state): State<AppState>,
    Query(params): Query<CustomerQuery>,
) -> Result<impl IntoResponse, AppError> {
    let split = app_state
        .customer_service
        .delivery_pickup_split(&params.range(), params.customer_id)
        .await?;
    Ok((StatusCode::OK, Json(split)))
}
