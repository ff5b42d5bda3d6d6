// src/handlers/sales.rs

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
    models::charts::{
        BestSellerEntry, CategoryShareEntry, Granularity, PeakGranularity, PeakTimeEntry,
        SalesTrendEntry,
    },
};

#[derive(Debug, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct SalesTrendQuery {
    pub from: NaiveDate,
    pub to: Option<NaiveDate>,
    #[validate(length(min = 1, max = 64))]
    pub category: Option<String>,
    pub granularity: Option<Granularity>,
}

impl SalesTrendQuery {
    fn range(&self) -> DateRange {
        DateRange::new(self.from, self.to)
    }

    // "all" vem do seletor da UI e significa "sem filtro".
    fn category(&self) -> Option<&str> {
        self.category.as_deref().filter(|c| *c != "all")
    }
}

#[derive(Debug, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct BestSellersQuery {
    pub from: NaiveDate,
    pub to: Option<NaiveDate>,
    #[validate(length(min = 1, max = 64))]
    pub category: Option<String>,
    #[validate(range(min = 1, max = 50))]
    pub limit: Option<u32>,
}

impl BestSellersQuery {
    fn range(&self) -> DateRange {
        DateRange::new(self.from, self.to)
    }

    fn category(&self) -> Option<&str> {
        self.category.as_deref().filter(|c| *c != "all")
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CategoryShareQuery {
    pub from: NaiveDate,
    pub to: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PeakTimesQuery {
    pub from: NaiveDate,
    pub to: Option<NaiveDate>,
    pub granularity: Option<PeakGranularity>,
}

// GET /api/sales/trend
#[utoipa::path(
    get,
    path = "/api/sales/trend",
    tag = "Sales",
    params(SalesTrendQuery),
    responses(
        (status = 200, description = "Tendência de vendas por dia/semana/mês, com filtro de categoria", body = Vec<SalesTrendEntry>),
        (status = 400, description = "Parâmetros inválidos"),
        (status = 500, description = "Falha de acesso aos dados")
    )
)]
pub async fn get_trend(
    State(app_state): State<AppState>,
    Query(params): Query<SalesTrendQuery>,
) -> Result<impl IntoResponse, AppError> {
    params.validate()?;
    let trend = app_state
        .sales_service
        .sales_trend(
            &params.range(),
            params.category(),
            params.granularity.unwrap_or_default(),
        )
        .await?;
    Ok((StatusCode::OK, Json(trend)))
}

// GET /api/sales/best-sellers
#[utoipa::path(
    get,
    path = "/api/sales/best-sellers",
    tag = "Sales",
    params(BestSellersQuery),
    responses(
        (status = 200, description = "Ranking de receita por item", body = Vec<BestSellerEntry>),
        (status = 400, description = "Parâmetros inválidos"),
        (status = 500, description = "Falha de acesso aos dados")
    )
)]
pub async fn get_best_sellers(
    State(app_state): State<AppState>,
    Query(params): Query<BestSellersQuery>,
) -> Result<impl IntoResponse, AppError> {
    params.validate()?;
    let limit = params.limit.unwrap_or(5) as usize;
    let ranking = app_state
        .sales_service
        .best_selling_items(&params.range(), params.category(), limit)
        .await?;
    Ok((StatusCode::OK, Json(ranking)))
}

// GET /api/sales/by-category
#[utoipa::path(
    get,
    path = "/api/sales/by-category",
    tag = "Sales",
    params(CategoryShareQuery),
    responses(
        (status = 200, description = "Percentual da receita por categoria (gráfico de pizza)", body = Vec<CategoryShareEntry>),
        (status = 500, description = "Falha de acesso aos dados")
    )
)]
pub async fn get_by_category(
    State(app_state): State<AppState>,
    Query(params): Query<CategoryShareQuery>,
) -> Result<impl IntoResponse, AppError> {
    let range = DateRange::new(params.from, params.to);
    let shares = app_state.sales_service.sales_by_category(&range).await?;
    Ok((StatusCode::OK, Json(shares)))
}

// GET /api/sales/peak-times
#[utoipa::path(
    get,
    path = "/api/sales/peak-times",
    tag = "Sales",
    params(PeakTimesQuery),
    responses(
        (status = 200, description = "Histograma de horários de pico", body = Vec<PeakTimeEntry>),
        (status = 500, description = "Falha de acesso aos dados")
    )
)]
pub async fn get_peak_times(
    State(app_state): State<AppState>,
    Query(params): Query<PeakTimesQuery>,
) -> Result<impl IntoResponse, AppError> {
    let range = DateRange::new(params.from, params.to);
    let histogram = app_state
        .sales_service
        .peak_order_times(&range, params.granularity.unwrap_or_default())
        .await?;
    Ok((StatusCode::OK, Json(histogram)))
}
