// src/handlers/staff.rs

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
    models::charts::{ScheduleRow, ShiftCoverageEntry, StaffHoursEntry},
};

// Horas e grade semanal usam os mesmos filtros.
#[derive(Debug, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct StaffQuery {
    pub from: NaiveDate,
    pub to: Option<NaiveDate>,
    pub staff_id: Option<String>,
    #[validate(length(min = 1, max = 64))]
    pub role: Option<String>,
}

impl StaffQuery {
    fn range(&self) -> DateRange {
        DateRange::new(self.from, self.to)
    }

    fn role(&self) -> Option<&str> {
        self.role.as_deref().filter(|r| *r != "all")
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct CoverageQuery {
    pub from: NaiveDate,
    pub to: Option<NaiveDate>,
    pub day_of_week: Option<String>,
}

// GET /api/staff/hours
#[utoipa::path(
    get,
    path = "/api/staff/hours",
    tag = "Staff",
    params(StaffQuery),
    responses(
        (status = 200, description = "Horas trabalhadas e custo por funcionário", body = Vec<StaffHoursEntry>),
        (status = 400, description = "Parâmetros inválidos"),
        (status = 500, description = "Falha de acesso aos dados")
    )
)]
pub async fn get_hours(
    State(app_state): State<AppState>,
    Query(params): Query<StaffQuery>,
) -> Result<impl IntoResponse, AppError> {
    params.validate()?;
    let hours = app_state
        .staff_service
        .staff_hours(&params.range(), params.staff_id.as_deref(), params.role())
        .await?;
    Ok((StatusCode::OK, Json(hours)))
}

// GET /api/staff/coverage
#[utoipa::path(
    get,
    path = "/api/staff/coverage",
    tag = "Staff",
    params(CoverageQuery),
    responses(
        (status = 200, description = "Cobertura de turnos por dia da semana (sempre 7 linhas)", body = Vec<ShiftCoverageEntry>),
        (status = 500, description = "Falha de acesso aos dados")
    )
)]
pub async fn get_coverage(
    State(app_state): State<AppState>,
    Query(params): Query<CoverageQuery>,
) -> Result<impl IntoResponse, AppError> {
    let range = DateRange::new(params.from, params.to);
    let day = params.day_of_week.as_deref().filter(|d| *d != "all");
    let matrix = app_state.staff_service.shift_coverage(&range, day).await?;
    Ok((StatusCode::OK, Json(matrix)))
}

// GET /api/staff/schedule
#[utoipa::path(
    get,
    path = "/api/staff/schedule",
    tag = "Staff",
    params(StaffQuery),
    responses(
        (status = 200, description = "Grade semanal por funcionário, dias sem escala em OFF", body = Vec<ScheduleRow>),
        (status = 400, description = "Parâmetros inválidos"),
        (status = 500, description = "Falha de acesso aos dados")
    )
)]
pub async fn get_schedule(
    State(app_state): State<AppState>,
    Query(params): Query<StaffQuery>,
) -> Result<impl IntoResponse, AppError> {
    params.validate()?;
    let schedule = app_state
        .staff_service
        .staff_schedule(&params.range(), params.staff_id.as_deref(), params.role())
        .await?;
    Ok((StatusCode::OK, Json(schedule)))
}
