// src/models/staff.rs

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StaffMember {
    pub staff_id: String,
    pub name: Option<String>,
    pub hourly_rate: Option<Decimal>,
    pub role: Option<String>,
}

// Escala: funcionário x turno x data.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ShiftAssignment {
    pub staff_id: Option<String>,
    pub shift_id: Option<String>,
    pub date: Option<NaiveDate>,
}

// Definição de turno. end_time menor que start_time significa turno que
// atravessa a meia-noite (a duração ganha +24h).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ShiftDefinition {
    pub shift_id: String,
    pub day_of_week: Option<String>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
}
