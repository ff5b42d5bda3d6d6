// src/services/staff_service.rs

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Timelike;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::{
    common::error::AppError,
    db::{DateRange, Datastore, FilterValue, Predicate},
    models::charts::{ScheduleRow, ShiftCoverageEntry, StaffHoursEntry},
    models::staff::{ShiftAssignment, ShiftDefinition, StaffMember},
    services::{join, labels},
};

// Os 7 rótulos fixos da matriz de cobertura, sempre presentes.
const WEEKDAYS: [&str; 7] =
    ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday"];

#[derive(Clone)]
pub struct StaffService {
    store: Arc<dyn Datastore>,
}

impl StaffService {
    pub fn new(store: Arc<dyn Datastore>) -> Self {
        Self { store }
    }

    // Horas trabalhadas e custo por funcionário no período.
    pub async fn staff_hours(
        &self,
        range: &DateRange,
        staff_id: Option<&str>,
        role: Option<&str>,
    ) -> Result<Vec<StaffHoursEntry>, AppError> {
        let mut predicates = range.predicates("date");
        if let Some(id) = staff_id {
            predicates.push(Predicate::eq("staff_id", FilterValue::Text(id.to_string())));
        }
        let assignments = self.store.fetch_shift_assignments(&predicates).await?;
        if assignments.is_empty() {
            return Ok(Vec::new());
        }

        let durations = self.shift_durations(&assignments).await?;

        // O filtro de cargo entra na busca de funcionários; escala de quem
        // ficou de fora é simplesmente pulada na soma.
        let staff_ids =
            join::foreign_keys(&assignments, |a: &ShiftAssignment| a.staff_id.as_ref());
        let mut staff_predicates =
            vec![Predicate::within("staff_id", FilterValue::TextSet(staff_ids))];
        if let Some(role) = role {
            staff_predicates.push(Predicate::eq("role", FilterValue::Text(role.to_string())));
        }
        let staff = self.store.fetch_staff(&staff_predicates).await?;
        let lookup = join::build_lookup(staff, |member| member.staff_id.clone());

        Ok(accumulate_hours(&assignments, &durations, &lookup))
    }

    // Matriz de cobertura: turnos por dia da semana x faixa do dia.
    pub async fn shift_coverage(
        &self,
        range: &DateRange,
        day_of_week: Option<&str>,
    ) -> Result<Vec<ShiftCoverageEntry>, AppError> {
        let assignments = self
            .store
            .fetch_shift_assignments(&range.predicates("date"))
            .await?;
        let shifts = self.shift_lookup(&assignments).await?;
        Ok(coverage_matrix(&assignments, &shifts, day_of_week))
    }

    // Grade semanal por funcionário, pré-preenchida com "OFF".
    pub async fn staff_schedule(
        &self,
        range: &DateRange,
        staff_id: Option<&str>,
        role: Option<&str>,
    ) -> Result<Vec<ScheduleRow>, AppError> {
        let mut staff_predicates = Vec::new();
        if let Some(id) = staff_id {
            staff_predicates.push(Predicate::eq("staff_id", FilterValue::Text(id.to_string())));
        }
        if let Some(role) = role {
            staff_predicates.push(Predicate::eq("role", FilterValue::Text(role.to_string())));
        }
        let staff = self.store.fetch_staff(&staff_predicates).await?;
        if staff.is_empty() {
            return Ok(Vec::new());
        }

        let staff_ids: Vec<String> = staff.iter().map(|m| m.staff_id.clone()).collect();
        let mut predicates = range.predicates("date");
        predicates.push(Predicate::within("staff_id", FilterValue::TextSet(staff_ids)));
        let assignments = self.store.fetch_shift_assignments(&predicates).await?;

        let shifts = self.shift_lookup(&assignments).await?;
        Ok(weekly_grid(&staff, &assignments, &shifts))
    }

    async fn shift_lookup(
        &self,
        assignments: &[ShiftAssignment],
    ) -> Result<HashMap<String, ShiftDefinition>, AppError> {
        let shift_ids = join::foreign_keys(assignments, |a: &ShiftAssignment| a.shift_id.as_ref());
        if shift_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let shifts = self
            .store
            .fetch_shift_definitions(&[Predicate::within(
                "shift_id",
                FilterValue::TextSet(shift_ids),
            )])
            .await?;
        Ok(join::build_lookup(shifts, |shift| shift.shift_id.clone()))
    }

    async fn shift_durations(
        &self,
        assignments: &[ShiftAssignment],
    ) -> Result<HashMap<String, f64>, AppError> {
        let shifts = self.shift_lookup(assignments).await?;
        Ok(shifts
            .into_iter()
            .filter_map(|(id, shift)| shift_duration_hours(&shift).map(|hours| (id, hours)))
            .collect())
    }
}

// Duração em horas; fim antes do início significa turno que atravessa a
// meia-noite, então soma 24.
fn shift_duration_hours(shift: &ShiftDefinition) -> Option<f64> {
    let start = shift.start_time?;
    let end = shift.end_time?;
    let mut hours = (end - start).num_seconds() as f64 / 3600.0;
    if hours < 0.0 {
        hours += 24.0;
    }
    Some(hours)
}

// Soma horas e custo por funcionário. Escala com funcionário fora do lookup
// (cortado pelo filtro de cargo) ou turno sem duração é pulada inteira.
// Horas com 1 casa decimal, custo arredondado para inteiro.
fn accumulate_hours(
    assignments: &[ShiftAssignment],
    durations: &HashMap<String, f64>,
    staff: &HashMap<String, StaffMember>,
) -> Vec<StaffHoursEntry> {
    struct Acc {
        name: String,
        hours: f64,
        cost: f64,
    }

    let mut index: HashMap<String, usize> = HashMap::new();
    let mut totals: Vec<Acc> = Vec::new();

    for assignment in assignments {
        let Some(staff_id) = assignment.staff_id.as_deref() else { continue };
        let Some(shift_id) = assignment.shift_id.as_deref() else { continue };
        let Some(member) = staff.get(staff_id) else { continue };
        let Some(&hours) = durations.get(shift_id) else { continue };

        let rate = member
            .hourly_rate
            .unwrap_or(Decimal::ZERO)
            .max(Decimal::ZERO)
            .to_f64()
            .unwrap_or(0.0);
        let slot = match index.get(staff_id) {
            Some(&slot) => slot,
            None => {
                index.insert(staff_id.to_string(), totals.len());
                let name = member
                    .name
                    .clone()
                    .unwrap_or_else(|| format!("Staff {staff_id}"));
                totals.push(Acc { name, hours: 0.0, cost: 0.0 });
                totals.len() - 1
            }
        };
        totals[slot].hours += hours;
        totals[slot].cost += hours * rate;
    }

    totals
        .into_iter()
        .map(|acc| StaffHoursEntry {
            name: acc.name,
            hours: (acc.hours * 10.0).round() / 10.0,
            cost: acc.cost.round() as i64,
        })
        .collect()
}

// Sempre as 7 linhas de segunda a domingo, mesmo sem nenhuma escala. O dia
// vem da definição do turno; sem ele, do dia da semana da data escalada.
fn coverage_matrix(
    assignments: &[ShiftAssignment],
    shifts: &HashMap<String, ShiftDefinition>,
    day_filter: Option<&str>,
) -> Vec<ShiftCoverageEntry> {
    let mut counts = [[0i64; 3]; 7];

    for assignment in assignments {
        let Some(shift_id) = assignment.shift_id.as_deref() else { continue };
        let Some(shift) = shifts.get(shift_id) else { continue };

        let day = shift
            .day_of_week
            .clone()
            .or_else(|| assignment.date.map(|d| d.format("%A").to_string()));
        let Some(day) = day else { continue };
        if let Some(filter) = day_filter {
            if filter != day {
                continue;
            }
        }
        let Some(row) = WEEKDAYS.iter().position(|w| *w == day) else { continue };
        let Some(start) = shift.start_time else { continue };

        let slot = match start.hour() {
            6..=11 => 0,
            12..=17 => 1,
            _ => 2,
        };
        counts[row][slot] += 1;
    }

    WEEKDAYS
        .iter()
        .zip(counts)
        .map(|(day, c)| ShiftCoverageEntry {
            day: (*day).to_string(),
            morning: c[0],
            afternoon: c[1],
            evening: c[2],
        })
        .collect()
}

// Uma linha por funcionário, todos os dias "OFF" até existir escala. A célula
// vira "9AM-5PM" com os horários do turno.
fn weekly_grid(
    staff: &[StaffMember],
    assignments: &[ShiftAssignment],
    shifts: &HashMap<String, ShiftDefinition>,
) -> Vec<ScheduleRow> {
    let index: HashMap<&str, usize> = staff
        .iter()
        .enumerate()
        .map(|(i, member)| (member.staff_id.as_str(), i))
        .collect();
    let mut rows: Vec<ScheduleRow> = staff.iter().map(ScheduleRow::off_week).collect();

    for assignment in assignments {
        let Some(staff_id) = assignment.staff_id.as_deref() else { continue };
        let Some(shift_id) = assignment.shift_id.as_deref() else { continue };
        let Some(&row) = index.get(staff_id) else { continue };
        let Some(shift) = shifts.get(shift_id) else { continue };

        let day = shift
            .day_of_week
            .clone()
            .map(|d| d.to_lowercase())
            .or_else(|| assignment.date.map(|d| d.format("%A").to_string().to_lowercase()));
        let Some(day) = day else { continue };

        let (Some(start), Some(end)) = (shift.start_time, shift.end_time) else { continue };
        let cell = format!("{}-{}", labels::clock(start), labels::clock(end));
        rows[row].set_day(&day, cell);
    }

    rows
}
