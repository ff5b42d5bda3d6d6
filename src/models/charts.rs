// src/models/charts.rs
//
// Os formatos prontos-para-gráfico que os serviços devolvem. Os nomes de
// campo seguem o que os componentes de gráfico do painel esperam.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::staff::StaffMember;

// Resolução de agregação temporal das tendências de venda.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    #[default]
    Day,
    Week,
    Month,
}

// Resolução do histograma de horários de pico.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PeakGranularity {
    #[default]
    Hourly,
    Daily,
    Weekly,
}

// Cards do topo do painel.
#[derive(Debug, Clone, Default, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct KpiSummary {
    pub total_sales: Decimal,
    pub order_count: i64,
    pub avg_order_value: Decimal,
    pub delivery_percentage: f64,
    pub pickup_percentage: f64,
}

// Ponto de série diária de receita (gráfico de linha do painel).
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TrendPoint {
    pub date: String,
    pub amount: Decimal,
}

// Mais vendidos por quantidade.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TopItemEntry {
    pub name: String,
    pub quantity: i64,
}

// Tendência de vendas com filtros: receita e número de linhas por período.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SalesTrendEntry {
    pub date: String,
    pub sales: Decimal,
    pub orders: i64,
}

// Ranking de receita por item.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BestSellerEntry {
    pub name: String,
    pub sales: Decimal,
}

// Fatia do gráfico de pizza: percentual inteiro da receita da categoria.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CategoryShareEntry {
    pub name: String,
    pub value: i64,
}

// Barra do histograma de horários de pico.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PeakTimeEntry {
    pub hour: String,
    pub orders: i64,
}

// Linha do gráfico de frequência: rótulo do balde + clientes naquele balde.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FrequencyBucketEntry {
    pub frequency: String,
    pub customers: i64,
}

// Preferência de item: quantidade somada no período.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PreferenceEntry {
    pub item: String,
    pub orders: i64,
}

// Split entrega/retirada por mês, já em percentuais.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MonthlySplitEntry {
    pub month: String,
    pub delivery: i64,
    pub pickup: i64,
}

// Nível de estoque em percentual [0,100] do estoque de referência.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct InventoryLevelEntry {
    pub id: String,
    pub name: String,
    pub level: i64,
    pub unit: Option<String>,
}

// Ponto da série de uso de ingrediente.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UsagePoint {
    pub date: String,
    pub amount: Decimal,
}

// Série de uso com a marcação de origem: quando a busca primária falha a
// série é sintética e o consumidor precisa conseguir distinguir isso.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UsageTrendSeries {
    pub synthetic: bool,
    pub series: Vec<UsagePoint>,
}

// Horas e custo acumulados por funcionário no período.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StaffHoursEntry {
    pub name: String,
    pub hours: f64,
    pub cost: i64,
}

// Cobertura de turnos: contagem por faixa do dia, sempre 7 linhas (seg-dom).
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ShiftCoverageEntry {
    pub day: String,
    pub morning: i64,
    pub afternoon: i64,
    pub evening: i64,
}

// Grade semanal de um funcionário. Os dias começam todos em "OFF" e só são
// sobrescritos quando existe escala naquele dia.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ScheduleRow {
    pub id: String,
    pub name: String,
    pub role: Option<String>,
    pub monday: String,
    pub tuesday: String,
    pub wednesday: String,
    pub thursday: String,
    pub friday: String,
    pub saturday: String,
    pub sunday: String,
}

const OFF: &str = "OFF";

impl ScheduleRow {
    pub fn off_week(member: &StaffMember) -> Self {
        Self {
            id: member.staff_id.clone(),
            name: member
                .name
                .clone()
                .unwrap_or_else(|| format!("Staff {}", member.staff_id)),
            role: member.role.clone(),
            monday: OFF.to_string(),
            tuesday: OFF.to_string(),
            wednesday: OFF.to_string(),
            thursday: OFF.to_string(),
            friday: OFF.to_string(),
            saturday: OFF.to_string(),
            sunday: OFF.to_string(),
        }
    }

    // `day` em minúsculas; dias desconhecidos são ignorados.
    pub fn set_day(&mut self, day: &str, cell: String) {
        match day {
            "monday" => self.monday = cell,
            "tuesday" => self.tuesday = cell,
            "wednesday" => self.wednesday = cell,
            "thursday" => self.thursday = cell,
            "friday" => self.friday = cell,
            "saturday" => self.saturday = cell,
            "sunday" => self.sunday = cell,
            _ => {}
        }
    }
}
