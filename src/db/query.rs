// src/db/query.rs

use chrono::{NaiveDate, Utc};

// Intervalo de datas vindo do seletor da UI. `to` ausente significa "até hoje".
//
// Um intervalo invertido (from > to) não é erro: os predicados gte/lte
// simplesmente não casam com nada e o resultado é vazio.
#[derive(Debug, Clone, Copy)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    pub fn span(&self) -> (NaiveDate, NaiveDate) {
        (self.from, self.to.unwrap_or_else(|| Utc::now().date_naive()))
    }

    // O par de predicados [campo >= from, campo <= to] usado por todas as
    // consultas com janela de tempo.
    pub fn predicates(&self, field: &'static str) -> Vec<Predicate> {
        let (from, to) = self.span();
        vec![
            Predicate::gte(field, FilterValue::Date(from)),
            Predicate::lte(field, FilterValue::Date(to)),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Eq,
    Gte,
    Lte,
    In,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Int(i64),
    Text(String),
    Date(NaiveDate),
    IntSet(Vec<i64>),
    TextSet(Vec<String>),
}

// A tripla (campo, operador, valor) que o Datastore sabe traduzir.
// Vários predicados na mesma consulta combinam com AND implícito.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub field: &'static str,
    pub op: Operator,
    pub value: FilterValue,
}

impl Predicate {
    pub fn eq(field: &'static str, value: FilterValue) -> Self {
        Self { field, op: Operator::Eq, value }
    }

    pub fn gte(field: &'static str, value: FilterValue) -> Self {
        Self { field, op: Operator::Gte, value }
    }

    pub fn lte(field: &'static str, value: FilterValue) -> Self {
        Self { field, op: Operator::Lte, value }
    }

    // Pertinência a conjunto (o IN do cliente de dados).
    pub fn within(field: &'static str, value: FilterValue) -> Self {
        Self { field, op: Operator::In, value }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn range_emits_gte_lte_pair() {
        let range = DateRange::new(date(2024, 1, 1), Some(date(2024, 1, 31)));
        let preds = range.predicates("created_at");
        assert_eq!(preds.len(), 2);
        assert_eq!(preds[0], Predicate::gte("created_at", FilterValue::Date(date(2024, 1, 1))));
        assert_eq!(preds[1], Predicate::lte("created_at", FilterValue::Date(date(2024, 1, 31))));
    }

    #[test]
    fn inverted_range_flows_through_unchanged() {
        // Intervalo invertido não vira erro: os predicados saem como estão
        // e nenhuma linha casa com os dois ao mesmo tempo.
        let range = DateRange::new(date(2024, 2, 10), Some(date(2024, 2, 1)));
        let preds = range.predicates("date");
        assert_eq!(preds[0].value, FilterValue::Date(date(2024, 2, 10)));
        assert_eq!(preds[1].value, FilterValue::Date(date(2024, 2, 1)));
    }

    #[test]
    fn open_range_resolves_to_today() {
        let range = DateRange::new(date(2024, 1, 1), None);
        let (from, to) = range.span();
        assert_eq!(from, date(2024, 1, 1));
        assert_eq!(to, Utc::now().date_naive());
    }
}
