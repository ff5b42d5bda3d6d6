// src/services/fallback.rs

use chrono::NaiveDate;
use rand::Rng;
use rust_decimal::Decimal;

use crate::models::charts::UsagePoint;
use crate::services::labels;

// O que fazer quando a busca primária de uma operação falha.
//
// O padrão é propagar; só a tendência de uso de ingrediente troca a falha por
// uma série sintética, e mesmo assim marcando a resposta e logando, para que
// dado fabricado nunca passe por dado real.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    Propagate,
    SubstituteSynthetic,
}

// Série de uso fabricada: um ponto por dia do intervalo (inclusive nas duas
// pontas), valor inteiro uniforme em [10, 25). O gráfico sempre recebe uma
// série cobrindo o período todo, mesmo com o banco fora do ar.
pub fn synthetic_usage_series(from: NaiveDate, to: NaiveDate) -> Vec<UsagePoint> {
    let mut rng = rand::thread_rng();
    let mut series = Vec::new();
    let mut current = from;
    while current <= to {
        let amount: i64 = rng.gen_range(10..25);
        series.push(UsagePoint {
            date: labels::day(current),
            amount: Decimal::from(amount),
        });
        match current.succ_opt() {
            Some(next) => current = next,
            None => break,
        }
    }
    series
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::prelude::ToPrimitive;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn covers_every_day_inclusive() {
        let series = synthetic_usage_series(date(2024, 1, 1), date(2024, 1, 5));
        assert_eq!(series.len(), 5);
        assert_eq!(series[0].date, "Jan 01");
        assert_eq!(series[4].date, "Jan 05");
    }

    #[test]
    fn values_stay_in_the_advertised_interval() {
        let series = synthetic_usage_series(date(2024, 3, 1), date(2024, 3, 31));
        for point in series {
            let amount = point.amount.to_i64().unwrap();
            assert!((10..25).contains(&amount), "valor fora do intervalo: {amount}");
        }
    }

    #[test]
    fn inverted_range_yields_empty_series() {
        let series = synthetic_usage_series(date(2024, 1, 10), date(2024, 1, 1));
        assert!(series.is_empty());
    }
}
