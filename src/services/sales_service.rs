// src/services/sales_service.rs

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::{
    common::error::AppError,
    db::{DateRange, Datastore, FilterValue, Predicate},
    models::charts::{
        BestSellerEntry, CategoryShareEntry, Granularity, PeakGranularity, PeakTimeEntry,
        SalesTrendEntry,
    },
    models::menu::Item,
    models::orders::OrderLine,
    services::{join, labels},
};

#[derive(Clone)]
pub struct SalesAnalysisService {
    store: Arc<dyn Datastore>,
}

impl SalesAnalysisService {
    pub fn new(store: Arc<dyn Datastore>) -> Self {
        Self { store }
    }

    // Tendência de vendas com filtro de categoria e granularidade.
    pub async fn sales_trend(
        &self,
        range: &DateRange,
        category: Option<&str>,
        granularity: Granularity,
    ) -> Result<Vec<SalesTrendEntry>, AppError> {
        let orders = self
            .store
            .fetch_order_lines(&range.predicates("created_at"))
            .await?;
        let item_ids = join::foreign_keys(&orders, |line: &OrderLine| line.item_id.as_ref());
        if item_ids.is_empty() {
            return Ok(Vec::new());
        }
        let lookup = self.item_lookup(item_ids, category).await?;

        Ok(match granularity {
            Granularity::Day => daily_revenue_trend(&orders, &lookup, range),
            Granularity::Week => keyed_revenue_trend(&orders, &lookup, labels::iso_week),
            Granularity::Month => {
                keyed_revenue_trend(&orders, &lookup, |day| day.format("%b %Y").to_string())
            }
        })
    }

    // Ranking de receita por item (top N).
    pub async fn best_selling_items(
        &self,
        range: &DateRange,
        category: Option<&str>,
        limit: usize,
    ) -> Result<Vec<BestSellerEntry>, AppError> {
        let orders = self
            .store
            .fetch_order_lines(&range.predicates("created_at"))
            .await?;
        if orders.is_empty() {
            return Ok(Vec::new());
        }
        let item_ids = join::foreign_keys(&orders, |line: &OrderLine| line.item_id.as_ref());
        let lookup = self.item_lookup(item_ids, category).await?;
        Ok(rank_by_revenue(&orders, &lookup, limit))
    }

    // Fatias da pizza: percentual da receita por categoria.
    pub async fn sales_by_category(
        &self,
        range: &DateRange,
    ) -> Result<Vec<CategoryShareEntry>, AppError> {
        let orders = self
            .store
            .fetch_order_lines(&range.predicates("created_at"))
            .await?;
        if orders.is_empty() {
            return Ok(Vec::new());
        }
        let item_ids = join::foreign_keys(&orders, |line: &OrderLine| line.item_id.as_ref());
        let lookup = self.item_lookup(item_ids, None).await?;
        Ok(category_share(&orders, &lookup))
    }

    // Histograma de horários de pico.
    pub async fn peak_order_times(
        &self,
        range: &DateRange,
        granularity: PeakGranularity,
    ) -> Result<Vec<PeakTimeEntry>, AppError> {
        let orders = self
            .store
            .fetch_order_lines(&range.predicates("created_at"))
            .await?;
        Ok(peak_histogram(&orders, granularity))
    }

    // Busca os itens referenciados pelos pedidos, já com o recorte de
    // categoria quando houver. Linhas cujo item ficar fora do lookup são
    // descartadas pelas agregações, o que materializa o filtro.
    async fn item_lookup(
        &self,
        item_ids: Vec<String>,
        category: Option<&str>,
    ) -> Result<HashMap<String, Item>, AppError> {
        let mut predicates = vec![Predicate::within("item_id", FilterValue::TextSet(item_ids))];
        if let Some(category) = category {
            predicates.push(Predicate::eq("category", FilterValue::Text(category.to_string())));
        }
        let items = self.store.fetch_items(&predicates).await?;
        Ok(join::build_lookup(items, |item| item.item_id.clone()))
    }
}

// Receita da linha: preço do item x quantidade. Item fora do lookup (não
// resolvido, ou cortado pelo filtro de categoria) exclui a linha da conta.
fn line_revenue(line: &OrderLine, items: &HashMap<String, Item>) -> Option<Decimal> {
    let item = items.get(line.item_id.as_deref()?)?;
    Some(item.safe_price() * Decimal::from(line.safe_quantity()))
}

// Série diária com todos os dias do intervalo presentes, zerados quando não
// houve venda.
fn daily_revenue_trend(
    orders: &[OrderLine],
    items: &HashMap<String, Item>,
    range: &DateRange,
) -> Vec<SalesTrendEntry> {
    let (from, to) = range.span();
    let mut by_day: BTreeMap<NaiveDate, (Decimal, i64)> = BTreeMap::new();
    let mut current = from;
    while current <= to {
        by_day.insert(current, (Decimal::ZERO, 0));
        match current.succ_opt() {
            Some(next) => current = next,
            None => break,
        }
    }

    for line in orders {
        let Some(created_at) = line.created_at else { continue };
        let Some(slot) = by_day.get_mut(&created_at.date_naive()) else { continue };
        let Some(amount) = line_revenue(line, items) else { continue };
        slot.0 += amount;
        slot.1 += 1;
    }

    by_day
        .into_iter()
        .map(|(day, (sales, orders))| SalesTrendEntry {
            date: labels::day(day),
            sales,
            orders,
        })
        .collect()
}

// Semana/mês: só os períodos observados, em ordem cronológica.
fn keyed_revenue_trend<F>(
    orders: &[OrderLine],
    items: &HashMap<String, Item>,
    label: F,
) -> Vec<SalesTrendEntry>
where
    F: Fn(NaiveDate) -> String,
{
    let mut dated: Vec<&OrderLine> = orders.iter().filter(|o| o.created_at.is_some()).collect();
    dated.sort_by_key(|o| o.created_at);

    let mut index: HashMap<String, usize> = HashMap::new();
    let mut series: Vec<SalesTrendEntry> = Vec::new();
    for line in dated {
        let Some(created_at) = line.created_at else { continue };
        let Some(amount) = line_revenue(line, items) else { continue };
        let key = label(created_at.date_naive());
        let slot = match index.get(&key) {
            Some(&slot) => slot,
            None => {
                index.insert(key.clone(), series.len());
                series.push(SalesTrendEntry { date: key, sales: Decimal::ZERO, orders: 0 });
                series.len() - 1
            }
        };
        series[slot].sales += amount;
        series[slot].orders += 1;
    }
    series
}

// Acumula receita por item e ordena do maior para o menor (estável, então
// empates mantêm a ordem de primeira aparição).
fn rank_by_revenue(
    orders: &[OrderLine],
    items: &HashMap<String, Item>,
    limit: usize,
) -> Vec<BestSellerEntry> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut ranking: Vec<BestSellerEntry> = Vec::new();

    for line in orders {
        let Some(item_id) = line.item_id.as_deref() else { continue };
        let Some(item) = items.get(item_id) else { continue };
        let amount = item.safe_price() * Decimal::from(line.safe_quantity());
        let slot = match index.get(item_id) {
            Some(&slot) => slot,
            None => {
                index.insert(item_id.to_string(), ranking.len());
                let name = item
                    .name
                    .clone()
                    .unwrap_or_else(|| format!("Item {item_id}"));
                ranking.push(BestSellerEntry { name, sales: Decimal::ZERO });
                ranking.len() - 1
            }
        };
        ranking[slot].sales += amount;
    }

    ranking.sort_by(|a, b| b.sales.cmp(&a.sales));
    ranking.truncate(limit);
    ranking
}

// Fatias por categoria. Item não resolvido fica fora do numerador E do
// denominador; item resolvido sem categoria cai em "Uncategorized".
fn category_share(orders: &[OrderLine], items: &HashMap<String, Item>) -> Vec<CategoryShareEntry> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut shares: Vec<(String, Decimal)> = Vec::new();
    let mut total = Decimal::ZERO;

    for line in orders {
        let Some(item_id) = line.item_id.as_deref() else { continue };
        let Some(item) = items.get(item_id) else { continue };
        let category = item
            .category
            .clone()
            .unwrap_or_else(|| "Uncategorized".to_string());
        let amount = item.safe_price() * Decimal::from(line.safe_quantity());
        let slot = match index.get(&category) {
            Some(&slot) => slot,
            None => {
                index.insert(category.clone(), shares.len());
                shares.push((category, Decimal::ZERO));
                shares.len() - 1
            }
        };
        shares[slot].1 += amount;
        total += amount;
    }

    shares
        .into_iter()
        .map(|(name, value)| CategoryShareEntry {
            name,
            value: decimal_percent(value, total),
        })
        .collect()
}

// round(parte/total*100) com meio-pra-cima; total zero devolve 0 para todos.
fn decimal_percent(part: Decimal, total: Decimal) -> i64 {
    if total.is_zero() {
        return 0;
    }
    (part / total * Decimal::from(100))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or(0)
}

fn peak_histogram(orders: &[OrderLine], granularity: PeakGranularity) -> Vec<PeakTimeEntry> {
    match granularity {
        // Sempre as 24 barras fixas, da meia-noite em diante, zeradas quando
        // não houve pedido naquela hora.
        PeakGranularity::Hourly => {
            let mut counts = [0i64; 24];
            for line in orders {
                if let Some(created_at) = line.created_at {
                    counts[created_at.hour() as usize] += 1;
                }
            }
            (0u32..24)
                .map(|h| PeakTimeEntry { hour: labels::hour(h), orders: counts[h as usize] })
                .collect()
        }
        PeakGranularity::Daily => keyed_counts(orders, |ts| ts.format("%a").to_string()),
        PeakGranularity::Weekly => keyed_counts(orders, |ts| ts.iso_week().week().to_string()),
    }
}

// Uma barra por valor observado, na ordem de primeira aparição.
fn keyed_counts<F>(orders: &[OrderLine], key: F) -> Vec<PeakTimeEntry>
where
    F: Fn(DateTime<Utc>) -> String,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<PeakTimeEntry> = Vec::new();
    for line in orders {
        let Some(created_at) = line.created_at else { continue };
        let k = key(created_at);
        match index.get(&k) {
            Some(&slot) => counts[slot].orders += 1,
            None => {
                index.insert(k.clone(), counts.len());
                counts.push(PeakTimeEntry { hour: k, orders: 1 });
            }
        }
    }
    counts
}
