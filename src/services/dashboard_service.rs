// src/services/dashboard_service.rs

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::{
    common::error::AppError,
    db::{DateRange, Datastore, FilterValue, Predicate},
    models::charts::{KpiSummary, TopItemEntry, TrendPoint},
    models::menu::Item,
    models::orders::{FulfillmentMode, OrderLine},
    services::{join, labels},
};

#[derive(Clone)]
pub struct DashboardService {
    store: Arc<dyn Datastore>,
}

impl DashboardService {
    pub fn new(store: Arc<dyn Datastore>) -> Self {
        Self { store }
    }

    // Os cards do topo do painel.
    pub async fn kpis(&self, range: &DateRange) -> Result<KpiSummary, AppError> {
        let orders = self
            .store
            .fetch_order_lines(&range.predicates("created_at"))
            .await?;
        if orders.is_empty() {
            return Ok(KpiSummary::default());
        }
        let lookup = self.item_lookup(&orders).await?;
        Ok(summarize_kpis(&orders, &lookup))
    }

    // Receita por dia do intervalo (dias sem venda entram zerados).
    pub async fn sales_trend(&self, range: &DateRange) -> Result<Vec<TrendPoint>, AppError> {
        let orders = self
            .store
            .fetch_order_lines(&range.predicates("created_at"))
            .await?;
        if orders.is_empty() {
            return Ok(Vec::new());
        }
        let lookup = self.item_lookup(&orders).await?;
        Ok(revenue_by_day(&orders, &lookup, range))
    }

    // Top 5 itens por quantidade vendida.
    pub async fn top_items(&self, range: &DateRange) -> Result<Vec<TopItemEntry>, AppError> {
        let orders = self
            .store
            .fetch_order_lines(&range.predicates("created_at"))
            .await?;
        if orders.is_empty() {
            return Ok(Vec::new());
        }
        let lookup = self.item_lookup(&orders).await?;
        Ok(rank_by_quantity(&orders, &lookup))
    }

    async fn item_lookup(&self, orders: &[OrderLine]) -> Result<HashMap<String, Item>, AppError> {
        let item_ids = join::foreign_keys(orders, |line: &OrderLine| line.item_id.as_ref());
        let items = self
            .store
            .fetch_items(&[Predicate::within("item_id", FilterValue::TextSet(item_ids))])
            .await?;
        Ok(join::build_lookup(items, |item| item.item_id.clone()))
    }
}

fn line_revenue(line: &OrderLine, items: &HashMap<String, Item>) -> Option<Decimal> {
    let item = items.get(line.item_id.as_deref()?)?;
    Some(item.safe_price() * Decimal::from(line.safe_quantity()))
}

fn summarize_kpis(orders: &[OrderLine], items: &HashMap<String, Item>) -> KpiSummary {
    let mut total_sales = Decimal::ZERO;
    for line in orders {
        if let Some(amount) = line_revenue(line, items) {
            total_sales += amount;
        }
    }

    // Contagem de pedidos é por order_id distinto, não por linha.
    let distinct_orders: HashSet<i64> = orders.iter().map(|line| line.order_id).collect();
    let order_count = distinct_orders.len() as i64;
    let avg_order_value = if order_count > 0 {
        total_sales / Decimal::from(order_count)
    } else {
        Decimal::ZERO
    };

    // O percentual considera só as linhas com modalidade conhecida.
    let delivery = orders
        .iter()
        .filter(|line| line.fulfillment == Some(FulfillmentMode::Delivery))
        .count() as i64;
    let pickup = orders
        .iter()
        .filter(|line| line.fulfillment == Some(FulfillmentMode::Pickup))
        .count() as i64;
    let total = delivery + pickup;
    let (delivery_percentage, pickup_percentage) = if total > 0 {
        (
            delivery as f64 / total as f64 * 100.0,
            pickup as f64 / total as f64 * 100.0,
        )
    } else {
        (0.0, 0.0)
    };

    KpiSummary {
        total_sales,
        order_count,
        avg_order_value,
        delivery_percentage,
        pickup_percentage,
    }
}

fn revenue_by_day(
    orders: &[OrderLine],
    items: &HashMap<String, Item>,
    range: &DateRange,
) -> Vec<TrendPoint> {
    let (from, to) = range.span();
    let mut by_day: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    let mut current = from;
    while current <= to {
        by_day.insert(current, Decimal::ZERO);
        match current.succ_opt() {
            Some(next) => current = next,
            None => break,
        }
    }

    for line in orders {
        let Some(created_at) = line.created_at else { continue };
        let Some(slot) = by_day.get_mut(&created_at.date_naive()) else { continue };
        let Some(amount) = line_revenue(line, items) else { continue };
        *slot += amount;
    }

    by_day
        .into_iter()
        .map(|(day, amount)| TrendPoint { date: labels::day(day), amount })
        .collect()
}

// Quantidade somada por item, nome resolvido pelo lookup ("Item {id}" quando
// não dá). Ordenação estável, top 5.
fn rank_by_quantity(orders: &[OrderLine], items: &HashMap<String, Item>) -> Vec<TopItemEntry> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut ranking: Vec<(String, i64)> = Vec::new();

    for line in orders {
        let Some(item_id) = line.item_id.as_deref() else { continue };
        let slot = match index.get(item_id) {
            Some(&slot) => slot,
            None => {
                index.insert(item_id.to_string(), ranking.len());
                ranking.push((item_id.to_string(), 0));
                ranking.len() - 1
            }
        };
        ranking[slot].1 += line.safe_quantity();
    }

    ranking.sort_by(|a, b| b.1.cmp(&a.1));
    ranking.truncate(5);
    ranking
        .into_iter()
        .map(|(item_id, quantity)| TopItemEntry {
            name: items
                .get(&item_id)
                .and_then(|item| item.name.clone())
                .unwrap_or_else(|| format!("Item {item_id}")),
            quantity,
        })
        .collect()
}
