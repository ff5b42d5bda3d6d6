// src/services/customer_service.rs

use std::collections::HashMap;
use std::sync::Arc;

use crate::{
    common::error::AppError,
    db::{DateRange, Datastore, FilterValue, Predicate},
    models::charts::{FrequencyBucketEntry, MonthlySplitEntry, PreferenceEntry},
    models::menu::Item,
    models::orders::{FulfillmentMode, OrderLine},
    services::join,
};

// Baldes fixos de frequência, na ordem em que o gráfico os exibe.
// A saída nunca é reordenada por contagem.
const FREQUENCY_BUCKETS: [&str; 5] =
    ["1 order", "2-3 orders", "4-5 orders", "6-10 orders", "11+ orders"];

#[derive(Clone)]
pub struct CustomerAnalysisService {
    store: Arc<dyn Datastore>,
}

impl CustomerAnalysisService {
    pub fn new(store: Arc<dyn Datastore>) -> Self {
        Self { store }
    }

    // Quantos clientes fizeram 1, 2-3, 4-5... pedidos dentro do período.
    pub async fn order_frequency(
        &self,
        range: &DateRange,
    ) -> Result<Vec<FrequencyBucketEntry>, AppError> {
        let orders = self
            .store
            .fetch_order_lines(&range.predicates("created_at"))
            .await?;
        Ok(bucket_order_frequency(&orders))
    }

    // Top 5 itens por quantidade, opcionalmente de um único cliente.
    pub async fn customer_preferences(
        &self,
        range: &DateRange,
        customer_id: Option<i64>,
    ) -> Result<Vec<PreferenceEntry>, AppError> {
        let mut predicates = range.predicates("created_at");
        if let Some(id) = customer_id {
            predicates.push(Predicate::eq("customer_id", FilterValue::Int(id)));
        }
        let orders = self.store.fetch_order_lines(&predicates).await?;
        if orders.is_empty() {
            return Ok(Vec::new());
        }

        let item_ids = join::foreign_keys(&orders, |line: &OrderLine| line.item_id.as_ref());
        let items = self
            .store
            .fetch_items(&[Predicate::within("item_id", FilterValue::TextSet(item_ids))])
            .await?;
        let lookup = join::build_lookup(items, |item| item.item_id.clone());

        Ok(rank_preferences(&orders, &lookup))
    }

    // Split entrega/retirada por mês, já em percentuais.
    pub async fn delivery_pickup_split(
        &self,
        range: &DateRange,
        customer_id: Option<i64>,
    ) -> Result<Vec<MonthlySplitEntry>, AppError> {
        let mut predicates = range.predicates("created_at");
        if let Some(id) = customer_id {
            predicates.push(Predicate::eq("customer_id", FilterValue::Int(id)));
        }
        let orders = self.store.fetch_order_lines(&predicates).await?;
        Ok(split_by_month(&orders))
    }
}

// Classifica cada cliente em exatamente um balde pela contagem de pedidos
// distintos. Os cinco baldes saem sempre, mesmo zerados, na ordem fixa.
fn bucket_order_frequency(orders: &[OrderLine]) -> Vec<FrequencyBucketEntry> {
    // Um pedido tem várias linhas: primeiro reduzimos linha -> pedido.
    let mut order_customers: HashMap<i64, i64> = HashMap::new();
    for line in orders {
        if let Some(customer_id) = line.customer_id {
            order_customers.insert(line.order_id, customer_id);
        }
    }

    // Depois contamos pedidos distintos por cliente.
    let mut orders_per_customer: HashMap<i64, i64> = HashMap::new();
    for customer_id in order_customers.values() {
        *orders_per_customer.entry(*customer_id).or_insert(0) += 1;
    }

    let mut counts = [0i64; 5];
    for &count in orders_per_customer.values() {
        let slot = match count {
            1 => 0,
            2..=3 => 1,
            4..=5 => 2,
            6..=10 => 3,
            _ => 4,
        };
        counts[slot] += 1;
    }

    FREQUENCY_BUCKETS
        .iter()
        .zip(counts)
        .map(|(frequency, customers)| FrequencyBucketEntry {
            frequency: (*frequency).to_string(),
            customers,
        })
        .collect()
}

// Soma a quantidade por item. Item sem nome no lookup ainda aparece, como
// "Item {id}" (rótulo herdado do painel antigo; vale só para exibição, nunca
// para inventar preço ou quantidade). Ordenação decrescente estável: empates
// ficam na ordem de primeira aparição.
fn rank_preferences(orders: &[OrderLine], items: &HashMap<String, Item>) -> Vec<PreferenceEntry> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut totals: Vec<PreferenceEntry> = Vec::new();

    for line in orders {
        let Some(item_id) = line.item_id.as_deref() else { continue };
        let name = items
            .get(item_id)
            .and_then(|item| item.name.clone())
            .unwrap_or_else(|| format!("Item {item_id}"));
        let quantity = line.safe_quantity();
        match index.get(&name) {
            Some(&slot) => totals[slot].orders += quantity,
            None => {
                index.insert(name.clone(), totals.len());
                totals.push(PreferenceEntry { item: name, orders: quantity });
            }
        }
    }

    totals.sort_by(|a, b| b.orders.cmp(&a.orders));
    totals.truncate(5);
    totals
}

// Um registro por mês observado, na ordem de primeira aparição. Pedido sem
// modalidade conta como retirada (mesma leitura que o painel sempre fez).
fn split_by_month(orders: &[OrderLine]) -> Vec<MonthlySplitEntry> {
    struct MonthAcc {
        delivery: i64,
        pickup: i64,
        total: i64,
    }

    let mut index: HashMap<String, usize> = HashMap::new();
    let mut months: Vec<(String, MonthAcc)> = Vec::new();

    for line in orders {
        let Some(created_at) = line.created_at else { continue };
        let label = created_at.format("%b").to_string();
        let slot = match index.get(&label) {
            Some(&slot) => slot,
            None => {
                index.insert(label.clone(), months.len());
                months.push((label, MonthAcc { delivery: 0, pickup: 0, total: 0 }));
                months.len() - 1
            }
        };
        let acc = &mut months[slot].1;
        match line.fulfillment {
            Some(FulfillmentMode::Delivery) => acc.delivery += 1,
            _ => acc.pickup += 1,
        }
        acc.total += 1;
    }

    months
        .into_iter()
        .map(|(month, acc)| MonthlySplitEntry {
            month,
            delivery: percent(acc.delivery, acc.total),
            pickup: percent(acc.pickup, acc.total),
        })
        .collect()
}

// round(parte/total*100); total zero devolve 0 em vez de NaN.
fn percent(part: i64, total: i64) -> i64 {
    if total == 0 {
        return 0;
    }
    ((part as f64 / total as f64) * 100.0).round() as i64
}
