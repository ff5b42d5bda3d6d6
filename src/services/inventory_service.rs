// src/services/inventory_service.rs

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::{
    common::error::AppError,
    db::{DataAccessError, DateRange, Datastore, FilterValue, Predicate},
    models::charts::{InventoryLevelEntry, UsagePoint, UsageTrendSeries},
    models::inventory::{Ingredient, InventoryLevel, RecipeLink},
    models::orders::OrderLine,
    services::fallback::{synthetic_usage_series, FailurePolicy},
    services::{join, labels},
};

#[derive(Clone)]
pub struct InventoryService {
    store: Arc<dyn Datastore>,
    // Só a tendência de uso troca falha por série sintética; todo o resto
    // do serviço propaga como as demais operações do painel.
    usage_policy: FailurePolicy,
}

impl InventoryService {
    pub fn new(store: Arc<dyn Datastore>) -> Self {
        Self { store, usage_policy: FailurePolicy::SubstituteSynthetic }
    }

    pub fn with_usage_policy(mut self, policy: FailurePolicy) -> Self {
        self.usage_policy = policy;
        self
    }

    // Nível de cada ingrediente em percentual do estoque de referência.
    //
    // O filtro de categoria é aceito mas não recorta nada: a tabela de
    // ingredientes não tem coluna de categoria.
    pub async fn inventory_levels(
        &self,
        _category: Option<&str>,
    ) -> Result<Vec<InventoryLevelEntry>, AppError> {
        let levels = self.store.fetch_inventory_levels(&[]).await?;
        if levels.is_empty() {
            return Ok(Vec::new());
        }

        let ingredient_ids =
            join::foreign_keys(&levels, |level: &InventoryLevel| Some(&level.ingredient_id));
        let ingredients = self
            .store
            .fetch_ingredients(&[Predicate::within(
                "ingredient_id",
                FilterValue::TextSet(ingredient_ids),
            )])
            .await?;
        let lookup = join::build_lookup(ingredients, |ing| ing.ingredient_id.clone());

        Ok(level_percentages(&levels, &lookup))
    }

    // Uso de ingrediente por dia, derivado das receitas dos itens pedidos.
    // Única operação do painel com fallback: qualquer falha de acesso vira
    // série sintética marcada, para o gráfico nunca ficar em branco.
    pub async fn ingredient_usage_trend(
        &self,
        range: &DateRange,
        ingredient_id: Option<&str>,
    ) -> Result<UsageTrendSeries, AppError> {
        match self.primary_usage_trend(range, ingredient_id).await {
            Ok(series) => Ok(UsageTrendSeries { synthetic: false, series }),
            Err(error) if self.usage_policy == FailurePolicy::SubstituteSynthetic => {
                let (from, to) = range.span();
                tracing::warn!(
                    "Falha ao montar a tendência de uso ({}); servindo série sintética",
                    error
                );
                Ok(UsageTrendSeries {
                    synthetic: true,
                    series: synthetic_usage_series(from, to),
                })
            }
            Err(error) => Err(error.into()),
        }
    }

    async fn primary_usage_trend(
        &self,
        range: &DateRange,
        ingredient_id: Option<&str>,
    ) -> Result<Vec<UsagePoint>, DataAccessError> {
        let orders = self
            .store
            .fetch_order_lines(&range.predicates("created_at"))
            .await?;
        if orders.is_empty() {
            return Ok(Vec::new());
        }

        let item_ids = join::foreign_keys(&orders, |line: &OrderLine| line.item_id.as_ref());
        let mut predicates = vec![Predicate::within("item_id", FilterValue::TextSet(item_ids))];
        if let Some(id) = ingredient_id {
            predicates.push(Predicate::eq("ingredient_id", FilterValue::Text(id.to_string())));
        }
        let recipes = self.store.fetch_recipe_links(&predicates).await?;

        Ok(usage_by_day(&orders, &recipes))
    }
}

// level = min(100, round(em_maos / referencia * 100)), sempre em [0, 100].
// Ingrediente não resolvido sai da lista (nunca inventamos peso de
// referência); referência nula ou zerada rende nível 0.
fn level_percentages(
    levels: &[InventoryLevel],
    ingredients: &HashMap<String, Ingredient>,
) -> Vec<InventoryLevelEntry> {
    let mut entries = Vec::new();
    for level in levels {
        let Some(ingredient) = ingredients.get(&level.ingredient_id) else { continue };
        let name = ingredient
            .name
            .clone()
            .unwrap_or_else(|| format!("Ingredient {}", level.ingredient_id));
        entries.push(InventoryLevelEntry {
            id: level.ingredient_id.clone(),
            name,
            level: fill_percentage(level.quantity_on_hand, ingredient.reference_quantity),
            unit: ingredient.unit.clone(),
        });
    }
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    entries
}

fn fill_percentage(on_hand: Option<Decimal>, reference: Option<Decimal>) -> i64 {
    let on_hand = on_hand.unwrap_or(Decimal::ZERO).max(Decimal::ZERO);
    let reference = reference.unwrap_or(Decimal::ZERO);
    if reference <= Decimal::ZERO {
        return 0;
    }
    (on_hand / reference * Decimal::from(100))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or(0)
        .clamp(0, 100)
}

// Uso = quantidade da receita x quantidade pedida, somado por dia.
fn usage_by_day(orders: &[OrderLine], recipes: &[RecipeLink]) -> Vec<UsagePoint> {
    // Índice item -> receitas para não varrer a lista inteira por pedido.
    let mut recipes_by_item: HashMap<&str, Vec<&RecipeLink>> = HashMap::new();
    for recipe in recipes {
        recipes_by_item.entry(recipe.item_id.as_str()).or_default().push(recipe);
    }

    let mut by_day: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for line in orders {
        let Some(created_at) = line.created_at else { continue };
        let Some(item_id) = line.item_id.as_deref() else { continue };
        let Some(links) = recipes_by_item.get(item_id) else { continue };
        let quantity = Decimal::from(line.safe_quantity());
        for link in links {
            let per_item = link.quantity_per_item.unwrap_or(Decimal::ZERO).max(Decimal::ZERO);
            *by_day.entry(created_at.date_naive()).or_insert(Decimal::ZERO) +=
                per_item * quantity;
        }
    }

    by_day
        .into_iter()
        .map(|(day, amount)| UsagePoint { date: labels::day(day), amount })
        .collect()
}
