// tests/common/mod.rs
//
// Datastore em memória para os testes: aplica os mesmos predicados que o
// PgStore traduziria para SQL e consegue simular falha de acesso por
// entidade.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use restaurante_analytics::db::{DataAccessError, Datastore, FilterValue, Operator, Predicate};
use restaurante_analytics::models::inventory::{Ingredient, InventoryLevel, RecipeLink};
use restaurante_analytics::models::menu::Item;
use restaurante_analytics::models::orders::OrderLine;
use restaurante_analytics::models::staff::{ShiftAssignment, ShiftDefinition, StaffMember};

#[derive(Default)]
pub struct MemoryStore {
    pub orders: Vec<OrderLine>,
    pub items: Vec<Item>,
    pub ingredients: Vec<Ingredient>,
    pub recipes: Vec<RecipeLink>,
    pub inventory: Vec<InventoryLevel>,
    pub staff: Vec<StaffMember>,
    pub assignments: Vec<ShiftAssignment>,
    pub shifts: Vec<ShiftDefinition>,
    pub fail_orders: bool,
    pub fail_items: bool,
}

fn unavailable() -> DataAccessError {
    DataAccessError::from(sqlx::Error::PoolTimedOut)
}

fn filter<T: Clone>(
    rows: &[T],
    predicates: &[Predicate],
    matches: fn(&T, &Predicate) -> bool,
) -> Vec<T> {
    rows.iter()
        .filter(|row| predicates.iter().all(|p| matches(row, p)))
        .cloned()
        .collect()
}

fn cmp_i64(op: Operator, lhs: i64, value: &FilterValue) -> bool {
    match (op, value) {
        (Operator::Eq, FilterValue::Int(v)) => lhs == *v,
        (Operator::Gte, FilterValue::Int(v)) => lhs >= *v,
        (Operator::Lte, FilterValue::Int(v)) => lhs <= *v,
        (Operator::In, FilterValue::IntSet(vs)) => vs.contains(&lhs),
        _ => false,
    }
}

fn cmp_text(op: Operator, lhs: &str, value: &FilterValue) -> bool {
    match (op, value) {
        (Operator::Eq, FilterValue::Text(v)) => lhs == v,
        (Operator::In, FilterValue::TextSet(vs)) => vs.iter().any(|v| v == lhs),
        _ => false,
    }
}

fn cmp_date(op: Operator, lhs: NaiveDate, value: &FilterValue) -> bool {
    match (op, value) {
        (Operator::Eq, FilterValue::Date(v)) => lhs == *v,
        (Operator::Gte, FilterValue::Date(v)) => lhs >= *v,
        (Operator::Lte, FilterValue::Date(v)) => lhs <= *v,
        _ => false,
    }
}

// Timestamps comparados contra a meia-noite da data, como o Postgres faria
// com um bind de DATE contra uma coluna timestamptz.
fn cmp_timestamp(op: Operator, lhs: DateTime<Utc>, value: &FilterValue) -> bool {
    let midnight = |day: NaiveDate| Utc.from_utc_datetime(&day.and_hms_opt(0, 0, 0).unwrap());
    match (op, value) {
        (Operator::Eq, FilterValue::Date(v)) => lhs == midnight(*v),
        (Operator::Gte, FilterValue::Date(v)) => lhs >= midnight(*v),
        (Operator::Lte, FilterValue::Date(v)) => lhs <= midnight(*v),
        _ => false,
    }
}

fn order_matches(line: &OrderLine, p: &Predicate) -> bool {
    match p.field {
        "order_id" => cmp_i64(p.op, line.order_id, &p.value),
        "customer_id" => line.customer_id.is_some_and(|v| cmp_i64(p.op, v, &p.value)),
        "item_id" => line.item_id.as_deref().is_some_and(|v| cmp_text(p.op, v, &p.value)),
        "created_at" => line.created_at.is_some_and(|v| cmp_timestamp(p.op, v, &p.value)),
        _ => false,
    }
}

fn item_matches(item: &Item, p: &Predicate) -> bool {
    match p.field {
        "item_id" => cmp_text(p.op, &item.item_id, &p.value),
        "category" => item.category.as_deref().is_some_and(|v| cmp_text(p.op, v, &p.value)),
        _ => false,
    }
}

fn ingredient_matches(ing: &Ingredient, p: &Predicate) -> bool {
    match p.field {
        "ingredient_id" => cmp_text(p.op, &ing.ingredient_id, &p.value),
        _ => false,
    }
}

fn recipe_matches(recipe: &RecipeLink, p: &Predicate) -> bool {
    match p.field {
        "item_id" => cmp_text(p.op, &recipe.item_id, &p.value),
        "ingredient_id" => cmp_text(p.op, &recipe.ingredient_id, &p.value),
        _ => false,
    }
}

fn inventory_matches(level: &InventoryLevel, p: &Predicate) -> bool {
    match p.field {
        "ingredient_id" => cmp_text(p.op, &level.ingredient_id, &p.value),
        _ => false,
    }
}

fn staff_matches(member: &StaffMember, p: &Predicate) -> bool {
    match p.field {
        "staff_id" => cmp_text(p.op, &member.staff_id, &p.value),
        "role" => member.role.as_deref().is_some_and(|v| cmp_text(p.op, v, &p.value)),
        _ => false,
    }
}

fn assignment_matches(a: &ShiftAssignment, p: &Predicate) -> bool {
    match p.field {
        "staff_id" => a.staff_id.as_deref().is_some_and(|v| cmp_text(p.op, v, &p.value)),
        "shift_id" => a.shift_id.as_deref().is_some_and(|v| cmp_text(p.op, v, &p.value)),
        "date" => a.date.is_some_and(|v| cmp_date(p.op, v, &p.value)),
        _ => false,
    }
}

fn shift_matches(shift: &ShiftDefinition, p: &Predicate) -> bool {
    match p.field {
        "shift_id" => cmp_text(p.op, &shift.shift_id, &p.value),
        _ => false,
    }
}

#[async_trait]
impl Datastore for MemoryStore {
    async fn fetch_order_lines(
        &self,
        predicates: &[Predicate],
    ) -> Result<Vec<OrderLine>, DataAccessError> {
        if self.fail_orders {
            return Err(unavailable());
        }
        Ok(filter(&self.orders, predicates, order_matches))
    }

    async fn fetch_items(&self, predicates: &[Predicate]) -> Result<Vec<Item>, DataAccessError> {
        if self.fail_items {
            return Err(unavailable());
        }
        Ok(filter(&self.items, predicates, item_matches))
    }

    async fn fetch_ingredients(
        &self,
        predicates: &[Predicate],
    ) -> Result<Vec<Ingredient>, DataAccessError> {
        Ok(filter(&self.ingredients, predicates, ingredient_matches))
    }

    async fn fetch_recipe_links(
        &self,
        predicates: &[Predicate],
    ) -> Result<Vec<RecipeLink>, DataAccessError> {
        Ok(filter(&self.recipes, predicates, recipe_matches))
    }

    async fn fetch_inventory_levels(
        &self,
        predicates: &[Predicate],
    ) -> Result<Vec<InventoryLevel>, DataAccessError> {
        Ok(filter(&self.inventory, predicates, inventory_matches))
    }

    async fn fetch_staff(
        &self,
        predicates: &[Predicate],
    ) -> Result<Vec<StaffMember>, DataAccessError> {
        Ok(filter(&self.staff, predicates, staff_matches))
    }

    async fn fetch_shift_assignments(
        &self,
        predicates: &[Predicate],
    ) -> Result<Vec<ShiftAssignment>, DataAccessError> {
        Ok(filter(&self.assignments, predicates, assignment_matches))
    }

    async fn fetch_shift_definitions(
        &self,
        predicates: &[Predicate],
    ) -> Result<Vec<ShiftDefinition>, DataAccessError> {
        Ok(filter(&self.shifts, predicates, shift_matches))
    }
}
