// src/db/pg_store.rs

use async_trait::async_trait;
use sqlx::{postgres::PgRow, PgPool, Postgres, QueryBuilder};

use crate::db::datastore::{DataAccessError, Datastore};
use crate::db::query::{FilterValue, Operator, Predicate};
use crate::models::inventory::{Ingredient, InventoryLevel, RecipeLink};
use crate::models::menu::Item;
use crate::models::orders::OrderLine;
use crate::models::staff::{ShiftAssignment, ShiftDefinition, StaffMember};

// Implementação Postgres do Datastore.
//
// As consultas são montadas em tempo de execução com QueryBuilder porque o
// esquema pertence ao banco hospedado; não existe banco disponível na hora do
// build para as macros de verificação do sqlx. Cada método é um SELECT plano
// sobre uma tabela, com os predicados virando WHERE; join e agregação ficam
// do lado do cliente.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_rows<T>(&self, select: &str, predicates: &[Predicate]) -> Result<Vec<T>, DataAccessError>
    where
        T: for<'r> sqlx::FromRow<'r, PgRow> + Send + Unpin + 'static,
    {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(select);
        push_predicates(&mut builder, predicates);
        let rows = builder.build_query_as::<T>().fetch_all(&self.pool).await?;
        Ok(rows)
    }
}

// Os nomes de campo vêm do código da própria crate, nunca da entrada do
// usuário; só os valores são bind parameters.
fn push_predicates(builder: &mut QueryBuilder<'_, Postgres>, predicates: &[Predicate]) {
    for (i, predicate) in predicates.iter().enumerate() {
        builder.push(if i == 0 { " WHERE " } else { " AND " });
        builder.push(predicate.field);
        match &predicate.value {
            FilterValue::IntSet(values) => {
                builder.push(" = ANY(");
                builder.push_bind(values.clone());
                builder.push(")");
            }
            FilterValue::TextSet(values) => {
                builder.push(" = ANY(");
                builder.push_bind(values.clone());
                builder.push(")");
            }
            FilterValue::Int(value) => {
                builder.push(operator_sql(predicate.op));
                builder.push_bind(*value);
            }
            FilterValue::Text(value) => {
                builder.push(operator_sql(predicate.op));
                builder.push_bind(value.clone());
            }
            FilterValue::Date(value) => {
                builder.push(operator_sql(predicate.op));
                builder.push_bind(*value);
            }
        }
    }
}

fn operator_sql(op: Operator) -> &'static str {
    match op {
        Operator::Eq | Operator::In => " = ",
        Operator::Gte => " >= ",
        Operator::Lte => " <= ",
    }
}

#[async_trait]
impl Datastore for PgStore {
    async fn fetch_order_lines(&self, predicates: &[Predicate]) -> Result<Vec<OrderLine>, DataAccessError> {
        self.fetch_rows(
            "SELECT order_id, customer_id, item_id, quantity, fulfillment, created_at FROM orders",
            predicates,
        )
        .await
    }

    async fn fetch_items(&self, predicates: &[Predicate]) -> Result<Vec<Item>, DataAccessError> {
        self.fetch_rows("SELECT item_id, name, price, category FROM items", predicates)
            .await
    }

    async fn fetch_ingredients(&self, predicates: &[Predicate]) -> Result<Vec<Ingredient>, DataAccessError> {
        self.fetch_rows(
            "SELECT ingredient_id, name, unit, reference_quantity FROM ingredients",
            predicates,
        )
        .await
    }

    async fn fetch_recipe_links(&self, predicates: &[Predicate]) -> Result<Vec<RecipeLink>, DataAccessError> {
        self.fetch_rows(
            "SELECT item_id, ingredient_id, quantity_per_item FROM recipes",
            predicates,
        )
        .await
    }

    async fn fetch_inventory_levels(&self, predicates: &[Predicate]) -> Result<Vec<InventoryLevel>, DataAccessError> {
        self.fetch_rows(
            "SELECT ingredient_id, quantity_on_hand FROM inventory_levels",
            predicates,
        )
        .await
    }

    async fn fetch_staff(&self, predicates: &[Predicate]) -> Result<Vec<StaffMember>, DataAccessError> {
        self.fetch_rows("SELECT staff_id, name, hourly_rate, role FROM staff", predicates)
            .await
    }

    async fn fetch_shift_assignments(&self, predicates: &[Predicate]) -> Result<Vec<ShiftAssignment>, DataAccessError> {
        self.fetch_rows(
            "SELECT staff_id, shift_id, date FROM shift_assignments",
            predicates,
        )
        .await
    }

    async fn fetch_shift_definitions(&self, predicates: &[Predicate]) -> Result<Vec<ShiftDefinition>, DataAccessError> {
        self.fetch_rows(
            "SELECT shift_id, day_of_week, start_time, end_time FROM shifts",
            predicates,
        )
        .await
    }
}
