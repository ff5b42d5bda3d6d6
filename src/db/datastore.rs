// src/db/datastore.rs

use async_trait::async_trait;
use thiserror::Error;

use crate::db::query::Predicate;
use crate::models::inventory::{Ingredient, InventoryLevel, RecipeLink};
use crate::models::menu::Item;
use crate::models::orders::OrderLine;
use crate::models::staff::{ShiftAssignment, ShiftDefinition, StaffMember};

// Falha de transporte ao conversar com o banco. Quem decide o que fazer com
// ela é o chamador: quase todas as operações propagam, só a tendência de uso
// de ingrediente troca por série sintética.
#[derive(Debug, Error)]
#[error("Falha ao acessar o banco de dados: {source}")]
pub struct DataAccessError {
    #[from]
    pub source: sqlx::Error,
}

// A fronteira com o armazenamento externo: uma busca tipada por entidade,
// filtrada pelos predicados (AND implícito). Uma ida ao banco por chamada,
// sem retry e sem cache; os joins acontecem em memória na camada de serviço.
#[async_trait]
pub trait Datastore: Send + Sync {
    async fn fetch_order_lines(&self, predicates: &[Predicate]) -> Result<Vec<OrderLine>, DataAccessError>;

    async fn fetch_items(&self, predicates: &[Predicate]) -> Result<Vec<Item>, DataAccessError>;

    async fn fetch_ingredients(&self, predicates: &[Predicate]) -> Result<Vec<Ingredient>, DataAccessError>;

    async fn fetch_recipe_links(&self, predicates: &[Predicate]) -> Result<Vec<RecipeLink>, DataAccessError>;

    async fn fetch_inventory_levels(&self, predicates: &[Predicate]) -> Result<Vec<InventoryLevel>, DataAccessError>;

    async fn fetch_staff(&self, predicates: &[Predicate]) -> Result<Vec<StaffMember>, DataAccessError>;

    async fn fetch_shift_assignments(&self, predicates: &[Predicate]) -> Result<Vec<ShiftAssignment>, DataAccessError>;

    async fn fetch_shift_definitions(&self, predicates: &[Predicate]) -> Result<Vec<ShiftDefinition>, DataAccessError>;
}
