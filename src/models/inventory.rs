// src/models/inventory.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// Insumo de cozinha. `reference_quantity` é o estoque de referência usado
// para calcular o percentual de nível.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Ingredient {
    pub ingredient_id: String,
    pub name: Option<String>,
    pub unit: Option<String>,
    pub reference_quantity: Option<Decimal>,
}

// Ligação N:N entre item do cardápio e ingrediente (a receita).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RecipeLink {
    pub item_id: String,
    pub ingredient_id: String,
    pub quantity_per_item: Option<Decimal>,
}

// Fotografia atual do estoque: uma linha por ingrediente, sem histórico.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InventoryLevel {
    pub ingredient_id: String,
    pub quantity_on_hand: Option<Decimal>,
}
