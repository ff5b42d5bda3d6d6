// src/models/menu.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// Item do cardápio.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Item {
    pub item_id: String,
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub category: Option<String>,
}

impl Item {
    // Preço saneado: ausente vale zero e negativo nunca entra em conta.
    pub fn safe_price(&self) -> Decimal {
        self.price.unwrap_or(Decimal::ZERO).max(Decimal::ZERO)
    }
}
