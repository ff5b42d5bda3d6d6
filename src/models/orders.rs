// src/models/orders.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

// Modalidade de atendimento do pedido.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "fulfillment_mode", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FulfillmentMode {
    Delivery,
    Pickup,
}

// Uma linha de pedido. Um pedido pode ter várias linhas (uma por item), então
// contagens "de pedidos" sempre reduzem por order_id antes.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OrderLine {
    pub order_id: i64,
    pub customer_id: Option<i64>,
    pub item_id: Option<String>,
    pub quantity: Option<i32>,
    pub fulfillment: Option<FulfillmentMode>,
    pub created_at: Option<DateTime<Utc>>,
}

impl OrderLine {
    // Quantidade saneada: ausente vale zero e negativo nunca entra em conta.
    pub fn safe_quantity(&self) -> i64 {
        i64::from(self.quantity.unwrap_or(0).max(0))
    }
}
