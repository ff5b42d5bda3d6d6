// src/config.rs

use sqlx::postgres::PgPoolOptions;
use std::{env, sync::Arc, time::Duration};

use crate::{
    db::{Datastore, PgStore},
    services::{
        CustomerAnalysisService, DashboardService, InventoryService, SalesAnalysisService,
        StaffService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub dashboard_service: DashboardService,
    pub sales_service: SalesAnalysisService,
    pub customer_service: CustomerAnalysisService,
    pub inventory_service: InventoryService,
    pub staff_service: StaffService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        Ok(Self::with_store(Arc::new(PgStore::new(db_pool))))
    }

    // Monta o gráfico de dependências sobre qualquer Datastore.
    // Os testes injetam um store em memória por aqui.
    pub fn with_store(store: Arc<dyn Datastore>) -> Self {
        Self {
            dashboard_service: DashboardService::new(store.clone()),
            sales_service: SalesAnalysisService::new(store.clone()),
            customer_service: CustomerAnalysisService::new(store.clone()),
            inventory_service: InventoryService::new(store.clone()),
            staff_service: StaffService::new(store),
        }
    }
}
