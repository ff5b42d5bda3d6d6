// src/docs.rs

use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Dashboard ---
        handlers::dashboard::get_kpis,
        handlers::dashboard::get_sales_trend,
        handlers::dashboard::get_top_items,

        // --- Sales ---
        handlers::sales::get_trend,
        handlers::sales::get_best_sellers,
        handlers::sales::get_by_category,
        handlers::sales::get_peak_times,

        // --- Customers ---
        handlers::customers::get_order_frequency,
        handlers::customers::get_preferences,
        handlers::customers::get_delivery_pickup,

        // --- Inventory ---
        handlers::inventory::get_levels,
        handlers::inventory::get_usage_trend,

        // --- Staff ---
        handlers::staff::get_hours,
        handlers::staff::get_coverage,
        handlers::staff::get_schedule,
    ),
    components(
        schemas(
            // --- Dashboard ---
            models::charts::KpiSummary,
            models::charts::TrendPoint,
            models::charts::TopItemEntry,

            // --- Sales ---
            models::charts::Granularity,
            models::charts::PeakGranularity,
            models::charts::SalesTrendEntry,
            models::charts::BestSellerEntry,
            models::charts::CategoryShareEntry,
            models::charts::PeakTimeEntry,

            // --- Customers ---
            models::charts::FrequencyBucketEntry,
            models::charts::PreferenceEntry,
            models::charts::MonthlySplitEntry,

            // --- Inventory ---
            models::charts::InventoryLevelEntry,
            models::charts::UsagePoint,
            models::charts::UsageTrendSeries,

            // --- Staff ---
            models::charts::StaffHoursEntry,
            models::charts::ShiftCoverageEntry,
            models::charts::ScheduleRow,

            models::orders::FulfillmentMode,
        )
    ),
    tags(
        (name = "Dashboard", description = "Indicadores e Gráficos Gerenciais"),
        (name = "Sales", description = "Análise de Vendas"),
        (name = "Customers", description = "Análise de Clientes"),
        (name = "Inventory", description = "Níveis de Estoque e Uso de Insumos"),
        (name = "Staff", description = "Escala, Horas e Custo de Equipe")
    )
)]
pub struct ApiDoc;
