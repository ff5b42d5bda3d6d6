pub mod join;
pub mod labels;
pub mod fallback;
pub mod dashboard_service;
pub use dashboard_service::DashboardService;
pub mod sales_service;
pub use sales_service::SalesAnalysisService;
pub mod customer_service;
pub use customer_service::CustomerAnalysisService;
pub mod inventory_service;
pub use inventory_service::InventoryService;
pub mod staff_service;
pub use staff_service::StaffService;
