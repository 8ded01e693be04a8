pub mod constants;
pub mod dashboard_model;
pub mod dashboard_service;

pub use dashboard_model::{StockDetails, TrendingCategory};
pub use dashboard_service::DashboardService;
