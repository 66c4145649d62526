pub mod app_config;
pub mod config;
pub mod filter;
pub mod pagination;
pub mod products;
pub mod stock;
pub mod view;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use filter::{CatalogFilter, ParseFilterError, StateFilter, StockControlFilter};
pub use pagination::{Paginator, PAGE_SIZE};
pub use products::{Product, ProductId, StockRecord, Variant, VariantId};
pub use stock::{DerivedStockTotal, StockLevel, StockReport, StockTone};
pub use view::{CatalogPhase, CatalogState, DetailState, StockStatus};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
