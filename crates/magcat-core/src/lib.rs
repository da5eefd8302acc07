pub mod config;
pub mod price;
pub mod products;

pub use config::{load_collector_config, CollectorConfig, ConfigError};
pub use price::from_minor_units;
pub use products::EnrichedProduct;
