pub mod config;
pub mod gateways;

pub use config::{ConfigError, SourceConfig};
pub use gateways::HttpRatingSource;
