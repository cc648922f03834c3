use clap::Args;
use hygiene_infrastructure::config::{DEFAULT_API_VERSION, DEFAULT_BASE_URL};
use hygiene_infrastructure::SourceConfig;
use std::time::Duration;

/// Connection flags shared by every binary that talks to the ratings API.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Base URL of the ratings API
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Value sent in the X-API-Version header
    #[arg(long, default_value_t = DEFAULT_API_VERSION)]
    pub api_version: u32,

    /// Seconds to wait for a response after sending a request
    #[arg(long, default_value_t = 10)]
    pub header_timeout: u64,

    /// Seconds allowed to establish a connection
    #[arg(long, default_value_t = 25)]
    pub connect_timeout: u64,

    /// TCP keep-alive interval in seconds
    #[arg(long, default_value_t = 30)]
    pub keep_alive: u64,
}

impl SourceArgs {
    pub fn to_config(&self) -> SourceConfig {
        SourceConfig {
            base_url: self.base_url.clone(),
            api_version: self.api_version,
            header_timeout: Duration::from_secs(self.header_timeout),
            connect_timeout: Duration::from_secs(self.connect_timeout),
            keep_alive: Duration::from_secs(self.keep_alive),
            ..SourceConfig::default()
        }
    }
}
