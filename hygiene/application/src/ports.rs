use async_trait::async_trait;
use hygiene_domain::{Authority, Establishment};
use shaku::Interface;

/// Read access to the rating authority's published data.
#[async_trait]
pub trait RatingSource: Interface {
    async fn fetch_authorities(&self) -> Result<Vec<Authority>, SourceError>;

    /// Returns every establishment registered under the authority with the
    /// given local id.
    async fn fetch_establishments(&self, local_id: &str)
        -> Result<Vec<Establishment>, SourceError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SourceError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Invalid request (status code: {0})")]
    Status(u16),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Local authority id is required")]
    MissingLocalId,
}

impl SourceError {
    pub fn kind(&self) -> &'static str {
        match self {
            SourceError::Transport(_) => "transport",
            SourceError::Status(_) => "status",
            SourceError::Decode(_) => "decode",
            SourceError::MissingLocalId => "validation",
        }
    }
}
