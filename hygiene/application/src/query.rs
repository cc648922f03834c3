use async_trait::async_trait;
use hygiene_domain::aggregate_ratings;
use shaku::{Component, Interface};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

use crate::ports::{RatingSource, SourceError};
use crate::results::{AuthoritiesResult, EstablishmentsResult};

#[async_trait]
pub trait QueryService: Interface {
    async fn authorities(&self) -> Result<AuthoritiesResult, QueryError>;

    /// Rating breakdown for the establishments of one local authority.
    async fn establishments(&self, local_id: &str) -> Result<EstablishmentsResult, QueryError>;
}

#[derive(Component)]
#[shaku(interface = QueryService)]
pub struct QueryServiceImpl {
    #[shaku(inject)]
    source: Arc<dyn RatingSource>,
}

impl QueryServiceImpl {
    pub fn new(source: Arc<dyn RatingSource>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl QueryService for QueryServiceImpl {
    async fn authorities(&self) -> Result<AuthoritiesResult, QueryError> {
        let begin = Instant::now();

        let records = self.source.fetch_authorities().await.map_err(|e| {
            warn!(kind = e.kind(), "Failed to fetch authorities: {}", e);
            QueryError::Authorities(e)
        })?;

        let duration = begin.elapsed();
        info!(count = records.len(), ?duration, "Served authorities");

        Ok(AuthoritiesResult { duration, records })
    }

    async fn establishments(&self, local_id: &str) -> Result<EstablishmentsResult, QueryError> {
        let begin = Instant::now();

        if local_id.trim().is_empty() {
            return Err(QueryError::MissingLocalId);
        }

        let establishments = self
            .source
            .fetch_establishments(local_id)
            .await
            .map_err(|e| {
                warn!(local_id, kind = e.kind(), "Failed to fetch establishments: {}", e);
                QueryError::Establishments {
                    local_id: local_id.to_string(),
                    source: e,
                }
            })?;

        let records = aggregate_ratings(&establishments);

        let duration = begin.elapsed();
        info!(
            local_id,
            establishments = establishments.len(),
            buckets = records.len(),
            ?duration,
            "Served rating breakdown"
        );

        Ok(EstablishmentsResult {
            local_id: local_id.to_string(),
            duration,
            records,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("error reading/parsing 'local_id' (required) query")]
    MissingLocalId,

    #[error("error requesting authorities: {0}")]
    Authorities(#[source] SourceError),

    #[error("error requesting establishments for authority {local_id:?}: {source}")]
    Establishments {
        local_id: String,
        #[source]
        source: SourceError,
    },
}

impl QueryError {
    /// True when the caller supplied bad input, as opposed to an upstream failure.
    pub fn is_validation(&self) -> bool {
        match self {
            QueryError::MissingLocalId => true,
            QueryError::Authorities(source) | QueryError::Establishments { source, .. } => {
                matches!(source, SourceError::MissingLocalId)
            }
        }
    }
}
