use crate::ports::{RatingSource, SourceError};
use async_trait::async_trait;
use hygiene_domain::{Authority, Establishment};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// Memoizing wrapper around another [`RatingSource`].
///
/// Results are held for the lifetime of the process: there is no eviction and
/// no expiry, so the establishment store grows with every distinct local id
/// requested. Only successful fetches are stored, and an empty collection is
/// treated as "not cached", which means an authority with no establishments is
/// fetched from the inner source on every call.
///
/// Each store is guarded by a single lock held across lookup, delegation and
/// population. Concurrent misses are therefore serialized and the inner source
/// sees one successful call per key.
pub struct CachingSource {
    inner: Arc<dyn RatingSource>,
    authorities: Mutex<Vec<Authority>>,
    establishments: Mutex<HashMap<String, Vec<Establishment>>>,
}

impl CachingSource {
    pub fn new(inner: Arc<dyn RatingSource>) -> Self {
        Self {
            inner,
            authorities: Mutex::new(Vec::new()),
            establishments: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl RatingSource for CachingSource {
    async fn fetch_authorities(&self) -> Result<Vec<Authority>, SourceError> {
        let mut cached = self.authorities.lock().await;
        if !cached.is_empty() {
            debug!(count = cached.len(), "authorities cache hit");
            return Ok(cached.clone());
        }

        debug!("authorities cache miss");
        let authorities = self.inner.fetch_authorities().await?;
        cached.clone_from(&authorities);
        Ok(authorities)
    }

    async fn fetch_establishments(
        &self,
        local_id: &str,
    ) -> Result<Vec<Establishment>, SourceError> {
        let mut cached = self.establishments.lock().await;
        if let Some(establishments) = cached.get(local_id).filter(|e| !e.is_empty()) {
            debug!(local_id, count = establishments.len(), "establishments cache hit");
            return Ok(establishments.clone());
        }

        debug!(local_id, "establishments cache miss");
        let establishments = self.inner.fetch_establishments(local_id).await?;
        cached.insert(local_id.to_string(), establishments.clone());
        Ok(establishments)
    }
}
