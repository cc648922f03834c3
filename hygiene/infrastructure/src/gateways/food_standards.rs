use async_trait::async_trait;
use hygiene_application::{RatingSource, SourceError};
use hygiene_domain::{Authority, Establishment};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use shaku::Component;
use tracing::{debug, warn};

use crate::config::{ConfigError, SourceConfig};

const API_VERSION_HEADER: &str = "X-API-Version";
const JSON_CONTENT_TYPE: &str = "application/json";

/// [`RatingSource`] backed by the food standards ratings API.
#[derive(Component)]
#[shaku(interface = RatingSource)]
pub struct HttpRatingSource {
    client: Client,
    base_url: String,
    api_version: u32,
}

impl HttpRatingSource {
    pub fn new(config: &SourceConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut builder = Client::builder()
            .read_timeout(config.header_timeout)
            .connect_timeout(config.connect_timeout)
            .tcp_keepalive(config.keep_alive)
            .pool_max_idle_per_host(1);
        if !config.proxy_from_env {
            builder = builder.no_proxy();
        }

        let client = builder
            .build()
            .map_err(|e| ConfigError::Client(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_version: config.api_version,
        })
    }

    pub fn into_parameters(self) -> HttpRatingSourceParameters {
        HttpRatingSourceParameters {
            client: self.client,
            base_url: self.base_url,
            api_version: self.api_version,
        }
    }

    fn request(&self, path: &str) -> RequestBuilder {
        // The version header is mandatory: without it the API answers with no data.
        self.client
            .get(format!("{}{}", self.base_url, path))
            .header(API_VERSION_HEADER, self.api_version.to_string())
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, SourceError> {
        let response = request
            .send()
            .await
            .map_err(|e| SourceError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status(status.as_u16()));
        }

        response.json::<T>().await.map_err(|e| {
            if e.is_decode() {
                SourceError::Decode(e.to_string())
            } else {
                SourceError::Transport(e.to_string())
            }
        })
    }
}

#[async_trait]
impl RatingSource for HttpRatingSource {
    async fn fetch_authorities(&self) -> Result<Vec<Authority>, SourceError> {
        let envelope: AuthoritiesEnvelope = self
            .fetch(self.request("/Authorities"))
            .await
            .inspect_err(|e| warn!(kind = e.kind(), "Authorities request failed: {}", e))?;

        debug!(count = envelope.authorities.len(), "Fetched authorities");
        Ok(envelope
            .authorities
            .into_iter()
            .map(AuthorityRecord::into_domain)
            .collect())
    }

    async fn fetch_establishments(
        &self,
        local_id: &str,
    ) -> Result<Vec<Establishment>, SourceError> {
        if local_id.is_empty() {
            return Err(SourceError::MissingLocalId);
        }

        // pageSize=0 disables pagination so the whole authority comes back at once.
        let request = self
            .request("/Establishments")
            .query(&[("localAuthorityId", local_id), ("pageSize", "0")]);

        let envelope: EstablishmentsEnvelope = self.fetch(request).await.inspect_err(|e| {
            warn!(local_id, kind = e.kind(), "Establishments request failed: {}", e)
        })?;

        debug!(
            local_id,
            count = envelope.establishments.len(),
            "Fetched establishments"
        );
        Ok(envelope
            .establishments
            .into_iter()
            .map(EstablishmentRecord::into_domain)
            .collect())
    }
}

#[derive(Debug, Deserialize)]
struct AuthoritiesEnvelope {
    authorities: Vec<AuthorityRecord>,
}

#[derive(Debug, Deserialize)]
struct AuthorityRecord {
    #[serde(rename = "Name", default)]
    name: Option<String>,
    #[serde(rename = "LocalAuthorityId", default)]
    local_id: i64,
    #[serde(rename = "EstablishmentCount", default)]
    establishment_count: i64,
}

impl AuthorityRecord {
    fn into_domain(self) -> Authority {
        Authority::new(
            self.name.unwrap_or_default(),
            self.local_id,
            self.establishment_count,
        )
    }
}

#[derive(Debug, Deserialize)]
struct EstablishmentsEnvelope {
    establishments: Vec<EstablishmentRecord>,
}

#[derive(Debug, Deserialize)]
struct EstablishmentRecord {
    #[serde(rename = "BusinessName", default)]
    name: Option<String>,
    #[serde(rename = "RatingValue", default)]
    rating: Option<String>,
}

impl EstablishmentRecord {
    fn into_domain(self) -> Establishment {
        Establishment::new(
            self.name.unwrap_or_default(),
            self.rating.unwrap_or_default(),
        )
    }
}
