use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use hygiene_application::{QueryError, QueryService};
use serde::{Deserialize, Serialize};
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::error;

pub const API_PATH_AUTHORITIES: &str = "/authorities";
pub const API_PATH_ESTABLISHMENTS: &str = "/establishments";

const HEADER_DURATION: &str = "X-Proxy-Duration";
const HEADER_LOCAL_ID: &str = "X-Local-ID";

type SharedQueryService = Arc<dyn QueryService>;

/// Full application router: query API under `/query`, optional static UI under `/ui`.
pub fn app_router(service: SharedQueryService, ui_dir: Option<PathBuf>) -> Router {
    let mut router = Router::new()
        .route("/health", get(|| async { "ok" }))
        .nest("/query", query_router(service));

    if let Some(dir) = ui_dir {
        router = router.nest_service("/ui", ServeDir::new(dir));
    }

    router.layer(TraceLayer::new_for_http())
}

pub fn query_router(service: SharedQueryService) -> Router {
    Router::new()
        .route(API_PATH_AUTHORITIES, get(authorities_handler))
        .route(API_PATH_ESTABLISHMENTS, get(establishments_handler))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
struct EstablishmentsParams {
    local_id: Option<String>,
}

async fn authorities_handler(
    State(service): State<SharedQueryService>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    require_json(&headers)?;

    let result = service.authorities().await?;

    Ok((
        [(HEADER_DURATION, format!("{:?}", result.duration))],
        Json(result.output()),
    )
        .into_response())
}

async fn establishments_handler(
    State(service): State<SharedQueryService>,
    headers: HeaderMap,
    Query(params): Query<EstablishmentsParams>,
) -> Result<Response, ApiError> {
    require_json(&headers)?;

    let local_id = params.local_id.unwrap_or_default();
    let result = service.establishments(&local_id).await?;

    Ok((
        [
            (HEADER_DURATION, format!("{:?}", result.duration)),
            (HEADER_LOCAL_ID, result.local_id.clone()),
        ],
        Json(result.output()),
    )
        .into_response())
}

fn require_json(headers: &HeaderMap) -> Result<(), ApiError> {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    if content_type.contains("application/json") {
        Ok(())
    } else {
        Err(ApiError::InvalidContentType)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("invalid content type")]
    InvalidContentType,

    #[error(transparent)]
    Query(#[from] QueryError),
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: u16,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::InvalidContentType => StatusCode::BAD_REQUEST,
            ApiError::Query(e) if e.is_validation() => StatusCode::BAD_REQUEST,
            ApiError::Query(e) => {
                error!("Query failed: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = ErrorBody {
            error: self.to_string(),
            code: status.as_u16(),
        };

        (status, [("X-Content-Type-Options", "nosniff")], Json(body)).into_response()
    }
}
