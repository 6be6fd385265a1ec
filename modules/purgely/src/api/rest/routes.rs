//! Route registration

use super::{dto::*, error::Problem, handlers, headers};
use crate::domain::Service;
use axum::{
    extract::Query,
    middleware,
    routing::{get, post},
    Extension, Json, Router,
};
use std::sync::Arc;

/// Prefix shared by all purgely routes
pub const BASE_PATH: &str = "/purgely/v1";

/// Register all REST routes
pub fn register_routes(router: Router, service: Arc<Service>) -> anyhow::Result<Router> {
    let config = Arc::new(service.config().clone());

    // Header routes run inside a per-request header scope
    let header_routes = Router::new()
        .route("/headers/preview", get(preview_headers_handler))
        .layer(middleware::from_fn_with_state(
            config,
            headers::surrogate_headers,
        ));

    let api = Router::new()
        .route("/purge/url", post(purge_url_handler))
        .route("/purge/surrogate-key", post(purge_surrogate_key_handler))
        .route("/purge/all", post(purge_all_handler))
        .merge(header_routes)
        // Add service as extension for handlers
        .layer(Extension(service));

    Ok(router.nest(BASE_PATH, api))
}

// ===== Handler wrappers that extract service from Extension =====

async fn purge_url_handler(
    Extension(service): Extension<Arc<Service>>,
    json: Json<PurgeUrlRequest>,
) -> Result<Json<PurgeResultResponse>, Problem> {
    handlers::purge_url(service, json).await
}

async fn purge_surrogate_key_handler(
    Extension(service): Extension<Arc<Service>>,
    json: Json<PurgeSurrogateKeyRequest>,
) -> Result<Json<PurgeResultResponse>, Problem> {
    handlers::purge_surrogate_key(service, json).await
}

async fn purge_all_handler(
    Extension(service): Extension<Arc<Service>>,
    json: Option<Json<PurgeAllRequest>>,
) -> Result<Json<PurgeResultResponse>, Problem> {
    handlers::purge_all(service, json).await
}

async fn preview_headers_handler(
    Extension(service): Extension<Arc<Service>>,
    Extension(scope): Extension<headers::RequestScope>,
    query: Query<HeadersPreviewQuery>,
) -> Json<HeadersPreviewResponse> {
    handlers::preview_headers(service, scope, query)
}
