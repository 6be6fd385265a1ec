//! HTTP request handlers - thin layer that delegates to domain service

use super::{
    dto::*,
    error::{map_domain_error, Problem},
    headers::RequestScope,
};
use crate::contract::PurgeOptions;
use crate::domain::Service;
use axum::{extract::Query, Json};
use std::sync::Arc;

// ===== Purge Handlers =====

/// Purge a URL, or a batch of related URLs
pub async fn purge_url(
    service: Arc<Service>,
    Json(req): Json<PurgeUrlRequest>,
) -> Result<Json<PurgeResultResponse>, Problem> {
    let url = req.url.clone();
    let outcome = service
        .purge_url(&url, req.into())
        .await
        .map_err(map_domain_error)?;

    Ok(Json(outcome.into()))
}

/// Purge a surrogate key
pub async fn purge_surrogate_key(
    service: Arc<Service>,
    Json(req): Json<PurgeSurrogateKeyRequest>,
) -> Result<Json<PurgeResultResponse>, Problem> {
    let options = PurgeOptions::from(&req);
    let response = service
        .purge_surrogate_key(&req.key, options)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(response.into()))
}

/// Purge the whole service cache
pub async fn purge_all(
    service: Arc<Service>,
    req: Option<Json<PurgeAllRequest>>,
) -> Result<Json<PurgeResultResponse>, Problem> {
    let req = req.map(|Json(req)| req).unwrap_or_default();
    let response = service
        .purge_all(req.into())
        .await
        .map_err(map_domain_error)?;

    Ok(Json(response.into()))
}

// ===== Header Handlers =====

/// Apply header operations to this request's context and echo the result
pub fn preview_headers(
    service: Arc<Service>,
    scope: RequestScope,
    Query(query): Query<HeadersPreviewQuery>,
) -> Json<HeadersPreviewResponse> {
    let mut context = scope.lock();

    if let Some(keys) = &query.keys {
        for key in keys.split(',') {
            service.add_surrogate_key(&mut context, key);
        }
    }
    if let Some(ttl) = &query.ttl {
        service.set_ttl_from_text(&mut context, ttl);
    }
    if let Some(seconds) = query.stale_while_revalidate {
        service.set_stale_while_revalidate(&mut context, seconds);
    }
    if let Some(seconds) = query.stale_while_error {
        service.set_stale_while_error(&mut context, seconds);
    }

    Json(HeadersPreviewResponse::from(&*context))
}
