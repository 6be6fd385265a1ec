//! Per-request surrogate header middleware
//!
//! Every request gets its own `RequestContext`, shared with handlers through
//! a request extension and written onto the response once the handler returns.

use crate::config::Config;
use crate::domain::RequestContext;
use axum::{extract::Request, extract::State, middleware::Next, response::Response};
use parking_lot::{Mutex, MutexGuard};
use std::sync::Arc;

/// Handle to the current request's header context
#[derive(Clone)]
pub struct RequestScope(Arc<Mutex<RequestContext>>);

impl RequestScope {
    /// Wrap a context for sharing with handlers
    pub fn new(context: RequestContext) -> Self {
        Self(Arc::new(Mutex::new(context)))
    }

    /// Lock the context for reading or mutation
    pub fn lock(&self) -> MutexGuard<'_, RequestContext> {
        self.0.lock()
    }
}

/// Create the request scope and apply its headers to the response
pub async fn surrogate_headers(
    State(config): State<Arc<Config>>,
    mut request: Request,
    next: Next,
) -> Response {
    let scope = RequestScope::new(RequestContext::new(&config));
    request.extensions_mut().insert(scope.clone());

    let mut response = next.run(request).await;
    scope.lock().apply_headers(response.headers_mut());
    response
}
