//! Common test utilities: a recording purge backend

use async_trait::async_trait;
use parking_lot::RwLock;
use purgely::contract::{PurgeError, PurgeRequest, PurgeResponse};
use purgely::domain::PurgeBackend;
use std::sync::Arc;

/// Backend that records every request and answers `200 ok`
#[derive(Clone, Default)]
pub struct RecordingBackend {
    requests: Arc<RwLock<Vec<PurgeRequest>>>,
    fail_on: Arc<RwLock<Option<String>>>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail with an API error when this target is purged
    pub fn failing_on(target: &str) -> Self {
        let backend = Self::default();
        *backend.fail_on.write() = Some(target.to_string());
        backend
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<PurgeRequest> {
        self.requests.read().clone()
    }
}

#[async_trait]
impl PurgeBackend for RecordingBackend {
    async fn purge(&self, request: &PurgeRequest) -> Result<PurgeResponse, PurgeError> {
        self.requests.write().push(request.clone());

        if self.fail_on.read().as_deref() == Some(request.target.as_str()) {
            return Err(PurgeError::Api {
                status: 500,
                message: "upstream failure".to_string(),
            });
        }

        Ok(PurgeResponse {
            kind: request.kind,
            target: request.target.clone(),
            status: 200,
            status_text: Some("ok".to_string()),
            id: Some(format!("purge-{}", self.requests.read().len())),
            purged_at: chrono::Utc::now(),
        })
    }
}
