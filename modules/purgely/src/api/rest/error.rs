//! HTTP error mapping to RFC-9457 Problem Details

use crate::contract::PurgeError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// RFC-9457 Problem Details for HTTP API errors
#[derive(Debug, Serialize)]
pub struct Problem {
    /// A URI reference that identifies the problem type
    #[serde(rename = "type")]
    pub type_uri: String,

    /// A short, human-readable summary of the problem type
    pub title: String,

    /// The HTTP status code
    pub status: u16,

    /// A human-readable explanation specific to this occurrence
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl Problem {
    /// Create a new Problem Details response
    pub fn new(status: StatusCode, title: impl Into<String>) -> Self {
        Self {
            type_uri: format!("https://httpstatuses.io/{}", status.as_u16()),
            title: title.into(),
            status: status.as_u16(),
            detail: None,
        }
    }

    /// Add detail message
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

impl IntoResponse for Problem {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (
            status,
            [(axum::http::header::CONTENT_TYPE, "application/problem+json")],
            Json(self),
        )
            .into_response()
    }
}

/// Map domain errors to HTTP Problem Details
pub fn map_domain_error(error: PurgeError) -> Problem {
    match error {
        PurgeError::Validation { message } => {
            Problem::new(StatusCode::BAD_REQUEST, "Validation Error").with_detail(message)
        }

        PurgeError::NotConfigured { setting } => {
            Problem::new(StatusCode::SERVICE_UNAVAILABLE, "Purgely Not Configured")
                .with_detail(format!("Setting '{}' must be configured", setting))
        }

        PurgeError::PurgeAllNotAllowed => Problem::new(StatusCode::FORBIDDEN, "Purge All Not Allowed")
            .with_detail("Full-service purges are disabled; set allow_purge_all to enable them"),

        PurgeError::Api { status, message } => Problem::new(StatusCode::BAD_GATEWAY, "Fastly API Error")
            .with_detail(format!("Fastly answered {}: {}", status, message)),

        PurgeError::Transport { message } => {
            Problem::new(StatusCode::BAD_GATEWAY, "Fastly Unreachable").with_detail(message)
        }

        PurgeError::Internal => Problem::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            .with_detail("An unexpected error occurred"),
    }
}
