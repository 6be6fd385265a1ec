//! REST DTOs with serde derives for HTTP API

use serde::{Deserialize, Serialize};

// ===== Purge DTOs =====

/// URL purge request
#[derive(Debug, Clone, Deserialize)]
pub struct PurgeUrlRequest {
    /// URL to purge
    pub url: String,

    /// Purge the URL together with `related_urls`
    #[serde(default)]
    pub related: bool,

    /// URLs purged alongside `url` when `related` is set
    #[serde(default)]
    pub related_urls: Vec<String>,

    /// Soft purge (mark stale instead of evicting)
    #[serde(default)]
    pub soft: bool,
}

/// Surrogate-key purge request
#[derive(Debug, Clone, Deserialize)]
pub struct PurgeSurrogateKeyRequest {
    /// Surrogate key to purge
    pub key: String,

    /// Soft purge (mark stale instead of evicting)
    #[serde(default)]
    pub soft: bool,
}

/// Full-service purge request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PurgeAllRequest {
    /// Explicit permission; omitted means the configured default
    #[serde(default)]
    pub allow_all: Option<bool>,

    /// Soft purge (mark stale instead of evicting)
    #[serde(default)]
    pub soft: bool,
}

/// One executed purge
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurgeResponseDto {
    /// Purge kind (`url`, `surrogate-key`, `all`)
    pub kind: String,

    /// Purged target
    pub target: String,

    /// HTTP status returned by Fastly
    pub status: u16,

    /// Fastly status field
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_text: Option<String>,

    /// Fastly purge identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Completion timestamp
    pub purged_at: chrono::DateTime<chrono::Utc>,
}

/// Result of a purge dispatch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurgeResultResponse {
    /// Whether the batched (related) path was taken
    pub batch: bool,

    /// Executed purges, in order
    pub items: Vec<PurgeResponseDto>,

    /// Total count
    pub total: usize,
}

// ===== Header DTOs =====

/// Query parameters for the header preview
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HeadersPreviewQuery {
    /// Comma-separated surrogate keys
    #[serde(default)]
    pub keys: Option<String>,

    /// Surrogate-control TTL as text
    #[serde(default)]
    pub ttl: Option<String>,

    /// stale-while-revalidate seconds
    #[serde(default)]
    pub stale_while_revalidate: Option<u64>,

    /// stale-while-error seconds
    #[serde(default)]
    pub stale_while_error: Option<u64>,
}

/// Headers the response will carry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeadersPreviewResponse {
    /// `Surrogate-Key` value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surrogate_key: Option<String>,

    /// `Surrogate-Control` value
    pub surrogate_control: String,

    /// `Cache-Control` value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_control: Option<String>,
}

// Note: Conversion implementations live in mapper.rs
