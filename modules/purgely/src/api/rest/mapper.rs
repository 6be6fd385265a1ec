//! Mapper implementations for converting between DTOs and contract models

use super::dto::*;
use crate::contract;
use crate::domain::RequestContext;

// ===== Request conversions =====

impl From<PurgeUrlRequest> for contract::PurgeOptions {
    fn from(req: PurgeUrlRequest) -> Self {
        Self {
            related: req.related,
            related_urls: req.related_urls,
            allow_all: None,
            soft: req.soft,
        }
    }
}

impl From<&PurgeSurrogateKeyRequest> for contract::PurgeOptions {
    fn from(req: &PurgeSurrogateKeyRequest) -> Self {
        Self::default().with_soft(req.soft)
    }
}

impl From<PurgeAllRequest> for contract::PurgeOptions {
    fn from(req: PurgeAllRequest) -> Self {
        Self {
            allow_all: req.allow_all,
            soft: req.soft,
            ..Self::default()
        }
    }
}

// ===== Response conversions =====

impl From<contract::PurgeResponse> for PurgeResponseDto {
    fn from(response: contract::PurgeResponse) -> Self {
        Self {
            kind: response.kind.as_str().to_string(),
            target: response.target,
            status: response.status,
            status_text: response.status_text,
            id: response.id,
            purged_at: response.purged_at,
        }
    }
}

impl From<contract::PurgeOutcome> for PurgeResultResponse {
    fn from(outcome: contract::PurgeOutcome) -> Self {
        let (batch, responses) = match outcome {
            contract::PurgeOutcome::Single(response) => (false, vec![response]),
            contract::PurgeOutcome::Batch(responses) => (true, responses),
        };
        let items: Vec<PurgeResponseDto> = responses.into_iter().map(Into::into).collect();
        let total = items.len();

        Self {
            batch,
            items,
            total,
        }
    }
}

impl From<contract::PurgeResponse> for PurgeResultResponse {
    fn from(response: contract::PurgeResponse) -> Self {
        contract::PurgeOutcome::Single(response).into()
    }
}

impl From<&RequestContext> for HeadersPreviewResponse {
    fn from(context: &RequestContext) -> Self {
        Self {
            surrogate_key: context.surrogate_key_header(),
            surrogate_control: context.surrogate_control_header(),
            cache_control: context.cache_control_header(),
        }
    }
}
