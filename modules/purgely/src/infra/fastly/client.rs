//! HTTP client for the Fastly purge API
//!
//! URL purges send the `PURGE` method to the URL itself, carrying the API key
//! only for hosts listed in `purge_hosts`. Surrogate-key and full-service
//! purges go to `{endpoint}service/{service_id}/...` and require an API key.

use crate::config::Config;
use crate::contract::{PurgeError, PurgeKind, PurgeRequest, PurgeResponse};
use crate::domain::PurgeBackend;
use async_trait::async_trait;
use reqwest::{header::ACCEPT, Client, Method, RequestBuilder};
use serde::Deserialize;
use url::Url;

const FASTLY_KEY: &str = "Fastly-Key";
const FASTLY_SOFT_PURGE: &str = "Fastly-Soft-Purge";

/// Success body returned by Fastly purge endpoints
#[derive(Debug, Default, Deserialize)]
struct PurgeBody {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    id: Option<String>,
}

/// Fastly API backend
#[derive(Debug, Clone)]
pub struct FastlyClient {
    client: Client,
    endpoint: Url,
    api_key: String,
    service_id: String,
    purge_hosts: Vec<String>,
}

impl FastlyClient {
    /// Create a client from configuration
    pub fn new(config: &Config) -> Result<Self, PurgeError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!("purgely/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| PurgeError::Transport {
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        Self::with_client(client, config)
    }

    /// Create a client around an existing `reqwest::Client`
    pub fn with_client(client: Client, config: &Config) -> Result<Self, PurgeError> {
        let mut endpoint = config.api_endpoint.trim().to_string();
        if !endpoint.ends_with('/') {
            endpoint.push('/');
        }
        let endpoint = Url::parse(&endpoint).map_err(|e| {
            PurgeError::validation(format!("invalid API endpoint '{}': {}", endpoint, e))
        })?;

        Ok(Self {
            client,
            endpoint,
            api_key: config.fastly_key.clone(),
            service_id: config.fastly_service_id.clone(),
            purge_hosts: config
                .purge_hosts
                .iter()
                .map(|host| host.trim().to_ascii_lowercase())
                .filter(|host| !host.is_empty())
                .collect(),
        })
    }

    /// Whether the API key may be sent along with a URL purge to this URL
    fn trusts_host(&self, url: &Url) -> bool {
        url.host_str()
            .map(|host| host.to_ascii_lowercase())
            .is_some_and(|host| self.purge_hosts.iter().any(|allowed| *allowed == host))
    }

    fn url_purge(&self, request: &PurgeRequest) -> Result<RequestBuilder, PurgeError> {
        let target = Url::parse(&request.target).map_err(|e| {
            PurgeError::validation(format!("invalid URL '{}': {}", request.target, e))
        })?;
        if !matches!(target.scheme(), "http" | "https") {
            return Err(PurgeError::validation(format!(
                "unsupported URL scheme '{}'",
                target.scheme()
            )));
        }

        let method = Method::from_bytes(b"PURGE").map_err(|_| PurgeError::Internal)?;
        let send_key = !self.api_key.is_empty() && self.trusts_host(&target);
        if !send_key && !self.api_key.is_empty() {
            tracing::debug!(url = %target, "host not in purge_hosts; purging without API key");
        }
        let mut builder = self.client.request(method, target);
        if send_key {
            builder = builder.header(FASTLY_KEY, &self.api_key);
        }
        Ok(builder)
    }

    fn service_purge(&self, path: &str) -> Result<RequestBuilder, PurgeError> {
        if self.api_key.is_empty() {
            return Err(PurgeError::NotConfigured {
                setting: "fastly_key",
            });
        }
        if self.service_id.is_empty() {
            return Err(PurgeError::NotConfigured {
                setting: "fastly_service_id",
            });
        }

        let url = self
            .endpoint
            .join(&format!("service/{}/{}", self.service_id, path))
            .map_err(|e| PurgeError::validation(format!("invalid purge path: {}", e)))?;

        Ok(self
            .client
            .post(url)
            .header(FASTLY_KEY, &self.api_key))
    }

    fn build(&self, request: &PurgeRequest) -> Result<RequestBuilder, PurgeError> {
        let builder = match request.kind {
            PurgeKind::Url => self.url_purge(request)?,
            PurgeKind::SurrogateKey => {
                if request.target.is_empty() {
                    return Err(PurgeError::validation("surrogate key is empty"));
                }
                self.service_purge(&format!("purge/{}", request.target))?
            }
            PurgeKind::All => {
                if request.options.allow_all != Some(true) {
                    return Err(PurgeError::PurgeAllNotAllowed);
                }
                self.service_purge("purge_all")?
            }
        };

        let builder = builder.header(ACCEPT, "application/json");
        Ok(if request.options.soft {
            builder.header(FASTLY_SOFT_PURGE, "1")
        } else {
            builder
        })
    }
}

impl From<reqwest::Error> for PurgeError {
    fn from(error: reqwest::Error) -> Self {
        Self::Transport {
            message: error.to_string(),
        }
    }
}

#[async_trait]
impl PurgeBackend for FastlyClient {
    async fn purge(&self, request: &PurgeRequest) -> Result<PurgeResponse, PurgeError> {
        let builder = self.build(request)?;

        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = if text.trim().is_empty() {
                status.canonical_reason().unwrap_or("unknown status").to_string()
            } else {
                text.trim().to_string()
            };
            return Err(PurgeError::Api {
                status: status.as_u16(),
                message,
            });
        }

        // URL purges may answer with an empty or non-JSON body
        let body: PurgeBody = serde_json::from_str(&text).unwrap_or_else(|e| {
            tracing::debug!(error = %e, "purge response body is not JSON");
            PurgeBody::default()
        });

        Ok(PurgeResponse {
            kind: request.kind,
            target: request.target.clone(),
            status: status.as_u16(),
            status_text: body.status,
            id: body.id,
            purged_at: chrono::Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::PurgeOptions;

    fn configured() -> Config {
        Config {
            api_endpoint: "https://api.fastly.com".to_string(),
            fastly_key: "key".to_string(),
            fastly_service_id: "svc".to_string(),
            ..Config::default()
        }
    }

    #[test]
    fn test_endpoint_gets_trailing_slash() {
        let client = FastlyClient::new(&configured()).unwrap();
        assert_eq!(client.endpoint.as_str(), "https://api.fastly.com/");
    }

    #[test]
    fn test_invalid_endpoint_rejected() {
        let config = Config {
            api_endpoint: "not a url".to_string(),
            ..configured()
        };
        assert!(matches!(
            FastlyClient::new(&config),
            Err(PurgeError::Validation { .. })
        ));
    }

    #[test]
    fn test_purge_all_requires_permission() {
        let client = FastlyClient::new(&configured()).unwrap();
        let request = PurgeRequest::new(PurgeKind::All, "", PurgeOptions::default());
        assert!(matches!(client.build(&request), Err(PurgeError::PurgeAllNotAllowed)));
    }

    #[test]
    fn test_surrogate_key_requires_credentials() {
        let config = Config {
            fastly_key: String::new(),
            ..configured()
        };
        let client = FastlyClient::new(&config).unwrap();
        let request = PurgeRequest::new(PurgeKind::SurrogateKey, "post-1", PurgeOptions::default());
        assert_eq!(
            client.build(&request).err(),
            Some(PurgeError::NotConfigured {
                setting: "fastly_key"
            })
        );
    }

    #[test]
    fn test_trusts_only_configured_hosts() {
        let config = Config {
            purge_hosts: vec![" WWW.Example.com ".to_string(), String::new()],
            ..configured()
        };
        let client = FastlyClient::new(&config).unwrap();
        assert!(client.trusts_host(&Url::parse("https://www.example.com/post/").unwrap()));
        assert!(!client.trusts_host(&Url::parse("https://attacker.example/").unwrap()));
        assert!(!client.trusts_host(&Url::parse("https://example.com/").unwrap()));
    }

    #[test]
    fn test_url_purge_rejects_bad_scheme() {
        let client = FastlyClient::new(&configured()).unwrap();
        let request = PurgeRequest::new(PurgeKind::Url, "ftp://example.com/", PurgeOptions::default());
        assert!(matches!(client.build(&request), Err(PurgeError::Validation { .. })));
    }
}
