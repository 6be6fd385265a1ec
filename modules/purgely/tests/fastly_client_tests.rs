//! Fastly backend tests against a mock API server

use httpmock::prelude::*;
use purgely::contract::*;
use purgely::domain::PurgeBackend;
use purgely::infra::fastly::FastlyClient;
use purgely::Config;
use serde_json::json;

fn config_for(server: &MockServer) -> Config {
    Config {
        api_endpoint: server.base_url(),
        fastly_key: "test-key".to_string(),
        fastly_service_id: "SU1Z0isxPaozGVKXdv0eY".to_string(),
        ..Config::default()
    }
}

#[tokio::test]
async fn test_surrogate_key_purge() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/service/SU1Z0isxPaozGVKXdv0eY/purge/post-42")
                .header("fastly-key", "test-key")
                .header("accept", "application/json");
            then.status(200)
                .json_body(json!({"status": "ok", "id": "108-1391560174-974124"}));
        })
        .await;

    let client = FastlyClient::new(&config_for(&server)).unwrap();
    let request = PurgeRequest::new(PurgeKind::SurrogateKey, "post-42", PurgeOptions::default());
    let response = client.purge(&request).await.unwrap();

    mock.assert_async().await;
    assert_eq!(response.status, 200);
    assert_eq!(response.status_text.as_deref(), Some("ok"));
    assert_eq!(response.id.as_deref(), Some("108-1391560174-974124"));
    assert_eq!(response.kind, PurgeKind::SurrogateKey);
}

#[tokio::test]
async fn test_soft_purge_header() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/service/SU1Z0isxPaozGVKXdv0eY/purge/home")
                .header("fastly-soft-purge", "1");
            then.status(200).json_body(json!({"status": "ok"}));
        })
        .await;

    let client = FastlyClient::new(&config_for(&server)).unwrap();
    let request = PurgeRequest::new(
        PurgeKind::SurrogateKey,
        "home",
        PurgeOptions::default().with_soft(true),
    );
    client.purge(&request).await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_purge_all_when_allowed() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/service/SU1Z0isxPaozGVKXdv0eY/purge_all")
                .header("fastly-key", "test-key");
            then.status(200).json_body(json!({"status": "ok"}));
        })
        .await;

    let client = FastlyClient::new(&config_for(&server)).unwrap();
    let request = PurgeRequest::new(
        PurgeKind::All,
        "",
        PurgeOptions::default().with_allow_all(true),
    );
    let response = client.purge(&request).await.unwrap();

    mock.assert_async().await;
    assert_eq!(response.target, "");
}

#[tokio::test]
async fn test_purge_all_refused_without_permission() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.path("/service/SU1Z0isxPaozGVKXdv0eY/purge_all");
            then.status(200);
        })
        .await;

    let client = FastlyClient::new(&config_for(&server)).unwrap();
    let request = PurgeRequest::new(
        PurgeKind::All,
        "",
        PurgeOptions::default().with_allow_all(false),
    );

    assert_eq!(client.purge(&request).await, Err(PurgeError::PurgeAllNotAllowed));
    mock.assert_hits_async(0).await;
}

#[tokio::test]
async fn test_url_purge_hits_the_url_itself() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.path("/hello-world/").header("fastly-key", "test-key");
            then.status(200).json_body(json!({"status": "ok", "id": "url-1"}));
        })
        .await;

    let config = Config {
        purge_hosts: vec![server.host()],
        ..config_for(&server)
    };
    let client = FastlyClient::new(&config).unwrap();
    let url = server.url("/hello-world/");
    let request = PurgeRequest::new(PurgeKind::Url, url.clone(), PurgeOptions::default());
    let response = client.purge(&request).await.unwrap();

    mock.assert_async().await;
    assert_eq!(response.target, url);
    assert_eq!(response.id.as_deref(), Some("url-1"));
}

#[tokio::test]
async fn test_url_purge_to_unlisted_host_omits_api_key() {
    let server = MockServer::start_async().await;
    let keyless = server
        .mock_async(|when, then| {
            when.path("/elsewhere/").header_missing("fastly-key");
            then.status(200).json_body(json!({"status": "ok"}));
        })
        .await;

    // purge_hosts is empty, so the mock host is foreign
    let client = FastlyClient::new(&config_for(&server)).unwrap();
    let request = PurgeRequest::new(
        PurgeKind::Url,
        server.url("/elsewhere/"),
        PurgeOptions::default(),
    );
    let response = client.purge(&request).await.unwrap();

    keyless.assert_async().await;
    assert_eq!(response.status, 200);
}

#[tokio::test]
async fn test_url_purge_accepts_non_json_body() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.path("/plain");
            then.status(200).body("purged");
        })
        .await;

    let client = FastlyClient::new(&config_for(&server)).unwrap();
    let request = PurgeRequest::new(PurgeKind::Url, server.url("/plain"), PurgeOptions::default());
    let response = client.purge(&request).await.unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(response.status_text, None);
    assert_eq!(response.id, None);
}

#[tokio::test]
async fn test_api_error_is_surfaced() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/service/SU1Z0isxPaozGVKXdv0eY/purge/post-1");
            then.status(401).json_body(json!({"msg": "Provided credentials are missing or invalid"}));
        })
        .await;

    let client = FastlyClient::new(&config_for(&server)).unwrap();
    let request = PurgeRequest::new(PurgeKind::SurrogateKey, "post-1", PurgeOptions::default());

    match client.purge(&request).await {
        Err(PurgeError::Api { status, message }) => {
            assert_eq!(status, 401);
            assert!(message.contains("credentials"));
        }
        other => panic!("Expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_missing_service_id() {
    let server = MockServer::start_async().await;
    let config = Config {
        fastly_service_id: String::new(),
        ..config_for(&server)
    };

    let client = FastlyClient::new(&config).unwrap();
    let request = PurgeRequest::new(PurgeKind::SurrogateKey, "post-1", PurgeOptions::default());

    assert_eq!(
        client.purge(&request).await,
        Err(PurgeError::NotConfigured {
            setting: "fastly_service_id"
        })
    );
}

#[tokio::test]
async fn test_unreachable_api_is_transport_error() {
    let config = Config {
        api_endpoint: "http://127.0.0.1:1/".to_string(),
        fastly_key: "k".to_string(),
        fastly_service_id: "s".to_string(),
        ..Config::default()
    };

    let client = FastlyClient::new(&config).unwrap();
    let request = PurgeRequest::new(PurgeKind::SurrogateKey, "post-1", PurgeOptions::default());

    assert!(matches!(
        client.purge(&request).await,
        Err(PurgeError::Transport { .. })
    ));
}
