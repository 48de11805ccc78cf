//! Concurrency tests for the per-category fetcher

use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use magazine_store::app::{fetch_magazines_by_category, ApiClient, ClientConfig, EndpointTemplates, Token};
use magazine_store::errors::ApiError;

const TOKEN: &str = "t0k3n";

async fn mount_delayed(server: &MockServer, category: &str, ids: &[u64], delay: Duration) {
    let magazines: Vec<_> = ids
        .iter()
        .map(|id| json!({"id": id, "name": format!("m{}", id), "category": category}))
        .collect();

    Mock::given(method("GET"))
        .and(path(format!("/api/magazines/{}/{}", TOKEN, category)))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": true, "data": magazines}))
                .set_delay(delay),
        )
        .expect(1)
        .mount(server)
        .await;
}

fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(Url::parse(&server.uri()).unwrap(), &ClientConfig::default()).unwrap()
}

#[tokio::test]
async fn test_key_set_independent_of_completion_order() {
    let server = MockServer::start().await;
    mount_delayed(&server, "Alpha", &[1, 2], Duration::from_millis(300)).await;
    mount_delayed(&server, "Beta", &[3], Duration::ZERO).await;
    mount_delayed(&server, "Gamma", &[4, 5, 6], Duration::from_millis(100)).await;

    let categories = vec!["Gamma".to_string(), "Alpha".to_string(), "Beta".to_string()];
    let result = fetch_magazines_by_category(
        &client_for(&server),
        &EndpointTemplates::default(),
        &categories,
        &Token::new(TOKEN),
    )
    .await
    .unwrap();

    let keys: BTreeSet<&String> = result.keys().collect();
    let expected: BTreeSet<&String> = categories.iter().collect();
    assert_eq!(keys, expected);

    let alpha: Vec<u64> = result["Alpha"].iter().map(|m| m.id).collect();
    assert_eq!(alpha, vec![1, 2]);
    assert_eq!(result["Gamma"].len(), 3);
}

#[tokio::test]
async fn test_requests_run_concurrently() {
    let server = MockServer::start().await;
    let delay = Duration::from_millis(400);
    for category in ["a", "b", "c", "d"] {
        mount_delayed(&server, category, &[], delay).await;
    }

    let categories: Vec<String> = ["a", "b", "c", "d"].iter().map(|s| s.to_string()).collect();
    let start = Instant::now();
    let result = fetch_magazines_by_category(
        &client_for(&server),
        &EndpointTemplates::default(),
        &categories,
        &Token::new(TOKEN),
    )
    .await
    .unwrap();

    assert_eq!(result.len(), 4);
    // sequential would take at least four delays
    assert!(start.elapsed() < delay * 3);
}

#[tokio::test]
async fn test_failure_waits_for_slow_siblings() {
    let server = MockServer::start().await;
    mount_delayed(&server, "slow", &[7], Duration::from_millis(200)).await;
    Mock::given(method("GET"))
        .and(path(format!("/api/magazines/{}/broken", TOKEN)))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let categories = vec!["slow".to_string(), "broken".to_string()];
    let start = Instant::now();
    let err = fetch_magazines_by_category(
        &client_for(&server),
        &EndpointTemplates::default(),
        &categories,
        &Token::new(TOKEN),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ApiError::Transport { status: 503, .. }));
    assert!(start.elapsed() >= Duration::from_millis(200));
}
