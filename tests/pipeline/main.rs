//! End-to-end tests of a reconciliation pass against a mock catalog service

mod fixtures;

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use magazine_store::app::Reconciler;
use magazine_store::errors::{ApiError, AppError};

use fixtures::*;

/// Two categories, three subscribers: full coverage, partial, none
#[tokio::test]
async fn test_pass_reports_only_full_coverage_subscriber() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    mount_categories(&server, &["fiction", "tech"]).await;
    mount_category(&server, "fiction", &[1, 3], Duration::ZERO).await;
    mount_category(&server, "tech", &[2], Duration::ZERO).await;
    mount_subscribers(
        &server,
        json!([
            {"id": "partial", "firstName": "Pat", "lastName": "Tial", "magazineIds": [1, 3]},
            {"id": "full", "firstName": "Ful", "lastName": "Ly", "magazineIds": [3, 2]},
            {"id": "empty", "firstName": "Em", "lastName": "Pty", "magazineIds": []}
        ]),
    )
    .await;
    mount_answer(&server, &["full"], true).await;

    let reconciler = Reconciler::new(config_for(&server)).unwrap();
    let pass = reconciler.run_pass().await.unwrap();

    assert_eq!(pass.matching_ids(), vec!["full".to_string()]);
    assert_eq!(pass.matching[0].first_name, "Ful");
    assert!(pass.result.answer_correct);
    assert_eq!(pass.result.total_time, "00:00:00.8");
    assert_eq!(pass.stats.categories, 2);
    assert_eq!(pass.stats.magazines, 3);
    assert_eq!(pass.stats.subscribers, 3);
    assert_eq!(pass.stats.qualifying, 1);
    assert_eq!(pass.stats.catalog_collisions, 0);
}

/// Matching order follows the subscriber list, not category completion order
#[tokio::test]
async fn test_pass_preserves_subscriber_order_with_slow_categories() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    mount_categories(&server, &["News", "Sports", "Business"]).await;
    mount_category(&server, "News", &[10, 11], Duration::from_millis(200)).await;
    mount_category(&server, "Sports", &[20], Duration::ZERO).await;
    mount_category(&server, "Business", &[30], Duration::from_millis(80)).await;
    mount_subscribers(
        &server,
        json!([
            {"id": "z", "firstName": "Z", "lastName": "Z", "magazineIds": [30, 20, 11]},
            {"id": "m", "firstName": "M", "lastName": "M", "magazineIds": [10, 20]},
            {"id": "a", "firstName": "A", "lastName": "A", "magazineIds": [10, 20, 30, 99]}
        ]),
    )
    .await;
    mount_answer(&server, &["z", "a"], true).await;

    let reconciler = Reconciler::new(config_for(&server)).unwrap();
    let pass = reconciler.run_pass().await.unwrap();

    assert_eq!(pass.matching_ids(), vec!["z".to_string(), "a".to_string()]);
}

/// An empty category list makes every subscriber qualify
#[tokio::test]
async fn test_pass_with_no_categories_reports_everyone() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    mount_categories(&server, &[]).await;
    mount_subscribers(
        &server,
        json!([
            {"id": "c", "firstName": "C", "lastName": "C", "magazineIds": []},
            {"id": "d", "firstName": "D", "lastName": "D", "magazineIds": [99]}
        ]),
    )
    .await;
    mount_answer(&server, &["c", "d"], true).await;

    let reconciler = Reconciler::new(config_for(&server)).unwrap();
    let pass = reconciler.run_pass().await.unwrap();

    assert_eq!(pass.matching_ids(), vec!["c".to_string(), "d".to_string()]);
    assert_eq!(pass.stats.magazines, 0);
}

/// A wrong answer is a result, not an error
#[tokio::test]
async fn test_incorrect_verdict_is_returned() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    mount_categories(&server, &["tech"]).await;
    mount_category(&server, "tech", &[2], Duration::ZERO).await;
    mount_subscribers(
        &server,
        json!([{"id": "only", "firstName": "O", "lastName": "N", "magazineIds": [2]}]),
    )
    .await;
    mount_answer(&server, &["only"], false).await;

    let reconciler = Reconciler::new(config_for(&server)).unwrap();
    let pass = reconciler.run_pass().await.unwrap();

    assert!(!pass.result.answer_correct);
    assert_eq!(pass.result.should_be, Some(vec!["only".to_string()]));
}

/// One failing category aborts the pass before anything is submitted
#[tokio::test]
async fn test_failed_category_aborts_pass() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    mount_categories(&server, &["fiction", "tech"]).await;
    mount_category(&server, "fiction", &[1], Duration::ZERO).await;
    Mock::given(method("GET"))
        .and(path(format!("/api/magazines/{}/tech", TOKEN)))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    mount_subscribers(&server, json!([])).await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let reconciler = Reconciler::new(config_for(&server)).unwrap();
    let err = reconciler.run_pass().await.unwrap_err();

    match err {
        AppError::Api(ApiError::Transport { status, endpoint }) => {
            assert_eq!(status, 500);
            assert!(endpoint.ends_with("/tech"));
        }
        other => panic!("Expected transport error, got {:?}", other),
    }
}

/// A malformed subscriber list is a decode error that aborts the pass
#[tokio::test]
async fn test_malformed_subscribers_is_decode_error() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    Mock::given(method("GET"))
        .and(path(format!("/api/subscribers/{}", TOKEN)))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"success": true, "data": "nope"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let reconciler = Reconciler::new(config_for(&server)).unwrap();
    let err = reconciler.run_pass().await.unwrap_err();

    assert!(matches!(err, AppError::Api(ApiError::Decode { .. })));
    assert_eq!(err.category(), "decode");
}

/// Token failure stops the pass at the first call
#[tokio::test]
async fn test_token_failure_stops_pass() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/token"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let reconciler = Reconciler::new(config_for(&server)).unwrap();
    let err = reconciler.run_pass().await.unwrap_err();

    assert!(matches!(
        err,
        AppError::Api(ApiError::Transport { status: 401, .. })
    ));
}

/// Each pass re-fetches everything
#[tokio::test]
async fn test_consecutive_passes_refetch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/token"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"success": true, "token": TOKEN})),
        )
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/api/categories/{}", TOKEN)))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"success": true, "data": []})),
        )
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/api/subscribers/{}", TOKEN)))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"success": true, "data": []})),
        )
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!("/api/answer/{}", TOKEN)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {"totalTime": "0", "answerCorrect": true}
        })))
        .expect(2)
        .mount(&server)
        .await;

    let reconciler = Reconciler::new(config_for(&server)).unwrap();
    reconciler.run_pass().await.unwrap();
    reconciler.run_pass().await.unwrap();
}
