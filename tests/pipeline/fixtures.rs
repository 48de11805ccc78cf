//! Mock catalog service shared by the pipeline tests

use std::time::Duration;

use serde_json::{json, Value};
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use magazine_store::app::{ClientConfig, EndpointTemplates, ReconcilerConfig};

pub const TOKEN: &str = "fixed-token";

/// Runtime configuration pointing at the mock server
pub fn config_for(server: &MockServer) -> ReconcilerConfig {
    ReconcilerConfig {
        base_url: Url::parse(&server.uri()).unwrap(),
        endpoints: EndpointTemplates::default(),
        client: ClientConfig {
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
            ..Default::default()
        },
    }
}

fn envelope(data: Value) -> Value {
    json!({"success": true, "token": TOKEN, "data": data})
}

pub async fn mount_token(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/token"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"success": true, "token": TOKEN})),
        )
        .expect(1)
        .mount(server)
        .await;
}

pub async fn mount_categories(server: &MockServer, categories: &[&str]) {
    Mock::given(method("GET"))
        .and(path(format!("/api/categories/{}", TOKEN)))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!(categories))))
        .expect(1)
        .mount(server)
        .await;
}

/// Mount one category's magazine list, answered after `delay`
pub async fn mount_category(server: &MockServer, category: &str, ids: &[u64], delay: Duration) {
    let magazines: Vec<Value> = ids
        .iter()
        .map(|id| json!({"id": id, "name": format!("{} #{}", category, id), "category": category}))
        .collect();

    Mock::given(method("GET"))
        .and(path(format!("/api/magazines/{}/{}", TOKEN, category)))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(envelope(json!(magazines)))
                .set_delay(delay),
        )
        .expect(1)
        .mount(server)
        .await;
}

pub async fn mount_subscribers(server: &MockServer, subscribers: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/api/subscribers/{}", TOKEN)))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(subscribers)))
        .expect(1)
        .mount(server)
        .await;
}

/// Answer endpoint that accepts exactly `expected` as the posted body
pub async fn mount_answer(server: &MockServer, expected: &[&str], correct: bool) {
    Mock::given(method("POST"))
        .and(path(format!("/api/answer/{}", TOKEN)))
        .and(wiremock::matchers::body_json(json!({"subscribers": expected})))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "totalTime": "00:00:00.8",
            "answerCorrect": correct,
            "shouldBe": if correct { Value::Null } else { json!(expected) }
        }))))
        .expect(1)
        .mount(server)
        .await;
}
