//! HTTP Publisher Integration Tests
//!
//! Drives `HttpOrderPublisher` against a mock relay and checks the request
//! shape (path, channel query, token header, JSON body) and how failures
//! are reported.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::time::Duration;

use backend_simulator::{HttpOrderPublisher, OrderPublisher, PublishOutcome, PublishTarget};
use relay_core::{DEFAULT_ALLOWED_CLOCK_SKEW, Order, TimeTokenSigner, verify_token};
use serde_json::json;
use wiremock::matchers::{body_json, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SECRET: &str = "integration-secret";
const WINDOW: i64 = 3600;

fn publisher_for(server: &MockServer, timeout: Duration) -> HttpOrderPublisher {
    HttpOrderPublisher::new(
        TimeTokenSigner::new(SECRET, WINDOW).unwrap(),
        &format!("{}/update", server.uri()),
        &format!("{}/publish", server.uri()),
        timeout,
    )
    .unwrap()
}

fn sample_order() -> Order {
    Order::new("order-1", "Monitor", 250.0)
}

#[allow(clippy::cast_precision_loss)]
fn now_secs() -> f64 {
    chrono::Utc::now().timestamp_millis() as f64 / 1000.0
}

#[tokio::test]
async fn private_publish_sends_token_channel_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/update"))
        .and(query_param("channel", "vip"))
        .and(header_exists("X-API-Token"))
        .and(body_json(json!({"id": "order-1", "item": "Monitor", "amount": 250.0})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "queued"})))
        .expect(1)
        .mount(&server)
        .await;

    let publisher = publisher_for(&server, Duration::from_secs(5));
    let outcome = publisher
        .publish(&sample_order(), PublishTarget::Private, "vip")
        .await;

    assert_eq!(
        outcome,
        PublishOutcome::Sent {
            response: Some(json!({"status": "queued"}))
        }
    );
}

#[tokio::test]
async fn token_header_verifies_with_shared_secret() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/update"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let publisher = publisher_for(&server, Duration::from_secs(5));
    let outcome = publisher
        .publish(&sample_order(), PublishTarget::Private, "")
        .await;
    assert_eq!(outcome, PublishOutcome::Sent { response: None });

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url.query(), None);

    let token = requests[0]
        .headers
        .get("x-api-token")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(
        verify_token(
            token,
            SECRET.as_bytes(),
            WINDOW,
            DEFAULT_ALLOWED_CLOCK_SKEW,
            now_secs()
        )
        .is_ok()
    );
    assert!(verify_token(token, b"wrong", WINDOW, 1, now_secs()).is_err());
}

#[tokio::test]
async fn public_publish_targets_publish_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/publish"))
        .and(query_param("channel", "news feed"))
        .and(header_exists("X-API-Token"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&server)
        .await;

    let publisher = publisher_for(&server, Duration::from_secs(5));
    let outcome = publisher
        .publish(&sample_order(), PublishTarget::Public, "news feed")
        .await;

    assert_eq!(
        outcome,
        PublishOutcome::Sent {
            response: Some(json!("ok"))
        }
    );
}

#[tokio::test]
async fn rejection_reports_response_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/update"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Invalid or expired token\n"))
        .mount(&server)
        .await;

    let publisher = publisher_for(&server, Duration::from_secs(5));
    let outcome = publisher
        .publish(&sample_order(), PublishTarget::Private, "default")
        .await;

    assert_eq!(
        outcome,
        PublishOutcome::Failed {
            error: "Invalid or expired token".to_string()
        }
    );
}

#[tokio::test]
async fn rejection_without_body_reports_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let publisher = publisher_for(&server, Duration::from_secs(5));
    let outcome = publisher
        .publish(&sample_order(), PublishTarget::Public, "default")
        .await;

    assert_eq!(
        outcome,
        PublishOutcome::Failed {
            error: "HTTP 500 Internal Server Error".to_string()
        }
    );
}

#[tokio::test]
async fn slow_relay_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let publisher = publisher_for(&server, Duration::from_millis(100));
    let outcome = publisher
        .publish(&sample_order(), PublishTarget::Private, "default")
        .await;

    assert!(matches!(outcome, PublishOutcome::Failed { ref error } if !error.is_empty()));
}

#[tokio::test]
async fn unreachable_relay_is_a_failure() {
    let publisher = HttpOrderPublisher::new(
        TimeTokenSigner::new(SECRET, WINDOW).unwrap(),
        "http://127.0.0.1:9/update",
        "http://127.0.0.1:9/publish",
        Duration::from_secs(2),
    )
    .unwrap();

    let outcome = publisher
        .publish(&sample_order(), PublishTarget::Private, "default")
        .await;

    assert!(!outcome.is_sent());
}
