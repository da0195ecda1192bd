use std::time::Duration;

use serde_json::json;
use smartshop::service::{HttpRecommendationService, RecommendationService, ServiceError};
use tokio_test::{assert_err, assert_ok};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, header, method, path},
};

// ============================================================================
// Helper Functions
// ============================================================================

fn service_for(server: &MockServer) -> HttpRecommendationService {
    HttpRecommendationService::new(server.uri(), "/chat", Some(Duration::from_secs(5)))
        .expect("client builds")
}

async fn mount_chat(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(response)
        .mount(server)
        .await;
}

// ============================================================================
// POST /chat
// ============================================================================

#[tokio::test]
async fn test_chat_success_with_recommendations() {
    let server = MockServer::start().await;
    mount_chat(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({
            "reply": "✨ I found 2 great products for you!",
            "recommendations": [
                {"name": "Trail Runner", "price": 89.99, "similarity_score": 0.91},
                {"name": "Road Racer", "category": "Footwear"}
            ]
        })),
    )
    .await;

    let reply = assert_ok!(service_for(&server).recommend("running shoes").await);
    assert_eq!(reply.reply, "✨ I found 2 great products for you!");
    assert_eq!(reply.recommendations.len(), 2);
    assert_eq!(reply.recommendations[0].name, Some(json!("Trail Runner")));
}

#[tokio::test]
async fn test_chat_sends_message_as_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"message": "show me electronics"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"reply": "ok"})))
        .expect(1)
        .mount(&server)
        .await;

    assert_ok!(service_for(&server).recommend("show me electronics").await);
}

#[tokio::test]
async fn test_chat_missing_fields_become_empty() {
    let server = MockServer::start().await;
    mount_chat(&server, ResponseTemplate::new(200).set_body_json(json!({}))).await;

    let reply = assert_ok!(service_for(&server).recommend("anything").await);
    assert_eq!(reply.reply, "");
    assert!(reply.recommendations.is_empty());
}

#[tokio::test]
async fn test_chat_tolerates_malformed_records() {
    let server = MockServer::start().await;
    mount_chat(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({
            "reply": "ok",
            "recommendations": [null, 42, "text", {"price": "abc", "name": ""}]
        })),
    )
    .await;

    let reply = assert_ok!(service_for(&server).recommend("anything").await);
    assert_eq!(reply.recommendations.len(), 4);
    assert_eq!(reply.recommendations[0], Default::default());
}

#[tokio::test]
async fn test_chat_error_status_uses_error_field() {
    let server = MockServer::start().await;
    mount_chat(
        &server,
        ResponseTemplate::new(400).set_body_json(json!({"error": "Message cannot be empty"})),
    )
    .await;

    let err = assert_err!(service_for(&server).recommend("x").await);
    assert_eq!(
        err,
        ServiceError::Service {
            status: 400,
            message: "Message cannot be empty".to_string(),
        }
    );
}

#[tokio::test]
async fn test_chat_error_status_without_body_uses_default_message() {
    let server = MockServer::start().await;
    mount_chat(&server, ResponseTemplate::new(500)).await;

    let err = assert_err!(service_for(&server).recommend("x").await);
    assert_eq!(
        err,
        ServiceError::Service {
            status: 500,
            message: "Failed to get recommendations".to_string(),
        }
    );
}

#[tokio::test]
async fn test_chat_non_json_body_is_parse_error() {
    let server = MockServer::start().await;
    mount_chat(
        &server,
        ResponseTemplate::new(200).set_body_string("<html>definitely not json</html>"),
    )
    .await;

    let err = assert_err!(service_for(&server).recommend("x").await);
    assert!(matches!(err, ServiceError::Parse(_)), "got {err:?}");
}

#[tokio::test]
async fn test_chat_recommendations_of_wrong_type_is_parse_error() {
    let server = MockServer::start().await;
    mount_chat(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({"reply": "ok", "recommendations": "none"})),
    )
    .await;

    let err = assert_err!(service_for(&server).recommend("x").await);
    assert!(matches!(err, ServiceError::Parse(_)), "got {err:?}");
}

#[tokio::test]
async fn test_chat_timeout_is_transport_error() {
    let server = MockServer::start().await;
    mount_chat(
        &server,
        ResponseTemplate::new(200)
            .set_body_json(json!({"reply": "late"}))
            .set_delay(Duration::from_millis(500)),
    )
    .await;

    let service =
        HttpRecommendationService::new(server.uri(), "/chat", Some(Duration::from_millis(50)))
            .expect("client builds");
    let err = assert_err!(service.recommend("x").await);
    assert!(matches!(err, ServiceError::Transport(_)), "got {err:?}");
}

#[tokio::test]
async fn test_chat_connection_refused_is_transport_error() {
    // Port 9 (discard) on localhost is not expected to accept HTTP
    let service = HttpRecommendationService::new("http://127.0.0.1:9", "/chat", None)
        .expect("client builds");
    let err = assert_err!(service.recommend("x").await);
    assert!(matches!(err, ServiceError::Transport(_)), "got {err:?}");
}

// ============================================================================
// GET /health and image probes
// ============================================================================

#[tokio::test]
async fn test_health_reports_products_loaded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"status": "healthy", "products_loaded": 20})),
        )
        .mount(&server)
        .await;

    let health = assert_ok!(service_for(&server).health().await);
    assert!(health.is_healthy());
    assert_eq!(health.products_loaded, 20);
}

#[tokio::test]
async fn test_probe_image_follows_status() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/ok.png"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("HEAD"))
        .and(path("/gone.png"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let service = service_for(&server);
    assert_ok!(service.probe_image(&format!("{}/ok.png", server.uri())).await);
    let err = assert_err!(service.probe_image(&format!("{}/gone.png", server.uri())).await);
    assert!(matches!(err, ServiceError::Service { status: 404, .. }));
}
