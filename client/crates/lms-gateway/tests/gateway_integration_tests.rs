//! Integration tests for the gateway using wiremock mock server

use lms_core::NotificationCategory;
use lms_gateway::{CourseQuery, FailureKind, Gateway, GatewayError};
use lms_store::{KeyValueStore, MemoryStore, keys};

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path, query_param},
};

fn gateway(server: &MockServer, store: Arc<MemoryStore>) -> Gateway {
    Gateway::new(&server.uri(), Duration::from_secs(5), store).unwrap()
}

#[tokio::test]
async fn test_notifications_decoded_and_bearer_attached() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/notifications"))
        .and(header("authorization", "Bearer secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": 41,
                "type": "system",
                "title": "Maintenance",
                "message": "Planned downtime tonight",
                "time": "just now",
                "read": false,
                "icon": "🛠"
            }
        ])))
        .mount(&mock_server)
        .await;

    let store = Arc::new(MemoryStore::new());
    store.set(keys::AUTH_TOKEN, "secret-token").unwrap();

    let records = gateway(&mock_server, store).notifications().await.unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, 41);
    assert_eq!(records[0].category, NotificationCategory::System);
}

#[tokio::test]
async fn test_no_token_means_no_authorization_header() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/leaderboard"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    gateway(&mock_server, Arc::new(MemoryStore::new()))
        .leaderboard()
        .await
        .unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("authorization").is_none());
    assert_eq!(
        requests[0]
            .headers
            .get("content-type")
            .and_then(|v| v.to_str().ok()),
        Some("application/json")
    );
}

#[tokio::test]
async fn test_not_found_is_classified_as_absent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/certificates/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "detail": "Certificate not found"
        })))
        .mount(&mock_server)
        .await;

    let err = gateway(&mock_server, Arc::new(MemoryStore::new()))
        .certificate("missing")
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(err.kind(), FailureKind::Absent);
    assert!(err.to_string().contains("Certificate not found"));
}

#[tokio::test]
async fn test_server_error_is_uniform_request_failed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/notifications"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let err = gateway(&mock_server, Arc::new(MemoryStore::new()))
        .notifications()
        .await
        .unwrap_err();

    match err {
        GatewayError::RequestFailed { status, reason, .. } => {
            assert_eq!(status, 500);
            assert_eq!(reason, "Internal Server Error");
        }
        other => panic!("Expected RequestFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_mark_read_accepts_empty_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/notifications/7/read"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = gateway(&mock_server, Arc::new(MemoryStore::new()))
        .mark_notification_read(7)
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_course_filters_sent_as_query_string() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/courses"))
        .and(query_param("category", "Data Science"))
        .and(query_param("search", "python"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": "2" }])))
        .mount(&mock_server)
        .await;

    let query = CourseQuery {
        category: Some("Data Science".into()),
        search: Some("python".into()),
        ..Default::default()
    };
    let courses = gateway(&mock_server, Arc::new(MemoryStore::new()))
        .courses(&query)
        .await
        .unwrap();

    assert_eq!(courses[0]["id"], "2");
}

#[tokio::test]
async fn test_resource_id_is_encoded_as_one_path_segment() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/courses/a%2Fb%3Fc%23d"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "a/b?c#d" })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let course = gateway(&mock_server, Arc::new(MemoryStore::new()))
        .course("a/b?c#d")
        .await
        .unwrap();

    assert_eq!(course["id"], "a/b?c#d");
}

#[tokio::test]
async fn test_certificate_id_cannot_reach_another_endpoint() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/certificates/..%2Fleaderboard"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "cert" })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let certificate = gateway(&mock_server, Arc::new(MemoryStore::new()))
        .certificate("../leaderboard")
        .await
        .unwrap();

    assert_eq!(certificate["id"], "cert");
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_error() {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let gateway = Gateway::new("http://127.0.0.1:9", Duration::from_secs(2), store).unwrap();

    let err = gateway.notifications().await.unwrap_err();

    assert_eq!(err.kind(), FailureKind::Unavailable);
    assert!(err.status().is_none());
}
