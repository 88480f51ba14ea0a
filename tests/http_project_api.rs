//! Integration tests for the reqwest-backed ProjectApi.
//!
//! Each test runs the adapter against a local mock HTTP server and checks
//! the request it sends as well as how it maps responses:
//! 1. Paths, methods, headers and bodies match the REST contract
//! 2. Non-2xx statuses, malformed bodies and transport failures map to `ApiError`

use serde_json::json;
use std::time::Duration;

use project_manager::adapters::{HttpProjectApi, HttpProjectApiConfig};
use project_manager::domain::foundation::ProjectId;
use project_manager::domain::project::{ProjectDraft, ProjectPatch};
use project_manager::ports::{ApiError, ProjectApi};

use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// =============================================================================
// Test Infrastructure
// =============================================================================

fn api_for(server: &MockServer) -> HttpProjectApi {
    HttpProjectApi::new(HttpProjectApiConfig::new(server.uri())).unwrap()
}

// =============================================================================
// list
// =============================================================================

#[tokio::test]
async fn list_fetches_collection_in_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/projects"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 2, "title": "B", "color": "blue", "favorite": true },
            { "id": 1, "title": "A", "color": "red", "favorite": false, "owner": "sam" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let projects = api_for(&server).list().await.unwrap();

    assert_eq!(projects.len(), 2);
    assert_eq!(projects[0].id, ProjectId::number(2));
    assert_eq!(projects[1].id, ProjectId::number(1));
    assert_eq!(projects[1].extra().get("owner"), Some(&json!("sam")));
}

#[tokio::test]
async fn list_accepts_string_ids() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/projects"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{ "id": "f3a1", "title": "A", "color": "red" }])),
        )
        .mount(&server)
        .await;

    let projects = api_for(&server).list().await.unwrap();

    assert_eq!(projects[0].id, ProjectId::text("f3a1").unwrap());
    assert!(!projects[0].is_favorite());
}

#[tokio::test]
async fn list_maps_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/projects"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let result = api_for(&server).list().await;

    assert_eq!(result, Err(ApiError::status(503, "maintenance")));
}

#[tokio::test]
async fn list_maps_malformed_body_to_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/projects"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let result = api_for(&server).list().await;

    assert!(matches!(result, Err(ApiError::Parse(_))));
}

#[tokio::test]
async fn list_rejects_entries_without_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/projects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "title": "A" }])))
        .mount(&server)
        .await;

    let result = api_for(&server).list().await;

    assert!(matches!(result, Err(ApiError::Parse(_))));
}

// =============================================================================
// create
// =============================================================================

#[tokio::test]
async fn create_posts_draft_and_returns_persisted_project() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/projects"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "title": "B", "color": "red", "favorite": false })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 7, "title": "B", "color": "red", "favorite": false, "createdAt": "2024-01-01"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let draft = ProjectDraft::new("B", "red").unwrap();
    let created = api_for(&server).create(&draft).await.unwrap();

    assert_eq!(created.id, ProjectId::number(7));
    assert_eq!(created.title(), "B");
    assert_eq!(created.extra().get("createdAt"), Some(&json!("2024-01-01")));
}

#[tokio::test]
async fn create_maps_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/projects"))
        .respond_with(ResponseTemplate::new(422).set_body_string("title taken"))
        .mount(&server)
        .await;

    let draft = ProjectDraft::new("B", "red").unwrap();
    let result = api_for(&server).create(&draft).await;

    assert_eq!(result, Err(ApiError::status(422, "title taken")));
}

// =============================================================================
// patch / delete
// =============================================================================

#[tokio::test]
async fn patch_sends_only_editable_fields() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/projects/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ignored, not JSON"))
        .expect(1)
        .mount(&server)
        .await;

    let patch = ProjectPatch {
        favorite: Some(true),
        title: Some("X".to_string()),
        color: Some("blue".to_string()),
    };
    api_for(&server)
        .patch(&ProjectId::number(1), &patch)
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        String::from_utf8(requests[0].body.clone()).unwrap(),
        r#"{"favorite":true,"title":"X","color":"blue"}"#
    );
}

#[tokio::test]
async fn patch_maps_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/projects/9"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let patch = ProjectPatch {
        favorite: Some(false),
        title: Some("ghost".to_string()),
        color: Some("grey".to_string()),
    };
    let result = api_for(&server).patch(&ProjectId::number(9), &patch).await;

    assert_eq!(result, Err(ApiError::status(404, "")));
}

#[tokio::test]
async fn delete_targets_item_path() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/projects/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    api_for(&server).delete(&ProjectId::number(1)).await.unwrap();
}

#[tokio::test]
async fn delete_encodes_text_ids() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/projects/a%20b"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let id = ProjectId::text("a b").unwrap();
    api_for(&server).delete(&id).await.unwrap();
}

// =============================================================================
// transport failures
// =============================================================================

#[tokio::test]
async fn slow_response_maps_to_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/projects"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let config = HttpProjectApiConfig::new(server.uri()).with_timeout(Duration::from_secs(1));
    let api = HttpProjectApi::new(config).unwrap();

    let result = api.list().await;

    assert_eq!(result, Err(ApiError::Timeout { timeout_secs: 1 }));
}

#[tokio::test]
async fn unreachable_server_maps_to_network_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let api = HttpProjectApi::new(HttpProjectApiConfig::new(format!("http://127.0.0.1:{}", port)))
        .unwrap();

    let result = api.list().await;

    assert!(matches!(result, Err(ApiError::Network(_))));
}
