//! Integration tests for the blocking client.
//!
//! The mock panel runs on its own runtime; the client under test drives
//! requests from a plain thread.

use ptero_application::blocking::ApplicationClient;
use ptero_application::{ErrorKind, LocationId, NewNode, NewUser, NodeId, UserId};
use serde_json::json;
use tokio::runtime::Runtime;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn start_panel(runtime: &Runtime) -> MockServer {
    runtime.block_on(async {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/application/nodes"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [
                    {"object": "node", "attributes": {"id": 1, "name": "alpha", "fqdn": "alpha.example.com", "memory": 1024, "disk": 2048}},
                    {"object": "node", "attributes": {"id": 2, "name": "beta", "fqdn": "beta.example.com", "memory": 4096, "disk": 8192}}
                ]
            })))
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/api/application/nodes"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "object": "node",
                "attributes": {"id": 3, "name": "gamma", "fqdn": "gamma.example.com", "location_id": 1}
            })))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/application/users/99"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(json!({"errors": [{"code": "NotFoundHttpException", "status": "404", "detail": "The requested resource could not be found on the server."}]})),
            )
            .mount(&server)
            .await;

        server
    })
}

#[test]
fn test_blocking_list_and_create() {
    let runtime = Runtime::new().unwrap();
    let panel = start_panel(&runtime);

    let client = ApplicationClient::new(panel.uri(), "ptla_test").unwrap();

    let nodes = client.list_nodes().unwrap();
    assert_eq!(nodes.len(), 2);
    assert_eq!(
        nodes.to_string(),
        " - alpha (alpha.example.com) - Memory: 1024MiB, Disk: 2048MiB\n - beta (beta.example.com) - Memory: 4096MiB, Disk: 8192MiB"
    );

    let node = client
        .create_node(&NewNode::new("gamma", LocationId::new(1), "gamma.example.com"))
        .unwrap();
    assert_eq!(node.id, Some(NodeId::new(3)));
    assert_eq!(node.location_id, Some(LocationId::new(1)));
}

#[test]
fn test_blocking_api_error() {
    let runtime = Runtime::new().unwrap();
    let panel = start_panel(&runtime);

    let client = ApplicationClient::new(panel.uri(), "ptla_test").unwrap();
    let err = client.get_user(UserId::new(99)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Api);
    assert_eq!(err.status(), Some(404));
    assert!(err.to_string().contains("could not be found"));
}

#[test]
fn test_blocking_validation_error() {
    let client = ApplicationClient::new("http://127.0.0.1:9", "ptla_test").unwrap();
    let err = client
        .create_user(&NewUser::new("", "ghost", "No", "Email", "longenough1"))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[test]
fn test_blocking_rejects_empty_key() {
    let err = ApplicationClient::new("https://panel.example.com", "").unwrap_err();
    assert!(err.is_validation());
}

#[test]
fn test_blocking_debug_output() {
    let client = ApplicationClient::new("https://panel.example.com", "ptla_secret").unwrap();
    let rendered = format!("{:?}", client);
    assert!(rendered.starts_with("ApplicationClient { inner: ApplicationClient { .. }"));
    assert!(!rendered.contains("ptla_secret"));
}
