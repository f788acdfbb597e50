//! HTTP API integration tests against the in-memory repository.

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use lookup_master::{
    app, builtin_resources, resolve, AppState, Entry, InMemoryEntryRepository, Limits,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

struct TestApp {
    router: Router,
    repository: Arc<InMemoryEntryRepository>,
}

impl TestApp {
    fn new() -> Self {
        Self::with_limits(Limits::default())
    }

    fn with_limits(limits: Limits) -> Self {
        let repository = Arc::new(InMemoryEntryRepository::new());
        let registry = resolve(&builtin_resources()).expect("builtin resources resolve");
        let state = AppState::new(repository.clone(), registry);
        TestApp {
            router: app(state, limits),
            repository,
        }
    }

    async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let body = body.map(|b| b.to_string()).unwrap_or_default();
        self.send_raw(method, uri, Some("application/json"), body).await
    }

    async fn send_raw(
        &self,
        method: Method,
        uri: &str,
        content_type: Option<&str>,
        body: String,
    ) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        if let Some(content_type) = content_type {
            request = request.header("content-type", content_type);
        }
        let request = request.body(Body::from(body)).expect("request builds");
        let response = self.router.clone().oneshot(request).await.expect("router is infallible");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body reads");
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("response is JSON")
        };
        (status, json)
    }
}

fn large() -> Value {
    json!({"modifier": "Large", "abbreviation": "LG", "description": "size", "isActive": true})
}

#[tokio::test]
async fn modifier_lifecycle_scenario() {
    let app = TestApp::new();

    let (status, body) = app.send(Method::POST, "/modifiers", Some(large())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["modifier_id"], "M_0001");
    assert_eq!(body["modifier"], "Large");

    let (status, body) = app.send(Method::POST, "/modifiers", Some(large())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["modifier_id"], "M_0002");

    let (status, body) = app
        .send(Method::PUT, "/modifiers/M_0001", Some(json!({"isActive": false})))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isActive"], false);
    assert_eq!(body["modifier"], "Large");
    assert_eq!(body["abbreviation"], "LG");

    let (status, body) = app.send(Method::DELETE, "/modifiers/M_0001", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].as_str().unwrap().contains("M_0001"));

    let (status, body) = app.send(Method::GET, "/modifiers/M_0001", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "not_found");
}

#[tokio::test]
async fn read_wraps_entry_in_envelope() {
    let app = TestApp::new();
    let (_, created) = app.send(Method::POST, "/modifiers", Some(large())).await;

    let (status, body) = app.send(Method::GET, "/modifiers/M_0001", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "success");
    assert_eq!(body["data"], json!([created]));
}

#[tokio::test]
async fn list_is_ordered_by_id() {
    let app = TestApp::new();
    for name in ["Small", "Medium", "Large"] {
        let body = json!({"modifier": name, "abbreviation": "", "description": "", "isActive": true});
        app.send(Method::POST, "/modifiers", Some(body)).await;
    }

    let (status, body) = app.send(Method::GET, "/modifiers", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "success");
    let ids: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["modifier_id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, ["M_0001", "M_0002", "M_0003"]);
}

#[tokio::test]
async fn empty_list_is_success() {
    let app = TestApp::new();
    let (status, body) = app.send(Method::GET, "/attributevalue", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn resource_families_are_independent() {
    let app = TestApp::new();
    app.send(Method::POST, "/modifiers", Some(large())).await;
    app.send(Method::POST, "/modifiers", Some(large())).await;

    let (status, body) = app.send(Method::POST, "/attributename", Some(large())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["modifier_id"], "M_0001");

    let noun = json!({"noun": "Bolt", "abbreviation": "BLT", "description": "fastener", "isActive": true});
    let (status, body) = app.send(Method::POST, "/nounvalue", Some(noun.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["noun_id"], "N_0001");
    assert_eq!(body["noun"], "Bolt");

    let (_, body) = app.send(Method::POST, "/attributevalue", Some(noun)).await;
    assert_eq!(body["noun_id"], "N_0001");
}

#[tokio::test]
async fn partial_update_preserves_other_fields() {
    let app = TestApp::new();
    app.send(Method::POST, "/modifiers", Some(large())).await;

    let (status, body) = app
        .send(Method::PUT, "/modifiers/M_0001", Some(json!({"description": "x"})))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"modifier_id": "M_0001", "modifier": "Large", "abbreviation": "LG", "description": "x", "isActive": true})
    );

    // null means "not supplied"
    let (_, body) = app
        .send(Method::PUT, "/modifiers/M_0001", Some(json!({"isActive": null, "abbreviation": "L"})))
        .await;
    assert_eq!(body["isActive"], true);
    assert_eq!(body["abbreviation"], "L");
    assert_eq!(body["description"], "x");
}

#[tokio::test]
async fn update_cannot_change_id() {
    let app = TestApp::new();
    app.send(Method::POST, "/modifiers", Some(large())).await;
    let (status, body) = app
        .send(Method::PUT, "/modifiers/M_0001", Some(json!({"modifier_id": "M_0042", "modifier": "XL"})))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["modifier_id"], "M_0001");
    assert_eq!(body["modifier"], "XL");
}

#[tokio::test]
async fn missing_rows_are_not_found() {
    let app = TestApp::new();

    let (status, _) = app.send(Method::GET, "/nounvalue/N_0001", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .send(Method::PUT, "/nounvalue/N_0001", Some(json!({"noun": "x"})))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.send(Method::DELETE, "/nounvalue/N_0001", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // ids that cannot exist for this resource
    let (status, _) = app.send(Method::GET, "/nounvalue/M_0001", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = app.send(Method::GET, "/nounvalue/garbage", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_twice_reports_not_found() {
    let app = TestApp::new();
    app.send(Method::POST, "/modifiers", Some(large())).await;

    let (status, _) = app.send(Method::DELETE, "/modifiers/M_0001", None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = app.send(Method::DELETE, "/modifiers/M_0001", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "not_found");
}

#[tokio::test]
async fn unknown_resource_is_not_found() {
    let app = TestApp::new();
    let (status, _) = app.send(Method::GET, "/colours", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = app.send(Method::POST, "/colours", Some(large())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_validates_body() {
    let app = TestApp::new();

    let (status, body) = app
        .send(Method::POST, "/modifiers", Some(json!({"modifier": "Large", "abbreviation": "LG", "description": "size"})))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "validation_error");

    let (status, _) = app
        .send(
            Method::POST,
            "/modifiers",
            Some(json!({"modifier": "Large", "abbreviation": "LG", "description": "size", "isActive": "yes"})),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = app.send(Method::POST, "/modifiers", Some(json!([1, 2]))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // nothing was allocated by the failed attempts
    let (_, body) = app.send(Method::POST, "/modifiers", Some(large())).await;
    assert_eq!(body["modifier_id"], "M_0001");
}

#[tokio::test]
async fn unparsable_body_gets_error_envelope() {
    let app = TestApp::new();

    let (status, body) = app
        .send_raw(Method::POST, "/modifiers", Some("application/json"), "{not json".into())
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "bad_request");
    assert!(body["error"]["message"].is_string());

    let (status, body) = app
        .send_raw(Method::PUT, "/modifiers/M_0001", Some("application/json"), "{not json".into())
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "bad_request");

    let (status, body) = app
        .send_raw(Method::POST, "/modifiers", None, large().to_string())
        .await;
    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(body["error"]["code"], "unsupported_media_type");

    let (_, body) = app.send(Method::GET, "/modifiers", None).await;
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn oversized_body_gets_error_envelope() {
    let app = TestApp::with_limits(Limits {
        body_limit: 16,
        ..Limits::default()
    });

    let (status, body) = app.send(Method::POST, "/modifiers", Some(large())).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["error"]["code"], "payload_too_large");
}

#[tokio::test]
async fn empty_update_returns_entry_unchanged() {
    let app = TestApp::new();
    let (_, created) = app.send(Method::POST, "/modifiers", Some(large())).await;

    let (status, body) = app.send(Method::PUT, "/modifiers/M_0001", Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, created);

    let (status, _) = app.send(Method::PUT, "/modifiers/M_0002", Some(json!({}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_stored_identifier_is_a_server_error() {
    let app = TestApp::new();
    let registry = resolve(&builtin_resources()).unwrap();
    let modifiers = registry.resource_by_path("modifiers").unwrap();
    app.repository
        .insert_raw(
            modifiers,
            Entry {
                id: "M_00A1".into(),
                name: "Broken".into(),
                abbreviation: String::new(),
                description: String::new(),
                is_active: true,
            },
        )
        .await;

    let (status, body) = app.send(Method::POST, "/modifiers", Some(large())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["code"], "malformed_identifier");

    let (_, body) = app.send(Method::GET, "/modifiers", None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn operational_routes() {
    let app = TestApp::new();

    let (status, body) = app.send(Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = app.send(Method::GET, "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"], "ok");

    let (status, body) = app.send(Method::GET, "/version", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "lookup-master");
}
