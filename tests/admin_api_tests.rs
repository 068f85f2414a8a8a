//! Admin API tests
//!
//! Covers `/api/links` over an in-memory store with a fixed credential.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::http::header::WWW_AUTHENTICATE;
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use async_trait::async_trait;
use base64::{Engine, engine::general_purpose::STANDARD};
use serde_json::{Value, json};

use link_shortener::api;
use link_shortener::api::services::admin::not_found;
use link_shortener::errors::{LinkShortenerError, Result};
use link_shortener::services::{Authenticator, LinkRegistry};
use link_shortener::storage::{KvStore, MemoryStore};

// =============================================================================
// Test Setup
// =============================================================================

struct FixedCredentials;

#[async_trait]
impl Authenticator for FixedCredentials {
    async fn authenticate(&self, username: &str, password: &str) -> bool {
        username == "admin" && password == "secret"
    }
}

/// Store that answers every call with a driver error.
struct FailingStore;

#[async_trait]
impl KvStore for FailingStore {
    async fn get(&self, _key: &str) -> Result<Option<Value>> {
        Err(LinkShortenerError::database_operation("disk I/O error"))
    }

    async fn set(&self, _key: &str, _value: Value) -> Result<()> {
        Err(LinkShortenerError::database_operation("disk I/O error"))
    }

    async fn delete(&self, _key: &str) -> Result<bool> {
        Err(LinkShortenerError::database_operation("disk I/O error"))
    }

    async fn scan_prefix(&self, _prefix: &str) -> Result<Vec<(String, Value)>> {
        Err(LinkShortenerError::database_operation("disk I/O error"))
    }

    fn backend_name(&self) -> &str {
        "failing"
    }
}

fn new_registry() -> Arc<LinkRegistry> {
    Arc::new(LinkRegistry::new(Arc::new(MemoryStore::new())))
}

fn basic(user: &str, pass: &str) -> (&'static str, String) {
    (
        "Authorization",
        format!("Basic {}", STANDARD.encode(format!("{}:{}", user, pass))),
    )
}

fn admin() -> (&'static str, String) {
    basic("admin", "secret")
}

macro_rules! admin_app {
    ($registry:expr) => {{
        let authenticator: Arc<dyn Authenticator> = Arc::new(FixedCredentials);
        test::init_service(
            App::new()
                .app_data(web::Data::new($registry.clone()))
                .configure(|cfg| api::configure(cfg, authenticator.clone()))
                .default_service(web::to(not_found)),
        )
        .await
    }};
}

// =============================================================================
// Authentication
// =============================================================================

#[actix_web::test]
async fn test_missing_credentials_is_401() {
    let registry = new_registry();
    let app = admin_app!(registry);

    let req = TestRequest::get().uri("/api/links").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let challenge = resp.headers().get(WWW_AUTHENTICATE).unwrap().to_str().unwrap();
    assert_eq!(challenge, "Basic realm=\"link-shortener\"");

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"code": 401, "message": "Unauthorized"}));
}

#[actix_web::test]
async fn test_wrong_password_is_401() {
    let registry = new_registry();
    let app = admin_app!(registry);

    let req = TestRequest::get()
        .uri("/api/links")
        .insert_header(basic("admin", "nope"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_unauthenticated_mutation_changes_nothing() {
    let registry = new_registry();
    let app = admin_app!(registry);

    let req = TestRequest::put()
        .uri("/api/links")
        .set_json(json!({"name": "x", "target": "https://x.example"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(registry.get("x").await.unwrap().is_none());
}

// =============================================================================
// CRUD
// =============================================================================

#[actix_web::test]
async fn test_list_links_empty() {
    let registry = new_registry();
    let app = admin_app!(registry);

    let req = TestRequest::get()
        .uri("/api/links")
        .insert_header(admin())
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"code": 200, "message": "OK", "links": {}}));
}

#[actix_web::test]
async fn test_put_creates_and_normalizes() {
    let registry = new_registry();
    let app = admin_app!(registry);

    let req = TestRequest::put()
        .uri("/api/links")
        .insert_header(admin())
        .set_json(json!({"name": "/docs/", "target": "https://example.com"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 201);
    assert_eq!(body["message"], "Created");
    assert_eq!(
        body["link"],
        json!({"name": "docs", "target": "https://example.com", "requested": 0})
    );
}

#[actix_web::test]
async fn test_put_existing_is_409_and_keeps_record() {
    let registry = new_registry();
    registry.add("docs", "https://old.example").await.unwrap();
    let app = admin_app!(registry);

    let req = TestRequest::put()
        .uri("/api/links")
        .insert_header(admin())
        .set_json(json!({"name": "/docs", "target": "https://new.example"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"code": 409, "message": "Conflict"}));

    let stored = registry.get("docs").await.unwrap().unwrap();
    assert_eq!(stored.target, "https://old.example");
}

#[actix_web::test]
async fn test_put_accepts_link_field() {
    let registry = new_registry();
    let app = admin_app!(registry);

    let req = TestRequest::put()
        .uri("/api/links")
        .insert_header(admin())
        .set_json(json!({"name": "gh", "link": "https://github.com"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(
        registry.get("gh").await.unwrap().unwrap().target,
        "https://github.com"
    );
}

#[actix_web::test]
async fn test_post_fetches_single_link() {
    let registry = new_registry();
    registry.add("docs", "https://example.com").await.unwrap();
    let app = admin_app!(registry);

    let req = TestRequest::post()
        .uri("/api/links")
        .insert_header(admin())
        .set_json(json!({"name": "docs/"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["link"]["target"], "https://example.com");

    let req = TestRequest::post()
        .uri("/api/links")
        .insert_header(admin())
        .set_json(json!({"name": "missing"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_post_does_not_count_a_request() {
    let registry = new_registry();
    registry.add("docs", "https://example.com").await.unwrap();
    let app = admin_app!(registry);

    let req = TestRequest::post()
        .uri("/api/links")
        .insert_header(admin())
        .set_json(json!({"name": "docs"}))
        .to_request();
    test::call_service(&app, req).await;

    assert_eq!(registry.get("docs").await.unwrap().unwrap().request_count, 0);
}

#[actix_web::test]
async fn test_patch_outcomes() {
    let registry = new_registry();
    registry.add("docs", "https://example.com").await.unwrap();
    registry.resolve_and_touch("docs").await.unwrap();
    let app = admin_app!(registry);

    // unknown name
    let req = TestRequest::patch()
        .uri("/api/links")
        .insert_header(admin())
        .set_json(json!({"name": "ghost", "target": "https://x.example"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    assert!(registry.get("ghost").await.unwrap().is_none());

    // same target
    let req = TestRequest::patch()
        .uri("/api/links")
        .insert_header(admin())
        .set_json(json!({"name": "docs", "target": "https://example.com"}))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_MODIFIED
    );

    // new target
    let req = TestRequest::patch()
        .uri("/api/links")
        .insert_header(admin())
        .set_json(json!({"name": "/docs", "target": "https://docs.example"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body["link"],
        json!({"name": "docs", "target": "https://docs.example", "requested": 1})
    );
}

#[actix_web::test]
async fn test_delete_returns_removed_record() {
    let registry = new_registry();
    registry.add("docs", "https://example.com").await.unwrap();
    let app = admin_app!(registry);

    let req = TestRequest::delete()
        .uri("/api/links")
        .insert_header(admin())
        .set_json(json!({"name": "/docs"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["link"]["name"], "docs");
    assert!(registry.get("docs").await.unwrap().is_none());

    let req = TestRequest::delete()
        .uri("/api/links")
        .insert_header(admin())
        .set_json(json!({"name": "docs"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// Validation
// =============================================================================

#[actix_web::test]
async fn test_missing_or_empty_fields_are_400() {
    let registry = new_registry();
    let app = admin_app!(registry);

    let cases = [
        (TestRequest::post(), json!({})),
        (TestRequest::post(), json!({"name": ""})),
        (TestRequest::put(), json!({"name": "x"})),
        (TestRequest::put(), json!({"target": "https://x.example"})),
        (TestRequest::put(), json!({"name": "x", "target": ""})),
        (TestRequest::patch(), json!({"name": "x"})),
        (TestRequest::delete(), json!({"target": "x"})),
        (TestRequest::put(), json!({"name": 5, "target": "https://x.example"})),
    ];

    for (builder, payload) in cases {
        let req = builder
            .uri("/api/links")
            .insert_header(admin())
            .set_json(payload.clone())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "payload: {}", payload);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({"code": 400, "message": "Bad Request"}));
    }

    assert!(registry.list_all().await.unwrap().is_empty());
}

#[actix_web::test]
async fn test_malformed_json_is_400() {
    let registry = new_registry();
    let app = admin_app!(registry);

    let req = TestRequest::put()
        .uri("/api/links")
        .insert_header(admin())
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_unknown_api_route_is_404_envelope() {
    let registry = new_registry();
    let app = admin_app!(registry);

    let req = TestRequest::get()
        .uri("/api/unknown")
        .insert_header(admin())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"code": 404, "message": "Not Found"}));
}

// =============================================================================
// Storage Failures
// =============================================================================

#[actix_web::test]
async fn test_storage_failure_is_500_envelope() {
    let registry = Arc::new(LinkRegistry::new(Arc::new(FailingStore)));
    let app = admin_app!(registry);
    let expected = json!({"code": 500, "message": "Internal Server Error"});

    let req = TestRequest::get()
        .uri("/api/links")
        .insert_header(admin())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, expected);

    let writes = [
        (TestRequest::post(), json!({"name": "docs"})),
        (TestRequest::put(), json!({"name": "docs", "target": "https://x.example"})),
        (TestRequest::patch(), json!({"name": "docs", "target": "https://x.example"})),
        (TestRequest::delete(), json!({"name": "docs"})),
    ];
    for (builder, payload) in writes {
        let req = builder
            .uri("/api/links")
            .insert_header(admin())
            .set_json(payload.clone())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(
            resp.status(),
            StatusCode::INTERNAL_SERVER_ERROR,
            "payload: {}",
            payload
        );
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, expected);
    }
}
