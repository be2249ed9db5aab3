//! Integration test — build the router over an in-memory store and drive the
//! auth endpoints end to end.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use bcr_api::AppState;
use bcr_core::auth::{MemoryCredentialStore, SessionTokenCodec};
use bcr_core::config::{AuthConfig, SigningSecret};
use bcr_core::models::auth::{Role, SessionClaims};
use chrono::Utc;
use serde_json::{Value, json};
use tower::ServiceExt;

const SECRET: &str = "api-test-secret";

fn app() -> Router {
    let config = AuthConfig::new(SECRET)
        .and_then(|c| c.with_bcrypt_cost(4))
        .expect("config");
    let state = AppState::new(Arc::new(MemoryCredentialStore::new()), &config).expect("state");
    bcr_api::router(state)
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.clone().oneshot(req).await.expect("request");
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("read body");
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("parse JSON")
    };
    (status, json)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn whoami(token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri("/v1/auth/whoami");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

async fn register_and_login(app: &Router) -> String {
    let (status, _) = send(
        app,
        post_json(
            "/v1/auth/register",
            json!({"name": "A", "email": "a@b.com", "password": "Secret123!"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        app,
        post_json(
            "/v1/auth/login",
            json!({"email": "a@b.com", "password": "Secret123!"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["accessToken"]
        .as_str()
        .expect("accessToken is string")
        .to_string()
}

#[tokio::test]
async fn root_reports_status() {
    let app = app();
    let req = Request::builder().uri("/").body(Body::empty()).unwrap();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"status": "OK", "message": "BCR API is up and running!"})
    );
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let app = app();
    let req = Request::builder()
        .uri("/check")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["name"], "Error");
    assert_eq!(body["error"]["message"], "Not found!");
    assert_eq!(body["error"]["details"]["method"], "GET");
    assert_eq!(body["error"]["details"]["url"], "/check");
}

#[tokio::test]
async fn register_returns_public_view() {
    let app = app();
    let (status, body) = send(
        &app,
        post_json(
            "/v1/auth/register",
            json!({
                "name": "Candra",
                "email": "candrapramudya50@gmail.com",
                "password": "cancan123",
                "image": "boboboi.jpg"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], 1);
    assert_eq!(body["name"], "Candra");
    assert_eq!(body["email"], "candrapramudya50@gmail.com");
    assert_eq!(body["image"], "boboboi.jpg");

    let obj = body.as_object().expect("object");
    assert!(
        obj.keys().all(|k| !k.to_lowercase().contains("password")),
        "password material leaked: {body}"
    );
}

#[tokio::test]
async fn duplicate_registration_is_unprocessable() {
    let app = app();
    let payload = json!({"name": "A", "email": "a@b.com", "password": "Secret123!"});
    let (status, _) = send(&app, post_json("/v1/auth/register", payload.clone())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, post_json("/v1/auth/register", payload)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["name"], "DuplicateIdentifierError");
}

#[tokio::test]
async fn empty_password_is_bad_request() {
    let app = app();
    let (status, body) = send(
        &app,
        post_json(
            "/v1/auth/register",
            json!({"name": "A", "email": "a@b.com", "password": ""}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["name"], "ValidationError");
}

#[tokio::test]
async fn unusable_bodies_are_validation_errors() {
    let app = app();
    let missing_field = post_json("/v1/auth/login", json!({"email": "a@b.com"}));
    let malformed = Request::builder()
        .method("POST")
        .uri("/v1/auth/register")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"name\": \"A\","))
        .unwrap();
    let not_json = Request::builder()
        .method("POST")
        .uri("/v1/auth/login")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from("email=a@b.com"))
        .unwrap();

    for req in [missing_field, malformed, not_json] {
        let uri = req.uri().clone();
        let (status, body) = send(&app, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["error"]["name"], "ValidationError", "{uri}");
        assert!(body["error"]["message"].is_string(), "{uri}");
    }
}

#[tokio::test]
async fn login_failures_share_one_response() {
    let app = app();
    register_and_login(&app).await;

    let wrong_password = send(
        &app,
        post_json("/v1/auth/login", json!({"email": "a@b.com", "password": "nope"})),
    )
    .await;
    let unknown_user = send(
        &app,
        post_json(
            "/v1/auth/login",
            json!({"email": "ghost@b.com", "password": "Secret123!"}),
        ),
    )
    .await;

    assert_eq!(wrong_password.0, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password, unknown_user);
}

#[tokio::test]
async fn whoami_returns_token_identity() {
    let app = app();
    let token = register_and_login(&app).await;

    let (status, body) = send(&app, whoami(Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"id": 1, "name": "A", "email": "a@b.com", "image": null})
    );
}

#[tokio::test]
async fn token_failures_share_one_response() {
    let app = app();
    let token = register_and_login(&app).await;

    let codec = SessionTokenCodec::new(&SigningSecret::new(SECRET).expect("secret"));
    let mut claims = codec.decode(&token).expect("decode");
    claims.expires_at = Some(Utc::now().timestamp() - 3600);
    let expired = codec.encode(&claims).expect("encode");

    let forged = SessionTokenCodec::new(&SigningSecret::new("wrong-secret").expect("secret"))
        .encode(&claims)
        .expect("encode");

    let missing = send(&app, whoami(None)).await;
    let malformed = send(&app, whoami(Some("not-a-token"))).await;
    let expired = send(&app, whoami(Some(&expired))).await;
    let forged = send(&app, whoami(Some(&forged))).await;

    assert_eq!(missing.0, StatusCode::UNAUTHORIZED);
    assert_eq!(missing.1["error"]["message"], "Unauthorized");
    assert_eq!(malformed, missing);
    assert_eq!(expired, missing);
    assert_eq!(forged, missing);
}

#[tokio::test]
async fn whoami_requires_customer_role() {
    let app = app();
    let codec = SessionTokenCodec::new(&SigningSecret::new(SECRET).expect("secret"));
    let admin_token = codec
        .encode(&SessionClaims {
            subject_id: 99,
            name: "Admin".into(),
            email: "admin@bcr.io".into(),
            image: None,
            role: Role::admin(),
            issued_at: Utc::now().timestamp(),
            expires_at: None,
        })
        .expect("encode");

    let (status, body) = send(&app, whoami(Some(&admin_token))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["name"], "InsufficientAccessError");
}
