//! Security tests for zwc-web
//!
//! Session check on protected routes:
//! - public routes never need a session
//! - protected routes answer 401 without the right `zwc_session` cookie
//! - no configured token disables the check

use axum::{
    body::Body,
    http::{header::COOKIE, Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt;
use zwc_common::config::Settings;
use zwc_common::MapEnv;
use zwc_web::{build_router, AppState};

const TOKEN: &str = "s3cret-token";

/// Test helper: Create app with the session check enabled
fn setup_app_with_session(root: &Path) -> axum::Router {
    let mut settings = Settings::with_root(root);
    settings.session_token = Some(TOKEN.to_string());
    build_router(AppState::new(settings, Arc::new(MapEnv::new())))
}

fn request(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

async fn extract_json(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_public_routes_need_no_session() {
    let root = TempDir::new().unwrap();
    for uri in ["/health", "/api/buildinfo"] {
        let response = setup_app_with_session(root.path())
            .oneshot(request(uri, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK, "{}", uri);
    }
}

#[tokio::test]
async fn test_protected_routes_reject_missing_session() {
    let root = TempDir::new().unwrap();
    for uri in [
        "/api/dashboard",
        "/api/dashboard/issue-url",
        "/api/hw-wiring",
        "/api/hw-wiring/profiles",
        "/api/ui-keybind",
    ] {
        let response = setup_app_with_session(root.path())
            .oneshot(request(uri, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{}", uri);

        let body = extract_json(response.into_body()).await;
        assert_eq!(body["error"]["code"], "UNAUTHORIZED");
    }
}

#[tokio::test]
async fn test_wrong_session_is_rejected() {
    let root = TempDir::new().unwrap();
    let response = setup_app_with_session(root.path())
        .oneshot(request("/api/hw-wiring/profiles", Some("zwc_session=guess")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_valid_session_is_accepted() {
    let root = TempDir::new().unwrap();
    let cookie = format!("lang=en; zwc_session={}", TOKEN);
    let response = setup_app_with_session(root.path())
        .oneshot(request("/api/hw-wiring/profiles", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_no_token_disables_check() {
    let root = TempDir::new().unwrap();
    let app = build_router(AppState::new(
        Settings::with_root(root.path()),
        Arc::new(MapEnv::new()),
    ));
    let response = app
        .oneshot(request("/api/ui-keybind", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_profile_name_cannot_escape_directory() {
    let root = TempDir::new().unwrap();
    let app = build_router(AppState::new(
        Settings::with_root(root.path()),
        Arc::new(MapEnv::new()),
    ));
    let request = Request::builder()
        .method("POST")
        .uri("/api/hw-wiring")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(
            "_command=SAVEAS&zynthian_wiring_layout_saveas_fname=..%2F..%2Fescaped",
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["errors"].as_array().unwrap().len(), 1);
    assert!(!root.path().join("escaped").exists());
}
