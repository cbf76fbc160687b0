#![cfg(feature = "server")]

use axum::{
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use schemata::{Provider, ProviderAddr, ProviderSchema, server, testing::fixture_registry};
use serde_json::{Value, json};
use tower::ServiceExt;

async fn call(app: axum::Router, method: &str, uri: &str) -> (StatusCode, Option<String>, Vec<u8>) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(request).await.unwrap();
    let status = resp.status();
    let content_type = resp
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, content_type, body.to_vec())
}

#[tokio::test]
async fn test_health_over_http() {
    let app = server::app(&fixture_registry()).unwrap();
    let (status, content_type, body) = call(app, "GET", "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("application/json; charset=UTF-8"));
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body, json!([{"status": "Server running and routing"}]));
}

#[tokio::test]
async fn test_singleton_over_http() {
    let app = server::app(&fixture_registry()).unwrap();
    let (status, _, body) = call(app, "GET", "/hashicorp/aws/datasource/aws_ami?pretty").await;
    assert_eq!(status, StatusCode::OK);
    let text = String::from_utf8(body).unwrap();
    assert!(text.contains("Amazon Machine Image"));
    assert!(text.contains('\n'));
}

#[tokio::test]
async fn test_encoded_singleton_matches_in_both_routers() {
    let app = server::app(&fixture_registry()).unwrap();
    for uri in ["/hashicorp/aws/datasource/aws%5Fami", "/hashicorp/aws/datasource/aws%5Fami/"] {
        let (status, _, body) = call(app.clone(), "GET", uri).await;
        assert_eq!(status, StatusCode::OK);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["block"]["description"], "Amazon Machine Image", "{uri}");
    }
}

#[tokio::test]
async fn test_fallbacks_over_http() {
    let app = server::app(&fixture_registry()).unwrap();

    let (status, _, body) = call(app.clone(), "GET", "/hashicorp/aws/frobnicate").await;
    assert_eq!(status, StatusCode::NOT_IMPLEMENTED);
    assert!(body.is_empty());

    let (status, _, _) = call(app.clone(), "GET", "/nowhere").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, _) = call(app, "POST", "/routes").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_legacy_capture_names_are_skipped() {
    let mut schema = ProviderSchema::default();
    schema.data_sources.insert("aws_ami".to_string(), json!({}));
    let registry = vec![
        Provider::new(ProviderAddr::new(":ns", "aws"), schema.clone()),
        Provider::new(ProviderAddr::new("hashicorp", ":aws"), schema.clone()),
        Provider::new(ProviderAddr::new("hashicorp", "aws"), schema),
    ];

    let app = server::app(&registry).unwrap();
    let (status, _, body) = call(app.clone(), "GET", "/routes").await;
    assert_eq!(status, StatusCode::OK);
    let routes: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(routes.as_array().map(Vec::len), Some(6));

    let (status, _, _) = call(app, "GET", "/hashicorp/aws/datasource/aws_ami").await;
    assert_eq!(status, StatusCode::OK);
}
