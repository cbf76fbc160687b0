use schemata::{Method, Request, Status};
use serde_json::{Value, json};

mod common;
use common::{aws_only, get, json_body, provider, router_for};

#[tokio::test]
async fn test_health_on_empty_registry() {
    let router = router_for(&[]);
    let resp = get(&router, "/health").await;
    assert_eq!(resp.status, Status::OK);
    assert_eq!(json_body(&resp), json!([{"status": "Server running and routing"}]));
}

#[tokio::test]
async fn test_root_is_degenerate_provider() {
    let router = router_for(&[]);
    let resp = get(&router, "/").await;
    assert_eq!(resp.status, Status::OK);
    assert_eq!(json_body(&resp), json!({"name": "", "schema": null}));
}

#[tokio::test]
async fn test_provider_views() {
    let router = router_for(&[provider("hashicorp", "google", &["google_project"], &["google_storage_bucket"])]);

    let resp = get(&router, "/hashicorp/google").await;
    let body = json_body(&resp);
    assert_eq!(body["name"], "google");
    assert!(body["schema"]["resource_types"]["google_storage_bucket"].is_object());

    let resp = get(&router, "/hashicorp/google/resource").await;
    let body = json_body(&resp);
    assert_eq!(body.as_object().map(|m| m.len()), Some(1));

    let resp = get(&router, "/hashicorp/google/datasource/google_project").await;
    assert_eq!(json_body(&resp), json!({"block": {"description": "google_project"}}));
}

#[tokio::test]
async fn test_absent_item_is_null() {
    let router = router_for(&[provider("hashicorp", "google", &[], &["google_storage_bucket"])]);
    let resp = get(&router, "/hashicorp/google/resource/google_nothing").await;
    assert_eq!(resp.status, Status::OK);
    assert_eq!(json_body(&resp), Value::Null);
}

#[tokio::test]
async fn test_unknown_kind_is_not_implemented() {
    let router = router_for(&aws_only());
    let resp = get(&router, "/hashicorp/aws/frobnicate").await;
    assert_eq!(resp.status, Status::NOT_IMPLEMENTED);
    assert!(resp.body.is_empty());
}

#[tokio::test]
async fn test_pretty_routes_match_compact() {
    let router = router_for(&aws_only());
    let compact = get(&router, "/routes").await;
    let pretty = get(&router, "/routes?pretty").await;

    assert!(pretty.body_str().unwrap().contains("\n  "));
    assert!(!compact.body_str().unwrap().contains('\n'));
    assert_eq!(json_body(&compact), json_body(&pretty));

    let listed = json_body(&compact);
    assert_eq!(listed[2], json!({"name": "aws", "method": "GET", "pattern": "/hashicorp/aws"}));
}

#[tokio::test]
async fn test_wrong_method() {
    let router = router_for(&aws_only());
    let resp = router.serve(Request::new(Method::Delete, "/hashicorp/aws")).await;
    assert_eq!(resp.status, Status::METHOD_NOT_ALLOWED);
}
