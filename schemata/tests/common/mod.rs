#![allow(dead_code)]

use schemata::{ApiRouter, Provider, ProviderAddr, ProviderSchema, Request, Response, build_router};
use serde_json::{Value, json};

// ============================================================================
// Registries
// ============================================================================

pub fn provider(namespace: &str, type_name: &str, data_sources: &[&str], resources: &[&str]) -> Provider {
    let mut schema = ProviderSchema::default();
    for name in data_sources {
        schema
            .data_sources
            .insert(name.to_string(), json!({"block": {"description": name}}));
    }
    for name in resources {
        schema
            .resource_types
            .insert(name.to_string(), json!({"version": 0, "block": {"description": name}}));
    }
    Provider::new(ProviderAddr::new(namespace, type_name), schema)
}

/// The single-provider registry from the route example:
/// `hashicorp/aws` with data source `aws_ami` and no resource types.
pub fn aws_only() -> Vec<Provider> {
    vec![provider("hashicorp", "aws", &["aws_ami"], &[])]
}

// ============================================================================
// Requests
// ============================================================================

pub async fn get(router: &ApiRouter, target: &str) -> Response {
    router.serve(Request::get(target)).await
}

pub fn json_body(resp: &Response) -> Value {
    serde_json::from_slice(&resp.body).expect("body is not JSON")
}

pub fn router_for(providers: &[Provider]) -> ApiRouter {
    build_router(providers).expect("route table should bind")
}
