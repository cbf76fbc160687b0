//! Helpers for testing code built on schemata.
//!
//! ```rust
//! use schemata_std::{synthesize, testing::fixture_registry};
//!
//! let table = synthesize(&fixture_registry());
//! assert!(table.iter().any(|r| r.pattern == "/hashicorp/aws/datasource/{name}"));
//! ```

use crate::registry::Registry;
use schemata_core::{
    BoxHandler, Handler, Method, Provider, ProviderAddr, ProviderSchema, Request, Response, Route,
    Status, Transport,
};
use serde_json::json;
use std::sync::{Arc, Mutex};

/// A small registry covering the interesting shapes:
///
/// - `hashicorp/aws`: one data source (`aws_ami`), no resource types
/// - `hashicorp/google`: both item kinds
/// - `hashicorp/broken`: no schema
pub fn fixture_registry() -> Registry {
    let mut aws = ProviderSchema::default();
    aws.data_sources.insert(
        "aws_ami".to_string(),
        json!({
            "version": 0,
            "block": {
                "description": "Amazon Machine Image",
                "attributes": {"owners": {"type": ["list", "string"], "optional": true}}
            }
        }),
    );

    let mut google = ProviderSchema::default();
    google.provider = Some(json!({"version": 0, "block": {"attributes": {"project": {"type": "string"}}}}));
    google
        .data_sources
        .insert("google_project".to_string(), json!({"version": 0, "block": {}}));
    google
        .resource_types
        .insert("google_storage_bucket".to_string(), json!({"version": 1, "block": {}}));
    google
        .resource_type_schema_versions
        .insert("google_storage_bucket".to_string(), 1);

    let providers = [
        Provider::new(ProviderAddr::new("hashicorp", "aws"), aws),
        Provider::new(ProviderAddr::new("hashicorp", "google"), google),
        Provider::malformed(ProviderAddr::new("hashicorp", "broken")),
    ];
    providers
        .into_iter()
        .try_fold(Registry::builder(), |builder, provider| builder.push(provider))
        .map(|builder| builder.build())
        .unwrap_or_default()
}

/// A handler that records every request and answers with a fixed status.
#[derive(Clone)]
pub struct RecordingHandler {
    status: Status,
    seen: Arc<Mutex<Vec<Request>>>,
}

impl RecordingHandler {
    /// Answer every request with `status`.
    pub fn new(status: Status) -> Self {
        Self {
            status,
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<Request> {
        self.seen.lock().map(|seen| seen.clone()).unwrap_or_default()
    }
}

impl Default for RecordingHandler {
    fn default() -> Self {
        Self::new(Status::OK)
    }
}

impl Handler for RecordingHandler {
    async fn call(&self, request: Request) -> Response {
        if let Ok(mut seen) = self.seen.lock() {
            seen.push(request);
        }
        Response::empty(self.status)
    }
}

/// A transport that only remembers what was registered with it.
#[derive(Default)]
pub struct RecordingTransport {
    routes: Vec<(Method, String)>,
    handlers: Vec<BoxHandler>,
}

impl RecordingTransport {
    /// `(method, pattern)` pairs in registration order.
    pub fn registered(&self) -> Vec<(Method, String)> {
        self.routes.clone()
    }

    /// The handler registered for `pattern`, if any.
    pub fn handler(&self, method: Method, pattern: &str) -> Option<&BoxHandler> {
        self.routes
            .iter()
            .position(|(m, p)| *m == method && p == pattern)
            .map(|index| &self.handlers[index])
    }
}

impl Transport for RecordingTransport {
    type Error = std::convert::Infallible;

    fn register(&mut self, route: &Route, handler: BoxHandler) -> Result<(), Self::Error> {
        self.routes.push((route.method, route.pattern.clone()));
        self.handlers.push(handler);
        Ok(())
    }
}
