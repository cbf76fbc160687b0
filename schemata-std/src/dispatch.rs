//! # Resource Dispatch
//!
//! Serves provider-bound routes. The request path decides between the
//! provider root, a whole item collection, or a single named item:
//!
//! | Segments | Third segment | Result |
//! |----------|---------------|--------|
//! | 3 or 4 | `resource` | resource types, or one by `{name}` |
//! | 3 or 4 | `datasource` | data sources, or one by `{name}` |
//! | 3 or 4 | anything else | `501`, empty body |
//! | other | - | `{name, schema}` of the provider |
//!
//! A missing named item is served as `null` with `200`.

use schemata_core::{
    Handler, ItemKind, ProviderRef, Request, Response, Schema, SchemaMap, Status,
};
use std::sync::Arc;

/// What a provider request resolves to.
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch<'a> {
    /// The bound provider itself.
    Provider(&'a ProviderRef),
    /// Every item of one kind. `None` when the provider carries no schema.
    Collection(Option<&'a SchemaMap>),
    /// One named item, `None` when absent.
    Item(Option<&'a Schema>),
    /// Unrecognized item kind.
    NotImplemented,
}

impl Dispatch<'_> {
    /// Render as a response.
    pub fn into_response(self, pretty: bool) -> Response {
        match self {
            Dispatch::Provider(provider) => Response::json(Status::OK, provider, pretty),
            Dispatch::Collection(Some(items)) => Response::json(Status::OK, items, pretty),
            Dispatch::Collection(None) => Response::json(Status::OK, &SchemaMap::new(), pretty),
            Dispatch::Item(item) => Response::json(Status::OK, &item, pretty),
            Dispatch::NotImplemented => Response::empty(Status::NOT_IMPLEMENTED),
        }
    }
}

/// Decide what `path` addresses under `provider`.
pub fn resolve<'a>(provider: &'a ProviderRef, path: &str, name: Option<&str>) -> Dispatch<'a> {
    let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
    if !matches!(segments.len(), 3 | 4) {
        return Dispatch::Provider(provider);
    }

    let Some(kind) = ItemKind::from_segment(segments[2]) else {
        return Dispatch::NotImplemented;
    };
    let items = provider.schema.as_deref().map(|schema| schema.items(kind));
    match name {
        None => Dispatch::Collection(items),
        Some(name) => Dispatch::Item(items.and_then(|items| items.get(name))),
    }
}

/// Handler for every route bound to a provider.
#[derive(Debug, Clone)]
pub struct ResourceDispatcher {
    provider: Arc<ProviderRef>,
}

impl ResourceDispatcher {
    /// Create a dispatcher over `provider`.
    pub fn new(provider: Arc<ProviderRef>) -> Self {
        Self { provider }
    }

    /// The bound provider.
    pub fn provider(&self) -> &ProviderRef {
        &self.provider
    }

    /// Resolve and render a request path.
    pub fn dispatch(&self, path: &str, name: Option<&str>, pretty: bool) -> Response {
        resolve(&self.provider, path, name).into_response(pretty)
    }
}

impl Handler for ResourceDispatcher {
    async fn call(&self, request: Request) -> Response {
        self.dispatch(&request.path, request.param("name"), request.query_params().pretty)
    }
}
