//! # Route Model
//!
//! A [`Route`] is one dispatch rule: name, HTTP method, path pattern and the
//! data bound to it. Routes are values; once synthesized into a
//! [`RouteTable`] they are never mutated, only matched.

use crate::{
    error::EncodeError,
    registry::ProviderRef,
    response::encode_json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize, Serializer};
use std::{fmt, sync::Arc};

/// HTTP request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    /// `GET`
    Get,
    /// `HEAD`
    Head,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `PATCH`
    Patch,
    /// `DELETE`
    Delete,
    /// `OPTIONS`
    Options,
}

impl Method {
    /// Every supported method.
    pub const ALL: [Method; 7] = [
        Method::Get,
        Method::Head,
        Method::Post,
        Method::Put,
        Method::Patch,
        Method::Delete,
        Method::Options,
    ];

    /// The canonical upper-case token.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Head => "HEAD",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
            Method::Options => "OPTIONS",
        }
    }

    /// Parse a method token. Tokens are case-sensitive, as in HTTP.
    pub fn parse(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == token)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The two kinds of items a provider exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    /// Data sources, served under `datasource`.
    DataSource,
    /// Resource types, served under `resource`.
    Resource,
}

impl ItemKind {
    /// Both kinds, in route emission order.
    pub const ALL: [ItemKind; 2] = [ItemKind::DataSource, ItemKind::Resource];

    /// The path segment naming this kind.
    pub const fn segment(self) -> &'static str {
        match self {
            ItemKind::DataSource => "datasource",
            ItemKind::Resource => "resource",
        }
    }

    /// Recognize a path segment, ignoring ASCII case.
    pub fn from_segment(segment: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| segment.eq_ignore_ascii_case(kind.segment()))
    }
}

/// Selects the handler bound to a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RouteKind {
    /// Provider root (and the degenerate `/` route).
    #[default]
    None,
    /// Data source collection or singleton.
    DataSource,
    /// Resource type collection or singleton.
    Resource,
    /// The route table itself.
    ListRoutes,
    /// Constant health payload.
    Health,
}

impl From<ItemKind> for RouteKind {
    fn from(kind: ItemKind) -> Self {
        match kind {
            ItemKind::DataSource => RouteKind::DataSource,
            ItemKind::Resource => RouteKind::Resource,
        }
    }
}

/// One dispatchable route.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Display name; provider routes use the provider type name.
    pub name: String,
    /// HTTP method.
    pub method: Method,
    /// Path pattern, with `{name}` placeholders.
    pub pattern: String,
    /// Handler selector.
    pub kind: RouteKind,
    /// Bound provider for provider-kind routes.
    pub provider: Option<Arc<ProviderRef>>,
    /// `true` for collection routes, `false` for singletons.
    pub list: bool,
}

impl Route {
    /// A `GET` route with no bound provider.
    pub fn get(name: impl Into<String>, pattern: impl Into<String>, kind: RouteKind) -> Self {
        Self {
            name: name.into(),
            method: Method::Get,
            pattern: pattern.into(),
            kind,
            provider: None,
            list: true,
        }
    }

    /// Bind a provider to this route.
    pub fn with_provider(mut self, provider: Arc<ProviderRef>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Mark this route as addressing a single named item.
    pub fn singleton(mut self) -> Self {
        self.list = false;
        self
    }

    /// The public `{name, method, pattern}` view of this route.
    pub fn descriptor(&self) -> RouteDescriptor {
        RouteDescriptor {
            name: self.name.clone(),
            method: self.method,
            pattern: self.pattern.clone(),
        }
    }
}

/// The serialized form of a route, as listed by `/routes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteDescriptor {
    /// Route name.
    pub name: String,
    /// HTTP method.
    pub method: Method,
    /// Path pattern.
    pub pattern: String,
}

/// The ordered, immutable output of route synthesis.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    /// Wrap routes in insertion order.
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Route> {
        self.routes.iter()
    }

    /// Number of routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Whether the table has no routes.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Find the route registered for `method` and `pattern`.
    pub fn get(&self, method: Method, pattern: &str) -> Option<&Route> {
        self.routes
            .iter()
            .find(|r| r.method == method && r.pattern == pattern)
    }

    /// Encode the public route list as JSON.
    pub fn to_json(&self, pretty: bool) -> Result<Bytes, EncodeError> {
        encode_json(self, pretty)
    }
}

impl Serialize for RouteTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.routes.iter().map(Route::descriptor))
    }
}

impl<'a> IntoIterator for &'a RouteTable {
    type Item = &'a Route;
    type IntoIter = std::slice::Iter<'a, Route>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.iter()
    }
}
