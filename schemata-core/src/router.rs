//! Routing abstraction layer.
//!
//! [`Router`] and [`RouterBuilder`] abstract over pattern-matching backends so
//! they can be swapped without touching the dispatch code. [`Transport`] is
//! the narrower capability an HTTP server exposes: accept one handler per
//! method and pattern.

use crate::{
    error::RouterBuildError,
    handler::BoxHandler,
    request::PathParams,
    route::Route,
};

/// Result of a routing lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteResult<'a, V> {
    /// Route matched, with the value and the captured path variables.
    Matched {
        /// The registered value.
        value: &'a V,
        /// Variables captured by the pattern.
        params: PathParams,
    },
    /// No matching route found.
    NotFound,
}

impl<'a, V> RouteResult<'a, V> {
    /// Returns true if the route was matched.
    pub fn is_matched(&self) -> bool {
        matches!(self, RouteResult::Matched { .. })
    }

    /// Returns the matched value, if any.
    pub fn matched(self) -> Option<&'a V> {
        match self {
            RouteResult::Matched { value, .. } => Some(value),
            RouteResult::NotFound => None,
        }
    }
}

/// A router that maps keys to values.
pub trait Router<K: ?Sized, V>: Send + Sync + 'static {
    /// Look up a value by key.
    fn route(&self, key: &K) -> RouteResult<'_, V>;

    /// Check if a key exists in the router.
    fn contains(&self, key: &K) -> bool {
        self.route(key).is_matched()
    }
}

/// Builder for constructing routers.
pub trait RouterBuilder<K, V>: Default + Send {
    /// The router type this builder produces.
    type Router: Router<K, V>;

    /// Insert a key-value pair into the router.
    ///
    /// Returns an error if the key already exists.
    fn insert(&mut self, key: K, value: V) -> Result<(), RouterBuildError>;

    /// Build the router, consuming the builder.
    fn build(self) -> Result<Self::Router, RouterBuildError>;
}

/// The "register handler for method + pattern" capability of a transport.
///
/// Callers register each (method, pattern) pair at most once.
pub trait Transport {
    /// Registration error.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Register `handler` for `route.method` and `route.pattern`.
    fn register(&mut self, route: &Route, handler: BoxHandler) -> Result<(), Self::Error>;
}
