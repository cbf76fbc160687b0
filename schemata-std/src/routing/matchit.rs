//! Matchit-based router implementation.
//!
//! Provides parameter matching for path patterns (e.g. `/{namespace}/{type}/resource/{name}`).
//! Captured values are percent-decoded; matching itself runs on the raw path.

use matchit::{Match, Router as InnerRouter};
use percent_encoding::percent_decode_str;
use schemata_core::{PathParams, RouteResult, Router, RouterBuildError, RouterBuilder};

/// A router based on `matchit`.
pub struct MatchitRouter<V> {
    router: InnerRouter<V>,
}

impl<V: Send + Sync + 'static> Router<str, V> for MatchitRouter<V> {
    fn route(&self, key: &str) -> RouteResult<'_, V> {
        match self.router.at(key) {
            Ok(Match { value, params }) => RouteResult::Matched {
                value,
                params: params
                    .iter()
                    .map(|(key, value)| (key, percent_decode_str(value).decode_utf8_lossy().into_owned()))
                    .collect(),
            },
            Err(_) => RouteResult::NotFound,
        }
    }
}

impl<V: Send + Sync + 'static> Router<String, V> for MatchitRouter<V> {
    fn route(&self, key: &String) -> RouteResult<'_, V> {
        <Self as Router<str, V>>::route(self, key)
    }
}

/// Builder for [`MatchitRouter`].
pub struct MatchitRouterBuilder<V> {
    router: InnerRouter<V>,
    patterns: Vec<String>,
}

impl<V> Default for MatchitRouterBuilder<V> {
    fn default() -> Self {
        Self {
            router: InnerRouter::new(),
            patterns: Vec::new(),
        }
    }
}

impl<V> MatchitRouterBuilder<V> {
    /// Patterns inserted so far, in insertion order.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}

impl<V: Send + Sync + 'static> RouterBuilder<String, V> for MatchitRouterBuilder<V> {
    type Router = MatchitRouter<V>;

    fn insert(&mut self, key: String, value: V) -> Result<(), RouterBuildError> {
        if self.patterns.contains(&key) {
            return Err(RouterBuildError::DuplicateRoute(key));
        }
        // matchit also rejects patterns that conflict with an existing one
        self.router
            .insert(key.clone(), value)
            .map_err(|e| RouterBuildError::InvalidPattern {
                pattern: key.clone(),
                reason: e.to_string(),
            })?;
        self.patterns.push(key);
        Ok(())
    }

    fn build(self) -> Result<Self::Router, RouterBuildError> {
        Ok(MatchitRouter {
            router: self.router,
        })
    }
}
