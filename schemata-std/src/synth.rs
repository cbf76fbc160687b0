//! # Route Synthesis
//!
//! Walks a [`SchemaRegistry`] and produces the ordered [`RouteTable`]:
//!
//! 1. `GET /` and `GET /health`
//! 2. per provider, in registry order: the provider root, then a
//!    collection/singleton pair for each non-empty item kind
//! 3. `GET /routes`
//!
//! Synthesis never fails. Providers without a schema, or whose identity
//! cannot be turned into path segments, are skipped.

use schemata_core::{
    ItemKind, Method, Provider, ProviderRef, Route, RouteKind, RouteTable, SchemaRegistry,
};
use std::{collections::HashSet, sync::Arc};

/// Name of the degenerate `/` route.
pub const ROOT_ROUTE: &str = "provider";
/// Name of the health route.
pub const HEALTH_ROUTE: &str = "health";
/// Name of the route listing route.
pub const LIST_ROUTE: &str = "routeList";

/// The path segment used for a provider type name.
///
/// Type names containing `/` contribute only their last non-empty segment.
/// Returns `None` when nothing usable remains.
pub fn route_segment(type_name: &str) -> Option<&str> {
    type_name
        .rsplit('/')
        .find(|segment| !segment.is_empty())
        .filter(|segment| is_literal_segment(segment))
}

/// Build a path pattern for a provider route.
///
/// `kind = None` yields the provider root; `list = false` appends the
/// `{name}` placeholder.
pub fn decorate_pattern(namespace: &str, segment: &str, kind: Option<ItemKind>, list: bool) -> String {
    let mut pattern = format!("/{namespace}/{segment}");
    if let Some(kind) = kind {
        pattern.push('/');
        pattern.push_str(kind.segment());
    }
    if !list {
        pattern.push_str("/{name}");
    }
    pattern
}

// Segments are inserted into patterns verbatim, so they must not contain
// separators or placeholder syntax. A leading `:` is the older capture syntax
// that axum refuses outright.
fn is_literal_segment(segment: &str) -> bool {
    !segment.is_empty() && !segment.starts_with(':') && !segment.contains(['/', '{', '}', '*'])
}

/// Synthesize the full route table for `registry`.
///
/// Deterministic with respect to the registry's iteration order.
pub fn synthesize<R: SchemaRegistry + ?Sized>(registry: &R) -> RouteTable {
    let mut emitter = Emitter::default();

    emitter.push(Route::get(ROOT_ROUTE, "/", RouteKind::None).with_provider(Arc::new(ProviderRef::default())));
    emitter.push(Route::get(HEALTH_ROUTE, "/health", RouteKind::Health));

    for provider in registry.providers() {
        emitter.provider(provider);
    }

    emitter.push(Route::get(LIST_ROUTE, "/routes", RouteKind::ListRoutes));

    #[cfg(feature = "tracing")]
    tracing::debug!(routes = emitter.routes.len(), "synthesized route table");

    RouteTable::new(emitter.routes)
}

#[derive(Default)]
struct Emitter {
    routes: Vec<Route>,
    seen: HashSet<(Method, String)>,
}

impl Emitter {
    fn push(&mut self, route: Route) {
        self.seen.insert((route.method, route.pattern.clone()));
        self.routes.push(route);
    }

    fn provider(&mut self, provider: &Provider) {
        let addr = &provider.addr;
        let Some(schema) = &provider.schema else {
            #[cfg(feature = "tracing")]
            tracing::warn!(provider = %addr, "skipping provider without schema");
            return;
        };
        let Some(segment) = route_segment(&addr.type_name).filter(|_| is_literal_segment(&addr.namespace))
        else {
            #[cfg(feature = "tracing")]
            tracing::warn!(provider = %addr, "skipping provider with unroutable name");
            return;
        };

        let bound = Arc::new(ProviderRef::new(addr.type_name.clone(), Arc::clone(schema)));
        let mut routes = vec![
            Route::get(&addr.type_name, decorate_pattern(&addr.namespace, segment, None, true), RouteKind::None)
                .with_provider(Arc::clone(&bound)),
        ];
        for kind in ItemKind::ALL {
            if schema.items(kind).is_empty() {
                continue;
            }
            routes.push(
                Route::get(&addr.type_name, decorate_pattern(&addr.namespace, segment, Some(kind), true), kind.into())
                    .with_provider(Arc::clone(&bound)),
            );
            routes.push(
                Route::get(&addr.type_name, decorate_pattern(&addr.namespace, segment, Some(kind), false), kind.into())
                    .with_provider(Arc::clone(&bound))
                    .singleton(),
            );
        }

        // All of a provider's routes share its root pattern, so checking the
        // root is enough to keep (method, pattern) unique.
        if self.seen.contains(&(routes[0].method, routes[0].pattern.clone())) {
            #[cfg(feature = "tracing")]
            tracing::warn!(provider = %addr, pattern = %routes[0].pattern, "skipping provider with colliding route");
            return;
        }
        for route in routes {
            self.push(route);
        }
    }
}
