//! Route handlers.
//!
//! Every synthesized route is served by one [`RouteHandler`], selected by
//! the route's [`RouteKind`].

mod fixed;
pub mod tracing;

pub use fixed::{HEALTH_STATUS, health, list_routes};
pub use self::tracing::TracingHandler;

use crate::dispatch::ResourceDispatcher;
use schemata_core::{Handler, ProviderRef, Request, Response, Route, RouteKind, RouteTable};
use std::sync::Arc;

/// The handler bound to a route.
#[derive(Debug, Clone)]
pub enum RouteHandler {
    /// Provider root, collection and singleton routes.
    Provider(ResourceDispatcher),
    /// The route listing.
    ListRoutes(Arc<RouteTable>),
    /// The health check.
    Health,
}

impl RouteHandler {
    /// Select the handler for `route`. `table` is the table `route` belongs to.
    pub fn for_route(route: &Route, table: &Arc<RouteTable>) -> Self {
        match route.kind {
            RouteKind::None | RouteKind::DataSource | RouteKind::Resource => {
                let provider = route.provider.clone().unwrap_or_else(|| Arc::new(ProviderRef::default()));
                RouteHandler::Provider(ResourceDispatcher::new(provider))
            }
            RouteKind::ListRoutes => RouteHandler::ListRoutes(Arc::clone(table)),
            RouteKind::Health => RouteHandler::Health,
        }
    }

    /// Serve one request.
    pub fn handle(&self, request: &Request) -> Response {
        match self {
            RouteHandler::Provider(dispatcher) => dispatcher.dispatch(
                &request.path,
                request.param("name"),
                request.query_params().pretty,
            ),
            RouteHandler::ListRoutes(table) => list_routes(table, request.query_params()),
            RouteHandler::Health => health(),
        }
    }
}

impl Handler for RouteHandler {
    async fn call(&self, request: Request) -> Response {
        self.handle(&request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth::synthesize;
    use crate::testing::fixture_registry;
    use schemata_core::{Method, Status};

    #[test]
    fn test_handler_selection_follows_kind() {
        let table = Arc::new(synthesize(&fixture_registry()));
        let pick = |pattern: &str| RouteHandler::for_route(table.get(Method::Get, pattern).unwrap(), &table);

        assert!(matches!(pick("/health"), RouteHandler::Health));
        assert!(matches!(pick("/routes"), RouteHandler::ListRoutes(_)));
        assert!(matches!(pick("/"), RouteHandler::Provider(_)));
        match pick("/hashicorp/aws/datasource/{name}") {
            RouteHandler::Provider(d) => assert_eq!(d.provider().name, "aws"),
            other => panic!("unexpected handler {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_list_handler_sees_whole_table() {
        let table = Arc::new(synthesize(&fixture_registry()));
        let handler = RouteHandler::for_route(table.get(Method::Get, "/routes").unwrap(), &table);
        let resp = handler.call(Request::get("/routes")).await;
        assert_eq!(resp.status, Status::OK);
        let listed: Vec<serde_json::Value> = serde_json::from_slice(&resp.body).unwrap();
        assert_eq!(listed.len(), table.len());
    }
}
