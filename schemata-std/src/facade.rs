//! # Router Facade
//!
//! Binds a synthesized [`RouteTable`] to a [`Transport`]. Each route is
//! registered exactly once with a [`RouteHandler`] selected by its kind and
//! wrapped in a [`TracingHandler`].
//!
//! [`ApiRouter`] is the in-process transport: a matchit router per method,
//! plus the handling of requests no pattern matched.

use crate::{
    handlers::{RouteHandler, TracingHandler},
    routing::{MatchitRouter, MatchitRouterBuilder},
    synth::synthesize,
};
use schemata_core::{
    BoxHandler, Handler, ItemKind, Method, Request, Response, Route, RouteKind, RouteResult,
    RouteTable, Router, RouterBuildError, RouterBuilder, SchemaRegistry, Status, Transport,
};
use std::{collections::BTreeMap, sync::Arc};

/// Register every route of `table` with `transport`, in table order.
pub fn bind_routes<T: Transport + ?Sized>(table: &Arc<RouteTable>, transport: &mut T) -> Result<(), T::Error> {
    for route in table.iter() {
        let handler = TracingHandler::new(RouteHandler::for_route(route, table), route.name.clone());
        transport.register(route, Arc::new(handler))?;
    }
    Ok(())
}

/// Synthesize routes for `registry` and bind them to a new [`ApiRouter`].
pub fn build_router<R: SchemaRegistry + ?Sized>(registry: &R) -> Result<ApiRouter, RouterBuildError> {
    ApiRouter::from_table(Arc::new(synthesize(registry)))
}

struct Endpoint {
    kind: RouteKind,
    handler: BoxHandler,
}

/// Collects registrations for an [`ApiRouter`].
pub struct ApiRouterBuilder {
    table: Arc<RouteTable>,
    methods: BTreeMap<Method, MatchitRouterBuilder<Endpoint>>,
}

impl ApiRouterBuilder {
    /// Start a router that will serve `table`.
    pub fn new(table: Arc<RouteTable>) -> Self {
        Self {
            table,
            methods: BTreeMap::new(),
        }
    }

    /// Finish registration.
    pub fn build(self) -> Result<ApiRouter, RouterBuildError> {
        let methods = self
            .methods
            .into_iter()
            .map(|(method, builder)| Ok((method, builder.build()?)))
            .collect::<Result<_, RouterBuildError>>()?;
        Ok(ApiRouter {
            inner: Arc::new(Inner {
                table: self.table,
                methods,
            }),
        })
    }
}

impl Transport for ApiRouterBuilder {
    type Error = RouterBuildError;

    fn register(&mut self, route: &Route, handler: BoxHandler) -> Result<(), Self::Error> {
        let endpoint = Endpoint {
            kind: route.kind,
            handler,
        };
        self.methods
            .entry(route.method)
            .or_default()
            .insert(route.pattern.clone(), endpoint)
            .map_err(|e| match e {
                RouterBuildError::DuplicateRoute(pattern) => {
                    RouterBuildError::DuplicateRoute(format!("{} {}", route.method, pattern))
                }
                other => other,
            })
    }
}

struct Inner {
    table: Arc<RouteTable>,
    methods: BTreeMap<Method, MatchitRouter<Endpoint>>,
}

/// In-process router serving a bound route table.
///
/// Cheap to clone; all clones share the same immutable routes.
#[derive(Clone)]
pub struct ApiRouter {
    inner: Arc<Inner>,
}

impl ApiRouter {
    /// Bind `table` to a new router.
    pub fn from_table(table: Arc<RouteTable>) -> Result<Self, RouterBuildError> {
        let mut builder = ApiRouterBuilder::new(Arc::clone(&table));
        bind_routes(&table, &mut builder)?;
        builder.build()
    }

    /// The route table this router serves.
    pub fn routes(&self) -> &Arc<RouteTable> {
        &self.inner.table
    }

    /// Serve one request.
    ///
    /// A single trailing slash is ignored when matching. `HEAD` is served by
    /// the `GET` route when no `HEAD` route exists, without a body. Misses
    /// become `405` when another method owns the path, the provider's `501`
    /// when the path names an unknown item kind under a known provider, and
    /// `404` otherwise.
    pub async fn serve(&self, request: Request) -> Response {
        let head = request.method == Method::Head;
        let mut response = self.dispatch(request).await;
        if head {
            response.body = Default::default();
        }
        response
    }

    async fn dispatch(&self, request: Request) -> Response {
        let path = normalize_path(&request.path).to_owned();
        let method = self.routing_method(request.method);

        if let Some(router) = self.inner.methods.get(&method) {
            if let RouteResult::Matched { value, params } = router.route(path.as_str()) {
                return value.handler.call_dyn(request.with_params(params)).await;
            }
        }

        let allowed: Vec<&str> = self
            .inner
            .methods
            .iter()
            .filter(|(candidate, router)| **candidate != method && router.contains(path.as_str()))
            .map(|(candidate, _)| candidate.as_str())
            .collect();
        if !allowed.is_empty() {
            return Response::empty(Status::METHOD_NOT_ALLOWED).with_header("allow", allowed.join(", "));
        }

        if let Some(endpoint) = self.provider_root(method, &path) {
            return endpoint.handler.call_dyn(request).await;
        }

        Response::empty(Status::NOT_FOUND)
    }

    fn routing_method(&self, method: Method) -> Method {
        if method == Method::Head && !self.inner.methods.contains_key(&Method::Head) {
            Method::Get
        } else {
            method
        }
    }

    // The provider root owning `path`, when `path` has the shape of an item
    // route but names no known item kind.
    fn provider_root(&self, method: Method, path: &str) -> Option<&Endpoint> {
        let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
        if !matches!(segments.len(), 3 | 4) || ItemKind::from_segment(segments[2]).is_some() {
            return None;
        }
        let root = format!("/{}/{}", segments[0], segments[1]);
        self.inner
            .methods
            .get(&method)?
            .route(root.as_str())
            .matched()
            .filter(|endpoint| endpoint.kind == RouteKind::None)
    }
}

impl Handler for ApiRouter {
    async fn call(&self, request: Request) -> Response {
        self.serve(request).await
    }
}

#[cfg(feature = "tower")]
impl tower::Service<Request> for ApiRouter {
    type Response = Response;
    type Error = std::convert::Infallible;
    type Future = futures::future::BoxFuture<'static, Result<Response, Self::Error>>;

    fn poll_ready(&mut self, _cx: &mut std::task::Context<'_>) -> std::task::Poll<Result<(), Self::Error>> {
        std::task::Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: Request) -> Self::Future {
        let router = self.clone();
        Box::pin(async move { Ok(router.serve(request).await) })
    }
}

fn normalize_path(path: &str) -> &str {
    match path.strip_suffix('/') {
        Some(stripped) if !stripped.is_empty() => stripped,
        _ => path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{RecordingHandler, RecordingTransport, fixture_registry};

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("/"), "/");
        assert_eq!(normalize_path("/health/"), "/health");
        assert_eq!(normalize_path("/health"), "/health");
    }

    #[tokio::test]
    async fn test_bind_registers_each_route_once() {
        let table = Arc::new(synthesize(&fixture_registry()));
        let mut transport = RecordingTransport::default();
        bind_routes(&table, &mut transport).unwrap();

        let expected: Vec<(Method, String)> = table.iter().map(|r| (r.method, r.pattern.clone())).collect();
        assert_eq!(transport.registered(), expected);

        let health = transport.handler(Method::Get, "/health").unwrap();
        let resp = health.call(Request::get("/health")).await;
        assert_eq!(resp.status, Status::OK);
        assert!(transport.handler(Method::Post, "/health").is_none());
    }

    #[tokio::test]
    async fn test_handlers_receive_decoded_params_and_query() {
        let spy = RecordingHandler::new(Status::from_u16(204));
        let table = Arc::new(RouteTable::new(vec![Route::get("thing", "/things/{name}", RouteKind::None)]));
        let mut builder = ApiRouterBuilder::new(Arc::clone(&table));
        builder
            .register(table.iter().next().unwrap(), Arc::new(spy.clone()))
            .unwrap();
        let router = builder.build().unwrap();

        let resp = router.serve(Request::get("/things/a%20b/?pretty")).await;
        assert_eq!(resp.status.as_u16(), 204);

        let seen = spy.requests();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].param("name"), Some("a b"));
        assert_eq!(seen[0].path, "/things/a%20b/");
        assert!(seen[0].query_params().pretty);
    }

    #[test]
    fn test_duplicate_registration_is_rejected() {
        let table = Arc::new(RouteTable::new(vec![
            Route::get("health", "/health", RouteKind::Health),
            Route::get("health", "/health", RouteKind::Health),
        ]));
        let err = ApiRouter::from_table(table).err().unwrap();
        assert_eq!(err, RouterBuildError::DuplicateRoute("GET /health".to_string()));
    }

    #[tokio::test]
    async fn test_singleton_route_receives_name() {
        let router = build_router(&fixture_registry()).unwrap();
        let resp = router.serve(Request::get("/hashicorp/aws/datasource/aws_ami")).await;
        assert_eq!(resp.status, Status::OK);
        let body: serde_json::Value = serde_json::from_slice(&resp.body).unwrap();
        assert_eq!(body["block"]["description"], "Amazon Machine Image");
    }

    #[tokio::test]
    async fn test_misses() {
        let router = build_router(&fixture_registry()).unwrap();

        let resp = router.serve(Request::get("/hashicorp/aws/frobnicate")).await;
        assert_eq!(resp.status, Status::NOT_IMPLEMENTED);
        assert!(resp.body.is_empty());

        // aws has no resource types, so there is no resource route to reach
        let resp = router.serve(Request::get("/hashicorp/aws/resource")).await;
        assert_eq!(resp.status, Status::NOT_FOUND);

        let resp = router.serve(Request::get("/nobody/home/frobnicate")).await;
        assert_eq!(resp.status, Status::NOT_FOUND);

        let resp = router.serve(Request::new(Method::Post, "/health")).await;
        assert_eq!(resp.status, Status::METHOD_NOT_ALLOWED);
        assert_eq!(resp.header("allow"), Some("GET"));
    }

    #[tokio::test]
    async fn test_encoded_names_are_decoded() {
        let router = build_router(&fixture_registry()).unwrap();
        for target in ["/hashicorp/aws/datasource/aws%5Fami", "/hashicorp/aws/datasource/aws%5Fami/"] {
            let resp = router.serve(Request::get(target)).await;
            assert_eq!(resp.status, Status::OK);
            let body: serde_json::Value = serde_json::from_slice(&resp.body).unwrap();
            assert_eq!(body["block"]["description"], "Amazon Machine Image", "{target}");
        }
    }

    #[tokio::test]
    async fn test_head_is_served_by_get_routes() {
        let router = build_router(&fixture_registry()).unwrap();
        let resp = router.serve(Request::new(Method::Head, "/health")).await;
        assert_eq!(resp.status, Status::OK);
        assert!(resp.body.is_empty());
        assert_eq!(resp.header("content-type"), Some(schemata_core::CONTENT_TYPE_JSON));

        let resp = router.serve(Request::new(Method::Head, "/hashicorp/aws/frobnicate")).await;
        assert_eq!(resp.status, Status::NOT_IMPLEMENTED);
    }

    #[tokio::test]
    async fn test_trailing_slash_is_ignored() {
        let router = build_router(&fixture_registry()).unwrap();
        let resp = router.serve(Request::get("/health/")).await;
        assert_eq!(resp.status, Status::OK);
    }

    #[cfg(feature = "tower")]
    #[tokio::test]
    async fn test_router_as_tower_service() {
        use tower::ServiceExt;

        let router = build_router(&fixture_registry()).unwrap();
        let resp = router.oneshot(Request::get("/health")).await.unwrap();
        assert_eq!(resp.status, Status::OK);
    }
}
