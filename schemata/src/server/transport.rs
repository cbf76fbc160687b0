use axum::{
    body::Body,
    extract::{RawPathParams, rejection::RawPathParamsRejection},
    http::{HeaderName, HeaderValue, StatusCode, Uri},
    routing::{MethodFilter, MethodRouter, on},
};
use schemata_core::{
    BoxHandler, Method, PathParams, Request, Response, Route, RouterBuildError, RouterBuilder, Status, Transport,
};
use schemata_std::{ApiRouter, MatchitRouterBuilder};
use std::collections::HashSet;
use tower_http::trace::TraceLayer;

/// A [`Transport`] that registers routes on an [`axum::Router`].
///
/// Patterns are validated before they reach axum, so conflicts surface as
/// [`RouterBuildError`]s instead of panics.
#[derive(Default)]
pub struct AxumTransport {
    routes: Vec<(String, MethodRouter)>,
    seen: HashSet<(Method, String)>,
    paths: MatchitRouterBuilder<()>,
}

impl AxumTransport {
    /// Create an empty transport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Finish registration.
    ///
    /// Requests no registered route accepts are handed to `fallback`, which
    /// answers with `404`, `405` or the provider's `501`.
    pub fn into_router(self, fallback: ApiRouter) -> axum::Router {
        let router = self
            .routes
            .into_iter()
            .fold(axum::Router::new(), |router, (pattern, methods)| router.route(&pattern, methods));

        router
            .fallback(move |method: axum::http::Method, uri: Uri| {
                let fallback = fallback.clone();
                async move {
                    let Some(method) = Method::parse(method.as_str()) else {
                        return into_axum(Response::empty(Status::METHOD_NOT_ALLOWED));
                    };
                    into_axum(fallback.serve(to_request(method, &uri, PathParams::new())).await)
                }
            })
            .layer(TraceLayer::new_for_http())
    }
}

impl Transport for AxumTransport {
    type Error = RouterBuildError;

    fn register(&mut self, route: &Route, handler: BoxHandler) -> Result<(), Self::Error> {
        if !self.seen.insert((route.method, route.pattern.clone())) {
            return Err(RouterBuildError::DuplicateRoute(format!("{} {}", route.method, route.pattern)));
        }

        let index = match self.routes.iter().position(|(pattern, _)| *pattern == route.pattern) {
            Some(index) => index,
            None => {
                self.paths.insert(route.pattern.clone(), ())?;
                self.routes.push((route.pattern.clone(), MethodRouter::new()));
                self.routes.len() - 1
            }
        };

        let method = route.method;
        let endpoint = move |params: Result<RawPathParams, RawPathParamsRejection>, uri: Uri| {
            let handler = handler.clone();
            async move {
                let params: PathParams = params.map(|p| p.iter().collect()).unwrap_or_default();
                into_axum(handler.call_dyn(to_request(method, &uri, params)).await)
            }
        };

        let methods = std::mem::replace(&mut self.routes[index].1, MethodRouter::new());
        self.routes[index].1 = methods.on(method_filter(method), endpoint);
        Ok(())
    }
}

fn method_filter(method: Method) -> MethodFilter {
    match method {
        Method::Get => MethodFilter::GET,
        Method::Head => MethodFilter::HEAD,
        Method::Post => MethodFilter::POST,
        Method::Put => MethodFilter::PUT,
        Method::Patch => MethodFilter::PATCH,
        Method::Delete => MethodFilter::DELETE,
        Method::Options => MethodFilter::OPTIONS,
    }
}

fn to_request(method: Method, uri: &Uri, params: PathParams) -> Request {
    Request::new(method, uri.path())
        .with_query(uri.query())
        .with_params(params)
}

fn into_axum(response: Response) -> axum::response::Response {
    let mut out = axum::response::Response::new(Body::from(response.body));
    *out.status_mut() = StatusCode::from_u16(response.status.as_u16()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    for (name, value) in response.headers {
        match (HeaderName::from_bytes(name.as_bytes()), HeaderValue::from_str(&value)) {
            (Ok(name), Ok(value)) => {
                out.headers_mut().append(name, value);
            }
            _ => tracing::warn!(header = name, "dropping invalid response header"),
        }
    }
    out
}
