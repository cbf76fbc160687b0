use schemata_core::{Handler, Request, Response};

#[cfg(feature = "tracing")]
use ::tracing::Instrument;

/// A Handler wrapper that instruments execution with a `tracing` Span.
///
/// The span carries the route name, method and path; the response status is
/// recorded at `debug` when the inner handler returns. Without the `tracing`
/// feature this is a plain pass-through.
pub struct TracingHandler<H> {
    inner: H,
    route: String,
}

impl<H> TracingHandler<H> {
    /// Create a new `TracingHandler` around a handler.
    pub fn new(inner: H, route: impl Into<String>) -> Self {
        Self {
            inner,
            route: route.into(),
        }
    }
}

impl<H: Clone> Clone for TracingHandler<H> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            route: self.route.clone(),
        }
    }
}

impl<H: Handler> Handler for TracingHandler<H> {
    #[cfg(feature = "tracing")]
    async fn call(&self, request: Request) -> Response {
        let span = ::tracing::info_span!(
            "request",
            route = %self.route,
            method = %request.method,
            path = %request.path,
        );

        async move {
            let response = self.inner.call(request).await;
            ::tracing::debug!(status = %response.status, "served");
            response
        }
        .instrument(span)
        .await
    }

    #[cfg(not(feature = "tracing"))]
    async fn call(&self, request: Request) -> Response {
        self.inner.call(request).await
    }
}
