//! # Handlers
//!
//! The terminal endpoint of a route: takes a [`Request`] and produces a
//! [`Response`]. Handlers never fail; request-scoped problems are expressed
//! as error statuses in the response.
//!
//! # Usage Patterns
//!
//! 1. **Struct implementation**: `impl Handler for MyHandler`
//! 2. **Function wrapper**: `handler_fn(|req| async move { ... })`
//! 3. **Type-erased**: [`BoxHandler`] for storage in routers and transports

use crate::{request::Request, response::Response};
use std::{future::Future, pin::Pin, sync::Arc};

/// The terminal endpoint of a route.
///
/// This trait uses native `async fn` for static dispatch. For dynamic
/// dispatch (routers, transports), use [`DynHandler`].
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot serve requests",
    label = "missing `Handler` implementation",
    note = "Handlers must implement the `call` method."
)]
pub trait Handler: Send + Sync + 'static {
    /// Serve one request.
    fn call(&self, request: Request) -> impl Future<Output = Response> + Send;
}

/// Object-safe version of [`Handler`].
pub trait DynHandler: Send + Sync + 'static {
    /// Serve one request (dynamic dispatch version).
    fn call_dyn<'a>(&'a self, request: Request) -> Pin<Box<dyn Future<Output = Response> + Send + 'a>>;
}

// Any Handler is a DynHandler.
impl<T: Handler> DynHandler for T {
    fn call_dyn<'a>(&'a self, request: Request) -> Pin<Box<dyn Future<Output = Response> + Send + 'a>> {
        Box::pin(self.call(request))
    }
}

/// A shared, type-erased handler.
pub type BoxHandler = Arc<dyn DynHandler>;

// Allow a BoxHandler to be used where Handler is expected. Dispatch goes
// through the trait object, not the blanket impl on `Arc` itself.
impl Handler for BoxHandler {
    async fn call(&self, request: Request) -> Response {
        (**self).call_dyn(request).await
    }
}

/// A [`Handler`] backed by an async function.
#[derive(Clone)]
pub struct FnHandler<F> {
    f: F,
}

/// Wrap an async function as a [`Handler`].
pub fn handler_fn<F, Fut>(f: F) -> FnHandler<F>
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send,
{
    FnHandler { f }
}

impl<F, Fut> Handler for FnHandler<F>
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send,
{
    fn call(&self, request: Request) -> impl Future<Output = Response> + Send {
        (self.f)(request)
    }
}
