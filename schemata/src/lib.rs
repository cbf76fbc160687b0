//! # schemata - Route Synthesis over a Provider Schema Registry
//!
//! `schemata` walks a registry of providers at startup, synthesizes a REST
//! route table from it, and serves read-only JSON views of the schemas:
//!
//! | Pattern | Serves |
//! |---------|--------|
//! | `/health` | constant health payload |
//! | `/routes` | the route table itself |
//! | `/{namespace}/{type}` | provider name and full schema |
//! | `/{namespace}/{type}/datasource[/{name}]` | data sources, or one of them |
//! | `/{namespace}/{type}/resource[/{name}]` | resource types, or one of them |
//!
//! Every route accepts `?pretty` for indented output.
//!
//! ## Quick Start
//!
//! ```rust
//! use schemata::{Request, Status, build_router, testing::fixture_registry};
//!
//! let router = build_router(&fixture_registry()).unwrap();
//! let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
//! let resp = rt.block_on(router.serve(Request::get("/hashicorp/aws/datasource/aws_ami")));
//! assert_eq!(resp.status, Status::OK);
//! ```
//!
//! With the `server` feature (on by default), [`server::serve`] puts the same
//! routes behind axum.

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use schemata_core::{
    // Errors
    BoxError,
    // Handlers
    BoxHandler,
    DynHandler,
    EncodeError,
    FnHandler,
    Handler,
    // Route model
    ItemKind,
    Method,
    PathParams,
    // Registry
    Provider,
    ProviderAddr,
    ProviderRef,
    ProviderSchema,
    QueryParams,
    // Request / Response
    Request,
    Response,
    Route,
    RouteDescriptor,
    RouteKind,
    RouteTable,
    // Routing
    Router,
    RouterBuildError,
    RouterBuilder,
    SchemaRegistry,
    SchemataError,
    Status,
    Transport,
    encode_json,
    handler_fn,
};

pub use schemata_std::{
    ApiRouter, ApiRouterBuilder, Registry, RegistryBuilder, RegistryError, ResourceDispatcher, RouteHandler,
    TracingHandler, bind_routes, build_router, synthesize,
};

/// Route synthesis.
pub mod synth {
    pub use schemata_std::synth::{HEALTH_ROUTE, LIST_ROUTE, ROOT_ROUTE, decorate_pattern, route_segment, synthesize};
}

/// Pattern routers.
pub mod routing {
    pub use schemata_std::routing::{MatchitRouter, MatchitRouterBuilder};
}

/// Testing utilities.
pub mod testing {
    #![allow(clippy::wildcard_imports)]
    pub use schemata_std::testing::*;
}

#[cfg(feature = "server")]
pub mod server;

/// Prelude module - common imports for schemata.
///
/// # Usage
///
/// ```rust
/// use schemata::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        ApiRouter, Handler, Registry, Request, Response, RouteTable, SchemaRegistry, SchemataError, Status,
        Transport, build_router, synthesize,
    };
}
