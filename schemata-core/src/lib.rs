//! # schemata-core
//!
//! Core types and traits for the schemata route synthesizer.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! transports and registry adapters that don't need the full `schemata-std`
//! implementation.
//!
//! # Layers
//!
//! ## Registry ([`SchemaRegistry`])
//!
//! The read-only source of providers. Each [`Provider`] is identified by a
//! namespace and a type name and owns a [`ProviderSchema`] with its data
//! sources and resource types.
//!
//! ## Route Model ([`Route`], [`RouteTable`])
//!
//! One dispatchable rule: name, method, path pattern, and the data bound to
//! it. A [`RouteTable`] is the ordered, immutable output of synthesis.
//!
//! ## Handlers ([`Handler`])
//!
//! The terminal endpoint that turns a [`Request`] into a [`Response`].
//! [`DynHandler`] is the object-safe form stored by routers.
//!
//! ## Routing ([`Router`], [`Transport`])
//!
//! [`Router`] abstracts pattern lookup; [`Transport`] is the "register a
//! handler for method + pattern" capability that HTTP servers provide.
//!
//! # Error Types
//!
//! - [`SchemataError`] - Top-level error type
//! - [`RouterBuildError`] - Route registration errors
//! - [`EncodeError`] - JSON encoding errors

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod error;
mod handler;
mod registry;
mod request;
mod response;
mod route;
mod router;

// Re-exports
pub use error::{BoxError, EncodeError, RouterBuildError, SchemataError};
pub use handler::{BoxHandler, DynHandler, FnHandler, Handler, handler_fn};
pub use registry::{Provider, ProviderAddr, ProviderRef, ProviderSchema, Schema, SchemaMap, SchemaRegistry};
pub use request::{PathParams, QueryParams, Request};
pub use response::{CONTENT_TYPE_JSON, CONTENT_TYPE_TEXT, IntoResponse, Response, Status, encode_json};
pub use route::{ItemKind, Method, Route, RouteDescriptor, RouteKind, RouteTable};
pub use router::{RouteResult, Router, RouterBuilder, Transport};
