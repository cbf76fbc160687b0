//! # schemata-std
//!
//! Standard implementations for the schemata route synthesizer.
//!
//! This crate provides:
//! - **Synthesis**: [`synthesize`] turns a registry into a [`RouteTable`](schemata_core::RouteTable)
//! - **Dispatch**: [`ResourceDispatcher`] and the fixed [`handlers`]
//! - **Routing**: [`MatchitRouter`] and the in-process [`ApiRouter`]
//! - **Registry**: [`Registry`], loadable from JSON documents

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use schemata_core;

// Modules
pub mod dispatch;
pub mod facade;
pub mod handlers;
pub mod registry;
pub mod routing;
pub mod synth;
pub mod testing;

pub use dispatch::{Dispatch, ResourceDispatcher};
pub use facade::{ApiRouter, ApiRouterBuilder, bind_routes, build_router};
pub use handlers::{RouteHandler, TracingHandler};
pub use registry::{Registry, RegistryBuilder, RegistryError};
pub use routing::{MatchitRouter, MatchitRouterBuilder};
pub use synth::{HEALTH_ROUTE, LIST_ROUTE, ROOT_ROUTE, synthesize};
