//! # Routing Implementations
//!
//! Pattern-matching backends behind the [`Router`] trait.
//!
//! | Router | Use Case |
//! |--------|----------|
//! | [`MatchitRouter`] | Path patterns with `{param}` placeholders |
//!
//! [`Router`]: schemata_core::Router

pub mod matchit;

pub use self::matchit::{MatchitRouter, MatchitRouterBuilder};
