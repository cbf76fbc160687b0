//! # Schema Registry
//!
//! The read-only model of providers and their schemas. A registry is built
//! once, before any route is synthesized, and never changes afterwards.

use crate::route::ItemKind;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::{fmt, sync::Arc};

/// An opaque schema value. Encoding is delegated to `serde_json`.
pub type Schema = serde_json::Value;

/// Named schemas in registry order.
pub type SchemaMap = IndexMap<String, Schema>;

/// Everything a provider exposes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProviderSchema {
    /// Schema of the provider configuration block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<Schema>,
    /// Schema of the provider meta block, if the provider declares one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_meta: Option<Schema>,
    /// Resource type schemas keyed by resource type name.
    #[serde(default)]
    pub resource_types: SchemaMap,
    /// Data source schemas keyed by data source name.
    #[serde(default)]
    pub data_sources: SchemaMap,
    /// Schema version per resource type.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub resource_type_schema_versions: IndexMap<String, u64>,
}

impl ProviderSchema {
    /// The mapping for one kind of item.
    pub fn items(&self, kind: ItemKind) -> &SchemaMap {
        match kind {
            ItemKind::DataSource => &self.data_sources,
            ItemKind::Resource => &self.resource_types,
        }
    }

    /// Look up a single item; `None` when the name is absent.
    pub fn item(&self, kind: ItemKind, name: &str) -> Option<&Schema> {
        self.items(kind).get(name)
    }
}

/// Identity of a provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProviderAddr {
    /// Owning namespace, e.g. `hashicorp`.
    pub namespace: String,
    /// Provider type name, e.g. `aws`. May itself contain `/` separators.
    #[serde(rename = "type")]
    pub type_name: String,
}

impl ProviderAddr {
    /// Create a new provider address.
    pub fn new(namespace: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            type_name: type_name.into(),
        }
    }
}

impl fmt::Display for ProviderAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.type_name)
    }
}

/// A registry entry.
///
/// `schema` is `None` for malformed entries; those are skipped when routes
/// are synthesized.
#[derive(Debug, Clone)]
pub struct Provider {
    /// Provider identity.
    pub addr: ProviderAddr,
    /// Provider schema, shared with every route bound to this provider.
    pub schema: Option<Arc<ProviderSchema>>,
}

impl Provider {
    /// Create a well-formed provider entry.
    pub fn new(addr: ProviderAddr, schema: ProviderSchema) -> Self {
        Self {
            addr,
            schema: Some(Arc::new(schema)),
        }
    }

    /// Create an entry that carries no schema.
    pub fn malformed(addr: ProviderAddr) -> Self {
        Self { addr, schema: None }
    }
}

/// The `{name, schema}` pair bound to provider routes and served at a
/// provider root.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProviderRef {
    /// Provider type name.
    pub name: String,
    /// Full provider schema; `None` only for the degenerate `/` route.
    pub schema: Option<Arc<ProviderSchema>>,
}

impl ProviderRef {
    /// Bind a provider's schema under its type name.
    pub fn new(name: impl Into<String>, schema: Arc<ProviderSchema>) -> Self {
        Self {
            name: name.into(),
            schema: Some(schema),
        }
    }
}

/// Source of providers for route synthesis.
///
/// Implementations must yield providers in a stable order; synthesis is
/// deterministic only with respect to that order.
pub trait SchemaRegistry: Send + Sync {
    /// All providers, in registry order.
    fn providers(&self) -> Box<dyn Iterator<Item = &Provider> + '_>;
}

impl SchemaRegistry for Vec<Provider> {
    fn providers(&self) -> Box<dyn Iterator<Item = &Provider> + '_> {
        Box::new(self.iter())
    }
}

impl SchemaRegistry for [Provider] {
    fn providers(&self) -> Box<dyn Iterator<Item = &Provider> + '_> {
        Box::new(self.iter())
    }
}

impl<R: SchemaRegistry + ?Sized> SchemaRegistry for Arc<R> {
    fn providers(&self) -> Box<dyn Iterator<Item = &Provider> + '_> {
        (**self).providers()
    }
}
