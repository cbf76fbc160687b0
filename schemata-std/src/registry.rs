//! In-memory schema registry.
//!
//! A [`Registry`] is assembled once, either through [`RegistryBuilder`] or by
//! loading a JSON document, and is read-only afterwards.
//!
//! # Documents
//!
//! Two document shapes are accepted:
//!
//! ```json
//! { "providers": [
//!     { "namespace": "hashicorp", "type": "aws",
//!       "schema": { "data_sources": { "aws_ami": {} }, "resource_types": {} } }
//! ] }
//! ```
//!
//! and the output of `terraform providers schema -json`, where each key of
//! `provider_schemas` is a provider source address such as
//! `registry.terraform.io/hashicorp/aws`.

use indexmap::IndexMap;
use schemata_core::{Provider, ProviderAddr, ProviderSchema, Schema, SchemaMap, SchemaRegistry};
use serde::Deserialize;
use std::{collections::HashSet, path::Path};
use thiserror::Error;

/// Errors raised while assembling a registry.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// The document could not be read.
    #[error("failed to read registry document: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not valid JSON of a known shape.
    #[error("invalid registry document: {0}")]
    Json(#[from] serde_json::Error),

    /// A provider source address has fewer than two segments.
    #[error("invalid provider address: {0:?}")]
    InvalidAddress(String),

    /// The same provider was registered twice.
    #[error("duplicate provider: {0}")]
    Duplicate(ProviderAddr),
}

/// A read-only list of providers in registration order.
///
/// Loaded documents may list the same `namespace/type` more than once, e.g.
/// under two registry hostnames; [`RegistryBuilder`] does not allow that.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    providers: Vec<Provider>,
}

impl Registry {
    /// Start building a registry.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Parse a registry document.
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let document: Document = serde_json::from_str(json)?;
        Ok(document.into_registry())
    }

    /// Read and parse a registry document from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Number of providers, including malformed entries.
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Whether the registry has no providers.
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl SchemaRegistry for Registry {
    fn providers(&self) -> Box<dyn Iterator<Item = &Provider> + '_> {
        Box::new(self.providers.iter())
    }
}

/// Builder for constructing a [`Registry`].
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    providers: Vec<Provider>,
    seen: HashSet<ProviderAddr>,
}

impl RegistryBuilder {
    /// Create a new empty registry builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider with its schema.
    pub fn provider(
        self,
        namespace: impl Into<String>,
        type_name: impl Into<String>,
        schema: ProviderSchema,
    ) -> Result<Self, RegistryError> {
        self.push(Provider::new(ProviderAddr::new(namespace, type_name), schema))
    }

    /// Register a provider entry that carries no schema.
    pub fn malformed(self, namespace: impl Into<String>, type_name: impl Into<String>) -> Result<Self, RegistryError> {
        self.push(Provider::malformed(ProviderAddr::new(namespace, type_name)))
    }

    /// Register a prepared provider entry.
    pub fn push(mut self, provider: Provider) -> Result<Self, RegistryError> {
        if !self.seen.insert(provider.addr.clone()) {
            return Err(RegistryError::Duplicate(provider.addr));
        }
        self.providers.push(provider);
        Ok(self)
    }

    /// Build the registry.
    pub fn build(self) -> Registry {
        Registry {
            providers: self.providers,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Document {
    Terraform(TerraformDocument),
    Native(NativeDocument),
}

#[derive(Deserialize)]
struct NativeDocument {
    providers: Vec<NativeEntry>,
}

#[derive(Deserialize)]
struct NativeEntry {
    namespace: String,
    #[serde(rename = "type")]
    type_name: String,
    #[serde(default)]
    schema: Option<ProviderSchema>,
}

#[derive(Deserialize)]
struct TerraformDocument {
    provider_schemas: IndexMap<String, TerraformProvider>,
}

#[derive(Deserialize)]
struct TerraformProvider {
    #[serde(default)]
    provider: Option<Schema>,
    #[serde(default)]
    provider_meta: Option<Schema>,
    #[serde(default)]
    resource_schemas: SchemaMap,
    #[serde(default)]
    data_source_schemas: SchemaMap,
}

impl TerraformProvider {
    fn into_schema(self) -> ProviderSchema {
        let resource_type_schema_versions = self
            .resource_schemas
            .iter()
            .filter_map(|(name, schema)| Some((name.clone(), schema.get("version")?.as_u64()?)))
            .collect();
        ProviderSchema {
            provider: self.provider,
            provider_meta: self.provider_meta,
            resource_types: self.resource_schemas,
            data_sources: self.data_source_schemas,
            resource_type_schema_versions,
        }
    }
}

/// Split a source address such as `registry.terraform.io/hashicorp/aws`
/// into its namespace and type.
pub fn parse_source_address(source: &str) -> Result<ProviderAddr, RegistryError> {
    let mut segments = source.rsplit('/');
    match (segments.next(), segments.next()) {
        (Some(type_name), Some(namespace)) if !type_name.is_empty() && !namespace.is_empty() => {
            Ok(ProviderAddr::new(namespace, type_name))
        }
        _ => Err(RegistryError::InvalidAddress(source.to_string())),
    }
}

impl Document {
    // Entry problems are not fatal: unusable addresses are skipped, and
    // repeated identities are kept for synthesis to resolve.
    fn into_registry(self) -> Registry {
        let mut providers = Vec::new();
        match self {
            Document::Native(doc) => {
                for entry in doc.providers {
                    let addr = ProviderAddr::new(entry.namespace, entry.type_name);
                    providers.push(match entry.schema {
                        Some(schema) => Provider::new(addr, schema),
                        None => Provider::malformed(addr),
                    });
                }
            }
            Document::Terraform(doc) => {
                for (source, provider) in doc.provider_schemas {
                    match parse_source_address(&source) {
                        Ok(addr) => providers.push(Provider::new(addr, provider.into_schema())),
                        Err(_e) => {
                            #[cfg(feature = "tracing")]
                            tracing::warn!(source = %source, error = %_e, "skipping provider");
                        }
                    }
                }
            }
        }
        Registry { providers }
    }
}
