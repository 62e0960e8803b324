//! Endpoint catalog: the ordered, immutable registry of documented endpoints
//! together with the example request payloads that seed the editor.
//!
//! A catalog is a plain value. Load it once (from the embedded default or a
//! YAML file) and hand it to the components that need it.
//!
//! # Example
//!
//! ```
//! use paygate_sim::EndpointCatalog;
//!
//! let catalog = EndpointCatalog::builtin().unwrap();
//! let hits: Vec<&str> = catalog.filter("PAY").iter().map(|e| e.id.as_str()).collect();
//! assert_eq!(hits, vec!["pay", "cancel"]);
//! ```

use crate::source::{format_timestamp, Clock, SystemClock};
use crate::types::EndpointDescriptor;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

const BUILTIN_CATALOG: &str = include_str!("../catalog/payment_gateway.yaml");

/// Example payload placeholder replaced with the load-time timestamp.
const NOW_PLACEHOLDER: &str = "${now}";

/// Errors raised while loading a catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid catalog YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("Catalog defines no endpoints")]
    Empty,
    #[error("Endpoint at position {0} has an empty id")]
    EmptyId(usize),
    #[error("Duplicate endpoint id '{0}'")]
    DuplicateId(String),
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    endpoints: Vec<EndpointDescriptor>,
    #[serde(default)]
    examples: HashMap<String, Value>,
}

/// Ordered endpoint registry plus the example-request table.
#[derive(Debug, Clone)]
pub struct EndpointCatalog {
    endpoints: Vec<EndpointDescriptor>,
    examples: HashMap<String, Value>,
}

impl EndpointCatalog {
    /// Build a catalog from descriptors and an example table, validating ids.
    pub fn new(
        endpoints: Vec<EndpointDescriptor>,
        examples: HashMap<String, Value>,
    ) -> Result<Self, CatalogError> {
        if endpoints.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        for (index, endpoint) in endpoints.iter().enumerate() {
            if endpoint.id.trim().is_empty() {
                return Err(CatalogError::EmptyId(index));
            }
            if !seen.insert(endpoint.id.as_str()) {
                return Err(CatalogError::DuplicateId(endpoint.id.clone()));
            }
            if !examples.contains_key(&endpoint.id) {
                warn!(
                    "Endpoint '{}' has no example request; editor will be seeded with {{}}",
                    endpoint.id
                );
            }
        }

        Ok(Self {
            endpoints,
            examples,
        })
    }

    /// The embedded payment-gateway catalog.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::builtin_with_clock(&SystemClock)
    }

    /// The embedded catalog with `${now}` placeholders resolved against `clock`.
    pub fn builtin_with_clock(clock: &dyn Clock) -> Result<Self, CatalogError> {
        Self::from_yaml_str_with_clock(BUILTIN_CATALOG, clock)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, CatalogError> {
        Self::from_yaml_str_with_clock(yaml, &SystemClock)
    }

    pub fn from_yaml_str_with_clock(yaml: &str, clock: &dyn Clock) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_yaml::from_str(yaml)?;
        let now = format_timestamp(clock.now());
        let examples = file
            .examples
            .into_iter()
            .map(|(id, mut payload)| {
                resolve_placeholders(&mut payload, &now);
                (id, payload)
            })
            .collect();
        Self::new(file.endpoints, examples)
    }

    /// Load a catalog from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_yaml_str(&contents)?;
        info!(
            "Loaded {} endpoints from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    /// All endpoints in catalog order.
    pub fn endpoints(&self) -> &[EndpointDescriptor] {
        &self.endpoints
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&EndpointDescriptor> {
        self.endpoints.iter().find(|e| e.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// First endpoint in catalog order. Always present for a validated catalog.
    pub fn first(&self) -> &EndpointDescriptor {
        &self.endpoints[0]
    }

    /// Endpoints whose name or path contains `query`, ignoring case.
    ///
    /// An empty query returns every endpoint. Order is preserved.
    pub fn filter(&self, query: &str) -> Vec<&EndpointDescriptor> {
        let needle = query.to_lowercase();
        self.endpoints
            .iter()
            .filter(|e| e.matches_lowercase(&needle))
            .collect()
    }

    /// Example request payload for `id`, if one is defined.
    pub fn example(&self, id: &str) -> Option<&Value> {
        self.examples.get(id)
    }

    /// Example payload pretty-printed with two-space indentation.
    ///
    /// Falls back to `{}` when the endpoint has no example.
    pub fn example_body(&self, id: &str) -> String {
        let fallback = Value::Object(Map::new());
        let payload = self.examples.get(id).unwrap_or(&fallback);
        serde_json::to_string_pretty(payload).unwrap_or_else(|_| "{}".to_string())
    }
}

fn resolve_placeholders(value: &mut Value, now: &str) {
    match value {
        Value::String(s) if s == NOW_PLACEHOLDER => *s = now.to_string(),
        Value::Array(items) => items.iter_mut().for_each(|v| resolve_placeholders(v, now)),
        Value::Object(map) => map
            .values_mut()
            .for_each(|v| resolve_placeholders(v, now)),
        _ => {}
    }
}
