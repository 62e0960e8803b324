//! Simulator configuration.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::catalog::EndpointCatalog;

/// Default lifetime of a "copied" marker.
pub const DEFAULT_COPY_HIGHLIGHT_MS: u64 = 2000;

/// Runtime settings for the simulator.
///
/// ```yaml
/// latency_ms: 800
/// copy_highlight_ms: 2000
/// headers:
///   content-type: application/json
///   x-ratelimit-remaining: "99"
///   x-response-time: 127ms
/// catalog: ./catalog.yaml
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Fixed delay before a simulated response is produced. Zero is allowed.
    pub latency_ms: u64,

    /// How long a "copied" marker stays visible.
    pub copy_highlight_ms: u64,

    /// Diagnostic headers attached to every successful response.
    pub headers: BTreeMap<String, String>,

    /// Optional catalog file replacing the built-in catalog.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog: Option<PathBuf>,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            latency_ms: 800,
            copy_highlight_ms: DEFAULT_COPY_HIGHLIGHT_MS,
            headers: default_headers(),
            catalog: None,
        }
    }
}

fn default_headers() -> BTreeMap<String, String> {
    [
        ("content-type", "application/json"),
        ("x-ratelimit-remaining", "99"),
        ("x-response-time", "127ms"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

impl SimulatorConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, anyhow::Error> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config: SimulatorConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("Invalid config file {}", path.display()))?;

        // Relative catalog paths resolve against the config file's directory.
        if let (Some(catalog), Some(dir)) = (config.catalog.as_mut(), path.parent()) {
            if catalog.is_relative() {
                *catalog = dir.join(&*catalog);
            }
        }

        config.validate()?;
        tracing::info!(
            "Loaded simulator config from {} (latency={}ms)",
            path.display(),
            config.latency_ms
        );
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if let Some(name) = self.headers.keys().find(|k| k.trim().is_empty()) {
            anyhow::bail!("Response header names must not be empty (got {name:?})");
        }
        Ok(())
    }

    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }

    pub fn copy_highlight(&self) -> Duration {
        Duration::from_millis(self.copy_highlight_ms)
    }

    /// Load the configured catalog, or the built-in one when none is set.
    pub fn load_catalog(&self) -> Result<EndpointCatalog, anyhow::Error> {
        match &self.catalog {
            Some(path) => EndpointCatalog::from_file(path)
                .with_context(|| format!("Failed to load catalog {}", path.display())),
            None => EndpointCatalog::builtin().context("Built-in catalog is invalid"),
        }
    }
}
