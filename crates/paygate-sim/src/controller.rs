//! Simulation controller: one "test endpoint" cycle end to end.
//!
//! A run waits out the configured latency, asks the generator for a body and
//! wraps it in a [`ResponseEnvelope`]. Generation errors never escape; they
//! become the fixed 400 envelope.

use crate::catalog::EndpointCatalog;
use crate::config::SimulatorConfig;
use crate::generator::MockResponseGenerator;
use crate::session::{SessionError, SessionState};
use crate::source::{Clock, IdSource, SystemClock, ThreadRngIdSource};
use crate::types::ResponseEnvelope;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Runs simulated calls against the catalog.
#[derive(Debug, Clone)]
pub struct SimulationController {
    catalog: Arc<EndpointCatalog>,
    latency: Duration,
    headers: BTreeMap<String, String>,
    ids: Arc<dyn IdSource>,
    clock: Arc<dyn Clock>,
    generator: MockResponseGenerator,
}

impl SimulationController {
    pub fn new(catalog: Arc<EndpointCatalog>, config: &SimulatorConfig) -> Self {
        let ids: Arc<dyn IdSource> = Arc::new(ThreadRngIdSource);
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        Self {
            catalog,
            latency: config.latency(),
            headers: config.headers.clone(),
            generator: MockResponseGenerator::new(ids.clone(), clock.clone()),
            ids,
            clock,
        }
    }

    /// Replace the random source used for ids and addresses.
    pub fn with_id_source(mut self, ids: Arc<dyn IdSource>) -> Self {
        self.ids = ids;
        self.generator = MockResponseGenerator::new(self.ids.clone(), self.clock.clone());
        self
    }

    /// Replace the clock used for timestamps.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self.generator = MockResponseGenerator::new(self.ids.clone(), self.clock.clone());
        self
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn catalog(&self) -> &Arc<EndpointCatalog> {
        &self.catalog
    }

    pub fn generator(&self) -> &MockResponseGenerator {
        &self.generator
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }

    /// Simulate one call. Always yields exactly one envelope, 200 or 400.
    pub async fn run_test(&self, endpoint_id: &str, raw_body: &str) -> ResponseEnvelope {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        self.respond(endpoint_id, raw_body)
    }

    /// Run the session's current request and store the result in it.
    pub async fn run_session<'a>(
        &self,
        session: &'a mut SessionState,
    ) -> Result<&'a ResponseEnvelope, SessionError> {
        let pending = session.begin_test()?;
        let envelope = self.run_test(&pending.endpoint_id, &pending.body).await;
        session.complete(envelope)
    }

    fn respond(&self, endpoint_id: &str, raw_body: &str) -> ResponseEnvelope {
        match self.generator.try_generate(endpoint_id, raw_body) {
            Ok(data) => {
                debug!("Simulated 200 for '{}'", endpoint_id);
                ResponseEnvelope::ok(data, self.headers.clone())
            }
            Err(e) => {
                warn!("Simulated 400 for '{}': {}", endpoint_id, e);
                ResponseEnvelope::bad_request()
            }
        }
    }
}
