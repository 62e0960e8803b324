//! Per-user console session: current selection, editable request body, last
//! response and the copy marker.
//!
//! The lifecycle is an explicit [`SessionPhase`]. Illegal transitions (a second
//! run while one is in flight, switching endpoints mid-call) are rejected with
//! [`SessionError`] rather than left undefined.

use crate::catalog::EndpointCatalog;
use crate::config::DEFAULT_COPY_HIGHLIGHT_MS;
use crate::types::ResponseEnvelope;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SessionError {
    #[error("Unknown endpoint '{0}'")]
    UnknownEndpoint(String),
    #[error("A simulated call is already in flight")]
    InFlight,
    #[error("No simulated call is in flight")]
    NotInFlight,
}

/// Where the session is in the select -> edit -> run -> inspect cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionPhase {
    /// Body matches the example seed and no response is shown.
    Idle,
    /// Body diverges from the example seed and no response is shown.
    Editing,
    /// A simulated call has started and not yet resolved.
    InFlight,
    /// The last call produced this response.
    Resolved(ResponseEnvelope),
}

/// Snapshot of what a started run will send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTest {
    pub endpoint_id: String,
    pub body: String,
}

#[derive(Debug, Clone)]
struct CopiedMarker {
    field: String,
    at: Instant,
}

/// Mutable state of a single console session.
#[derive(Debug, Clone)]
pub struct SessionState {
    catalog: Arc<EndpointCatalog>,
    endpoint_id: String,
    seed: String,
    body: String,
    phase: SessionPhase,
    copied: Option<CopiedMarker>,
    copy_highlight: Duration,
}

impl SessionState {
    /// Start a session with the first catalog endpoint selected.
    pub fn new(catalog: Arc<EndpointCatalog>) -> Self {
        let endpoint_id = catalog.first().id.clone();
        let seed = catalog.example_body(&endpoint_id);
        Self {
            catalog,
            endpoint_id,
            body: seed.clone(),
            seed,
            phase: SessionPhase::Idle,
            copied: None,
            copy_highlight: Duration::from_millis(DEFAULT_COPY_HIGHLIGHT_MS),
        }
    }

    /// Override how long a copy marker stays visible.
    pub fn with_copy_highlight(mut self, duration: Duration) -> Self {
        self.copy_highlight = duration;
        self
    }

    pub fn copy_highlight(&self) -> Duration {
        self.copy_highlight
    }

    pub fn catalog(&self) -> &EndpointCatalog {
        &self.catalog
    }

    pub fn endpoint_id(&self) -> &str {
        &self.endpoint_id
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn phase(&self) -> &SessionPhase {
        &self.phase
    }

    pub fn response(&self) -> Option<&ResponseEnvelope> {
        match &self.phase {
            SessionPhase::Resolved(envelope) => Some(envelope),
            _ => None,
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.phase == SessionPhase::InFlight
    }

    /// Whether the body differs from the selected endpoint's example.
    pub fn is_editing(&self) -> bool {
        self.body != self.seed
    }

    /// Select an endpoint: reseed the body and drop any response.
    pub fn select(&mut self, endpoint_id: &str) -> Result<(), SessionError> {
        if self.is_in_flight() {
            return Err(SessionError::InFlight);
        }
        if !self.catalog.contains(endpoint_id) {
            return Err(SessionError::UnknownEndpoint(endpoint_id.to_string()));
        }

        self.endpoint_id = endpoint_id.to_string();
        self.seed = self.catalog.example_body(endpoint_id);
        self.body = self.seed.clone();
        self.phase = SessionPhase::Idle;
        debug!("Selected endpoint '{}'", endpoint_id);
        Ok(())
    }

    /// Store edited body text. Does not affect an in-flight or resolved phase.
    pub fn edit_body(&mut self, text: impl Into<String>) {
        self.body = text.into();
        match self.phase {
            SessionPhase::Idle | SessionPhase::Editing => {
                self.phase = if self.is_editing() {
                    SessionPhase::Editing
                } else {
                    SessionPhase::Idle
                };
            }
            SessionPhase::InFlight | SessionPhase::Resolved(_) => {}
        }
    }

    /// Restore the example body for the current endpoint.
    pub fn reset_body(&mut self) {
        let seed = self.seed.clone();
        self.edit_body(seed);
    }

    /// Mark the session in flight and snapshot what will be sent.
    pub fn begin_test(&mut self) -> Result<PendingTest, SessionError> {
        if self.is_in_flight() {
            return Err(SessionError::InFlight);
        }
        self.phase = SessionPhase::InFlight;
        debug!("Simulated call to '{}' in flight", self.endpoint_id);
        Ok(PendingTest {
            endpoint_id: self.endpoint_id.clone(),
            body: self.body.clone(),
        })
    }

    /// Resolve the in-flight call with its envelope and return the stored copy.
    pub fn complete(
        &mut self,
        envelope: ResponseEnvelope,
    ) -> Result<&ResponseEnvelope, SessionError> {
        if !self.is_in_flight() {
            return Err(SessionError::NotInFlight);
        }
        debug!(
            "Simulated call to '{}' resolved with {}",
            self.endpoint_id, envelope.status
        );
        self.phase = SessionPhase::Resolved(envelope);
        match &self.phase {
            SessionPhase::Resolved(stored) => Ok(stored),
            _ => unreachable!("phase was just set to Resolved"),
        }
    }

    /// Record that `field` was just copied. UI highlight only.
    pub fn mark_copied(&mut self, field: impl Into<String>) {
        self.copied = Some(CopiedMarker {
            field: field.into(),
            at: Instant::now(),
        });
    }

    /// The last copied field, if its highlight has not expired.
    pub fn copied_field(&self) -> Option<&str> {
        self.copied
            .as_ref()
            .filter(|marker| marker.at.elapsed() < self.copy_highlight)
            .map(|marker| marker.field.as_str())
    }

    /// Drop the copy marker once its highlight window has passed.
    pub fn clear_expired_copy(&mut self) {
        if let Some(marker) = &self.copied {
            if marker.at.elapsed() >= self.copy_highlight {
                self.copied = None;
            }
        }
    }
}
