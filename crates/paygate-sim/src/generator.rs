//! Mock response generation.
//!
//! Each supported endpoint id maps to a fixed rule that reads a few fields
//! from the request body (with documented defaults) and fabricates the rest.
//! Unknown ids produce an empty object.
//!
//! Two entry points share the rules:
//!
//! - [`MockResponseGenerator::generate`] never fails; an unparseable body is
//!   treated as `{}`.
//! - [`MockResponseGenerator::try_generate`] rejects a non-empty body that is
//!   not valid JSON, or is JSON `null`, for endpoints that read request
//!   fields. The controller uses this one and turns the error into a 400
//!   envelope.

use crate::source::{format_timestamp, Clock, IdSource, SystemClock, ThreadRngIdSource};
use chrono::Duration;
use serde_json::{json, Map, Value};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

pub const SEED_PHRASE: &str =
    "abandon ability able about above absent absorb abstract absurd abuse access accident";

/// 1x1 transparent PNG used for every QR code.
pub const PLACEHOLDER_QR: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

pub const DEFAULT_MERCHANT_ID: &str = "merchant_12345";
pub const DEFAULT_AMOUNT: u64 = 100;
pub const DEFAULT_CURRENCY: &str = "USDT";
pub const DEFAULT_INVOICE_ID: &str = "inv_example123";
pub const DEFAULT_REFUND_AMOUNT: f64 = 95.5;
pub const DEFAULT_REFUND_REASON: &str = "unspecified";
pub const DEFAULT_EVENT: &str = "payment_confirmed";

const ID_SUFFIX_LEN: usize = 9;
const ADDRESS_HEX_LEN: usize = 40;
const INVOICE_TTL_MINUTES: i64 = 15;

/// Errors raised by strict generation.
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("Request body for '{endpoint}' is not valid JSON: {source}")]
    MalformedBody {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Request body for '{0}' is null")]
    NullBody(String),
}

/// Endpoint rules the generator knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rule {
    Configure,
    Pay,
    Cancel,
    Refund,
    Callback,
}

impl Rule {
    fn for_endpoint(id: &str) -> Option<Self> {
        match id {
            "configure" => Some(Rule::Configure),
            "pay" => Some(Rule::Pay),
            "cancel" => Some(Rule::Cancel),
            "refund" => Some(Rule::Refund),
            "callback" => Some(Rule::Callback),
            _ => None,
        }
    }

    fn reads_body(self) -> bool {
        !matches!(self, Rule::Configure)
    }
}

/// Fabricates response bodies for the supported endpoints.
#[derive(Debug, Clone)]
pub struct MockResponseGenerator {
    ids: Arc<dyn IdSource>,
    clock: Arc<dyn Clock>,
}

impl Default for MockResponseGenerator {
    fn default() -> Self {
        Self::new(Arc::new(ThreadRngIdSource), Arc::new(SystemClock))
    }
}

impl MockResponseGenerator {
    pub fn new(ids: Arc<dyn IdSource>, clock: Arc<dyn Clock>) -> Self {
        Self { ids, clock }
    }

    /// Generate a response body, absorbing any parse failure.
    pub fn generate(&self, endpoint_id: &str, raw_body: &str) -> Value {
        let fields = parse_lenient(raw_body);
        self.build(endpoint_id, &fields)
    }

    /// Generate a response body, failing on a malformed body for endpoints
    /// that read request fields.
    pub fn try_generate(&self, endpoint_id: &str, raw_body: &str) -> Result<Value, GenerateError> {
        let fields = match Rule::for_endpoint(endpoint_id) {
            Some(rule) if rule.reads_body() => parse_strict(endpoint_id, raw_body)?,
            _ => Map::new(),
        };
        Ok(self.build(endpoint_id, &fields))
    }

    fn build(&self, endpoint_id: &str, fields: &Map<String, Value>) -> Value {
        let Some(rule) = Rule::for_endpoint(endpoint_id) else {
            debug!("No mock rule for endpoint '{}', returning empty object", endpoint_id);
            return Value::Object(Map::new());
        };

        let now = self.clock.now();
        let expires_at = format_timestamp(now + Duration::minutes(INVOICE_TTL_MINUTES));
        let now = format_timestamp(now);

        let data = match rule {
            Rule::Configure => json!({
                "walletId": self.prefixed_id("wallet_"),
                "seedPhrase": SEED_PHRASE,
                "status": "configured",
                "createdAt": now,
            }),
            Rule::Pay => {
                let merchant_id = truthy_or(fields, "merchantId", json!(DEFAULT_MERCHANT_ID));
                let callback_url = format!(
                    "https://merchant.example.com/webhook/{}",
                    display_value(&merchant_id)
                );
                json!({
                    "invoiceId": self.prefixed_id("inv_"),
                    "merchantId": merchant_id,
                    "amount": truthy_or(fields, "amount", json!(DEFAULT_AMOUNT)),
                    "currency": truthy_or(fields, "currency", json!(DEFAULT_CURRENCY)),
                    "depositAddress": self.address(),
                    "qrCodeUrl": PLACEHOLDER_QR,
                    "status": "pending",
                    "expiresAt": expires_at,
                    "callbackUrl": callback_url,
                })
            }
            Rule::Cancel => json!({
                "invoiceId": truthy_or(fields, "invoiceId", json!(DEFAULT_INVOICE_ID)),
                "status": "cancelled",
                "cancelledAt": now,
                "message": "Invoice cancelled successfully",
            }),
            Rule::Refund => json!({
                "originalInvoiceId": truthy_or(fields, "invoiceId", json!(DEFAULT_INVOICE_ID)),
                "refundInvoiceId": self.prefixed_id("refund_"),
                "refundAmount": present_or(fields, "amount", json!(DEFAULT_REFUND_AMOUNT)),
                "merchantRefundAddress": self.address(),
                "customerRefundAddress": self.address(),
                "refundQr": PLACEHOLDER_QR,
                "refundStatus": "pending",
                "expiresAt": expires_at,
                "reason": truthy_or(fields, "reason", json!(DEFAULT_REFUND_REASON)),
            }),
            Rule::Callback => {
                let event = truthy_or(fields, "event", json!(DEFAULT_EVENT));
                json!({
                    "received": true,
                    "message": format!("Event {} processed", display_value(&event)),
                })
            }
        };

        debug!("Generated mock response for '{}'", endpoint_id);
        data
    }

    fn prefixed_id(&self, prefix: &str) -> String {
        format!("{prefix}{}", self.ids.token(ID_SUFFIX_LEN))
    }

    fn address(&self) -> String {
        format!("0x{}", self.ids.hex(ADDRESS_HEX_LEN))
    }
}

/// Empty or whitespace-only bodies count as `{}`. Arrays, strings, numbers
/// and booleans have no fields, so every field takes its default. `null` has
/// no fields to read at all and is rejected.
fn parse_strict(endpoint_id: &str, raw: &str) -> Result<Map<String, Value>, GenerateError> {
    if raw.trim().is_empty() {
        return Ok(Map::new());
    }
    let value: Value =
        serde_json::from_str(raw).map_err(|source| GenerateError::MalformedBody {
            endpoint: endpoint_id.to_string(),
            source,
        })?;
    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Err(GenerateError::NullBody(endpoint_id.to_string())),
        _ => Ok(Map::new()),
    }
}

fn parse_lenient(raw: &str) -> Map<String, Value> {
    parse_strict("", raw).unwrap_or_default()
}

/// False, null, zero and the empty string fall back to the default.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn truthy_or(fields: &Map<String, Value>, key: &str, default: Value) -> Value {
    fields
        .get(key)
        .filter(|v| is_truthy(v))
        .cloned()
        .unwrap_or(default)
}

/// Only an absent or null field falls back to the default.
fn present_or(fields: &Map<String, Value>, key: &str, default: Value) -> Value {
    fields
        .get(key)
        .filter(|v| !v.is_null())
        .cloned()
        .unwrap_or(default)
}

/// Strings interpolate without quotes; anything else uses its JSON text.
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
