//! Core data types shared by the catalog, generator and controller.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// A single documented endpoint of the simulated gateway.
///
/// Descriptors are loaded once and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointDescriptor {
    /// Unique key within the catalog (e.g. "pay").
    pub id: String,
    /// Display name.
    pub name: String,
    /// HTTP verb token. Not checked against a fixed set.
    pub method: String,
    /// Documented route.
    pub path: String,
    #[serde(default)]
    pub description: String,
    /// Field name -> human readable type/constraint. Documentation only.
    #[serde(default)]
    pub request_schema: Map<String, Value>,
    #[serde(default)]
    pub response_schema: Map<String, Value>,
    /// Opaque UI classification token.
    #[serde(default, rename = "color")]
    pub color_tag: String,
}

impl EndpointDescriptor {
    /// Case-insensitive substring match over `name` and `path`.
    ///
    /// `needle` must already be lowercased.
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.path.to_lowercase().contains(needle)
    }
}

/// One simulated HTTP response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub status: u16,
    pub status_text: String,
    pub data: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,
}

impl ResponseEnvelope {
    /// Successful envelope wrapping generated data.
    pub fn ok(data: Value, headers: BTreeMap<String, String>) -> Self {
        Self {
            status: 200,
            status_text: "OK".to_string(),
            data,
            headers: Some(headers),
        }
    }

    /// Fixed failure envelope for malformed requests. Carries no headers.
    pub fn bad_request() -> Self {
        Self {
            status: 400,
            status_text: "Bad Request".to_string(),
            data: serde_json::json!({ "error": "Invalid request format" }),
            headers: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == 200
    }

    /// Body rendered with two-space indentation.
    pub fn pretty_data(&self) -> String {
        serde_json::to_string_pretty(&self.data).unwrap_or_else(|_| self.data.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bad_request_envelope_shape() {
        let envelope = ResponseEnvelope::bad_request();
        assert_eq!(envelope.status, 400);
        assert_eq!(envelope.status_text, "Bad Request");
        assert_eq!(envelope.data, json!({"error": "Invalid request format"}));
        assert!(envelope.headers.is_none());
        assert!(!envelope.is_success());
    }

    #[test]
    fn test_envelope_serializes_camel_case_and_skips_missing_headers() {
        let value = serde_json::to_value(ResponseEnvelope::bad_request()).unwrap();
        assert_eq!(value["statusText"], "Bad Request");
        assert!(value.get("headers").is_none());
    }

    #[test]
    fn test_descriptor_color_field_name() {
        let descriptor: EndpointDescriptor = serde_json::from_value(json!({
            "id": "pay",
            "name": "Create Payment Invoice",
            "method": "POST",
            "path": "/api/pay.js",
            "requestSchema": {"amount": "number"},
            "color": "bg-green-500"
        }))
        .unwrap();
        assert_eq!(descriptor.color_tag, "bg-green-500");
        assert_eq!(descriptor.request_schema["amount"], "number");
        assert!(descriptor.response_schema.is_empty());
    }

    #[test]
    fn test_matches_lowercase_checks_name_and_path() {
        let descriptor = EndpointDescriptor {
            id: "cancel".into(),
            name: "Cancel Payment".into(),
            method: "POST".into(),
            path: "/api/cancel.js".into(),
            description: String::new(),
            request_schema: Map::new(),
            response_schema: Map::new(),
            color_tag: String::new(),
        };
        assert!(descriptor.matches_lowercase("payment"));
        assert!(descriptor.matches_lowercase("cancel.js"));
        assert!(!descriptor.matches_lowercase("refund"));
    }
}
