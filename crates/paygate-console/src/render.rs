//! Text rendering for catalog entries and simulated responses.

use paygate_sim::{EndpointDescriptor, ResponseEnvelope};
use serde_json::{Map, Value};

// ANSI color codes
pub const GREEN: &str = "\x1b[32m";
pub const RED: &str = "\x1b[31m";
pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const MAGENTA: &str = "\x1b[35m";
pub const CYAN: &str = "\x1b[36m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";
pub const RESET: &str = "\x1b[0m";

/// Terminal color for a catalog color tag like `bg-green-500`.
fn tag_color(tag: &str) -> &'static str {
    match tag.split('-').nth(1) {
        Some("blue") => BLUE,
        Some("green") => GREEN,
        Some("orange") => YELLOW,
        Some("red") => RED,
        Some("purple") => MAGENTA,
        _ => CYAN,
    }
}

/// One line per endpoint, marking the selected one.
pub fn endpoint_list(endpoints: &[&EndpointDescriptor], selected: Option<&str>) -> String {
    if endpoints.is_empty() {
        return format!("{DIM}No endpoints match{RESET}\n");
    }

    let mut out = String::new();
    for endpoint in endpoints {
        let marker = if selected == Some(endpoint.id.as_str()) {
            ">"
        } else {
            " "
        };
        let color = tag_color(&endpoint.color_tag);
        out.push_str(&format!(
            "{marker} {color}{BOLD}{:<6}{RESET} {:<10} {:<24} {DIM}{}{RESET}\n",
            endpoint.method, endpoint.id, endpoint.name, endpoint.path
        ));
    }
    out
}

fn schema_block(title: &str, schema: &Map<String, Value>) -> String {
    let mut out = format!("{BOLD}{title}{RESET}\n");
    if schema.is_empty() {
        out.push_str(&format!("  {DIM}(none){RESET}\n"));
    }
    for (field, doc) in schema {
        let doc = match doc {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        out.push_str(&format!("  {CYAN}{field}{RESET}: {doc}\n"));
    }
    out
}

/// Full documentation for one endpoint.
pub fn endpoint_detail(endpoint: &EndpointDescriptor, example_body: &str) -> String {
    let color = tag_color(&endpoint.color_tag);
    let mut out = format!(
        "{color}{BOLD}{}{RESET} {BOLD}{}{RESET}  {DIM}({}){RESET}\n",
        endpoint.method, endpoint.path, endpoint.id
    );
    out.push_str(&format!("{BOLD}{}{RESET}\n", endpoint.name));
    if !endpoint.description.is_empty() {
        out.push_str(&format!("{}\n", endpoint.description));
    }
    out.push('\n');
    out.push_str(&schema_block("Request schema", &endpoint.request_schema));
    out.push_str(&schema_block("Response schema", &endpoint.response_schema));
    out.push_str(&format!("{BOLD}Example request{RESET}\n{example_body}\n"));
    out
}

/// Status line, headers and pretty-printed body.
pub fn envelope(envelope: &ResponseEnvelope) -> String {
    let (color, mark) = if envelope.is_success() {
        (GREEN, "✓")
    } else {
        (RED, "✗")
    };
    let mut out = format!(
        "{color}{BOLD}{mark} {} {}{RESET}\n",
        envelope.status, envelope.status_text
    );
    if let Some(headers) = &envelope.headers {
        for (name, value) in headers {
            out.push_str(&format!("{DIM}{name}:{RESET} {value}\n"));
        }
    }
    out.push('\n');
    out.push_str(&envelope.pretty_data());
    out.push('\n');
    out
}

/// Envelope as a JSON document, for `--output json`.
pub fn envelope_json(envelope: &ResponseEnvelope) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(envelope)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use paygate_sim::EndpointCatalog;
    use serde_json::json;
    use std::collections::BTreeMap;

    #[test]
    fn test_endpoint_list_marks_selection() {
        let catalog = EndpointCatalog::builtin().unwrap();
        let all = catalog.filter("");
        let out = endpoint_list(&all, Some("refund"));
        assert_eq!(out.lines().count(), 5);
        let refund_line = out.lines().find(|l| l.contains("refund ")).unwrap();
        assert!(refund_line.starts_with('>'));
        assert!(out.lines().filter(|l| l.starts_with('>')).count() == 1);
    }

    #[test]
    fn test_endpoint_list_empty() {
        assert!(endpoint_list(&[], None).contains("No endpoints match"));
    }

    #[test]
    fn test_endpoint_detail_lists_schema_fields() {
        let catalog = EndpointCatalog::builtin().unwrap();
        let pay = catalog.get("pay").unwrap();
        let out = endpoint_detail(pay, &catalog.example_body("pay"));
        assert!(out.contains("/api/pay.js"));
        assert!(out.contains("depositAddress"));
        assert!(out.contains("\"merchantId\": \"merchant_12345\""));
    }

    #[test]
    fn test_envelope_success_shows_headers() {
        let mut headers = BTreeMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());
        let out = envelope(&ResponseEnvelope::ok(json!({"ok": true}), headers));
        assert!(out.contains("200 OK"));
        assert!(out.contains("content-type"));
        assert!(out.contains("\"ok\": true"));
    }

    #[test]
    fn test_envelope_failure_has_no_headers() {
        let out = envelope(&ResponseEnvelope::bad_request());
        assert!(out.contains("400 Bad Request"));
        assert!(out.contains("Invalid request format"));
        assert!(!out.contains("content-type"));
    }

    #[test]
    fn test_envelope_json_uses_camel_case() {
        let out = envelope_json(&ResponseEnvelope::bad_request()).unwrap();
        let value: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["statusText"], "Bad Request");
    }

    #[test]
    fn test_tag_color_fallback() {
        assert_eq!(tag_color("bg-green-500"), GREEN);
        assert_eq!(tag_color("weird"), CYAN);
    }
}
