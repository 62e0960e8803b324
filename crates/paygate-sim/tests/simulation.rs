//! End-to-end tests for the simulation engine.
//!
//! These drive the public API the way the console does: load a catalog,
//! select endpoints, edit bodies and run simulated calls.

use chrono::{DateTime, Utc};
use paygate_sim::{
    EndpointCatalog, MockResponseGenerator, SessionPhase, SessionState, SimulationController,
    SimulatorConfig, DEFAULT_INVOICE_ID, DEFAULT_MERCHANT_ID, PLACEHOLDER_QR, SEED_PHRASE,
};
use regex::Regex;
use serde_json::{json, Value};
use std::sync::Arc;

const SUPPORTED: [&str; 5] = ["configure", "pay", "cancel", "refund", "callback"];

fn catalog() -> Arc<EndpointCatalog> {
    Arc::new(EndpointCatalog::builtin().expect("built-in catalog loads"))
}

fn controller() -> SimulationController {
    let config = SimulatorConfig {
        latency_ms: 0,
        ..Default::default()
    };
    SimulationController::new(catalog(), &config)
}

fn timestamp(value: &Value) -> DateTime<Utc> {
    value
        .as_str()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|t| t.with_timezone(&Utc))
        .unwrap_or_else(|| panic!("not a timestamp: {value}"))
}

fn assert_matches(pattern: &str, value: &Value) {
    let re = Regex::new(pattern).unwrap();
    let s = value.as_str().unwrap_or_else(|| panic!("not a string: {value}"));
    assert!(re.is_match(s), "{s:?} does not match {pattern}");
}

#[test]
fn test_defaults_for_empty_and_unparseable_bodies() {
    let generator = MockResponseGenerator::default();

    for body in ["", "{not json"] {
        let configure = generator.generate("configure", body);
        assert_matches(r"^wallet_[0-9a-z]{9}$", &configure["walletId"]);
        assert_eq!(configure["seedPhrase"], SEED_PHRASE);
        assert_eq!(configure["status"], "configured");

        let pay = generator.generate("pay", body);
        assert_eq!(pay["merchantId"], DEFAULT_MERCHANT_ID);
        assert_eq!(pay["amount"], 100);
        assert_eq!(pay["currency"], "USDT");
        assert_eq!(pay["qrCodeUrl"], PLACEHOLDER_QR);
        assert_eq!(
            pay["callbackUrl"],
            "https://merchant.example.com/webhook/merchant_12345"
        );

        let cancel = generator.generate("cancel", body);
        assert_eq!(cancel["invoiceId"], DEFAULT_INVOICE_ID);
        assert_eq!(cancel["message"], "Invoice cancelled successfully");

        let refund = generator.generate("refund", body);
        assert_eq!(refund["originalInvoiceId"], DEFAULT_INVOICE_ID);
        assert_eq!(refund["refundAmount"], 95.5);
        assert_eq!(refund["reason"], "unspecified");
        assert_eq!(refund["refundStatus"], "pending");

        let callback = generator.generate("callback", body);
        assert_eq!(
            callback,
            json!({"received": true, "message": "Event payment_confirmed processed"})
        );
    }
}

#[test]
fn test_pay_scenario() {
    let before = Utc::now();
    let data = MockResponseGenerator::default().generate(
        "pay",
        r#"{"merchantId":"m1","amount":42,"currency":"USDT"}"#,
    );

    assert_eq!(data["merchantId"], "m1");
    assert_eq!(data["amount"], 42);
    assert_eq!(data["currency"], "USDT");
    assert_eq!(data["status"], "pending");
    assert_matches(r"^inv_[0-9a-z]{9}$", &data["invoiceId"]);
    assert_matches(r"^0x[0-9a-f]{40}$", &data["depositAddress"]);
    assert!(timestamp(&data["expiresAt"]) > before);
}

#[test]
fn test_refund_addresses_are_independent() {
    let data = MockResponseGenerator::default().generate("refund", "{}");
    assert_matches(r"^refund_[0-9a-z]{9}$", &data["refundInvoiceId"]);
    assert_matches(r"^0x[0-9a-f]{40}$", &data["merchantRefundAddress"]);
    assert_matches(r"^0x[0-9a-f]{40}$", &data["customerRefundAddress"]);
    assert_ne!(data["merchantRefundAddress"], data["customerRefundAddress"]);
}

#[test]
fn test_cancel_scenario() {
    let data = MockResponseGenerator::default().generate("cancel", r#"{"invoiceId":"inv_999"}"#);
    assert_eq!(data["invoiceId"], "inv_999");
    assert_eq!(data["status"], "cancelled");
    assert_eq!(data["message"], "Invoice cancelled successfully");
    timestamp(&data["cancelledAt"]);
    assert_eq!(data.as_object().unwrap().len(), 4);
}

#[test]
fn test_unsupported_id_is_empty_object() {
    let generator = MockResponseGenerator::default();
    for id in ["", "PAY", "refunds", "unknown-id"] {
        assert_eq!(generator.generate(id, r#"{"invoiceId":"x"}"#), json!({}));
    }
}

#[tokio::test]
async fn test_run_test_unknown_id_succeeds_with_empty_data() {
    let envelope = controller().run_test("unknown-id", "{}").await;
    assert_eq!(envelope.status, 200);
    assert_eq!(envelope.status_text, "OK");
    assert_eq!(envelope.data, json!({}));
    assert!(envelope.headers.is_some());
}

#[tokio::test]
async fn test_run_test_status_is_always_200_or_400() {
    let controller = controller();
    let bodies = ["", "{}", "null", "[]", "{bad", "\"text\"", r#"{"amount":"x"}"#];
    for id in SUPPORTED.iter().copied().chain(["other"]) {
        for body in bodies {
            let envelope = controller.run_test(id, body).await;
            assert!(
                envelope.status == 200 || envelope.status == 400,
                "{id} {body:?} -> {}",
                envelope.status
            );
        }
    }
}

#[tokio::test]
async fn test_malformed_json_fails_only_for_body_reading_endpoints() {
    let controller = controller();
    for id in ["pay", "cancel", "refund", "callback"] {
        let envelope = controller.run_test(id, "{\"invoiceId\": ").await;
        assert_eq!(envelope.status, 400, "{id}");
        assert_eq!(envelope.status_text, "Bad Request");
        assert_eq!(envelope.data, json!({"error": "Invalid request format"}));
        assert!(envelope.headers.is_none());
    }

    let envelope = controller.run_test("configure", "{\"invoiceId\": ").await;
    assert_eq!(envelope.status, 200);
}

#[tokio::test]
async fn test_null_body_fails_for_body_reading_endpoints() {
    let controller = controller();
    for id in ["pay", "cancel", "refund", "callback"] {
        let envelope = controller.run_test(id, "null").await;
        assert_eq!(envelope.status, 400, "{id}");
        assert_eq!(envelope.data, json!({"error": "Invalid request format"}));
    }

    // Non-object, non-null JSON carries no fields and falls back to defaults.
    for body in ["[]", "\"text\"", "42", "true"] {
        let envelope = controller.run_test("cancel", body).await;
        assert_eq!(envelope.status, 200, "{body}");
        assert_eq!(envelope.data["invoiceId"], DEFAULT_INVOICE_ID);
    }
    assert_eq!(controller.run_test("configure", "null").await.status, 200);
}

#[tokio::test]
async fn test_session_cycle() {
    let controller = controller();
    let mut session = SessionState::new(controller.catalog().clone());

    for id in SUPPORTED {
        session.select(id).unwrap();
        assert_eq!(session.body(), controller.catalog().example_body(id));
        assert!(session.response().is_none());

        let response = controller.run_session(&mut session).await.unwrap();
        assert_eq!(response.status, 200, "example body for {id} should succeed");
        assert!(matches!(session.phase(), SessionPhase::Resolved(_)));
    }

    session.edit_body("{ oops");
    assert_eq!(controller.run_session(&mut session).await.unwrap().status, 400);

    // Switching endpoints wipes the failure and reseeds the editor.
    session.select("pay").unwrap();
    assert!(session.response().is_none());
    assert_eq!(session.phase(), &SessionPhase::Idle);
}

#[tokio::test]
async fn test_example_request_round_trips_through_generator() {
    let controller = controller();
    let catalog = controller.catalog().clone();

    let pay = controller.run_test("pay", &catalog.example_body("pay")).await;
    assert_eq!(pay.data["merchantId"], "merchant_12345");
    assert_eq!(pay.data["amount"], 150.5);

    let refund = controller
        .run_test("refund", &catalog.example_body("refund"))
        .await;
    assert_eq!(refund.data["reason"], "Customer requested refund");
}
