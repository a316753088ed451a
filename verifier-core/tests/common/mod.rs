#![allow(dead_code)]

use serde_json::{json, Value};
use std::net::TcpListener;
use std::sync::Once;
use verifier_core::config::VerifierConfig;
use verifier_core::ReadinessVerifier;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

static INIT: Once = Once::new();

/// Initialize tracing for tests (only once).
pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("info,verifier_core=debug")
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// Health body in the conversion service's format.
pub fn health_body(chromium: &str, libreoffice: &str) -> Value {
    let overall = if chromium == "up" && libreoffice == "up" {
        "up"
    } else {
        "down"
    };
    json!({
        "status": overall,
        "details": {
            "chromium": { "status": chromium, "timestamp": "2024-05-01T10:00:00Z" },
            "libreoffice": { "status": libreoffice, "timestamp": "2024-05-01T10:00:00Z" }
        }
    })
}

pub async fn mount_health(server: &MockServer, chromium: &str, libreoffice: &str) {
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(health_body(chromium, libreoffice)))
        .mount(server)
        .await;
}

pub fn config_for(endpoint: &str) -> VerifierConfig {
    VerifierConfig {
        endpoint: endpoint.to_string(),
        status_timeout_secs: 1,
        roundtrip_timeout_secs: 2,
        ..Default::default()
    }
}

pub fn verifier_for(server: &MockServer) -> ReadinessVerifier {
    init_tracing();
    ReadinessVerifier::new(&config_for(&server.uri())).expect("Failed to build verifier")
}

/// An endpoint nothing listens on.
pub fn refused_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
    let port = listener.local_addr().expect("No local addr").port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}
