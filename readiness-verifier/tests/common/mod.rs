#![allow(dead_code)]

use assert_cmd::assert::Assert;
use assert_cmd::Command;
use serde_json::{json, Value};
use std::net::TcpListener;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub fn health_body(chromium: &str, libreoffice: &str) -> Value {
    let overall = if chromium == "up" && libreoffice == "up" {
        "up"
    } else {
        "down"
    };
    json!({
        "status": overall,
        "details": {
            "chromium": { "status": chromium },
            "libreoffice": { "status": libreoffice }
        }
    })
}

pub async fn healthy_server(chromium: &str, libreoffice: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(health_body(chromium, libreoffice)))
        .mount(&server)
        .await;
    server
}

pub fn refused_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
    let port = listener.local_addr().expect("No local addr").port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}

/// Runs the binary off the async runtime with a clean `VERIFIER__*`
/// environment plus `envs`.
pub async fn run_cli(args: &[&str], envs: &[(&str, &str)]) -> Assert {
    let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
    let envs: Vec<(String, String)> = envs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    tokio::task::spawn_blocking(move || {
        let mut cmd = Command::cargo_bin("readiness-verifier").expect("binary not built");
        for (key, _) in std::env::vars() {
            if key.starts_with("VERIFIER__") {
                cmd.env_remove(key);
            }
        }
        cmd.env_remove("RUST_LOG");
        cmd.envs(envs).args(args).assert()
    })
    .await
    .expect("CLI task panicked")
}
