mod common;

use common::{healthy_server, refused_endpoint, run_cli};
use predicates::prelude::*;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn healthy_service_exits_zero() {
    let server = healthy_server("up", "up").await;

    run_cli(&["--endpoint", &server.uri()], &[])
        .await
        .success()
        .stdout(predicate::str::contains(": healthy"))
        .stdout(predicate::str::contains("libreoffice: up"));
}

#[tokio::test]
async fn endpoint_can_come_from_environment() {
    let server = healthy_server("up", "up").await;

    run_cli(&[], &[("VERIFIER__ENDPOINT", &server.uri())])
        .await
        .success();
}

#[tokio::test]
async fn json_output_has_exactly_the_status_fields() {
    let server = healthy_server("up", "up").await;

    let assert = run_cli(&["--json", "--endpoint", &server.uri()], &[])
        .await
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let value: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    let obj = value.as_object().unwrap();
    let mut keys: Vec<_> = obj.keys().cloned().collect();
    keys.sort();
    assert_eq!(keys, vec!["chromium", "libreoffice", "status", "timestamp"]);
    assert_eq!(obj["status"], "healthy");
}

#[tokio::test]
async fn degraded_service_exits_one() {
    let server = healthy_server("down", "up").await;

    run_cli(&["--endpoint", &server.uri()], &[])
        .await
        .code(1)
        .stdout(predicate::str::contains("degraded (chromium down)"));
}

#[tokio::test]
async fn unreachable_service_exits_two() {
    let endpoint = refused_endpoint();

    run_cli(&["--json", "--endpoint", &endpoint], &[])
        .await
        .code(2)
        .stdout(predicate::str::contains(r#""status":"down""#));
}

#[tokio::test]
async fn empty_roundtrip_exits_one_with_distinct_message() {
    let server = healthy_server("up", "up").await;
    Mock::given(method("POST"))
        .and(path("/forms/chromium/convert/html"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    run_cli(&["--full", "--endpoint", &server.uri()], &[])
        .await
        .code(1)
        .stdout(predicate::str::contains(
            "status endpoint healthy, conversion roundtrip failed",
        ))
        .stdout(predicate::str::contains("roundtrip:   failed"));
}

#[tokio::test]
async fn missing_required_credentials_exit_three() {
    let server = healthy_server("up", "up").await;

    run_cli(
        &["--endpoint", &server.uri()],
        &[("VERIFIER__REQUIRE_AUTH", "true")],
    )
    .await
    .code(3)
    .stderr(predicate::str::contains("no credentials"));
}

#[tokio::test]
async fn invalid_endpoint_exits_three() {
    run_cli(&["--endpoint", "pdf.internal"], &[]).await.code(3);
}

#[tokio::test]
async fn conflicting_mode_flags_exit_three() {
    run_cli(&["--json", "--full"], &[]).await.code(3);
}

#[tokio::test]
async fn help_exits_zero() {
    run_cli(&["--help"], &[])
        .await
        .success()
        .stdout(predicate::str::contains("--full"));
}

#[tokio::test]
async fn wait_succeeds_against_healthy_service() {
    let server = healthy_server("up", "up").await;

    run_cli(
        &["wait", "--attempts", "3", "--delay", "1", "--endpoint", &server.uri()],
        &[],
    )
    .await
    .success()
    .stdout(predicate::str::contains("ready after 1 attempt(s)"));
}

#[tokio::test]
async fn wait_fails_when_service_never_comes_up() {
    let endpoint = refused_endpoint();

    run_cli(
        &["wait", "--attempts", "2", "--delay", "1", "--endpoint", &endpoint],
        &[],
    )
    .await
    .code(2)
    .stdout(predicate::str::contains("not ready after 2 attempt(s)"));
}

#[tokio::test]
async fn wait_rejects_zero_attempts() {
    run_cli(&["wait", "--attempts", "0"], &[]).await.code(3);
}
