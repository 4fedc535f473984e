//! Integration tests for the public contact form.

mod common;

use axum::body::Body;
use axum::http::{header, Method, StatusCode};
use common::{TestHarness, TestResponse};
use portfolio_core::kernel::test_dependencies::{MockEmailService, TestDependencies};
use serde_json::{json, Value};
use test_context::test_context;

fn inquiry() -> Value {
    json!({
        "name": "Grace Hopper",
        "email": "grace@example.com",
        "service": "Web Development",
        "message": "I would like a new portfolio site.",
    })
}

async fn submit_from(ctx: &TestHarness, ip: &str, body: Value) -> TestResponse {
    ctx.send(
        TestHarness::request(Method::POST, "/api/contact", None)
            .header(header::CONTENT_TYPE, "application/json")
            .header("x-forwarded-for", ip)
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

#[test_context(TestHarness)]
#[tokio::test]
async fn valid_inquiry_is_emailed(ctx: &TestHarness) {
    let res = submit_from(ctx, "203.0.113.10", inquiry()).await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, json!({ "ok": true, "message": "Sent!" }));

    let sent = ctx.deps.email.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "owner@example.com");
    assert_eq!(sent[0].from, "site@example.com");
    assert_eq!(sent[0].subject, "New Web Development inquiry from Grace Hopper");
    assert_eq!(sent[0].reply_to.as_deref(), Some("grace@example.com"));
    assert!(sent[0].text.contains("203.0.113.10"));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn first_validation_issue_is_reported(ctx: &TestHarness) {
    let mut body = inquiry();
    body["name"] = json!("");
    body["service"] = json!("Plumbing");
    let res = submit_from(ctx, "203.0.113.11", body).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body, json!({ "ok": false, "error": "Name is required" }));

    let mut body = inquiry();
    body["service"] = json!("Plumbing");
    let res = submit_from(ctx, "203.0.113.11", body).await;
    assert_eq!(res.error(), "Invalid service");

    let mut body = inquiry();
    body["message"] = json!("x".repeat(5001));
    let res = submit_from(ctx, "203.0.113.11", body).await;
    assert_eq!(res.error(), "Message must be at most 5000 characters");

    assert!(ctx.deps.email.sent().is_empty());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn honeypot_pretends_success(ctx: &TestHarness) {
    let mut body = inquiry();
    body["website"] = json!("http://cheap-pills.example");

    let res = submit_from(ctx, "203.0.113.12", body).await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["message"], "Sent!");
    assert!(ctx.deps.email.sent().is_empty());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn fifth_submission_in_window_is_rate_limited(ctx: &TestHarness) {
    for _ in 0..4 {
        let res = submit_from(ctx, "198.51.100.4", inquiry()).await;
        assert_eq!(res.status, StatusCode::OK);
    }

    let limited = submit_from(ctx, "198.51.100.4", inquiry()).await;
    assert_eq!(limited.status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(
        limited.body,
        json!({ "ok": false, "error": "Too many requests. Try again in a minute." })
    );

    // Limited before validation
    let limited_invalid = submit_from(ctx, "198.51.100.4", json!({})).await;
    assert_eq!(limited_invalid.status, StatusCode::TOO_MANY_REQUESTS);

    let other_client = submit_from(ctx, "198.51.100.5", inquiry()).await;
    assert_eq!(other_client.status, StatusCode::OK);
    assert_eq!(ctx.deps.email.sent().len(), 5);
}

#[tokio::test]
async fn provider_failure_is_bad_gateway() {
    let ctx = TestHarness::with_deps(TestDependencies::with_email(MockEmailService::failing(
        "The example.com domain is not verified",
    )));

    let res = submit_from(&ctx, "203.0.113.13", inquiry()).await;

    assert_eq!(res.status, StatusCode::BAD_GATEWAY);
    assert_eq!(res.error(), "The example.com domain is not verified");
}

#[tokio::test]
async fn missing_email_settings_is_server_error() {
    let deps = TestDependencies::new();
    let mut server_deps = deps.server_deps();
    server_deps.contact = None;
    let ctx = TestHarness::with_server_deps(deps, server_deps);

    let res = submit_from(&ctx, "203.0.113.14", json!({})).await;

    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(res.error().starts_with("Server misconfigured"));
}
