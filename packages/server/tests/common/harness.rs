//! Test harness driving the real router with in-memory dependencies.
//!
//! Every test gets fresh stores, mocks and rate limiter; requests go through
//! the full middleware stack via `tower::ServiceExt::oneshot`.

use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use portfolio_core::domains::auth::SESSION_COOKIE_NAME;
use portfolio_core::kernel::test_dependencies::TestDependencies;
use portfolio_core::kernel::ServerDeps;
use portfolio_core::server::build_app;
use serde_json::{json, Value};
use test_context::AsyncTestContext;
use tower::ServiceExt;

pub const ADMIN_EMAIL: &str = "a@x.com";
pub const ADMIN_NAME: &str = "A";
pub const ADMIN_PASSWORD: &str = "longenough1";

/// Captured response: status, headers and the parsed JSON body
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    /// Raw `Set-Cookie` header for the session cookie, if any
    pub fn session_set_cookie(&self) -> Option<String> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find(|v| v.starts_with(&format!("{}=", SESSION_COOKIE_NAME)))
            .map(str::to_string)
    }

    /// Value of the session cookie that was set, if any
    pub fn session_token(&self) -> Option<String> {
        let set_cookie = self.session_set_cookie()?;
        let pair = set_cookie.split(';').next()?;
        let (_, value) = pair.split_once('=')?;
        Some(value.to_string())
    }

    pub fn error(&self) -> &str {
        self.body["error"].as_str().unwrap_or_default()
    }
}

/// Test harness for HTTP-level tests.
///
/// # Example using test-context
///
/// ```ignore
/// use test_context::test_context;
///
/// #[test_context(TestHarness)]
/// #[tokio::test]
/// async fn my_test(ctx: &TestHarness) {
///     let res = ctx.get("/api/posts", None).await;
///     // ... assertions
/// }
/// ```
pub struct TestHarness {
    /// Handles to the mocks behind the router
    pub deps: TestDependencies,
    app: Router,
}

impl AsyncTestContext for TestHarness {
    async fn setup() -> Self {
        Self::new()
    }

    async fn teardown(self) {}
}

impl TestHarness {
    pub fn new() -> Self {
        Self::with_deps(TestDependencies::new())
    }

    pub fn with_deps(deps: TestDependencies) -> Self {
        let server_deps = deps.server_deps();
        Self::with_server_deps(deps, server_deps)
    }

    /// Use when a test needs to tweak the ServerDeps (e.g. remove a capability)
    pub fn with_server_deps(deps: TestDependencies, server_deps: ServerDeps) -> Self {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let app = build_app(server_deps, &["http://localhost:3000".to_string()]);
        Self { deps, app }
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("failed to read response body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub fn request(method: Method, uri: &str, token: Option<&str>) -> axum::http::request::Builder {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(
                header::COOKIE,
                format!("{}={}", SESSION_COOKIE_NAME, token),
            );
        }
        builder
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> TestResponse {
        let request = Self::request(Method::GET, uri, token)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> TestResponse {
        let request = Self::request(Method::DELETE, uri, token)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    pub async fn json(
        &self,
        method: Method,
        uri: &str,
        body: Value,
        token: Option<&str>,
    ) -> TestResponse {
        let request = Self::request(method, uri, token)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    pub async fn post_json(&self, uri: &str, body: Value, token: Option<&str>) -> TestResponse {
        self.json(Method::POST, uri, body, token).await
    }

    pub async fn put_json(&self, uri: &str, body: Value, token: Option<&str>) -> TestResponse {
        self.json(Method::PUT, uri, body, token).await
    }

    pub async fn register(&self, email: &str, name: &str, password: &str) -> TestResponse {
        self.post_json(
            "/api/auth/register",
            json!({ "email": email, "name": name, "password": password }),
            None,
        )
        .await
    }

    pub async fn login(&self, email: &str, password: &str) -> TestResponse {
        self.post_json(
            "/api/auth/login",
            json!({ "email": email, "password": password }),
            None,
        )
        .await
    }

    /// Register the bootstrap admin and return its session token
    pub async fn signed_in(&self) -> String {
        let res = self.register(ADMIN_EMAIL, ADMIN_NAME, ADMIN_PASSWORD).await;
        assert_eq!(res.status, StatusCode::OK, "bootstrap registration failed");
        res.session_token().expect("registration sets a session cookie")
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
