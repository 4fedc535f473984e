//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use resend::{ResendOptions, ResendService};
use sqlx::PgPool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::domains::auth::{JwtService, SessionCookies};
use crate::domains::uploads::MAX_UPLOAD_BYTES;
use crate::kernel::{
    BaseBlobStorage, ContactMailer, FixedWindowRateLimiter, PgAdminStore, PgPostStore,
    ResendAdapter, ServerDeps, VercelBlobStorage,
};
use crate::server::middleware::{extract_client_ip, session_auth_middleware};
use crate::server::routes::{
    contact_handler, create_post_handler, delete_post_handler, get_post_handler,
    health_handler, list_posts_handler, login_handler, logout_handler, me_handler,
    register_handler, update_post_handler, upload_handler,
};

/// Multipart framing allowance on top of the file size limit
const UPLOAD_BODY_OVERHEAD: usize = 1024 * 1024;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub deps: Arc<ServerDeps>,
}

/// Wire production dependencies from configuration
pub fn server_deps_from_config(config: &Config, pool: PgPool) -> ServerDeps {
    let contact = config.contact.as_ref().map(|contact| {
        let resend = Arc::new(ResendService::new(ResendOptions {
            api_key: contact.resend_api_key.clone(),
            base_url: None,
        }));
        ContactMailer {
            service: Arc::new(ResendAdapter::new(resend)),
            to: contact.to.clone(),
            from: contact.from.clone(),
        }
    });
    if contact.is_none() {
        tracing::warn!("Contact email settings missing; contact form will report misconfiguration");
    }

    let blob_storage = config
        .blob_read_write_token
        .clone()
        .map(|token| Arc::new(VercelBlobStorage::new(token)) as Arc<dyn BaseBlobStorage>);

    ServerDeps::new(
        Some(pool.clone()),
        Arc::new(PgAdminStore::new(pool.clone())),
        Arc::new(PgPostStore::new(pool)),
        contact,
        blob_storage,
        Arc::new(FixedWindowRateLimiter::for_contact_form()),
        Arc::new(JwtService::new(&config.jwt_secret)),
        SessionCookies::new(config.environment.is_production()),
    )
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    // Credentials must be allowed for the session cookie to flow cross-origin
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE])
        .allow_credentials(true)
}

/// Build the Axum application router
pub fn build_app(deps: ServerDeps, allowed_origins: &[String]) -> Router {
    let state = AppState {
        deps: Arc::new(deps),
    };

    let api = Router::new()
        .route("/auth/login", post(login_handler))
        .route("/auth/register", post(register_handler))
        .route("/auth/me", get(me_handler))
        .route("/auth/logout", post(logout_handler))
        .route("/posts", get(list_posts_handler).post(create_post_handler))
        .route(
            "/posts/:slug",
            get(get_post_handler)
                .put(update_post_handler)
                .delete(delete_post_handler),
        )
        .route("/contact", post(contact_handler))
        .route(
            "/upload",
            post(upload_handler).layer(DefaultBodyLimit::max(
                MAX_UPLOAD_BYTES + UPLOAD_BODY_OVERHEAD,
            )),
        );

    Router::new()
        .nest("/api", api)
        .route("/health", get(health_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            session_auth_middleware,
        ))
        .layer(middleware::from_fn(extract_client_ip))
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
