//! Server dependencies for handlers and actions (using traits for testability)
//!
//! This module provides the central dependency container used by all domains.
//! All external services use trait abstractions to enable testing.

use anyhow::Result;
use async_trait::async_trait;
use resend::{ResendService, SendEmailRequest};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domains::auth::{JwtService, SessionCookies};
use crate::kernel::{
    BaseAdminStore, BaseBlobStorage, BaseEmailService, BasePostStore, BaseRateLimiter,
    EmailMessage,
};

// =============================================================================
// ResendService Adapter (implements BaseEmailService trait)
// =============================================================================

/// Wrapper around ResendService that implements BaseEmailService trait
pub struct ResendAdapter(pub Arc<ResendService>);

impl ResendAdapter {
    pub fn new(service: Arc<ResendService>) -> Self {
        Self(service)
    }
}

#[async_trait]
impl BaseEmailService for ResendAdapter {
    async fn send(&self, message: EmailMessage) -> Result<()> {
        let request = SendEmailRequest {
            from: message.from,
            to: vec![message.to],
            subject: message.subject,
            html: Some(message.html),
            text: Some(message.text),
            reply_to: message.reply_to.into_iter().collect(),
        };

        self.0
            .send_email(&request)
            .await
            .map(|_| ())
            .map_err(|e| {
                tracing::warn!(error = %e, "Resend rejected email");
                anyhow::anyhow!("{}", e.message)
            })
    }
}

/// Email service plus the fixed contact-form addresses
#[derive(Clone)]
pub struct ContactMailer {
    pub service: Arc<dyn BaseEmailService>,
    pub to: String,
    pub from: String,
}

// =============================================================================
// ServerDeps
// =============================================================================

/// Server dependencies accessible to handlers (using traits for testability)
#[derive(Clone)]
pub struct ServerDeps {
    /// Only used for health checks; None when running against in-memory stores
    pub db_pool: Option<PgPool>,
    pub admins: Arc<dyn BaseAdminStore>,
    pub posts: Arc<dyn BasePostStore>,
    /// None when email settings are missing; contact form reports misconfiguration
    pub contact: Option<ContactMailer>,
    /// None when no blob token is configured
    pub blob_storage: Option<Arc<dyn BaseBlobStorage>>,
    /// Throttles contact form submissions per client address
    pub contact_limiter: Arc<dyn BaseRateLimiter>,
    pub jwt_service: Arc<JwtService>,
    pub session_cookies: SessionCookies,
}

impl ServerDeps {
    /// Create new ServerDeps with the given dependencies
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        db_pool: Option<PgPool>,
        admins: Arc<dyn BaseAdminStore>,
        posts: Arc<dyn BasePostStore>,
        contact: Option<ContactMailer>,
        blob_storage: Option<Arc<dyn BaseBlobStorage>>,
        contact_limiter: Arc<dyn BaseRateLimiter>,
        jwt_service: Arc<JwtService>,
        session_cookies: SessionCookies,
    ) -> Self {
        Self {
            db_pool,
            admins,
            posts,
            contact,
            blob_storage,
            contact_limiter,
            jwt_service,
            session_cookies,
        }
    }
}
