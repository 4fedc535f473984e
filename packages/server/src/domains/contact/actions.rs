//! Contact form submission

use chrono::Utc;
use tracing::{info, warn};

use super::email::build_message;
use super::models::ContactInput;
use crate::common::{ApiError, ApiResult};
use crate::kernel::{ContactMailer, ServerDeps};

/// What happened to a submission that was accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactOutcome {
    Sent,
    /// Honeypot filled in; reported as sent but dropped
    Discarded,
}

pub fn mailer(deps: &ServerDeps) -> ApiResult<&ContactMailer> {
    deps.contact.as_ref().ok_or_else(|| {
        ApiError::Misconfigured(
            "Server misconfigured: missing RESEND_API_KEY / CONTACT_TO / CONTACT_FROM".to_string(),
        )
    })
}

/// Throttle by client address. Checked before the body is validated.
pub async fn check_rate_limit(client_key: &str, deps: &ServerDeps) -> ApiResult<()> {
    if deps.contact_limiter.check(client_key).await {
        Ok(())
    } else {
        warn!(client = %client_key, "Contact form rate limited");
        Err(ApiError::TooManyRequests)
    }
}

/// Validate and send a contact submission
pub async fn submit_contact(
    input: ContactInput,
    client_key: &str,
    deps: &ServerDeps,
) -> ApiResult<ContactOutcome> {
    let mailer = mailer(deps)?;

    let spam = input.is_spam();
    let submission = input.validate()?;
    if spam {
        info!(client = %client_key, "Discarded contact submission (honeypot)");
        return Ok(ContactOutcome::Discarded);
    }

    let message = build_message(&submission, client_key, &mailer.to, &mailer.from, Utc::now());
    if let Err(e) = mailer.service.send(message).await {
        warn!(error = %e, "Failed to send contact email");
        let reason = e.to_string();
        return Err(ApiError::BadGateway(if reason.trim().is_empty() {
            "Email provider error. Please try again.".to_string()
        } else {
            reason
        }));
    }

    info!(service = %submission.service, "Sent contact email");
    Ok(ContactOutcome::Sent)
}
