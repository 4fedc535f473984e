//! Session check: cookie token → claims → admin record

use anyhow::Result;
use tracing::debug;

use crate::domains::auth::jwt::{Claims, JwtService};
use crate::domains::auth::models::Admin;
use crate::kernel::ServerDeps;

/// Result of evaluating a request's session.
///
/// Every request is evaluated on its own; nothing carries over between requests.
#[derive(Debug)]
pub enum SessionOutcome {
    /// No cookie, or a malformed, forged or expired token
    Unauthenticated,
    /// Token is valid but the admin it names no longer exists
    IdentityMissing(Claims),
    Authorized { claims: Claims, admin: Admin },
}

/// Verify a session token, collapsing every failure into `None`.
pub fn authenticate(token: Option<&str>, jwt_service: &JwtService) -> Option<Claims> {
    let token = token?;
    match jwt_service.verify_token(token) {
        Ok(claims) => Some(claims),
        Err(reason) => {
            debug!(%reason, "Rejected session token");
            None
        }
    }
}

/// Authenticate and re-resolve the admin by the token's email claim.
pub async fn resolve_session(token: Option<&str>, deps: &ServerDeps) -> Result<SessionOutcome> {
    let Some(claims) = authenticate(token, &deps.jwt_service) else {
        return Ok(SessionOutcome::Unauthenticated);
    };

    match deps.admins.find_by_email(&claims.email).await? {
        Some(admin) => Ok(SessionOutcome::Authorized { claims, admin }),
        None => Ok(SessionOutcome::IdentityMissing(claims)),
    }
}
