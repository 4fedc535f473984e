//! Login action

use anyhow::Result;
use tracing::{debug, info};

use crate::common::validation::normalize_email;
use crate::common::{ApiError, ApiResult};
use crate::domains::auth::models::Admin;
use crate::domains::auth::password::verify_password;
use crate::kernel::{BaseAdminStore, ServerDeps};

/// Check an email/password pair against the stored hash.
///
/// Unknown email and wrong password both return `None`; callers must not
/// distinguish them.
pub async fn verify_credentials(
    email: &str,
    password: &str,
    admins: &dyn BaseAdminStore,
) -> Result<Option<Admin>> {
    let email = normalize_email(email);

    let Some(admin) = admins.find_by_email(&email).await? else {
        debug!("Login attempt for unknown email");
        return Ok(None);
    };

    if verify_password(password, &admin.password_hash).await? {
        Ok(Some(admin))
    } else {
        debug!(admin_id = %admin.id, "Login attempt with wrong password");
        Ok(None)
    }
}

/// Verify credentials and mint a session token.
pub async fn login(email: &str, password: &str, deps: &ServerDeps) -> ApiResult<String> {
    let admin = verify_credentials(email, password, deps.admins.as_ref())
        .await?
        .ok_or(ApiError::InvalidCredentials)?;

    let token = deps.jwt_service.create_token(admin.id, &admin.email)?;
    info!(admin_id = %admin.id, "Admin logged in");

    Ok(token)
}
