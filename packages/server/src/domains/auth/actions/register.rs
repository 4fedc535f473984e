//! Register action (bootstrap only)

use tracing::{info, warn};

use crate::common::validation::{is_blank, is_valid_email, normalize_email};
use crate::common::{is_unique_violation, ApiError, ApiResult};
use crate::domains::auth::models::{Admin, NewAdmin};
use crate::domains::auth::password::hash_password;
use crate::kernel::ServerDeps;

pub const MIN_PASSWORD_LEN: usize = 8;

/// Validated registration input
#[derive(Debug, Clone)]
pub struct Registration {
    pub email: String,
    pub name: String,
    pub password: String,
}

impl Registration {
    /// Normalizes the email and trims the name
    pub fn parse(email: &str, name: &str, password: &str) -> ApiResult<Self> {
        let email = normalize_email(email);
        if !is_valid_email(&email)
            || is_blank(name)
            || password.chars().count() < MIN_PASSWORD_LEN
        {
            return Err(ApiError::invalid_input());
        }

        Ok(Self {
            email,
            name: name.trim().to_string(),
            password: password.to_string(),
        })
    }
}

/// Registration is only open while no admin exists.
pub async fn ensure_registration_open(deps: &ServerDeps) -> ApiResult<()> {
    if deps.admins.count().await? > 0 {
        return Err(registration_closed());
    }
    Ok(())
}

/// Create the first admin and mint a session token for it.
///
/// The store inserts only while empty, so concurrent callers cannot create
/// more than one admin. Callers run `ensure_registration_open` first for the
/// early 403.
pub async fn register_admin(
    registration: Registration,
    deps: &ServerDeps,
) -> ApiResult<(Admin, String)> {
    let password_hash = hash_password(&registration.password).await?;
    let admin = deps
        .admins
        .create_first(NewAdmin {
            email: registration.email,
            name: registration.name,
            password_hash,
        })
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                email_taken()
            } else {
                ApiError::Unexpected(e)
            }
        })?
        .ok_or_else(registration_closed)?;

    let token = deps.jwt_service.create_token(admin.id, &admin.email)?;
    info!(admin_id = %admin.id, "Registered bootstrap admin");

    Ok((admin, token))
}

fn registration_closed() -> ApiError {
    warn!("Registration attempted after bootstrap");
    ApiError::Forbidden("Registration closed".to_string())
}

fn email_taken() -> ApiError {
    ApiError::Conflict("Email already exists".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::test_dependencies::TestDependencies;
    use crate::kernel::BaseAdminStore;

    #[test]
    fn test_parse_validates_input() {
        assert!(Registration::parse("a@x.com", "A", "longenough1").is_ok());
        assert!(Registration::parse("not-an-email", "A", "longenough1").is_err());
        assert!(Registration::parse("a@x.com", "  ", "longenough1").is_err());
        assert!(Registration::parse("a@x.com", "A", "short").is_err());
    }

    #[test]
    fn test_parse_normalizes() {
        let reg = Registration::parse(" A@X.com ", " Ada ", "longenough1").unwrap();
        assert_eq!(reg.email, "a@x.com");
        assert_eq!(reg.name, "Ada");
    }

    #[tokio::test]
    async fn test_first_registration_then_closed() {
        let test_deps = TestDependencies::new();
        let deps = test_deps.server_deps();

        let reg = Registration::parse("a@x.com", "A", "longenough1").unwrap();
        let (admin, token) = register_admin(reg, &deps).await.unwrap();
        assert_eq!(admin.email, "a@x.com");
        assert_ne!(admin.password_hash, "longenough1");

        let claims = deps.jwt_service.verify_token(&token).unwrap();
        assert_eq!(claims.id, admin.id);

        let again = Registration::parse("b@x.com", "B", "longenough1").unwrap();
        let err = register_admin(again, &deps).await.unwrap_err();
        assert!(matches!(err, ApiError::Forbidden(_)));
        assert!(matches!(
            ensure_registration_open(&deps).await,
            Err(ApiError::Forbidden(_))
        ));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_registrations_create_one_admin() {
        let test_deps = TestDependencies::new();
        let deps = test_deps.server_deps();

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let deps = deps.clone();
                tokio::spawn(async move {
                    let reg =
                        Registration::parse(&format!("u{i}@x.com"), "U", "longenough1").unwrap();
                    register_admin(reg, &deps).await
                })
            })
            .collect();

        let mut registered = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => registered += 1,
                Err(err) => assert!(matches!(err, ApiError::Forbidden(_))),
            }
        }

        assert_eq!(registered, 1);
        assert_eq!(test_deps.admins.count().await.unwrap(), 1);
    }
}
