use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use std::fmt;
use uuid::Uuid;

/// Admin - the single site owner allowed to manage posts
#[derive(Clone, sqlx::FromRow)]
pub struct Admin {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

// Keeps the hash out of logs
impl fmt::Debug for Admin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Admin")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("name", &self.name)
            .field("created_at", &self.created_at)
            .finish_non_exhaustive()
    }
}

/// Fields needed to insert a new admin. `email` must already be normalized.
#[derive(Clone)]
pub struct NewAdmin {
    pub email: String,
    pub name: String,
    pub password_hash: String,
}

/// Public view of an admin returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminProfile {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    /// Only reported by the session check
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<&'static str>,
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl Admin {
    /// Find admin by (normalized) email
    pub async fn find_by_email(email: &str, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM admins WHERE LOWER(email) = LOWER($1)")
            .bind(email)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Number of admins (registration is only open while this is zero)
    pub async fn count(pool: &PgPool) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM admins")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    /// Insert the admin only while the table is empty.
    ///
    /// Returns None when an admin already exists. Two racing inserts are
    /// settled by the `admins_singleton` index.
    pub async fn create_first(new_admin: NewAdmin, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO admins (email, name, password_hash)
            SELECT $1, $2, $3
            WHERE NOT EXISTS (SELECT 1 FROM admins)
            RETURNING *
            "#,
        )
        .bind(&new_admin.email)
        .bind(&new_admin.name)
        .bind(&new_admin.password_hash)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Profile returned by the session check
    pub fn profile(&self) -> AdminProfile {
        AdminProfile {
            role: Some("admin"),
            ..self.summary()
        }
    }

    /// `{id, email, name}` returned on registration
    pub fn summary(&self) -> AdminProfile {
        AdminProfile {
            id: self.id,
            email: self.email.clone(),
            name: self.name.clone(),
            role: None,
        }
    }
}
