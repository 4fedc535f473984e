// Postgres-backed store implementations
//
// Thin wrappers delegating to the model query functions; they only translate
// unique-key failures into UniqueViolation so callers can stay store-agnostic.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;

use super::{BaseAdminStore, BasePostStore, UniqueViolation};
use crate::domains::auth::models::{Admin, NewAdmin};
use crate::domains::posts::models::{NewPost, Post, PostChanges};

const ADMIN_SINGLETON_INDEX: &str = "admins_singleton";

/// Name of the unique index a failed insert ran into, if any
fn violated_unique_index(err: &anyhow::Error) -> Option<String> {
    err.downcast_ref::<sqlx::Error>()
        .and_then(|e| e.as_database_error())
        .filter(|db| db.is_unique_violation())
        .map(|db| db.constraint().unwrap_or_default().to_string())
}

fn map_unique(err: anyhow::Error, key: &'static str) -> anyhow::Error {
    if violated_unique_index(&err).is_some() {
        UniqueViolation(key).into()
    } else {
        err
    }
}

#[derive(Clone)]
pub struct PgAdminStore {
    pool: PgPool,
}

impl PgAdminStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BaseAdminStore for PgAdminStore {
    async fn count(&self) -> Result<i64> {
        Admin::count(&self.pool).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Admin>> {
        Admin::find_by_email(email, &self.pool).await
    }

    async fn create_first(&self, new_admin: NewAdmin) -> Result<Option<Admin>> {
        match Admin::create_first(new_admin, &self.pool).await {
            Ok(admin) => Ok(admin),
            // Lost the race against a concurrent bootstrap insert
            Err(e) if violated_unique_index(&e).as_deref() == Some(ADMIN_SINGLETON_INDEX) => {
                Ok(None)
            }
            Err(e) => Err(map_unique(e, "email")),
        }
    }
}

#[derive(Clone)]
pub struct PgPostStore {
    pool: PgPool,
}

impl PgPostStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BasePostStore for PgPostStore {
    async fn list(&self) -> Result<Vec<Post>> {
        Post::find_all(&self.pool).await
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>> {
        Post::find_by_slug(slug, &self.pool).await
    }

    async fn create(&self, new_post: NewPost) -> Result<Post> {
        Post::create(new_post, &self.pool)
            .await
            .map_err(|e| map_unique(e, "slug"))
    }

    async fn update(&self, slug: &str, changes: PostChanges) -> Result<Option<Post>> {
        Post::update_by_slug(slug, changes, &self.pool)
            .await
            .map_err(|e| map_unique(e, "slug"))
    }

    async fn delete(&self, slug: &str) -> Result<bool> {
        Post::delete_by_slug(slug, &self.pool).await
    }
}
