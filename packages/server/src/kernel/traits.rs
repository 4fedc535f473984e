// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Business logic (login, registration, post validation) lives in domains/*/actions.
//
// Naming convention: Base* for trait names (e.g., BaseAdminStore, BaseEmailService)

use anyhow::Result;
use async_trait::async_trait;
use thiserror::Error;

use crate::domains::auth::models::{Admin, NewAdmin};
use crate::domains::posts::models::{NewPost, Post, PostChanges};

/// Returned (inside anyhow) by store implementations when a unique key is taken
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unique constraint violated: {0}")]
pub struct UniqueViolation(pub &'static str);

// =============================================================================
// Admin Store Trait (Infrastructure - identity records)
// =============================================================================

#[async_trait]
pub trait BaseAdminStore: Send + Sync {
    /// Number of stored admins
    async fn count(&self) -> Result<i64>;

    /// Look up an admin by normalized email
    async fn find_by_email(&self, email: &str) -> Result<Option<Admin>>;

    /// Insert the bootstrap admin atomically with the emptiness check.
    ///
    /// Returns `None` when an admin already exists; fails with
    /// `UniqueViolation` if the email is taken.
    async fn create_first(&self, new_admin: NewAdmin) -> Result<Option<Admin>>;
}

// =============================================================================
// Post Store Trait (Infrastructure - blog posts)
// =============================================================================

#[async_trait]
pub trait BasePostStore: Send + Sync {
    /// All posts, newest first
    async fn list(&self) -> Result<Vec<Post>>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>>;

    /// Fails with `UniqueViolation` if the slug is taken
    async fn create(&self, new_post: NewPost) -> Result<Post>;

    /// None if no post has that slug
    async fn update(&self, slug: &str, changes: PostChanges) -> Result<Option<Post>>;

    /// false if no post has that slug
    async fn delete(&self, slug: &str) -> Result<bool>;
}

// =============================================================================
// Email Service Trait (Infrastructure - outbound email)
// =============================================================================

/// A fully rendered outbound email
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub from: String,
    pub subject: String,
    pub html: String,
    pub text: String,
    pub reply_to: Option<String>,
}

#[async_trait]
pub trait BaseEmailService: Send + Sync {
    /// Send an email. The error message is the provider's reason, safe to show.
    async fn send(&self, message: EmailMessage) -> Result<()>;
}

// =============================================================================
// Blob Storage Trait (Infrastructure - public file uploads)
// =============================================================================

#[async_trait]
pub trait BaseBlobStorage: Send + Sync {
    /// Store bytes publicly under `key`, returning the public URL
    async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<String>;
}

// =============================================================================
// Rate Limiter Trait (Infrastructure - submission throttling)
// =============================================================================

#[async_trait]
pub trait BaseRateLimiter: Send + Sync {
    /// Record a hit for `key` and report whether it is allowed
    async fn check(&self, key: &str) -> bool;
}
