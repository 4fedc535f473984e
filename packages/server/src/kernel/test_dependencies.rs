// TestDependencies - in-memory and mock implementations for testing
//
// Provides stores and services that can be injected into ServerDeps for tests.

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::{Arc, Mutex};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{
    BaseAdminStore, BaseBlobStorage, BaseEmailService, BasePostStore, BaseRateLimiter,
    ContactMailer, EmailMessage, FixedWindowRateLimiter, ServerDeps, UniqueViolation,
};
use crate::domains::auth::models::{Admin, NewAdmin};
use crate::domains::auth::{JwtService, SessionCookies};
use crate::domains::posts::models::{NewPost, Post, PostChanges};

pub const TEST_JWT_SECRET: &str = "test_secret_key";

// =============================================================================
// In-memory Admin Store
// =============================================================================

#[derive(Default)]
pub struct InMemoryAdminStore {
    admins: RwLock<Vec<Admin>>,
}

impl InMemoryAdminStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove an admin (simulates deletion after a token was issued)
    pub async fn remove(&self, email: &str) {
        self.admins.write().await.retain(|a| a.email != email);
    }
}

#[async_trait]
impl BaseAdminStore for InMemoryAdminStore {
    async fn count(&self) -> Result<i64> {
        Ok(self.admins.read().await.len() as i64)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Admin>> {
        let admins = self.admins.read().await;
        Ok(admins
            .iter()
            .find(|a| a.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn create_first(&self, new_admin: NewAdmin) -> Result<Option<Admin>> {
        let mut admins = self.admins.write().await;
        if !admins.is_empty() {
            return Ok(None);
        }

        let admin = Admin {
            id: Uuid::new_v4(),
            email: new_admin.email,
            name: new_admin.name,
            password_hash: new_admin.password_hash,
            created_at: Utc::now(),
        };
        admins.push(admin.clone());
        Ok(Some(admin))
    }
}

// =============================================================================
// In-memory Post Store
// =============================================================================

#[derive(Default)]
pub struct InMemoryPostStore {
    posts: RwLock<Vec<Post>>,
}

impl InMemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BasePostStore for InMemoryPostStore {
    async fn list(&self) -> Result<Vec<Post>> {
        let mut posts = self.posts.read().await.clone();
        posts.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        Ok(posts)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>> {
        let posts = self.posts.read().await;
        Ok(posts.iter().find(|p| p.slug == slug).cloned())
    }

    async fn create(&self, new_post: NewPost) -> Result<Post> {
        let mut posts = self.posts.write().await;
        if posts.iter().any(|p| p.slug == new_post.slug) {
            return Err(UniqueViolation("slug").into());
        }

        let now = Utc::now();
        let post = Post {
            id: Uuid::new_v4(),
            title: new_post.title,
            description: new_post.description,
            image_url: new_post.image_url,
            author: new_post.author,
            slug: new_post.slug,
            published_at: now,
            updated_at: now,
        };
        posts.push(post.clone());
        Ok(post)
    }

    async fn update(&self, slug: &str, changes: PostChanges) -> Result<Option<Post>> {
        let mut posts = self.posts.write().await;

        if let Some(new_slug) = &changes.slug {
            if new_slug != slug && posts.iter().any(|p| &p.slug == new_slug) {
                return Err(UniqueViolation("slug").into());
            }
        }

        let Some(post) = posts.iter_mut().find(|p| p.slug == slug) else {
            return Ok(None);
        };
        changes.apply(post);
        post.updated_at = Utc::now();
        Ok(Some(post.clone()))
    }

    async fn delete(&self, slug: &str) -> Result<bool> {
        let mut posts = self.posts.write().await;
        let before = posts.len();
        posts.retain(|p| p.slug != slug);
        Ok(posts.len() < before)
    }
}

// =============================================================================
// Mock Email Service
// =============================================================================

#[derive(Default)]
pub struct MockEmailService {
    sent: Mutex<Vec<EmailMessage>>,
    failure: Option<String>,
}

impl MockEmailService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every send fails with this provider message
    pub fn failing(message: &str) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            failure: Some(message.to_string()),
        }
    }

    /// Get all emails that were sent
    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl BaseEmailService for MockEmailService {
    async fn send(&self, message: EmailMessage) -> Result<()> {
        if let Some(reason) = &self.failure {
            anyhow::bail!("{}", reason);
        }
        self.sent.lock().unwrap().push(message);
        Ok(())
    }
}

// =============================================================================
// Mock Blob Storage
// =============================================================================

/// Arguments captured from a put call
#[derive(Debug, Clone)]
pub struct PutCall {
    pub key: String,
    pub size: usize,
    pub content_type: String,
}

#[derive(Default)]
pub struct MockBlobStorage {
    calls: Mutex<Vec<PutCall>>,
}

impl MockBlobStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<PutCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl BaseBlobStorage for MockBlobStorage {
    async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<String> {
        self.calls.lock().unwrap().push(PutCall {
            key: key.to_string(),
            size: bytes.len(),
            content_type: content_type.to_string(),
        });
        Ok(format!("https://blob.test/{}", key))
    }
}

// =============================================================================
// TestDependencies builder
// =============================================================================

/// Handles to the mocks behind a test ServerDeps
pub struct TestDependencies {
    pub admins: Arc<InMemoryAdminStore>,
    pub posts: Arc<InMemoryPostStore>,
    pub email: Arc<MockEmailService>,
    pub blob_storage: Arc<MockBlobStorage>,
    pub contact_limiter: Arc<dyn BaseRateLimiter>,
    pub jwt_service: Arc<JwtService>,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self::with_email(MockEmailService::new())
    }

    pub fn with_email(email: MockEmailService) -> Self {
        Self {
            admins: Arc::new(InMemoryAdminStore::new()),
            posts: Arc::new(InMemoryPostStore::new()),
            email: Arc::new(email),
            blob_storage: Arc::new(MockBlobStorage::new()),
            contact_limiter: Arc::new(FixedWindowRateLimiter::for_contact_form()),
            jwt_service: Arc::new(JwtService::new(TEST_JWT_SECRET)),
        }
    }

    /// ServerDeps wired to these mocks (development cookies, contact configured)
    pub fn server_deps(&self) -> ServerDeps {
        ServerDeps::new(
            None,
            self.admins.clone(),
            self.posts.clone(),
            Some(ContactMailer {
                service: self.email.clone(),
                to: "owner@example.com".to_string(),
                from: "site@example.com".to_string(),
            }),
            Some(self.blob_storage.clone()),
            self.contact_limiter.clone(),
            self.jwt_service.clone(),
            SessionCookies::new(false),
        )
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
