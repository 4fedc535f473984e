use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Post - a blog entry, addressed publicly by its slug
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub author: String,
    pub slug: String,
    pub published_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated fields for a new post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub author: String,
    pub slug: String,
}

/// Validated partial update; `None` leaves the column unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub author: Option<String>,
    pub slug: Option<String>,
}

impl PostChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.image_url.is_none()
            && self.author.is_none()
            && self.slug.is_none()
    }

    /// Apply to an in-memory post (same semantics as the SQL COALESCE update)
    pub fn apply(self, post: &mut Post) {
        if let Some(title) = self.title {
            post.title = title;
        }
        if let Some(description) = self.description {
            post.description = description;
        }
        if let Some(image_url) = self.image_url {
            post.image_url = image_url;
        }
        if let Some(author) = self.author {
            post.author = author;
        }
        if let Some(slug) = self.slug {
            post.slug = slug;
        }
    }
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl Post {
    /// All posts, newest first
    pub async fn find_all(pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM posts ORDER BY published_at DESC")
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }

    /// Find post by slug
    pub async fn find_by_slug(slug: &str, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM posts WHERE slug = $1")
            .bind(slug)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Insert new post
    pub async fn create(new_post: NewPost, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO posts (title, description, image_url, author, slug)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(new_post.title)
        .bind(new_post.description)
        .bind(new_post.image_url)
        .bind(new_post.author)
        .bind(new_post.slug)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Update post content by slug. Returns None if no post has that slug.
    pub async fn update_by_slug(
        slug: &str,
        changes: PostChanges,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            UPDATE posts
            SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                image_url = COALESCE($4, image_url),
                author = COALESCE($5, author),
                slug = COALESCE($6, slug),
                updated_at = NOW()
            WHERE slug = $1
            RETURNING *
            "#,
        )
        .bind(slug)
        .bind(changes.title)
        .bind(changes.description)
        .bind(changes.image_url)
        .bind(changes.author)
        .bind(changes.slug)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Hard delete by slug. Returns false if nothing was deleted.
    pub async fn delete_by_slug(slug: &str, pool: &PgPool) -> Result<bool> {
        let result = sqlx::query("DELETE FROM posts WHERE slug = $1")
            .bind(slug)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
