//! Post CRUD actions
//!
//! Reads are public. Writes assume the caller already passed the session gate.

use serde::Deserialize;
use tracing::info;

use crate::common::validation::{is_blank, is_valid_url};
use crate::common::{is_unique_violation, ApiError, ApiResult};
use crate::domains::posts::models::{NewPost, Post, PostChanges};
use crate::kernel::ServerDeps;

/// Body of `POST /api/posts`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostInput {
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub author: String,
    pub slug: String,
}

/// Body of `PUT /api/posts/:slug`; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub author: Option<String>,
    pub slug: Option<String>,
}

impl CreatePostInput {
    pub fn validate(self) -> ApiResult<NewPost> {
        let text_fields = [&self.title, &self.description, &self.author, &self.slug];
        if text_fields.iter().any(|f| is_blank(f)) || !is_valid_url(&self.image_url) {
            return Err(ApiError::invalid_input());
        }

        Ok(NewPost {
            title: self.title,
            description: self.description,
            image_url: self.image_url,
            author: self.author,
            slug: self.slug,
        })
    }
}

impl UpdatePostInput {
    pub fn validate(self) -> ApiResult<PostChanges> {
        let text_fields = [&self.title, &self.description, &self.author, &self.slug];
        let blank_text = text_fields.iter().any(|f| f.as_deref().is_some_and(is_blank));
        let bad_url = self.image_url.as_deref().is_some_and(|u| !is_valid_url(u));
        if blank_text || bad_url {
            return Err(ApiError::invalid_input());
        }

        Ok(PostChanges {
            title: self.title,
            description: self.description,
            image_url: self.image_url,
            author: self.author,
            slug: self.slug,
        })
    }
}

pub async fn list_posts(deps: &ServerDeps) -> ApiResult<Vec<Post>> {
    Ok(deps.posts.list().await?)
}

pub async fn get_post(slug: &str, deps: &ServerDeps) -> ApiResult<Post> {
    deps.posts
        .find_by_slug(slug)
        .await?
        .ok_or_else(ApiError::not_found)
}

pub async fn create_post(new_post: NewPost, deps: &ServerDeps) -> ApiResult<Post> {
    let post = deps.posts.create(new_post).await.map_err(slug_conflict)?;
    info!(post_id = %post.id, slug = %post.slug, "Created post");
    Ok(post)
}

/// An empty change set returns the post as it is.
pub async fn update_post(slug: &str, changes: PostChanges, deps: &ServerDeps) -> ApiResult<Post> {
    if changes.is_empty() {
        return get_post(slug, deps).await;
    }

    let post = deps
        .posts
        .update(slug, changes)
        .await
        .map_err(slug_conflict)?
        .ok_or_else(ApiError::not_found)?;

    info!(post_id = %post.id, slug = %post.slug, "Updated post");
    Ok(post)
}

pub async fn delete_post(slug: &str, deps: &ServerDeps) -> ApiResult<()> {
    if !deps.posts.delete(slug).await? {
        return Err(ApiError::not_found());
    }
    info!(%slug, "Deleted post");
    Ok(())
}

fn slug_conflict(err: anyhow::Error) -> ApiError {
    if is_unique_violation(&err) {
        ApiError::Conflict("Slug already exists".to_string())
    } else {
        ApiError::Unexpected(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::test_dependencies::TestDependencies;

    fn input(slug: &str) -> CreatePostInput {
        CreatePostInput {
            title: "Hello".to_string(),
            description: "First post".to_string(),
            image_url: "https://cdn.example.com/a.png".to_string(),
            author: "A".to_string(),
            slug: slug.to_string(),
        }
    }

    #[test]
    fn test_create_validation() {
        assert!(input("hello").validate().is_ok());
        assert!(input("").validate().is_err());

        let mut bad_url = input("hello");
        bad_url.image_url = "not a url".to_string();
        assert!(bad_url.validate().is_err());
    }

    #[test]
    fn test_update_validation() {
        assert!(UpdatePostInput::default().validate().unwrap().is_empty());

        let blank_title = UpdatePostInput {
            title: Some(" ".to_string()),
            ..Default::default()
        };
        assert!(blank_title.validate().is_err());

        let bad_url = UpdatePostInput {
            image_url: Some("ftp://x/y.png".to_string()),
            ..Default::default()
        };
        assert!(bad_url.validate().is_err());
    }

    #[tokio::test]
    async fn test_crud_flow() {
        let test_deps = TestDependencies::new();
        let deps = test_deps.server_deps();

        let post = create_post(input("hello").validate().unwrap(), &deps)
            .await
            .unwrap();
        assert_eq!(get_post("hello", &deps).await.unwrap().id, post.id);

        let dup = create_post(input("hello").validate().unwrap(), &deps).await;
        assert!(matches!(dup, Err(ApiError::Conflict(_))));

        let changes = UpdatePostInput {
            slug: Some("hello-world".to_string()),
            ..Default::default()
        }
        .validate()
        .unwrap();
        let updated = update_post("hello", changes, &deps).await.unwrap();
        assert_eq!(updated.slug, "hello-world");
        assert!(matches!(
            get_post("hello", &deps).await,
            Err(ApiError::NotFound(_))
        ));

        delete_post("hello-world", &deps).await.unwrap();
        assert!(matches!(
            delete_post("hello-world", &deps).await,
            Err(ApiError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_update_missing_post() {
        let test_deps = TestDependencies::new();
        let changes = PostChanges {
            title: Some("x".to_string()),
            ..Default::default()
        };
        let result = update_post("nope", changes, &test_deps.server_deps()).await;
        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }
}
