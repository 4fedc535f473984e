use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde::Serialize;

use crate::common::ApiResult;
use crate::domains::posts::actions::{
    create_post, delete_post, get_post, list_posts, update_post, CreatePostInput,
    UpdatePostInput,
};
use crate::domains::posts::Post;
use crate::server::app::AppState;
use crate::server::middleware::RequireAdmin;
use crate::server::routes::MessageResponse;

#[derive(Serialize)]
pub struct PostsResponse {
    pub ok: bool,
    pub posts: Vec<Post>,
}

#[derive(Serialize)]
pub struct PostResponse {
    pub ok: bool,
    pub post: Post,
}

impl PostResponse {
    fn new(post: Post) -> Json<Self> {
        Json(Self { ok: true, post })
    }
}

pub async fn list_posts_handler(State(state): State<AppState>) -> ApiResult<Json<PostsResponse>> {
    let posts = list_posts(&state.deps).await?;
    Ok(Json(PostsResponse { ok: true, posts }))
}

pub async fn get_post_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<Json<PostResponse>> {
    Ok(PostResponse::new(get_post(&slug, &state.deps).await?))
}

pub async fn create_post_handler(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    payload: Result<Json<CreatePostInput>, JsonRejection>,
) -> ApiResult<Json<PostResponse>> {
    let Json(input) = payload?;
    let post = create_post(input.validate()?, &state.deps).await?;
    tracing::debug!(admin_id = %admin.id, slug = %post.slug, "Post created via API");
    Ok(PostResponse::new(post))
}

pub async fn update_post_handler(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(slug): Path<String>,
    payload: Result<Json<UpdatePostInput>, JsonRejection>,
) -> ApiResult<Json<PostResponse>> {
    let Json(input) = payload?;
    let post = update_post(&slug, input.validate()?, &state.deps).await?;
    Ok(PostResponse::new(post))
}

pub async fn delete_post_handler(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    delete_post(&slug, &state.deps).await?;
    Ok(Json(MessageResponse::new("Deleted")))
}
