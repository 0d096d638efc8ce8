//! Post handlers.
//!
//! All writes go through `PostService` so the cache entry is dropped and
//! an invalidation event published; reads come through the cache.

use actix_web::{HttpResponse, web};

use gazette_core::domain::{Post, PostKind};
use gazette_core::ports::{BaseRepository, PostRepository};
use gazette_shared::ApiResponse;
use gazette_shared::dto::{CreatePostRequest, PostResponse, UpdatePostRequest};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn to_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id,
        author_id: post.author_id,
        kind: kind_name(post.kind).to_string(),
        preview: post.preview(),
        permalink: post.permalink(),
        rating: post.rating,
        created_at: post.created_at.to_rfc3339(),
        title: post.title,
        body: post.body,
    }
}

fn kind_name(kind: PostKind) -> &'static str {
    match kind {
        PostKind::News => "news",
        PostKind::Article => "article",
    }
}

fn parse_kind(kind: Option<&str>) -> AppResult<PostKind> {
    match kind {
        None => Ok(PostKind::default()),
        Some("news") => Ok(PostKind::News),
        Some("article") => Ok(PostKind::Article),
        Some(other) => Err(AppError::BadRequest(format!("Unknown post kind: {other}"))),
    }
}

fn validate_title(title: &str) -> AppResult<()> {
    if title.is_empty() {
        return Err(AppError::BadRequest("Title must not be empty".to_string()));
    }
    if title.chars().count() > 128 {
        return Err(AppError::BadRequest(
            "Title must be at most 128 characters".to_string(),
        ));
    }
    Ok(())
}

/// POST /api/posts
pub async fn create(
    state: web::Data<AppState>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    validate_title(&req.title)?;
    let kind = parse_kind(req.kind.as_deref())?;

    if state.authors.find_by_id(req.author_id).await?.is_none() {
        return Err(AppError::BadRequest(format!(
            "Author {} does not exist",
            req.author_id
        )));
    }

    let saved = state
        .posts
        .save(Post::new(req.author_id, kind, req.title, req.body))
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok(to_response(saved))))
}

/// GET /api/posts/{id} - cached read-through.
pub async fn get(state: web::Data<AppState>, path: web::Path<i64>) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let post = state
        .posts
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post {id} not found")))?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(to_response(post))))
}

/// PUT /api/posts/{id}
pub async fn update(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let req = body.into_inner();

    validate_title(&req.title)?;

    // Load the authoritative row, not the cached rendering.
    let mut post = state
        .post_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post {id} not found")))?;

    post.title = req.title;
    post.body = req.body;

    let saved = state.posts.save(post).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(to_response(saved))))
}

/// DELETE /api/posts/{id}
pub async fn delete(state: web::Data<AppState>, path: web::Path<i64>) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    state.posts.delete(id).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// POST /api/posts/{id}/like
pub async fn like(state: web::Data<AppState>, path: web::Path<i64>) -> AppResult<HttpResponse> {
    adjust_rating(&state, path.into_inner(), Vote::Like).await
}

/// POST /api/posts/{id}/dislike
pub async fn dislike(state: web::Data<AppState>, path: web::Path<i64>) -> AppResult<HttpResponse> {
    adjust_rating(&state, path.into_inner(), Vote::Dislike).await
}

enum Vote {
    Like,
    Dislike,
}

async fn adjust_rating(state: &AppState, id: i64, vote: Vote) -> AppResult<HttpResponse> {
    match vote {
        Vote::Like => state.posts.like(id).await?,
        Vote::Dislike => state.posts.dislike(id).await?,
    }

    let post = state
        .posts
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post {id} not found")))?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(to_response(post))))
}

/// POST /api/posts/{id}/categories/{category_id}
pub async fn attach_category(
    state: web::Data<AppState>,
    path: web::Path<(i64, i64)>,
) -> AppResult<HttpResponse> {
    let (post_id, category_id) = path.into_inner();

    ensure_post_and_category(state.get_ref(), post_id, category_id).await?;
    state.post_repo.attach_category(post_id, category_id).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// DELETE /api/posts/{id}/categories/{category_id}
pub async fn detach_category(
    state: web::Data<AppState>,
    path: web::Path<(i64, i64)>,
) -> AppResult<HttpResponse> {
    let (post_id, category_id) = path.into_inner();

    ensure_post_and_category(state.get_ref(), post_id, category_id).await?;
    state.post_repo.detach_category(post_id, category_id).await?;

    Ok(HttpResponse::NoContent().finish())
}

async fn ensure_post_and_category(
    state: &AppState,
    post_id: i64,
    category_id: i64,
) -> AppResult<()> {
    if state.post_repo.find_by_id(post_id).await?.is_none() {
        return Err(AppError::NotFound(format!("Post {post_id} not found")));
    }
    if state.categories.find_by_id(category_id).await?.is_none() {
        return Err(AppError::NotFound(format!(
            "Category {category_id} not found"
        )));
    }
    Ok(())
}
