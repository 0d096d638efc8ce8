//! Comment handlers.

use actix_web::{HttpResponse, web};

use gazette_core::domain::Comment;
use gazette_core::ports::BaseRepository;
use gazette_shared::ApiResponse;
use gazette_shared::dto::{CommentResponse, CreateCommentRequest};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn to_response(comment: Comment) -> CommentResponse {
    CommentResponse {
        id: comment.id,
        post_id: comment.post_id,
        user_id: comment.user_id,
        rating: comment.rating,
        created_at: comment.created_at.to_rfc3339(),
        body: comment.body,
    }
}

/// POST /api/comments
pub async fn create(
    state: web::Data<AppState>,
    body: web::Json<CreateCommentRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    if req.body.is_empty() {
        return Err(AppError::BadRequest("Comment body must not be empty".to_string()));
    }

    if state.post_repo.find_by_id(req.post_id).await?.is_none() {
        return Err(AppError::BadRequest(format!(
            "Post {} does not exist",
            req.post_id
        )));
    }
    if state.users.find_by_id(req.user_id).await?.is_none() {
        return Err(AppError::BadRequest(format!(
            "User {} does not exist",
            req.user_id
        )));
    }

    let saved = state
        .comments
        .save(Comment::new(req.post_id, req.user_id, req.body))
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok(to_response(saved))))
}

/// GET /api/posts/{id}/comments
pub async fn list_for_post(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();

    if state.post_repo.find_by_id(post_id).await?.is_none() {
        return Err(AppError::NotFound(format!("Post {post_id} not found")));
    }

    let comments = state.comments.list_for_post(post_id).await?;

    let response: Vec<CommentResponse> = comments.into_iter().map(to_response).collect();
    Ok(HttpResponse::Ok().json(ApiResponse::ok(response)))
}

/// POST /api/comments/{id}/like
pub async fn like(state: web::Data<AppState>, path: web::Path<i64>) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    state.comments.like(id).await?;
    respond_with_comment(&state, id).await
}

/// POST /api/comments/{id}/dislike
pub async fn dislike(state: web::Data<AppState>, path: web::Path<i64>) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    state.comments.dislike(id).await?;
    respond_with_comment(&state, id).await
}

async fn respond_with_comment(state: &AppState, id: i64) -> AppResult<HttpResponse> {
    let comment = state
        .comment_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Comment {id} not found")))?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(to_response(comment))))
}
