//! Author handlers.

use actix_web::{HttpResponse, web};

use gazette_core::domain::Author;
use gazette_core::ports::{AuthorRepository, BaseRepository};
use gazette_shared::ApiResponse;
use gazette_shared::dto::{AuthorResponse, CreateAuthorRequest};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn to_response(author: Author) -> AuthorResponse {
    AuthorResponse {
        id: author.id,
        user_id: author.user_id,
        rating: author.rating,
    }
}

/// POST /api/authors
pub async fn create(
    state: web::Data<AppState>,
    body: web::Json<CreateAuthorRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    if state.users.find_by_id(req.user_id).await?.is_none() {
        return Err(AppError::BadRequest(format!(
            "User {} does not exist",
            req.user_id
        )));
    }

    if state.authors.find_by_user_id(req.user_id).await?.is_some() {
        return Err(AppError::Conflict(format!(
            "User {} is already an author",
            req.user_id
        )));
    }

    let saved = state.authors.save(Author::new(req.user_id)).await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok(to_response(saved))))
}

/// GET /api/authors/{id}
pub async fn get(state: web::Data<AppState>, path: web::Path<i64>) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let author = state
        .authors
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Author {id} not found")))?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(to_response(author))))
}

/// POST /api/authors/{id}/recompute-rating
///
/// On-demand reputation recomputation; the stored score stays stale until
/// the next call.
pub async fn recompute_rating(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    state.author_ratings.recompute_rating(id).await?;

    let author = state
        .authors
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Author {id} not found")))?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(to_response(author))))
}
