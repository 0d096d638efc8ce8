//! User handlers.

use actix_web::{HttpResponse, web};

use gazette_core::domain::User;
use gazette_core::ports::{BaseRepository, UserRepository};
use gazette_shared::ApiResponse;
use gazette_shared::dto::{CreateUserRequest, UserResponse};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn to_response(user: User) -> UserResponse {
    UserResponse {
        id: user.id,
        created_at: user.created_at.to_rfc3339(),
        username: user.username,
        email: user.email,
    }
}

/// POST /api/users
pub async fn create(
    state: web::Data<AppState>,
    body: web::Json<CreateUserRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    if req.username.is_empty() {
        return Err(AppError::BadRequest("Username must not be empty".to_string()));
    }
    if req.email.is_empty() || !req.email.contains('@') {
        return Err(AppError::BadRequest("Invalid email address".to_string()));
    }

    if state.users.find_by_username(&req.username).await?.is_some() {
        return Err(AppError::Conflict("Username already taken".to_string()));
    }

    let saved = state.users.save(User::new(req.username, req.email)).await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok(to_response(saved))))
}

/// GET /api/users/{id}
pub async fn get(state: web::Data<AppState>, path: web::Path<i64>) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let user = state
        .users
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {id} not found")))?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(to_response(user))))
}
