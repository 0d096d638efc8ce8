//! Category handlers.

use actix_web::{HttpResponse, web};

use gazette_core::domain::Category;
use gazette_core::ports::{BaseRepository, CategoryRepository};
use gazette_shared::ApiResponse;
use gazette_shared::dto::{CategoryResponse, CreateCategoryRequest};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn to_response(category: Category) -> CategoryResponse {
    CategoryResponse {
        id: category.id,
        name: category.name,
    }
}

/// GET /api/categories
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let categories = state.categories.list().await?;

    let response: Vec<CategoryResponse> = categories.into_iter().map(to_response).collect();
    Ok(HttpResponse::Ok().json(ApiResponse::ok(response)))
}

/// POST /api/categories
pub async fn create(
    state: web::Data<AppState>,
    body: web::Json<CreateCategoryRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    if req.name.is_empty() {
        return Err(AppError::BadRequest("Category name must not be empty".to_string()));
    }

    if state.categories.find_by_name(&req.name).await?.is_some() {
        return Err(AppError::Conflict(format!(
            "Category '{}' already exists",
            req.name
        )));
    }

    let saved = state.categories.save(Category::new(req.name)).await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok(to_response(saved))))
}

/// POST /api/categories/{id}/subscribers/{user_id}
pub async fn subscribe(
    state: web::Data<AppState>,
    path: web::Path<(i64, i64)>,
) -> AppResult<HttpResponse> {
    let (category_id, user_id) = path.into_inner();

    ensure_category_and_user(&state, category_id, user_id).await?;
    state.categories.subscribe(category_id, user_id).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// DELETE /api/categories/{id}/subscribers/{user_id}
pub async fn unsubscribe(
    state: web::Data<AppState>,
    path: web::Path<(i64, i64)>,
) -> AppResult<HttpResponse> {
    let (category_id, user_id) = path.into_inner();

    ensure_category_and_user(&state, category_id, user_id).await?;
    state.categories.unsubscribe(category_id, user_id).await?;

    Ok(HttpResponse::NoContent().finish())
}

async fn ensure_category_and_user(
    state: &AppState,
    category_id: i64,
    user_id: i64,
) -> AppResult<()> {
    if state.categories.find_by_id(category_id).await?.is_none() {
        return Err(AppError::NotFound(format!(
            "Category {category_id} not found"
        )));
    }
    if state.users.find_by_id(user_id).await?.is_none() {
        return Err(AppError::NotFound(format!("User {user_id} not found")));
    }
    Ok(())
}
