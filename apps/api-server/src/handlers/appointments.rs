//! Appointment handlers.

use actix_web::{HttpResponse, web};

use gazette_core::domain::Appointment;
use gazette_core::ports::BaseRepository;
use gazette_shared::ApiResponse;
use gazette_shared::dto::{AppointmentResponse, CreateAppointmentRequest};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn to_response(appointment: Appointment) -> AppointmentResponse {
    AppointmentResponse {
        id: appointment.id,
        date: appointment.date,
        client_name: appointment.client_name,
        message: appointment.message,
    }
}

/// POST /api/appointments
pub async fn create(
    state: web::Data<AppState>,
    body: web::Json<CreateAppointmentRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    if req.client_name.is_empty() {
        return Err(AppError::BadRequest("Client name must not be empty".to_string()));
    }
    if req.client_name.chars().count() > 200 {
        return Err(AppError::BadRequest(
            "Client name must be at most 200 characters".to_string(),
        ));
    }

    let saved = state
        .appointments
        .save(Appointment::new(req.date, req.client_name, req.message))
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok(to_response(saved))))
}

/// GET /api/appointments/{id}
pub async fn get(state: web::Data<AppState>, path: web::Path<i64>) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let appointment = state
        .appointments
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Appointment {id} not found")))?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(to_response(appointment))))
}
