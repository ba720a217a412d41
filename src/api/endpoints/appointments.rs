//! Appointment endpoints.
//!
//! - `GET /api/appointments/:user_id`: a patient's bookings
//! - `POST /api/appointments`: book an appointment

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, AuthUser};
use crate::models::{Appointment, Id, NewAppointment};

/// `GET /api/appointments/:user_id`
pub async fn list(
    State(ctx): State<ApiContext>,
    Extension(auth): Extension<AuthUser>,
    user_id: Result<Path<Id>, PathRejection>,
) -> Result<Json<Vec<Appointment>>, ApiError> {
    let Path(user_id) = user_id?;
    auth.ensure_owner(user_id)?;

    Ok(Json(ctx.storage.appointments_for_user(user_id)?))
}

/// `POST /api/appointments`
pub async fn create(
    State(ctx): State<ApiContext>,
    Extension(auth): Extension<AuthUser>,
    payload: Result<Json<NewAppointment>, JsonRejection>,
) -> Result<(StatusCode, Json<Appointment>), ApiError> {
    let Json(appointment) = payload?;
    appointment.validate()?;

    let created = ctx.storage.create_appointment(auth.user_id, appointment)?;
    tracing::info!(
        user_id = auth.user_id,
        appointment_id = created.id,
        date = %created.date,
        "Appointment booked"
    );

    Ok((StatusCode::CREATED, Json(created)))
}
