//! Health record endpoints.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, AuthUser};
use crate::models::{HealthRecord, Id, NewHealthRecord};

/// `GET /api/health-records/:user_id`
pub async fn list(
    State(ctx): State<ApiContext>,
    Extension(auth): Extension<AuthUser>,
    user_id: Result<Path<Id>, PathRejection>,
) -> Result<Json<Vec<HealthRecord>>, ApiError> {
    let Path(user_id) = user_id?;
    auth.ensure_owner(user_id)?;

    Ok(Json(ctx.storage.health_records_for_user(user_id)?))
}

/// `POST /api/health-records`
pub async fn create(
    State(ctx): State<ApiContext>,
    Extension(auth): Extension<AuthUser>,
    payload: Result<Json<NewHealthRecord>, JsonRejection>,
) -> Result<(StatusCode, Json<HealthRecord>), ApiError> {
    let Json(record) = payload?;
    record.validate()?;

    let created = ctx.storage.create_health_record(auth.user_id, record)?;
    tracing::info!(user_id = auth.user_id, record_id = created.id, "Health record added");

    Ok((StatusCode::CREATED, Json(created)))
}
