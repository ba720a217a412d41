//! Symptom analysis endpoints.
//!
//! - `POST /api/analyze-symptoms`: analysis text only, nothing stored
//! - `POST /api/ai-analysis`: analyze and keep the result in the patient's history
//! - `GET /api/ai-analysis/:user_id`: past analyses

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, AuthUser};
use crate::models::{AiAnalysis, Id, NewAiAnalysis};
use crate::triage::AnalysisRequest;

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub analysis: String,
}

/// `POST /api/analyze-symptoms`: 201 `{analysis}` or 500 `{error}`.
pub async fn analyze(
    State(ctx): State<ApiContext>,
    Extension(auth): Extension<AuthUser>,
    payload: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AnalyzeResponse>), ApiError> {
    let Json(request) = payload?;
    request.validate()?;

    tracing::info!(user_id = auth.user_id, category = %request.category, "Symptom analysis requested");
    let analysis = ctx
        .dispatcher
        .analyze(request.category, &request.symptoms)
        .await?;

    Ok((StatusCode::CREATED, Json(AnalyzeResponse { analysis })))
}

/// `POST /api/ai-analysis`: analyze, then store the result.
pub async fn create(
    State(ctx): State<ApiContext>,
    Extension(auth): Extension<AuthUser>,
    payload: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AiAnalysis>), ApiError> {
    let Json(request) = payload?;
    request.validate()?;

    let analysis = ctx
        .dispatcher
        .analyze(request.category, &request.symptoms)
        .await?;

    let stored = ctx.storage.create_analysis(NewAiAnalysis {
        user_id: auth.user_id,
        category: request.category,
        symptoms: request.symptoms,
        analysis,
    })?;
    tracing::info!(user_id = auth.user_id, analysis_id = stored.id, "Symptom analysis stored");

    Ok((StatusCode::CREATED, Json(stored)))
}

/// `GET /api/ai-analysis/:user_id`
pub async fn list(
    State(ctx): State<ApiContext>,
    Extension(auth): Extension<AuthUser>,
    user_id: Result<Path<Id>, PathRejection>,
) -> Result<Json<Vec<AiAnalysis>>, ApiError> {
    let Path(user_id) = user_id?;
    auth.ensure_owner(user_id)?;

    Ok(Json(ctx.storage.analyses_for_user(user_id)?))
}
