//! Account endpoints.
//!
//! - `POST /api/register`: create an account and start a session
//! - `POST /api/login`: start a session
//! - `POST /api/logout`: end the current session
//! - `GET /api/user`: the signed-in patient

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, AuthUser};
use crate::auth::{hash_password, verify_login, AuthError};
use crate::models::{Credentials, NewUser, User};

#[derive(Serialize)]
pub struct SessionResponse {
    pub user: User,
    pub token: String,
}

/// Run password hashing on the blocking pool.
async fn blocking<T, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ApiError::Internal(format!("password task failed: {e}")))
}

/// `POST /api/register`
pub async fn register(
    State(ctx): State<ApiContext>,
    payload: Result<Json<NewUser>, JsonRejection>,
) -> Result<(StatusCode, Json<SessionResponse>), ApiError> {
    let Json(new_user) = payload?;
    new_user.validate()?;

    if ctx
        .storage
        .get_user_by_username(new_user.username.trim())?
        .is_some()
    {
        return Err(ApiError::BadRequest("Username already exists".into()));
    }

    let password = new_user.password.clone();
    let password_hash = blocking(move || hash_password(&password)).await?;
    let user = ctx.storage.create_user(new_user, password_hash)?;
    let token = ctx.sessions.issue(user.id)?;

    tracing::info!(user_id = user.id, "Patient registered");

    Ok((StatusCode::CREATED, Json(SessionResponse { user, token })))
}

/// `POST /api/login`
pub async fn login(
    State(ctx): State<ApiContext>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Result<Json<SessionResponse>, ApiError> {
    let Json(credentials) = payload?;

    let user = ctx
        .storage
        .get_user_by_username(credentials.username.trim())?;

    let stored = user.as_ref().map(|u| u.password_hash.clone());
    let password = credentials.password;
    let verified = blocking(move || verify_login(&password, stored.as_deref())).await??;

    let user = match user {
        Some(user) if verified => user,
        Some(user) => {
            tracing::info!(user_id = user.id, "Login rejected");
            return Err(AuthError::InvalidCredentials.into());
        }
        None => return Err(AuthError::InvalidCredentials.into()),
    };

    let token = ctx.sessions.issue(user.id)?;
    tracing::info!(user_id = user.id, "Patient logged in");

    Ok(Json(SessionResponse { user, token }))
}

/// `POST /api/logout`
pub async fn logout(
    State(ctx): State<ApiContext>,
    Extension(auth): Extension<AuthUser>,
) -> Result<StatusCode, ApiError> {
    ctx.sessions.revoke(&auth.token)?;
    tracing::info!(user_id = auth.user_id, "Patient logged out");
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /api/user`
pub async fn current_user(
    State(ctx): State<ApiContext>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<User>, ApiError> {
    let user = ctx
        .storage
        .get_user(auth.user_id)?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;
    Ok(Json(user))
}
