//! API router.
//!
//! Returns a composable `Router` with every route under `/api/`.
//!
//! Middleware stack on protected routes (outermost → innermost):
//! 1. Auth validator → 2. Audit logger

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::api::endpoints;
use crate::api::middleware;
use crate::api::types::ApiContext;

/// Build the API router.
///
/// Middleware uses `Extension<ApiContext>` (injected as the outermost layer).
/// Endpoint handlers use `State<ApiContext>` (provided via `with_state`).
///
/// NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).
pub fn api_router(ctx: ApiContext) -> Router {
    // Layers are applied from bottom (innermost) to top (outermost):
    //   Extension → Auth → Audit → Handler
    let protected = Router::new()
        .route("/logout", post(endpoints::auth::logout))
        .route("/user", get(endpoints::auth::current_user))
        .route("/appointments", post(endpoints::appointments::create))
        .route("/appointments/:user_id", get(endpoints::appointments::list))
        .route("/health-records", post(endpoints::health_records::create))
        .route(
            "/health-records/:user_id",
            get(endpoints::health_records::list),
        )
        .route("/ai-analysis", post(endpoints::analysis::create))
        .route("/ai-analysis/:user_id", get(endpoints::analysis::list))
        .route("/analyze-symptoms", post(endpoints::analysis::analyze))
        .with_state(ctx.clone())
        .layer(axum::middleware::from_fn(middleware::audit::log_access))
        .layer(axum::middleware::from_fn(middleware::auth::require_auth))
        .layer(axum::Extension(ctx.clone()));

    // No session required
    let public = Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/register", post(endpoints::auth::register))
        .route("/login", post(endpoints::auth::login))
        .with_state(ctx)
        .layer(axum::middleware::from_fn(middleware::audit::log_access));

    Router::new()
        .nest("/api", public.merge(protected))
        .layer(TraceLayer::new_for_http())
}
