//! Patient portal HTTP API.
//!
//! Routes are nested under `/api/`. Protected routes run behind
//! a middleware stack: Auth → Audit → Handler.
//!
//! `api_router()` returns a `Router` that can be mounted on any axum
//! server instance; `start_api_server_on()` binds and serves it.

pub mod endpoints;
pub mod error;
pub mod middleware;
pub mod router;
pub mod server;
pub mod types;

pub use router::api_router;
pub use server::{start_api_server_on, ApiServer, ServerError, ServerSession};
pub use types::ApiContext;
