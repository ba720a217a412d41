//! Shared types for the API layer.

use std::sync::Arc;

use crate::auth::SessionStore;
use crate::config::AppConfig;
use crate::db::{MemStorage, Storage};
use crate::models::Id;
use crate::triage::{GenerationError, SymptomDispatcher};

// ═══════════════════════════════════════════════════════════
// API context: shared state for the router
// ═══════════════════════════════════════════════════════════

/// Shared context for all API routes and middleware.
///
/// Every field is an explicit dependency, so tests can build a context
/// around stub providers and a fresh store.
#[derive(Clone)]
pub struct ApiContext {
    pub storage: Arc<dyn Storage>,
    pub sessions: Arc<SessionStore>,
    pub dispatcher: Arc<SymptomDispatcher>,
}

impl ApiContext {
    pub fn new(
        storage: Arc<dyn Storage>,
        sessions: Arc<SessionStore>,
        dispatcher: Arc<SymptomDispatcher>,
    ) -> Self {
        Self {
            storage,
            sessions,
            dispatcher,
        }
    }

    /// Production wiring: in-memory store, configured session TTL and provider chain.
    pub fn from_config(config: &AppConfig) -> Result<Self, GenerationError> {
        Ok(Self::new(
            Arc::new(MemStorage::new()),
            Arc::new(SessionStore::new(config.session_ttl)),
            Arc::new(SymptomDispatcher::from_config(config)?),
        ))
    }
}

// ═══════════════════════════════════════════════════════════
// Authenticated user: injected by auth middleware
// ═══════════════════════════════════════════════════════════

/// Authenticated patient, inserted into request extensions by
/// the auth middleware after successful token validation.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Id,
    pub token: String,
}

impl AuthUser {
    /// Only the owner may read records addressed by `user_id`.
    pub fn ensure_owner(&self, user_id: Id) -> Result<(), crate::api::error::ApiError> {
        if self.user_id == user_id {
            Ok(())
        } else {
            Err(crate::api::error::ApiError::Forbidden)
        }
    }
}
