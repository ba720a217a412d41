//! Persistence layer. One in-memory backend keyed by auto-incrementing ids.

pub mod memory;

pub use memory::*;

use thiserror::Error;

use crate::models::{
    AiAnalysis, Appointment, HealthRecord, Id, NewAiAnalysis, NewAppointment, NewHealthRecord,
    NewUser, User,
};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum StorageError {
    #[error("Username already taken: {0}")]
    DuplicateUsername(String),

    #[error("Internal lock error")]
    LockPoisoned,
}

/// Entity-scoped storage operations used by the HTTP handlers.
///
/// Lists are returned in creation order.
pub trait Storage: Send + Sync {
    fn get_user(&self, id: Id) -> Result<Option<User>, StorageError>;
    fn get_user_by_username(&self, username: &str) -> Result<Option<User>, StorageError>;
    fn create_user(&self, user: NewUser, password_hash: String) -> Result<User, StorageError>;

    fn appointments_for_user(&self, user_id: Id) -> Result<Vec<Appointment>, StorageError>;
    fn create_appointment(
        &self,
        user_id: Id,
        appointment: NewAppointment,
    ) -> Result<Appointment, StorageError>;

    fn health_records_for_user(&self, user_id: Id) -> Result<Vec<HealthRecord>, StorageError>;
    fn create_health_record(
        &self,
        user_id: Id,
        record: NewHealthRecord,
    ) -> Result<HealthRecord, StorageError>;

    fn analyses_for_user(&self, user_id: Id) -> Result<Vec<AiAnalysis>, StorageError>;
    fn create_analysis(&self, analysis: NewAiAnalysis) -> Result<AiAnalysis, StorageError>;
}
