//! Portal entities and their validated creation payloads.

pub mod analysis;
pub mod appointment;
pub mod health_record;
pub mod user;

pub use analysis::*;
pub use appointment::*;
pub use health_record::*;
pub use user::*;

use thiserror::Error;

/// Auto-incrementing row identifier, unique per table.
pub type Id = u32;

/// A request payload failed field validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct ValidationError(pub String);

/// Require a non-blank text field.
pub(crate) fn require(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError(format!("{field} is required")));
    }
    Ok(())
}
