//! API endpoint handlers.
//!
//! Each module corresponds to a portal page or feature.

pub mod analysis;
pub mod appointments;
pub mod auth;
pub mod health;
pub mod health_records;
