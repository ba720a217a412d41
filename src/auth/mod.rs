//! Patient authentication: password hashing and bearer sessions.

pub mod password;
pub mod session;

pub use password::*;
pub use session::*;

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Stored password hash is malformed")]
    MalformedHash,

    #[error("Internal lock error")]
    LockPoisoned,
}
