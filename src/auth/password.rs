use base64::engine::general_purpose::STANDARD_NO_PAD;
use base64::Engine;
use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use subtle::ConstantTimeEq;

use super::AuthError;

#[cfg(not(test))]
pub const PBKDF2_ITERATIONS: u32 = 600_000;
#[cfg(test)]
pub const PBKDF2_ITERATIONS: u32 = 1_000;

pub const HASH_LENGTH: usize = 32;
pub const SALT_LENGTH: usize = 16;

const SCHEME: &str = "pbkdf2-sha256";

/// Salt for the stand-in derivation run when no account matches.
const DUMMY_SALT: [u8; SALT_LENGTH] = [0x5a; SALT_LENGTH];

/// Generate a cryptographically random salt
fn generate_salt() -> [u8; SALT_LENGTH] {
    use rand::RngCore;
    let mut salt = [0u8; SALT_LENGTH];
    rand::thread_rng().fill_bytes(&mut salt);
    salt
}

fn derive(password: &str, salt: &[u8], iterations: u32) -> [u8; HASH_LENGTH] {
    let mut out = [0u8; HASH_LENGTH];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, iterations, &mut out);
    out
}

/// Hash a password with a fresh salt.
///
/// Format: `pbkdf2-sha256$<iterations>$<salt b64>$<hash b64>`.
pub fn hash_password(password: &str) -> String {
    let salt = generate_salt();
    let hash = derive(password, &salt, PBKDF2_ITERATIONS);
    format!(
        "{SCHEME}${PBKDF2_ITERATIONS}${}${}",
        STANDARD_NO_PAD.encode(salt),
        STANDARD_NO_PAD.encode(hash)
    )
}

/// Check a password against a stored hash in constant time.
pub fn verify_password(password: &str, stored: &str) -> Result<bool, AuthError> {
    let mut parts = stored.split('$');
    let (Some(SCHEME), Some(iterations), Some(salt), Some(expected), None) = (
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
    ) else {
        return Err(AuthError::MalformedHash);
    };

    let iterations: u32 = iterations.parse().map_err(|_| AuthError::MalformedHash)?;
    let salt = STANDARD_NO_PAD
        .decode(salt)
        .map_err(|_| AuthError::MalformedHash)?;
    let expected = STANDARD_NO_PAD
        .decode(expected)
        .map_err(|_| AuthError::MalformedHash)?;
    if expected.len() != HASH_LENGTH || iterations == 0 {
        return Err(AuthError::MalformedHash);
    }

    let actual = derive(password, &salt, iterations);
    Ok(actual[..].ct_eq(&expected[..]).unwrap_u8() == 1)
}

/// Verify a login attempt that may have no matching account.
///
/// A missing account still pays for a full derivation, so response time
/// does not reveal which usernames exist.
pub fn verify_login(password: &str, stored: Option<&str>) -> Result<bool, AuthError> {
    match stored {
        Some(stored) => verify_password(password, stored),
        None => {
            let _ = derive(password, &DUMMY_SALT, PBKDF2_ITERATIONS);
            Ok(false)
        }
    }
}
