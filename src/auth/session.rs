use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use super::AuthError;
use crate::models::Id;

/// Sweep expired sessions once the map grows past this size.
const CLEANUP_THRESHOLD: usize = 1000;

/// Hash a bearer token string using SHA-256.
pub fn hash_token(token: &str) -> [u8; 32] {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hasher.finalize().into()
}

/// Generate a random bearer token (URL-safe base64, 32 bytes of entropy).
pub fn generate_token() -> String {
    use base64::Engine;
    let bytes: [u8; 32] = rand::random();
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

struct SessionEntry {
    user_id: Id,
    expires_at: Instant,
}

/// In-memory bearer sessions. Only token hashes are kept.
pub struct SessionStore {
    sessions: Mutex<HashMap<[u8; 32], SessionEntry>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// Start a session for `user_id` and return the raw token.
    pub fn issue(&self, user_id: Id) -> Result<String, AuthError> {
        let token = generate_token();
        let mut sessions = self.sessions.lock().map_err(|_| AuthError::LockPoisoned)?;

        if sessions.len() > CLEANUP_THRESHOLD {
            let now = Instant::now();
            sessions.retain(|_, s| s.expires_at > now);
        }

        sessions.insert(
            hash_token(&token),
            SessionEntry {
                user_id,
                expires_at: Instant::now() + self.ttl,
            },
        );
        Ok(token)
    }

    /// Resolve a token to its user. Expired sessions are removed on sight.
    pub fn validate(&self, token: &str) -> Result<Option<Id>, AuthError> {
        let key = hash_token(token);
        let mut sessions = self.sessions.lock().map_err(|_| AuthError::LockPoisoned)?;

        match sessions.get(&key) {
            Some(entry) if entry.expires_at > Instant::now() => Ok(Some(entry.user_id)),
            Some(_) => {
                sessions.remove(&key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    /// End a session. Unknown tokens are ignored.
    pub fn revoke(&self, token: &str) -> Result<(), AuthError> {
        let mut sessions = self.sessions.lock().map_err(|_| AuthError::LockPoisoned)?;
        sessions.remove(&hash_token(token));
        Ok(())
    }

    pub fn active_count(&self) -> usize {
        self.sessions.lock().map(|s| s.len()).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_resolves_to_user() {
        let store = SessionStore::new(Duration::from_secs(60));
        let token = store.issue(7).unwrap();
        assert_eq!(store.validate(&token).unwrap(), Some(7));
    }

    #[test]
    fn unknown_token_resolves_to_none() {
        let store = SessionStore::new(Duration::from_secs(60));
        assert_eq!(store.validate("not-a-token").unwrap(), None);
    }

    #[test]
    fn revoked_token_stops_working() {
        let store = SessionStore::new(Duration::from_secs(60));
        let token = store.issue(1).unwrap();
        store.revoke(&token).unwrap();
        assert_eq!(store.validate(&token).unwrap(), None);
        assert_eq!(store.active_count(), 0);
    }

    #[test]
    fn expired_session_is_removed() {
        let store = SessionStore::new(Duration::ZERO);
        let token = store.issue(1).unwrap();
        assert_eq!(store.validate(&token).unwrap(), None);
        assert_eq!(store.active_count(), 0);
    }

    #[test]
    fn tokens_are_unique_and_url_safe() {
        let a = generate_token();
        let b = generate_token();
        assert_ne!(a, b);
        assert_eq!(a.len(), 43);
        assert!(a
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn hash_is_deterministic() {
        assert_eq!(hash_token("abc"), hash_token("abc"));
        assert_ne!(hash_token("abc"), hash_token("abd"));
    }
}
