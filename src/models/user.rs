use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{require, Id, ValidationError};

const MIN_PASSWORD_LEN: usize = 8;
const MAX_USERNAME_LEN: usize = 32;

/// A registered patient. The password hash is never serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Id,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub full_name: String,
    pub email: String,
    pub date_of_birth: NaiveDate,
    pub gender: String,
}

/// Registration payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub full_name: String,
    pub email: String,
    pub date_of_birth: NaiveDate,
    pub gender: String,
}

impl NewUser {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let username = self.username.trim();
        require("Username", username)?;
        if username.chars().count() > MAX_USERNAME_LEN
            || !username
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
        {
            return Err(ValidationError(format!(
                "Username must be at most {MAX_USERNAME_LEN} letters, digits, '_', '-' or '.'"
            )));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ValidationError(format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        require("Full name", &self.full_name)?;
        let email = self.email.trim();
        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && domain.contains('.') => {}
            _ => return Err(ValidationError("Invalid email address".into())),
        }
        require("Gender", &self.gender)
    }

    /// Build the stored user. `password_hash` is computed by the caller.
    pub(crate) fn into_user(self, id: Id, password_hash: String) -> User {
        User {
            id,
            username: self.username.trim().to_string(),
            password_hash,
            full_name: self.full_name.trim().to_string(),
            email: self.email.trim().to_string(),
            date_of_birth: self.date_of_birth,
            gender: self.gender.trim().to_string(),
        }
    }
}

/// Login payload.
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration() -> NewUser {
        NewUser {
            username: "maria.k".into(),
            password: "correct horse".into(),
            full_name: "Maria Kowalski".into(),
            email: "maria@example.org".into(),
            date_of_birth: NaiveDate::from_ymd_opt(1988, 4, 17).unwrap(),
            gender: "female".into(),
        }
    }

    #[test]
    fn valid_registration_passes() {
        assert!(registration().validate().is_ok());
    }

    #[test]
    fn short_password_is_rejected() {
        let mut user = registration();
        user.password = "short".into();
        assert!(user.validate().unwrap_err().0.contains("at least 8"));
    }

    #[test]
    fn username_with_spaces_is_rejected() {
        let mut user = registration();
        user.username = "maria k".into();
        assert!(user.validate().is_err());
    }

    #[test]
    fn email_without_domain_is_rejected() {
        let mut user = registration();
        user.email = "maria@localhost".into();
        assert_eq!(
            user.validate(),
            Err(ValidationError("Invalid email address".into()))
        );
    }

    #[test]
    fn password_hash_is_not_serialized() {
        let user = registration().into_user(1, "pbkdf2-sha256$secret".into());
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert_eq!(json["fullName"], "Maria Kowalski");
        assert_eq!(json["dateOfBirth"], "1988-04-17");
    }
}
