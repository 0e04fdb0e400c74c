use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// bcrypt ignores everything past this many bytes of input.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// A persisted user. `password_hash` only ever holds a bcrypt hash.
///
/// Deliberately not serializable; responses go through [`UserProfile`].
#[derive(Debug, Clone, FromRow, PartialEq)]
pub struct UserRecord {
    pub id: Uuid,
    pub name: String,
    pub national_id: String,
    pub password_hash: String,
    pub enrollment_code: Option<String>,
    pub email: Option<String>,
    pub birth_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// A validated, hashed candidate waiting for the store to assign an id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub name: String,
    pub national_id: String,
    pub password_hash: String,
    pub enrollment_code: Option<String>,
    pub email: Option<String>,
    pub birth_date: NaiveDate,
}

impl NewUser {
    pub fn from_request(request: RegisterRequest, password_hash: String) -> Self {
        NewUser {
            name: request.name,
            national_id: request.national_id,
            password_hash,
            enrollment_code: request.enrollment_code,
            email: request.email,
            birth_date: request.birth_date,
        }
    }
}

/// Outward view of a user. Carries no password material.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub id: Uuid,
    pub name: String,
    pub national_id: String,
    pub enrollment_code: Option<String>,
    pub email: Option<String>,
    pub birth_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl From<UserRecord> for UserProfile {
    fn from(user: UserRecord) -> Self {
        UserProfile {
            id: user.id,
            name: user.name,
            national_id: user.national_id,
            enrollment_code: user.enrollment_code,
            email: user.email,
            birth_date: user.birth_date,
            created_at: user.created_at,
        }
    }
}

#[derive(Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[validate(length(min = 1, message = "National ID is required"))]
    pub national_id: String,
    #[validate(
        length(min = 1, message = "Password is required"),
        custom(function = "password_fits_bcrypt")
    )]
    pub password: String,
    #[serde(default)]
    pub enrollment_code: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    /// ISO calendar date, `YYYY-MM-DD`.
    pub birth_date: NaiveDate,
}

fn password_fits_bcrypt(password: &str) -> Result<(), ValidationError> {
    if password.len() > MAX_PASSWORD_BYTES {
        let mut error = ValidationError::new("password_too_long");
        error.message = Some("Password must be at most 72 bytes".into());
        return Err(error);
    }
    Ok(())
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("name", &self.name)
            .field("national_id", &self.national_id)
            .field("password", &"<redacted>")
            .field("enrollment_code", &self.enrollment_code)
            .field("email", &self.email)
            .field("birth_date", &self.birth_date)
            .finish()
    }
}

// Empty values are accepted here and simply fail to match at login.
#[derive(Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub national_id: String,
    #[serde(default)]
    pub password: String,
}

impl LoginRequest {
    pub fn new(national_id: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            national_id: national_id.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("national_id", &self.national_id)
            .field("password", &"<redacted>")
            .finish()
    }
}
