use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("a user with this national ID already exists")]
    DuplicateNationalId,
    #[error("a user with this email already exists")]
    DuplicateEmail,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub(crate) const NATIONAL_ID_CONSTRAINT: &str = "users_national_id_key";
pub(crate) const EMAIL_CONSTRAINT: &str = "users_email_key";

impl StoreError {
    /// Maps unique-constraint violations on `users` to their domain variants.
    pub(crate) fn from_insert(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                match db_err.constraint() {
                    Some(NATIONAL_ID_CONSTRAINT) => return StoreError::DuplicateNationalId,
                    Some(EMAIL_CONSTRAINT) => return StoreError::DuplicateEmail,
                    _ => {}
                }
            }
        }
        StoreError::Database(err)
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, StoreError::DuplicateNationalId | StoreError::DuplicateEmail)
    }
}
