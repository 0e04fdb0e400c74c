use actix_web::{http::header::ContentType, http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

use carona_database::StoreError;

#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("User must be of legal age ({minimum}).")]
    IneligibleAge { minimum: i32 },
    #[error("Validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("Failed to hash password: {0}")]
    Hashing(#[from] bcrypt::BcryptError),
    #[error("Password worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

impl ResponseError for CredentialError {
    fn status_code(&self) -> StatusCode {
        match self {
            CredentialError::IneligibleAge { .. } | CredentialError::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            CredentialError::Store(e) if e.is_conflict() => StatusCode::CONFLICT,
            CredentialError::Store(_) | CredentialError::Hashing(_) | CredentialError::Worker(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        match self {
            CredentialError::IneligibleAge { .. } => builder
                .content_type(ContentType::plaintext())
                .body(self.to_string()),
            CredentialError::Validation(errors) => builder.json(json!({
                "error": "Validation failed",
                "details": errors
            })),
            CredentialError::Store(StoreError::DuplicateNationalId) => builder
                .content_type(ContentType::plaintext())
                .body("A user with this national ID already exists."),
            CredentialError::Store(StoreError::DuplicateEmail) => builder
                .content_type(ContentType::plaintext())
                .body("A user with this email already exists."),
            _ => {
                tracing::error!("Credential operation failed: {}", self);
                builder.json(json!({ "error": "Internal server error" }))
            }
        }
    }
}
