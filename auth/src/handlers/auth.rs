use actix_web::{http::header::ContentType, web, Either, HttpResponse};
use serde_json::json;

use carona_config::FeatureToggles;
use carona_models::{LoginRequest, RegisterRequest, UserProfile};

use crate::errors::CredentialError;
use crate::services::CredentialService;

pub const LOGIN_SUCCEEDED: &str = "Login successful.";
pub const LOGIN_FAILED: &str = "Invalid national ID or password.";

pub async fn register(
    request: web::Json<RegisterRequest>,
    credentials: web::Data<CredentialService>,
    toggles: web::Data<FeatureToggles>,
) -> Result<HttpResponse, CredentialError> {
    if !toggles.registration_enabled() {
        return Ok(disabled());
    }

    let user = credentials.register(request.into_inner()).await?;

    // The stored hash never leaves the service.
    Ok(HttpResponse::Created().json(UserProfile::from(user)))
}

/// Accepts the credentials as a JSON body, or as `national_id` / `password`
/// query parameters for older clients.
pub async fn login(
    request: Either<web::Json<LoginRequest>, web::Query<LoginRequest>>,
    credentials: web::Data<CredentialService>,
) -> Result<HttpResponse, CredentialError> {
    let request = match request {
        Either::Left(body) => body.into_inner(),
        Either::Right(query) => query.into_inner(),
    };

    if credentials.authenticate(&request).await? {
        Ok(HttpResponse::Ok()
            .content_type(ContentType::plaintext())
            .body(LOGIN_SUCCEEDED))
    } else {
        Ok(HttpResponse::Unauthorized()
            .content_type(ContentType::plaintext())
            .body(LOGIN_FAILED))
    }
}

fn disabled() -> HttpResponse {
    HttpResponse::ServiceUnavailable().json(json!({
        "error": "Registration is currently disabled"
    }))
}
