use actix_web::{error::InternalError, web, HttpResponse};
use serde_json::json;

use crate::handlers;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(handlers::health_check))
        .service(
            web::scope("/api/users")
                .app_data(json_config())
                .route("/register", web::post().to(handlers::register))
                .route("/login", web::post().to(handlers::login)),
        );
}

// Malformed bodies, including a birth_date that is not YYYY-MM-DD, become a
// JSON 400 rather than actix's default plain-text error.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::BadRequest().json(json!({
            "error": "Invalid request body",
            "details": err.to_string()
        }));
        InternalError::from_response(err, response).into()
    })
}
