use actix_cors::Cors;

use carona_config::AccessControlConfig;

const CORS_MAX_AGE_SECS: usize = 3600;

/// Builds the CORS layer from the configured origin list.
pub fn cors_from_config(config: &AccessControlConfig) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![
            actix_web::http::header::CONTENT_TYPE,
            actix_web::http::header::ACCEPT,
        ])
        .max_age(CORS_MAX_AGE_SECS);

    if config.allows_any_origin() {
        return cors.allow_any_origin();
    }

    config
        .allowed_origins
        .iter()
        .fold(cors, |cors, origin| cors.allowed_origin(origin))
}
