use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::services::CredentialService;

pub async fn health_check(credentials: web::Data<CredentialService>) -> HttpResponse {
    let store = credentials.store();
    let store_status = match store.ping().await {
        Ok(()) => "connected",
        Err(e) => {
            tracing::error!("Store health check failed: {}", e);
            "disconnected"
        }
    };

    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "auth-service",
        "store": {
            "backend": store.backend(),
            "status": store_status
        },
        "timestamp": chrono::Utc::now()
    }))
}
