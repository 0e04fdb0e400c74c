use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use anyhow::Context;
use tracing_actix_web::TracingLogger;

use carona_auth::{configure_routes, CredentialService, PasswordEncoder};
use carona_config::AppConfig;
use carona_database::{Database, InMemoryUserStore, UserStore};
use carona_middleware::{cors_from_config, AccessPolicy};
use carona_observability::{init_tracing, TracingConfig};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    init_tracing(TracingConfig::for_service("auth-service")).context("Failed to initialize tracing")?;

    let config = AppConfig::from_env();

    let store: Arc<dyn UserStore> = match &config.database {
        Some(db_config) => {
            let database = Database::new(db_config).await?;
            if db_config.run_migrations {
                database.migrate().await?;
                tracing::info!("Database migrations applied");
            }
            Arc::new(database.users())
        }
        None => {
            tracing::warn!("DATABASE_URL not set; using the in-memory user store. Users are lost on restart.");
            Arc::new(InMemoryUserStore::new())
        }
    };

    let credentials = web::Data::new(
        CredentialService::new(store, PasswordEncoder::default())
            .context("Failed to initialize credential service")?,
    );
    let toggles = web::Data::new(config.feature_toggles.clone());
    let access_control = config.access_control.clone();
    let policy = AccessPolicy::new(&access_control);

    if !config.feature_toggles.registration_enabled() {
        tracing::warn!("Registration disabled via feature toggles");
    }
    tracing::info!(enabled = ?config.feature_toggles.enabled_features(), "Feature toggles loaded");

    tracing::info!(
        host = %config.host,
        port = config.port,
        default_access = ?access_control.default_decision,
        "Starting auth service"
    );

    HttpServer::new(move || {
        App::new()
            .app_data(credentials.clone())
            .app_data(toggles.clone())
            .wrap(policy.clone())
            .wrap(cors_from_config(&access_control))
            .wrap(TracingLogger::default())
            .configure(configure_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    Ok(())
}
