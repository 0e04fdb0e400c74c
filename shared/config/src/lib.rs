pub mod access_control;
pub mod feature_toggles;

pub use access_control::{AccessControlConfig, AccessDecision};
pub use feature_toggles::FeatureToggles;

use carona_database::DatabaseConfig;

const DEFAULT_PORT: u16 = 3010;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// `None` runs the service against the in-memory store.
    pub database: Option<DatabaseConfig>,
    pub access_control: AccessControlConfig,
    pub feature_toggles: FeatureToggles,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("AUTH_SERVICE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("AUTH_SERVICE_PORT")
                .ok()
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(DEFAULT_PORT),
            database: DatabaseConfig::from_env(),
            access_control: AccessControlConfig::from_env(),
            feature_toggles: FeatureToggles::from_env_path(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_port_falls_back_on_garbage() {
        std::env::set_var("AUTH_SERVICE_PORT", "eighty");
        std::env::remove_var("AUTH_SERVICE_HOST");
        std::env::remove_var("DATABASE_URL");

        let config = AppConfig::from_env();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.host, "0.0.0.0");
        assert!(config.database.is_none());

        std::env::set_var("AUTH_SERVICE_PORT", "8088");
        assert_eq!(AppConfig::from_env().port, 8088);
        std::env::remove_var("AUTH_SERVICE_PORT");
    }
}
