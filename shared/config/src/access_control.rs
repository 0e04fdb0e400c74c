use serde::{Deserialize, Serialize};
use std::env;

/// What happens to a request whose path is not listed as public.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessDecision {
    Allow,
    Deny,
}

impl AccessDecision {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "allow" => Some(AccessDecision::Allow),
            "deny" => Some(AccessDecision::Deny),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessControlConfig {
    /// Exact paths, or prefixes when the entry ends in `*`.
    pub public_paths: Vec<String>,
    pub default_decision: AccessDecision,
    /// `*` allows any origin.
    pub allowed_origins: Vec<String>,
}

impl Default for AccessControlConfig {
    fn default() -> Self {
        Self {
            public_paths: vec![
                "/health".to_string(),
                "/api/users/register".to_string(),
                "/api/users/login".to_string(),
            ],
            default_decision: AccessDecision::Deny,
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ],
        }
    }
}

impl AccessControlConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let default_decision = match env::var("ACCESS_DEFAULT_DECISION") {
            Ok(raw) => AccessDecision::parse(&raw).unwrap_or_else(|| {
                tracing::warn!("Unknown ACCESS_DEFAULT_DECISION '{}', using deny", raw);
                AccessDecision::Deny
            }),
            Err(_) => defaults.default_decision,
        };

        Self {
            public_paths: list_from_env("ACCESS_PUBLIC_PATHS").unwrap_or(defaults.public_paths),
            default_decision,
            allowed_origins: list_from_env("CORS_ALLOWED_ORIGINS").unwrap_or(defaults.allowed_origins),
        }
    }

    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|o| o == "*")
    }
}

fn list_from_env(key: &str) -> Option<Vec<String>> {
    let raw = env::var(key).ok()?;
    let items: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}
