use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error as ActixError, HttpResponse,
};
use futures_util::future::LocalBoxFuture;
use serde_json::json;
use std::{
    future::{ready, Ready},
    rc::Rc,
};

use carona_config::{AccessControlConfig, AccessDecision};

/// Path-based access policy. Public paths always pass; everything else gets
/// the configured default decision.
#[derive(Debug, Clone)]
pub struct AccessPolicy {
    exact: Vec<String>,
    prefixes: Vec<String>,
    default_decision: AccessDecision,
}

impl AccessPolicy {
    pub fn new(config: &AccessControlConfig) -> Self {
        let (prefixes, exact): (Vec<String>, Vec<String>) = config
            .public_paths
            .iter()
            .cloned()
            .partition(|p| p.ends_with('*'));

        Self {
            exact,
            prefixes: prefixes
                .into_iter()
                .map(|p| p.trim_end_matches('*').to_string())
                .collect(),
            default_decision: config.default_decision,
        }
    }

    pub fn is_public(&self, path: &str) -> bool {
        self.exact.iter().any(|p| p == path) || self.prefixes.iter().any(|p| path.starts_with(p))
    }

    pub fn decide(&self, path: &str) -> AccessDecision {
        if self.is_public(path) {
            AccessDecision::Allow
        } else {
            self.default_decision
        }
    }
}

pub struct AccessPolicyMiddleware<S> {
    service: Rc<S>,
    policy: Rc<AccessPolicy>,
}

impl<S, B> Service<ServiceRequest> for AccessPolicyMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let decision = self.policy.decide(req.path());

        Box::pin(async move {
            match decision {
                AccessDecision::Allow => {
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                AccessDecision::Deny => {
                    tracing::warn!(method = %req.method(), path = %req.path(), "Access denied by policy");
                    Ok(req
                        .into_response(HttpResponse::Forbidden().json(json!({
                            "error": "Access denied"
                        })))
                        .map_into_right_body())
                }
            }
        })
    }
}

impl<S, B> Transform<S, ServiceRequest> for AccessPolicy
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = ActixError;
    type Transform = AccessPolicyMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AccessPolicyMiddleware {
            service: Rc::new(service),
            policy: Rc::new(self.clone()),
        }))
    }
}
