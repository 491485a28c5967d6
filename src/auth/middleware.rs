use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    Error, HttpMessage,
};
use futures::future::{ready, LocalBoxFuture, Ready};
use std::rc::Rc;

use crate::auth::token::verify_token;
use crate::error::AppError;

/// Bearer-token verification for the `/api` scope.
///
/// Register and login are the only `/api` routes reachable without a token.
/// On success the verified [`Claims`](crate::auth::Claims) are inserted into
/// request extensions for the `AuthenticatedUserId` extractor.
pub struct AuthMiddleware {
    secret: Rc<String>,
}

impl AuthMiddleware {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: Rc::new(secret.into()),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service,
            secret: Rc::clone(&self.secret),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
    secret: Rc<String>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // Skip authentication for the credential endpoints
        let path = req.path();
        if path == "/api/register" || path == "/api/login" {
            let fut = self.service.call(req);
            return Box::pin(fut);
        }

        let auth_header = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "));

        match auth_header {
            Some(token) => match verify_token(token, &self.secret) {
                Ok(claims) => {
                    req.extensions_mut().insert(claims);
                    let fut = self.service.call(req);
                    Box::pin(fut)
                }
                Err(app_err) => Box::pin(async move { Err(app_err.into()) }),
            },
            None => {
                let app_err = AppError::Unauthorized("Missing token".into());
                Box::pin(async move { Err(app_err.into()) })
            }
        }
    }
}
