use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};

use crate::auth::token::Claims;
use crate::error::AppError;

/// Extracts the authenticated user's ID from request extensions.
///
/// Intended for routes protected by `AuthMiddleware`, which validates the
/// bearer token and inserts the decoded claims into request extensions.
/// If no claims are present the extractor fails with 401.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUserId(pub i32);

impl FromRequest for AuthenticatedUserId {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<Claims>() {
            Some(claims) => ready(Ok(AuthenticatedUserId(claims.sub))),
            None => {
                // Only reachable if a route was wired without AuthMiddleware.
                let err = AppError::Unauthorized("Missing authentication context".to_string());
                ready(Err(err.into()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::dev::Payload;
    use actix_web::http::StatusCode;
    use actix_web::test;

    #[actix_rt::test]
    async fn test_authenticated_user_id_extractor_success() {
        let req = test::TestRequest::default().to_http_request();
        req.extensions_mut().insert(Claims { sub: 123 });

        let mut payload = Payload::None;
        let extracted = AuthenticatedUserId::from_request(&req, &mut payload).await;
        assert_eq!(extracted.unwrap().0, 123);
    }

    #[actix_rt::test]
    async fn test_authenticated_user_id_extractor_failure() {
        let req = test::TestRequest::default().to_http_request();
        // No claims inserted into extensions

        let mut payload = Payload::None;
        let extracted = AuthenticatedUserId::from_request(&req, &mut payload).await;
        assert!(extracted.is_err());

        let err = extracted.unwrap_err();
        let response = err.error_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
