//! 인증 미들웨어 설정 구조체 및 Transform 구현
//!
//! 보호된 scope 에 `.wrap(AuthMiddleware::new(security))` 로 적용합니다.
//! 통과한 요청에는 [`AuthenticatedUser`](crate::domain::models::auth::AuthenticatedUser)
//! 가 extensions 에 들어가며, 핸들러는 extractor 로 꺼내 씁니다.
//!
//! ```rust,ignore
//! web::scope("/api/v1")
//!     .wrap(AuthMiddleware::new(container.security.clone()))
//!     .service(users::me)
//! ```

use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;
use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
    body::EitherBody,
};
use crate::middlewares::auth_inner::AuthMiddlewareService;
use crate::services::auth::SecurityService;

pub struct AuthMiddleware {
    security: Arc<SecurityService>,
}

impl AuthMiddleware {
    pub fn new(security: Arc<SecurityService>) -> Self {
        Self { security }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            security: self.security.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{get, test, web, App, HttpResponse, Responder};
    use actix_web::http::StatusCode;
    use crate::domain::models::auth::AuthenticatedUser;
    use crate::domain::models::token::{TokenPurpose, ACCESS_TOKEN_LIFETIME, REFRESH_TOKEN_LIFETIME};
    use crate::errors::{MSG_INVALID_TOKEN, MSG_MISSING_AUTH_HEADER, MSG_UNVERIFIED};
    use crate::services::auth::security_service::test_support::{hmac_service, TEST_ISSUER};

    #[get("/whoami")]
    async fn whoami(user: AuthenticatedUser) -> impl Responder {
        HttpResponse::Ok().json(user)
    }

    async fn call(security: Arc<SecurityService>, authorization: Option<String>) -> (StatusCode, serde_json::Value) {
        let app = test::init_service(
            App::new().service(web::scope("/api").wrap(AuthMiddleware::new(security)).service(whoami)),
        )
        .await;

        let mut req = test::TestRequest::get().uri("/api/whoami");
        if let Some(value) = authorization {
            req = req.insert_header(("Authorization", value));
        }

        let res = test::call_service(&app, req.to_request()).await;
        let status = res.status();
        let body: serde_json::Value = test::read_body_json(res).await;
        (status, body)
    }

    fn token(security: &SecurityService, purpose: TokenPurpose, is_verified: bool) -> String {
        let lifetime = match purpose {
            TokenPurpose::Login => ACCESS_TOKEN_LIFETIME,
            TokenPurpose::RefreshToken => REFRESH_TOKEN_LIFETIME,
        };
        security.generate_token("user-42", None, lifetime, purpose, is_verified).unwrap()
    }

    #[actix_web::test]
    async fn test_missing_header_is_rejected() {
        let (status, body) = call(Arc::new(hmac_service()), None).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], MSG_MISSING_AUTH_HEADER);
    }

    #[actix_web::test]
    async fn test_non_bearer_header_is_rejected() {
        let (status, body) = call(Arc::new(hmac_service()), Some("Basic dXNlcjpwYXNz".to_string())).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], MSG_MISSING_AUTH_HEADER);
    }

    #[actix_web::test]
    async fn test_garbage_token_is_rejected() {
        let (status, body) = call(Arc::new(hmac_service()), Some("Bearer garbage".to_string())).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], MSG_INVALID_TOKEN);
    }

    #[actix_web::test]
    async fn test_refresh_token_is_not_accepted() {
        let security = Arc::new(hmac_service());
        let refresh = token(&security, TokenPurpose::RefreshToken, true);

        let (status, body) = call(security, Some(format!("Bearer {}", refresh))).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], MSG_INVALID_TOKEN);
    }

    #[actix_web::test]
    async fn test_unverified_account_is_rejected() {
        let security = Arc::new(hmac_service());
        let access = token(&security, TokenPurpose::Login, false);

        let (status, body) = call(security, Some(format!("Bearer {}", access))).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], MSG_UNVERIFIED);
    }

    #[actix_web::test]
    async fn test_token_without_verification_claim_is_unverified() {
        let security = Arc::new(hmac_service());
        let now = chrono::Utc::now().timestamp();
        let claims = serde_json::json!({
            "sub": "user-42",
            "purpose": "login",
            "iat": now,
            "exp": now + 900,
            "iss": TEST_ISSUER,
            "jti": "jti-1",
        });
        let signing_key = security.signing_key();
        let access = jsonwebtoken::encode(&signing_key.header(), &claims, signing_key.encoding_key()).unwrap();

        let (status, body) = call(security, Some(format!("Bearer {}", access))).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], MSG_UNVERIFIED);
    }

    #[actix_web::test]
    async fn test_verified_access_token_injects_user() {
        let security = Arc::new(hmac_service());
        let access = token(&security, TokenPurpose::Login, true);

        let (status, body) = call(security, Some(format!("Bearer {}", access))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user_id"], "user-42");
        assert_eq!(body["is_verified"], true);
    }
}
