//! 인증 미들웨어 서비스 구현
//!
//! 요청마다 한 번씩 다음 순서로 검사하고, 처음 실패한 단계에서 401 로 끝냅니다.
//!
//! 1. `Authorization: Bearer <token>` 헤더
//! 2. 토큰 서명/만료/발급자 검증, 용도가 `login` 인지 확인
//! 3. `isVerified` 클레임
//!
//! 상태를 갖지 않으므로 모든 요청이 토큰을 다시 검증합니다.

use std::rc::Rc;
use std::sync::Arc;
use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::{Error, HttpMessage, HttpResponse};
use futures_util::future::LocalBoxFuture;
use crate::domain::models::auth::AuthenticatedUser;
use crate::domain::models::token::TokenPurpose;
use crate::errors::{MSG_INVALID_TOKEN, MSG_MISSING_AUTH_HEADER, MSG_UNVERIFIED};
use crate::services::auth::SecurityService;
use crate::utils::string_utils::extract_bearer_token;

pub struct AuthMiddlewareService<S> {
    pub service: Rc<S>,
    pub security: Arc<SecurityService>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rejection {
    MissingHeader,
    InvalidToken,
    Unverified,
}

impl Rejection {
    fn message(self) -> &'static str {
        match self {
            Rejection::MissingHeader => MSG_MISSING_AUTH_HEADER,
            Rejection::InvalidToken => MSG_INVALID_TOKEN,
            Rejection::Unverified => MSG_UNVERIFIED,
        }
    }
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let security = self.security.clone();

        Box::pin(async move {
            match authenticate(&req, &security) {
                Ok(user) => {
                    log::debug!("인증 성공: 사용자 ID {}", user.user_id);
                    req.extensions_mut().insert(user);
                }
                Err(rejection) => {
                    log::warn!("인증 실패: {} {} ({:?})", req.method(), req.path(), rejection);
                    let response = HttpResponse::Unauthorized()
                        .json(serde_json::json!({ "error": rejection.message() }));
                    let (req, _) = req.into_parts();
                    return Ok(ServiceResponse::new(req, response).map_into_right_body());
                }
            }

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

fn authenticate(req: &ServiceRequest, security: &SecurityService) -> Result<AuthenticatedUser, Rejection> {
    let token = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(extract_bearer_token)
        .ok_or(Rejection::MissingHeader)?;

    let claims = security
        .validate_token(token)
        .map_err(|_| Rejection::InvalidToken)?;

    if claims.purpose != TokenPurpose::Login {
        return Err(Rejection::InvalidToken);
    }

    if !claims.is_verified {
        return Err(Rejection::Unverified);
    }

    Ok(AuthenticatedUser {
        user_id: claims.sub,
        is_verified: claims.is_verified,
    })
}
