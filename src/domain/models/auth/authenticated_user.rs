use std::future::{ready, Ready};
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use serde::{Deserialize, Serialize};
use crate::errors::AppError;

/// 인증 미들웨어가 검증한 토큰에서 추출한 사용자 정보
///
/// `AuthMiddleware` 를 통과한 요청의 extensions 에 저장됩니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// 사용자 고유 ID (토큰의 `sub`)
    pub user_id: String,

    /// 토큰 발급 시점의 인증 상태
    pub is_verified: bool,
}

/// ActixWeb FromRequest trait 구현
///
/// 미들웨어가 적용되지 않은 라우트에서 사용하면 401을 반환합니다.
impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<actix_web::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(AppError::InvalidToken.into())),
        }
    }
}
