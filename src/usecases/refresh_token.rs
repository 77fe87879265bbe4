//! 리프레시 토큰으로 새 액세스 토큰 발급
//!
//! 기본 동작은 토큰에 담긴 `sub`, `isVerified` 를 그대로 사용하며 저장소를
//! 조회하지 않습니다. `recheck_verification` 이 켜져 있으면 저장소에서 현재
//! 인증 상태를 다시 읽습니다. 리프레시 토큰 자체는 교체하지 않습니다.

use std::sync::Arc;
use crate::domain::models::token::TokenPurpose;
use crate::errors::AppError;
use crate::repositories::users::UserRepository;
use crate::services::auth::SecurityService;

pub struct RefreshTokenUseCase {
    user_repo: Arc<dyn UserRepository>,
    security: Arc<SecurityService>,
    recheck_verification: bool,
}

impl RefreshTokenUseCase {
    pub fn new(user_repo: Arc<dyn UserRepository>, security: Arc<SecurityService>, recheck_verification: bool) -> Self {
        Self { user_repo, security, recheck_verification }
    }

    pub async fn execute(&self, refresh_token: &str) -> Result<String, AppError> {
        let claims = self.security.validate_token(refresh_token)?;

        if claims.purpose != TokenPurpose::RefreshToken {
            log::debug!("리프레시 거부: 용도 불일치 ({})", claims.purpose.as_str());
            return Err(AppError::WrongTokenPurpose);
        }

        let is_verified = if self.recheck_verification {
            self.user_repo
                .find_by_id(&claims.sub)
                .await?
                .ok_or(AppError::InvalidToken)?
                .is_verified()
        } else {
            claims.is_verified
        };

        self.security.generate_token(
            &claims.sub,
            None,
            TokenPurpose::Login.lifetime(),
            TokenPurpose::Login,
            is_verified,
        )
    }
}
