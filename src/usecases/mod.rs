//! # 인증 유스케이스
//!
//! 저장소, 보안 서비스, 외부 신원 검증기를 조합해 하나의 요청 흐름을 수행합니다.
//! 각 유스케이스는 시작 시 한 번 만들어지고 `Arc` 로 의존성을 공유합니다.
//!
//! | 유스케이스 | 입력 | 출력 |
//! |-----------|------|------|
//! | [`CreateUserUseCase`] | 이메일, 비밀번호, 언어 | 생성된 사용자 |
//! | [`LoginUserUseCase`] | 이메일, 비밀번호 | 토큰 쌍 |
//! | [`LoginWithGoogleUseCase`] | Google ID 토큰, 언어 | 토큰 쌍 |
//! | [`RefreshTokenUseCase`] | 리프레시 토큰 | 액세스 토큰 |
//! | [`GetCurrentUserUseCase`] | 사용자 ID | 사용자 프로필 |
//!
//! bcrypt 연산은 모두 `web::block` 으로 블로킹 풀에서 실행됩니다.

pub mod create_user;
pub mod get_current_user;
pub mod login_user;
pub mod login_with_google;
pub mod refresh_token;

pub use create_user::CreateUserUseCase;
pub use get_current_user::GetCurrentUserUseCase;
pub use login_user::LoginUserUseCase;
pub use login_with_google::LoginWithGoogleUseCase;
pub use refresh_token::RefreshTokenUseCase;

use std::sync::Arc;
use actix_web::web;
use crate::errors::AppError;
use crate::services::auth::SecurityService;

pub(crate) async fn hash_password_blocking(
    security: &Arc<SecurityService>,
    password: String,
) -> Result<String, AppError> {
    let security = Arc::clone(security);
    web::block(move || security.hash_password(&password)).await?
}

pub(crate) async fn check_password_blocking(
    security: &Arc<SecurityService>,
    password: String,
    hash: String,
) -> Result<bool, AppError> {
    let security = Arc::clone(security);
    Ok(web::block(move || security.check_password(&password, &hash)).await?)
}

pub(crate) async fn verify_dummy_password_blocking(
    security: &Arc<SecurityService>,
    password: String,
) -> Result<(), AppError> {
    let security = Arc::clone(security);
    Ok(web::block(move || security.verify_dummy_password(&password)).await?)
}
