//! 이메일/비밀번호 로그인
//!
//! 존재하지 않는 이메일과 틀린 비밀번호는 같은 에러, 같은 비용(bcrypt 검증 1회)으로
//! 응답합니다. 로그인은 저장된 사용자를 변경하지 않습니다.

use std::sync::Arc;
use crate::domain::models::token::TokenPair;
use crate::errors::AppError;
use crate::repositories::users::UserRepository;
use crate::services::auth::SecurityService;
use crate::utils::string_utils::normalize_email;
use super::{check_password_blocking, verify_dummy_password_blocking};

pub struct LoginUserUseCase {
    user_repo: Arc<dyn UserRepository>,
    security: Arc<SecurityService>,
}

impl LoginUserUseCase {
    pub fn new(user_repo: Arc<dyn UserRepository>, security: Arc<SecurityService>) -> Self {
        Self { user_repo, security }
    }

    pub async fn execute(&self, email: &str, password: &str) -> Result<TokenPair, AppError> {
        let email = normalize_email(email);

        let Some(user) = self.user_repo.find_by_email(&email).await? else {
            verify_dummy_password_blocking(&self.security, password.to_string()).await?;
            log::debug!("로그인 실패: 등록되지 않은 이메일");
            return Err(AppError::InvalidCredentials);
        };

        let matches = check_password_blocking(
            &self.security,
            password.to_string(),
            user.password_hash.clone(),
        )
        .await?;

        if !matches {
            log::debug!("로그인 실패: 비밀번호 불일치 (id={:?})", user.id_string());
            return Err(AppError::InvalidCredentials);
        }

        let pair = self.security.issue_token_pair(&user)?;
        log::info!("로컬 로그인 성공: id={:?}", user.id_string());

        Ok(pair)
    }
}
