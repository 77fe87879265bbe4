//! Google ID 토큰 로그인
//!
//! 검증된 이메일로 로컬 계정을 찾고, 없으면 새 계정을 만듭니다.
//! 같은 이메일의 로컬 계정이 이미 있으면 그 계정으로 로그인합니다.
//!
//! 동시에 들어온 첫 로그인 두 건은 저장소의 이메일 유일성 때문에 한 건만
//! 생성에 성공합니다. 진 쪽은 `ConflictError` 를 받고 조회를 한 번 더 해서
//! 이긴 쪽의 계정으로 로그인합니다.

use std::sync::Arc;
use crate::config::AuthProvider;
use crate::domain::entities::users::user::{User, Verification};
use crate::domain::models::oauth::ExternalIdentity;
use crate::domain::models::token::TokenPair;
use crate::errors::AppError;
use crate::repositories::users::UserRepository;
use crate::services::auth::{ExternalIdentityVerifier, SecurityService, PROVISIONED_PASSWORD_BYTES};
use crate::utils::string_utils::normalize_email;
use super::hash_password_blocking;

pub struct LoginWithGoogleUseCase {
    user_repo: Arc<dyn UserRepository>,
    security: Arc<SecurityService>,
    verifier: Arc<dyn ExternalIdentityVerifier>,
    client_id: String,
}

impl LoginWithGoogleUseCase {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        security: Arc<SecurityService>,
        verifier: Arc<dyn ExternalIdentityVerifier>,
        client_id: impl Into<String>,
    ) -> Self {
        Self {
            user_repo,
            security,
            verifier,
            client_id: client_id.into(),
        }
    }

    pub async fn execute(&self, id_token: &str, preferred_language: Option<String>) -> Result<TokenPair, AppError> {
        let identity = self.verifier.validate(id_token, &self.client_id).await?;
        let email = normalize_email(&identity.email);

        let user = match self.user_repo.find_by_email(&email).await? {
            Some(existing) => {
                log::info!("Google 로그인: 기존 계정 id={:?}", existing.id_string());
                existing
            }
            None => self.provision(&email, &identity, preferred_language).await?,
        };

        self.security.issue_token_pair(&user)
    }

    async fn provision(
        &self,
        email: &str,
        identity: &ExternalIdentity,
        preferred_language: Option<String>,
    ) -> Result<User, AppError> {
        let random_password = self.security.generate_secure_random_string(PROVISIONED_PASSWORD_BYTES)?;
        let password_hash = hash_password_blocking(&self.security, random_password).await?;

        let verification = if identity.email_verified {
            Verification::verified_now()
        } else {
            Verification::default()
        };

        let user = User::create(email, password_hash, preferred_language, AuthProvider::Google, verification)?;

        match self.user_repo.create(user).await {
            Ok(created) => {
                log::info!("새 Google 사용자 등록: id={:?}, google_sub={}", created.id_string(), identity.subject);
                Ok(created)
            }
            Err(AppError::ConflictError(reason)) => {
                log::info!("Google 계정 동시 생성 감지, 기존 계정으로 로그인합니다");
                self.user_repo
                    .find_by_email(email)
                    .await?
                    .ok_or_else(|| AppError::DatabaseError(format!("생성 충돌 후 계정 조회 실패: {}", reason)))
            }
            Err(e) => Err(e),
        }
    }
}
