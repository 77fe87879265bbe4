use std::sync::Arc;
use crate::config::AuthProvider;
use crate::domain::dto::users::request::RegisterRequest;
use crate::domain::entities::users::user::{User, Verification};
use crate::errors::AppError;
use crate::repositories::users::UserRepository;
use crate::services::auth::SecurityService;
use crate::utils::string_utils::normalize_email;
use super::hash_password_blocking;

/// 로컬(이메일/비밀번호) 계정 생성
///
/// 새 계정은 미인증 상태로 만들어집니다. 같은 이메일이 있으면 `ConflictError`.
pub struct CreateUserUseCase {
    user_repo: Arc<dyn UserRepository>,
    security: Arc<SecurityService>,
}

impl CreateUserUseCase {
    pub fn new(user_repo: Arc<dyn UserRepository>, security: Arc<SecurityService>) -> Self {
        Self { user_repo, security }
    }

    pub async fn execute(&self, request: RegisterRequest) -> Result<User, AppError> {
        let start_time = std::time::Instant::now();
        let email = normalize_email(&request.email);

        if self.user_repo.find_by_email(&email).await?.is_some() {
            return Err(AppError::ConflictError("이미 사용 중인 이메일입니다".to_string()));
        }

        let password_hash = hash_password_blocking(&self.security, request.password).await?;

        let user = User::create(
            &email,
            password_hash,
            request.preferred_language,
            AuthProvider::Local,
            Verification::default(),
        )?;

        let created = self.user_repo.create(user).await?;

        log::info!("로컬 사용자 생성: id={:?}, took={:?}", created.id_string(), start_time.elapsed());
        Ok(created)
    }
}
