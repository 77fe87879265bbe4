use std::sync::Arc;
use crate::domain::dto::users::response::UserResponse;
use crate::errors::AppError;
use crate::repositories::users::UserRepository;

/// 인증 미들웨어가 주입한 사용자 ID 로 프로필 조회
pub struct GetCurrentUserUseCase {
    user_repo: Arc<dyn UserRepository>,
}

impl GetCurrentUserUseCase {
    pub fn new(user_repo: Arc<dyn UserRepository>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, user_id: &str) -> Result<UserResponse, AppError> {
        let user = self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("사용자를 찾을 수 없습니다".to_string()))?;

        Ok(UserResponse::from(user))
    }
}
