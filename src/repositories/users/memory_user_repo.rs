//! 프로세스 내 사용자 저장소
//!
//! `USER_STORE=memory` 로 실행할 때와 유스케이스 테스트에서 사용합니다.
//! 이메일 중복 검사와 삽입은 같은 쓰기 잠금 안에서 수행됩니다.

use std::collections::HashMap;
use std::sync::RwLock;
use async_trait::async_trait;
use chrono::Utc;
use mongodb::bson::oid::ObjectId;
use crate::domain::entities::users::user::User;
use crate::errors::AppError;
use super::UserRepository;

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<ObjectId, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.users.read().map(|users| users.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned() -> AppError {
    AppError::InternalError("사용자 저장소 잠금이 오염되었습니다".to_string())
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let users = self.users.read().map_err(|_| poisoned())?;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        let Ok(object_id) = ObjectId::parse_str(id) else {
            return Ok(None);
        };

        let users = self.users.read().map_err(|_| poisoned())?;
        Ok(users.get(&object_id).cloned())
    }

    async fn create(&self, mut user: User) -> Result<User, AppError> {
        let mut users = self.users.write().map_err(|_| poisoned())?;

        if users.values().any(|u| u.email == user.email) {
            return Err(AppError::ConflictError("이미 사용 중인 이메일입니다".to_string()));
        }

        let id = ObjectId::new();
        user.id = Some(id);
        users.insert(id, user.clone());

        Ok(user)
    }

    async fn update(&self, user: &User) -> Result<Option<User>, AppError> {
        let id = user
            .id
            .ok_or_else(|| AppError::ValidationError("ID 없는 사용자는 갱신할 수 없습니다".to_string()))?;

        let mut users = self.users.write().map_err(|_| poisoned())?;

        if users.values().any(|u| u.email == user.email && u.id != user.id) {
            return Err(AppError::ConflictError("이미 사용 중인 이메일입니다".to_string()));
        }

        let Some(existing) = users.get_mut(&id) else {
            return Ok(None);
        };

        *existing = user.clone();
        existing.updated_at = Utc::now();

        Ok(Some(existing.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use crate::config::AuthProvider;
    use crate::domain::entities::users::user::Verification;

    fn user(email: &str) -> User {
        User::create(email, "$2b$04$hash".to_string(), None, AuthProvider::Local, Verification::default())
            .unwrap()
    }

    #[actix_web::test]
    async fn test_create_assigns_id_and_is_findable() {
        let repo = InMemoryUserRepository::new();

        let created = repo.create(user("a@x.com")).await.unwrap();
        let id = created.id_string().unwrap();

        assert_eq!(repo.find_by_id(&id).await.unwrap().unwrap().email, "a@x.com");
        assert_eq!(repo.find_by_email("a@x.com").await.unwrap().unwrap().id, created.id);
        assert_eq!(repo.len(), 1);
    }

    #[actix_web::test]
    async fn test_duplicate_email_conflicts() {
        let repo = InMemoryUserRepository::new();
        repo.create(user("a@x.com")).await.unwrap();

        let result = repo.create(user("A@X.com")).await;

        assert!(matches!(result, Err(AppError::ConflictError(_))));
        assert_eq!(repo.len(), 1);
    }

    #[actix_web::test]
    async fn test_concurrent_creates_yield_one_user() {
        let repo = Arc::new(InMemoryUserRepository::new());

        let (first, second) = futures_util::future::join(
            repo.create(user("race@x.com")),
            repo.create(user("race@x.com")),
        )
        .await;

        assert_eq!([first.is_ok(), second.is_ok()].iter().filter(|ok| **ok).count(), 1);
        assert_eq!(repo.len(), 1);
    }

    #[actix_web::test]
    async fn test_malformed_id_is_none() {
        let repo = InMemoryUserRepository::new();

        assert!(repo.find_by_id("not-an-object-id").await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn test_update_replaces_existing() {
        let repo = InMemoryUserRepository::new();
        let mut created = repo.create(user("a@x.com")).await.unwrap();

        created.verification = Verification::verified_now();
        let updated = repo.update(&created).await.unwrap().unwrap();

        assert!(updated.is_verified());
        assert!(repo.find_by_email("a@x.com").await.unwrap().unwrap().is_verified());
    }

    #[actix_web::test]
    async fn test_update_missing_user_is_none() {
        let repo = InMemoryUserRepository::new();
        let mut ghost = user("ghost@x.com");
        ghost.id = Some(ObjectId::new());

        assert!(repo.update(&ghost).await.unwrap().is_none());
    }
}
