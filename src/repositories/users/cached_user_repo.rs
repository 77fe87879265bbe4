//! Redis 조회 캐시 데코레이터
//!
//! 조회 결과만 캐시합니다. 쓰기는 항상 내부 저장소로 가고, 성공하면 관련
//! 키를 지웁니다. 캐시 장애는 로그만 남기고 내부 저장소 결과를 그대로 씁니다.

use std::sync::Arc;
use async_trait::async_trait;
use crate::caching::redis::RedisClient;
use crate::domain::entities::users::user::User;
use crate::errors::AppError;
use super::UserRepository;

/// 캐시 항목 TTL (초)
pub const USER_CACHE_TTL_SECS: u64 = 600;

pub fn email_cache_key(email: &str) -> String {
    format!("user:email:{}", email)
}

pub fn id_cache_key(id: &str) -> String {
    format!("user:id:{}", id)
}

/// 사용자 캐시 저장소
#[async_trait]
pub trait UserCache: Send + Sync {
    async fn get_user(&self, key: &str) -> Result<Option<User>, AppError>;

    async fn put_user(&self, key: &str, user: &User, ttl_secs: u64) -> Result<(), AppError>;

    async fn delete(&self, keys: &[String]) -> Result<(), AppError>;
}

#[async_trait]
impl UserCache for RedisClient {
    async fn get_user(&self, key: &str) -> Result<Option<User>, AppError> {
        Ok(self.get::<User>(key).await?)
    }

    async fn put_user(&self, key: &str, user: &User, ttl_secs: u64) -> Result<(), AppError> {
        Ok(self.set_with_expiry(key, user, ttl_secs).await?)
    }

    async fn delete(&self, keys: &[String]) -> Result<(), AppError> {
        Ok(self.del_multiple(keys).await?)
    }
}

pub struct CachedUserRepository {
    inner: Arc<dyn UserRepository>,
    cache: Arc<dyn UserCache>,
}

impl CachedUserRepository {
    pub fn new(inner: Arc<dyn UserRepository>, cache: Arc<dyn UserCache>) -> Self {
        Self { inner, cache }
    }

    async fn cached(&self, key: &str) -> Option<User> {
        match self.cache.get_user(key).await {
            Ok(user) => user,
            Err(e) => {
                log::warn!("캐시 조회 실패 ({}): {}", key, e);
                None
            }
        }
    }

    async fn store(&self, user: &User) {
        let Some(id) = user.id_string() else { return };

        for key in [id_cache_key(&id), email_cache_key(&user.email)] {
            if let Err(e) = self.cache.put_user(&key, user, USER_CACHE_TTL_SECS).await {
                log::warn!("캐시 저장 실패 ({}): {}", key, e);
            }
        }
    }

    async fn invalidate(&self, keys: Vec<String>) {
        if let Err(e) = self.cache.delete(&keys).await {
            log::warn!("캐시 무효화 실패: {}", e);
        }
    }
}

#[async_trait]
impl UserRepository for CachedUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        if let Some(user) = self.cached(&email_cache_key(email)).await {
            return Ok(Some(user));
        }

        let user = self.inner.find_by_email(email).await?;
        if let Some(ref user) = user {
            self.store(user).await;
        }

        Ok(user)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        if let Some(user) = self.cached(&id_cache_key(id)).await {
            return Ok(Some(user));
        }

        let user = self.inner.find_by_id(id).await?;
        if let Some(ref user) = user {
            self.store(user).await;
        }

        Ok(user)
    }

    async fn create(&self, user: User) -> Result<User, AppError> {
        let created = self.inner.create(user).await?;
        self.invalidate(vec![email_cache_key(&created.email)]).await;
        Ok(created)
    }

    async fn update(&self, user: &User) -> Result<Option<User>, AppError> {
        let previous_email = match user.id_string() {
            Some(id) => self.inner.find_by_id(&id).await?.map(|u| u.email),
            None => None,
        };

        let updated = self.inner.update(user).await?;

        if let Some(ref updated) = updated {
            let mut keys = vec![email_cache_key(&updated.email)];
            if let Some(id) = updated.id_string() {
                keys.push(id_cache_key(&id));
            }
            if let Some(previous) = previous_email.filter(|e| *e != updated.email) {
                keys.push(email_cache_key(&previous));
            }
            self.invalidate(keys).await;
        }

        Ok(updated)
    }
}
