//! 사용자 저장소
//!
//! 유스케이스는 [`UserRepository`] trait 에만 의존하고, 구현체는 시작 시
//! 설정(`USER_STORE`, `REDIS_URL`)에 따라 조립됩니다.
//!
//! - [`MongoUserRepository`] - `users` 컬렉션, email unique 인덱스
//! - [`InMemoryUserRepository`] - 개발/테스트용 프로세스 내 저장소
//! - [`CachedUserRepository`] - 임의의 저장소 앞에 Redis 조회 캐시를 둡니다

pub mod cached_user_repo;
pub mod memory_user_repo;
pub mod mongo_user_repo;

pub use cached_user_repo::{CachedUserRepository, UserCache};
pub use memory_user_repo::InMemoryUserRepository;
pub use mongo_user_repo::MongoUserRepository;

use async_trait::async_trait;
use crate::domain::entities::users::user::User;
use crate::errors::AppError;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// 정규화된 이메일로 조회
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// 16진수 ObjectId 문자열로 조회. 형식이 잘못된 ID 는 `None` 입니다.
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError>;

    /// 새 사용자를 저장하고 ID 가 채워진 엔티티를 반환합니다.
    ///
    /// 같은 이메일이 이미 있으면 `AppError::ConflictError` 입니다.
    /// 동시에 들어온 두 요청 중 하나만 성공합니다.
    async fn create(&self, user: User) -> Result<User, AppError>;

    /// ID 가 같은 기존 사용자를 교체합니다. 대상이 없으면 `None` 입니다.
    async fn update(&self, user: &User) -> Result<Option<User>, AppError>;
}
