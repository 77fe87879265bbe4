//! # Application Container
//!
//! 시작 시 한 번 설정을 읽어 저장소, 보안 서비스, 유스케이스를 조립합니다.
//! 조립된 컨테이너는 `web::Data<AppContainer>` 로 모든 워커가 공유합니다.
//!
//! ```text
//! AppConfig ──▶ SigningKey ──▶ SecurityService ─┐
//!           ├─▶ UserRepository (Mongo | Memory) ─┼─▶ UseCases
//!           │     └─ CachedUserRepository (Redis) │
//!           └─▶ GoogleIdTokenVerifier ───────────┘
//! ```
//!
//! 전역 레지스트리 없이 생성자 인자로만 의존성을 전달합니다.

use std::sync::Arc;
use std::time::Duration;
use log::info;
use crate::caching::redis::RedisClient;
use crate::config::{AppConfig, UserStore};
use crate::db::Database;
use crate::errors::AppError;
use crate::repositories::users::{CachedUserRepository, InMemoryUserRepository, MongoUserRepository, UserRepository};
use crate::services::auth::{ExternalIdentityVerifier, GoogleIdTokenVerifier, SecurityService, SigningKey};
use crate::usecases::{
    CreateUserUseCase, GetCurrentUserUseCase, LoginUserUseCase, LoginWithGoogleUseCase, RefreshTokenUseCase,
};

pub struct AppContainer {
    pub security: Arc<SecurityService>,
    pub create_user: CreateUserUseCase,
    pub login_user: LoginUserUseCase,
    pub login_with_google: LoginWithGoogleUseCase,
    pub refresh_token: RefreshTokenUseCase,
    pub get_current_user: GetCurrentUserUseCase,
    /// 유스케이스 하나에 허용되는 최대 처리 시간
    pub request_timeout: Duration,
    /// 리프레시 쿠키에 `Secure` 속성을 붙일지 여부
    pub secure_cookies: bool,
}

/// 컨테이너 조립에 필요한 구성 요소
pub struct ContainerParts {
    pub user_repo: Arc<dyn UserRepository>,
    pub security: Arc<SecurityService>,
    pub verifier: Arc<dyn ExternalIdentityVerifier>,
    pub google_client_id: String,
    pub recheck_verification_on_refresh: bool,
    pub request_timeout: Duration,
    pub secure_cookies: bool,
}

impl AppContainer {
    pub fn assemble(parts: ContainerParts) -> Self {
        let ContainerParts {
            user_repo,
            security,
            verifier,
            google_client_id,
            recheck_verification_on_refresh,
            request_timeout,
            secure_cookies,
        } = parts;

        Self {
            create_user: CreateUserUseCase::new(user_repo.clone(), security.clone()),
            login_user: LoginUserUseCase::new(user_repo.clone(), security.clone()),
            login_with_google: LoginWithGoogleUseCase::new(
                user_repo.clone(),
                security.clone(),
                verifier,
                google_client_id,
            ),
            refresh_token: RefreshTokenUseCase::new(
                user_repo.clone(),
                security.clone(),
                recheck_verification_on_refresh,
            ),
            get_current_user: GetCurrentUserUseCase::new(user_repo),
            security,
            request_timeout,
            secure_cookies,
        }
    }

    /// 외부 저장소에 연결하고 컨테이너를 만듭니다. 실패는 서버 기동 실패입니다.
    pub async fn build(config: &AppConfig) -> Result<Self, AppError> {
        let user_repo = build_user_repository(config).await?;

        let signing_key = SigningKey::from_source(&config.jwt.signing)?;
        info!("🔏 토큰 서명 알고리즘: {:?}", signing_key.algorithm());
        let security = Arc::new(SecurityService::new(
            signing_key,
            config.jwt.issuer.clone(),
            config.password.bcrypt_cost,
        )?);

        let verifier: Arc<dyn ExternalIdentityVerifier> = Arc::new(GoogleIdTokenVerifier::new(&config.google)?);

        Ok(Self::assemble(ContainerParts {
            user_repo,
            security,
            verifier,
            google_client_id: config.google.client_id.clone(),
            recheck_verification_on_refresh: config.jwt.recheck_verification_on_refresh,
            request_timeout: config.server.request_timeout,
            secure_cookies: config.environment.is_production(),
        }))
    }
}

async fn build_user_repository(config: &AppConfig) -> Result<Arc<dyn UserRepository>, AppError> {
    let base: Arc<dyn UserRepository> = match config.database.store {
        UserStore::Memory => {
            info!("🗂️ 메모리 사용자 저장소 사용 (재시작 시 데이터가 사라집니다)");
            Arc::new(InMemoryUserRepository::new())
        }
        UserStore::MongoDb => {
            info!("📡 데이터베이스 연결 중...");
            let database = Database::connect(&config.database).await?;
            let repo = MongoUserRepository::new(&database);
            repo.create_indexes().await?;
            Arc::new(repo)
        }
    };

    match &config.redis.url {
        Some(url) => {
            let redis = RedisClient::connect(url).await?;
            info!("🧊 사용자 조회 캐시 활성화");
            Ok(Arc::new(CachedUserRepository::new(base, Arc::new(redis))))
        }
        None => Ok(base),
    }
}
