//! # Configuration Module
//!
//! 인증 서비스의 설정 관리를 담당하는 모듈입니다.
//! 환경 변수 기반의 설정값들을 프로세스 시작 시 한 번 읽어 불변 구조체
//! [`AppConfig`] 로 만들고, 이후에는 이 값을 명시적으로 주입합니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 데이터베이스, 서버, 환경 관련 설정
//! - [`auth_config`] - JWT, Google, 인증 정책 관련 설정
//!
//! ## 설계 원칙
//!
//! - 민감한 정보는 환경 변수로만 제공 (하드코딩된 기본 비밀 키 없음)
//! - 필수 설정값 누락은 요청 처리 중이 아니라 시작 시점에 실패
//! - 설정값의 타입 검증은 파싱 시점에 수행
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::config::AppConfig;
//!
//! let config = AppConfig::from_env()?;
//! println!("Server will bind to {}", config.server.bind_address());
//! ```
//!
//! ## 환경 변수 설정 가이드
//!
//! ### 필수 환경 변수
//!
//! ```bash
//! export JWT_SECRET="your-super-secret-key-at-least-32-bytes"
//! export GOOGLE_CLIENT_ID="your-client-id.apps.googleusercontent.com"
//! ```
//!
//! ### 선택적 환경 변수
//!
//! ```bash
//! export ENVIRONMENT="production"  # development, test, staging, production
//! export BCRYPT_COST="12"          # 4-15 범위
//! export HOST="0.0.0.0"
//! export PORT="8080"
//! export REQUEST_TIMEOUT_SECS="10"
//! export USER_STORE="mongodb"      # mongodb, memory
//! export MONGODB_URI="mongodb://localhost:27017"
//! export DATABASE_NAME="jamlink_auth"
//! export REDIS_URL="redis://localhost:6379"
//! export AUTH_REFRESH_RECHECK_VERIFICATION="false"
//! ```

pub mod data_config;
pub mod auth_config;

pub use data_config::*;
pub use auth_config::*;

use std::collections::HashMap;
use std::str::FromStr;
use thiserror::Error;

/// 설정 로딩 에러. 프로세스 시작을 중단시킵니다.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("필수 환경 변수 {0} 가 설정되지 않았습니다")]
    Missing(&'static str),

    #[error("환경 변수 {key} 값이 올바르지 않습니다: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// 환경 변수 스냅샷
///
/// 테스트에서 프로세스 환경을 건드리지 않도록 조회를 값으로 분리합니다.
#[derive(Debug, Clone, Default)]
pub struct EnvLookup {
    vars: HashMap<String, String>,
}

impl EnvLookup {
    pub fn from_process_env() -> Self {
        Self { vars: std::env::vars().collect() }
    }

    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self {
            vars: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    /// 공백만 있는 값은 설정되지 않은 것으로 취급합니다.
    pub fn get(&self, key: &str) -> Option<String> {
        self.vars
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }

    pub fn require(&self, key: &'static str) -> Result<String, ConfigError> {
        self.get(key).ok_or(ConfigError::Missing(key))
    }

    pub fn parse_or<T>(&self, key: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match self.get(key) {
            Some(raw) => raw.parse().map_err(|e: T::Err| ConfigError::Invalid {
                key,
                reason: format!("{} ({})", raw, e),
            }),
            None => Ok(default),
        }
    }

    pub fn flag(&self, key: &'static str, default: bool) -> Result<bool, ConfigError> {
        match self.get(key).map(|v| v.to_lowercase()) {
            None => Ok(default),
            Some(v) if matches!(v.as_str(), "1" | "true" | "yes" | "on") => Ok(true),
            Some(v) if matches!(v.as_str(), "0" | "false" | "no" | "off") => Ok(false),
            Some(v) => Err(ConfigError::Invalid {
                key,
                reason: format!("불리언 값이 아닙니다: {}", v),
            }),
        }
    }
}

/// 애플리케이션 전체 설정
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub password: PasswordConfig,
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub jwt: JwtConfig,
    pub google: GoogleOAuthConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&EnvLookup::from_process_env())
    }

    pub fn from_lookup(env: &EnvLookup) -> Result<Self, ConfigError> {
        let environment = Environment::from_lookup(env);

        Ok(Self {
            server: ServerConfig::from_lookup(env)?,
            password: PasswordConfig::from_lookup(env, &environment)?,
            database: DatabaseConfig::from_lookup(env)?,
            redis: RedisConfig::from_lookup(env),
            jwt: JwtConfig::from_lookup(env)?,
            google: GoogleOAuthConfig::from_lookup(env)?,
            environment,
        })
    }
}
