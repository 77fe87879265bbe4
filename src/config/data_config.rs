//! 데이터 및 서버 설정 관리 모듈
//!
//! 데이터베이스, 서버, 환경 및 보안 관련 설정을 관리합니다.

use std::time::Duration;
use crate::config::{ConfigError, EnvLookup};

#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Development,
    Test,
    Staging,
    Production,
}

impl Environment {
    pub fn from_lookup(env: &EnvLookup) -> Self {
        let value = env
            .get("ENVIRONMENT")
            .or_else(|| env.get("NODE_ENV"))
            .unwrap_or_else(|| "production".to_string());

        Self::from_str(&value)
    }

    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

/// 비밀번호 해싱 설정
#[derive(Debug, Clone)]
pub struct PasswordConfig {
    pub bcrypt_cost: u32,
}

impl PasswordConfig {
    /// `BCRYPT_COST` (4-15) 가 있으면 사용하고, 없으면 환경별 기본값
    pub fn from_lookup(env: &EnvLookup, environment: &Environment) -> Result<Self, ConfigError> {
        let bcrypt_cost = match env.get("BCRYPT_COST") {
            Some(raw) => {
                let cost: u32 = raw.parse().map_err(|_| ConfigError::Invalid {
                    key: "BCRYPT_COST",
                    reason: format!("숫자가 아닙니다: {}", raw),
                })?;
                if !(4..=15).contains(&cost) {
                    return Err(ConfigError::Invalid {
                        key: "BCRYPT_COST",
                        reason: format!("4-15 범위를 벗어났습니다: {}", cost),
                    });
                }
                cost
            }
            None => Self::bcrypt_cost_for_env(environment),
        };

        Ok(Self { bcrypt_cost })
    }

    pub fn bcrypt_cost_for_env(env: &Environment) -> u32 {
        match env {
            Environment::Development => 4,
            Environment::Test => 4,
            Environment::Staging => 10,
            Environment::Production => 12,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// 유스케이스 하나에 허용되는 최대 처리 시간
    pub request_timeout: Duration,
}

impl ServerConfig {
    pub fn from_lookup(env: &EnvLookup) -> Result<Self, ConfigError> {
        Ok(Self {
            host: env.get("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: env.parse_or("PORT", 8080)?,
            request_timeout: Duration::from_secs(env.parse_or("REQUEST_TIMEOUT_SECS", 10)?),
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 사용자 저장소 종류
#[derive(Debug, Clone, PartialEq)]
pub enum UserStore {
    MongoDb,
    Memory,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub store: UserStore,
    pub mongodb_uri: String,
    pub database_name: String,
}

impl DatabaseConfig {
    pub fn from_lookup(env: &EnvLookup) -> Result<Self, ConfigError> {
        let store = match env.get("USER_STORE").as_deref() {
            None | Some("mongodb") | Some("mongo") => UserStore::MongoDb,
            Some("memory") => UserStore::Memory,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    key: "USER_STORE",
                    reason: format!("지원하지 않는 저장소입니다: {}", other),
                })
            }
        };

        Ok(Self {
            store,
            mongodb_uri: env
                .get("MONGODB_URI")
                .unwrap_or_else(|| "mongodb://localhost:27017".to_string()),
            database_name: env
                .get("DATABASE_NAME")
                .unwrap_or_else(|| "jamlink_auth_dev".to_string()),
        })
    }
}

/// Redis 설정. URL이 없으면 사용자 캐시를 사용하지 않습니다.
#[derive(Debug, Clone)]
pub struct RedisConfig {
    pub url: Option<String>,
}

impl RedisConfig {
    pub fn from_lookup(env: &EnvLookup) -> Self {
        Self { url: env.get("REDIS_URL") }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_from_string() {
        assert_eq!(
            Environment::from_str("development"),
            Environment::Development
        );
        assert_eq!(Environment::from_str("test"), Environment::Test);
        assert_eq!(Environment::from_str("production"), Environment::Production);
        assert_eq!(Environment::from_str("unknown"), Environment::Production);
    }

    #[test]
    fn test_bcrypt_cost_for_each_environment() {
        assert_eq!(
            PasswordConfig::bcrypt_cost_for_env(&Environment::Development),
            4
        );
        assert_eq!(PasswordConfig::bcrypt_cost_for_env(&Environment::Test), 4);
        assert_eq!(
            PasswordConfig::bcrypt_cost_for_env(&Environment::Staging),
            10
        );
        assert_eq!(
            PasswordConfig::bcrypt_cost_for_env(&Environment::Production),
            12
        );
    }

    #[test]
    fn test_bcrypt_cost_override_is_range_checked() {
        let env = EnvLookup::from_pairs(&[("BCRYPT_COST", "6")]);
        let config = PasswordConfig::from_lookup(&env, &Environment::Production).unwrap();
        assert_eq!(config.bcrypt_cost, 6);

        let env = EnvLookup::from_pairs(&[("BCRYPT_COST", "31")]);
        assert!(PasswordConfig::from_lookup(&env, &Environment::Production).is_err());
    }

    #[test]
    fn test_server_config_defaults() {
        let config = ServerConfig::from_lookup(&EnvLookup::from_pairs(&[])).unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let env = EnvLookup::from_pairs(&[("PORT", "eighty")]);
        assert!(ServerConfig::from_lookup(&env).is_err());
    }

    #[test]
    fn test_user_store_selection() {
        let memory = DatabaseConfig::from_lookup(&EnvLookup::from_pairs(&[("USER_STORE", "memory")])).unwrap();
        assert_eq!(memory.store, UserStore::Memory);

        let default = DatabaseConfig::from_lookup(&EnvLookup::from_pairs(&[])).unwrap();
        assert_eq!(default.store, UserStore::MongoDb);

        assert!(DatabaseConfig::from_lookup(&EnvLookup::from_pairs(&[("USER_STORE", "sqlite")])).is_err());
    }
}
