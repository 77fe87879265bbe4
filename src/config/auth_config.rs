//! # Authentication Configuration Module
//!
//! JWT 서명 키, Google ID 토큰 검증, 토큰 정책 등 인증 관련 설정을 관리하는 모듈입니다.
//!
//! ## 지원하는 인증 방식
//!
//! 1. **로컬 인증**: 이메일/패스워드 기반 전통적인 인증
//! 2. **Google 로그인**: 클라이언트가 받은 Google ID 토큰을 서버에서 검증
//! 3. **JWT 토큰**: Stateless 인증을 위한 JSON Web Token (HS256 또는 RS256)
//!
//! ## 필수 환경 변수 설정
//!
//! ### JWT 토큰 설정
//! ```bash
//! # HMAC (HS256) - 최소 32바이트
//! export JWT_SECRET="your-super-secret-jwt-key-at-least-32-bytes"
//!
//! # 또는 RSA (RS256)
//! export JWT_PRIVATE_KEY_PATH="./secrets/jwt_private_key.pem"
//! export JWT_PUBLIC_KEY_PATH="./secrets/jwt_public_key.pem"
//! export JWT_KEY_ID="jamlink-auth-key-1"
//! ```
//!
//! ### Google 설정
//! ```bash
//! export GOOGLE_CLIENT_ID="your-google-client-id.apps.googleusercontent.com"
//! ```

use std::time::Duration;
use crate::config::{ConfigError, EnvLookup};

/// HS256 비밀 키의 최소 길이 (바이트)
pub const MIN_JWT_SECRET_LEN: usize = 32;

pub const DEFAULT_GOOGLE_CERTS_URI: &str = "https://www.googleapis.com/oauth2/v3/certs";

/// 토큰 서명 키의 출처
#[derive(Clone)]
pub enum SigningKeySource {
    /// HMAC-SHA256 공유 비밀
    Hmac { secret: String },
    /// RSA 키 파일 (PEM)
    Rsa {
        private_key_path: String,
        public_key_path: String,
        key_id: String,
    },
}

impl std::fmt::Debug for SigningKeySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SigningKeySource::Hmac { .. } => f.write_str("Hmac { secret: *** }"),
            SigningKeySource::Rsa { private_key_path, public_key_path, key_id } => f
                .debug_struct("Rsa")
                .field("private_key_path", private_key_path)
                .field("public_key_path", public_key_path)
                .field("key_id", key_id)
                .finish(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub signing: SigningKeySource,
    pub issuer: String,
    /// true면 리프레시 시 저장소에서 최신 인증 상태를 다시 읽습니다.
    pub recheck_verification_on_refresh: bool,
}

impl JwtConfig {
    pub fn from_lookup(env: &EnvLookup) -> Result<Self, ConfigError> {
        let signing = match (env.get("JWT_PRIVATE_KEY_PATH"), env.get("JWT_PUBLIC_KEY_PATH")) {
            (Some(private_key_path), Some(public_key_path)) => SigningKeySource::Rsa {
                private_key_path,
                public_key_path,
                key_id: env
                    .get("JWT_KEY_ID")
                    .unwrap_or_else(|| "jamlink-auth-key-1".to_string()),
            },
            (Some(_), None) => return Err(ConfigError::Missing("JWT_PUBLIC_KEY_PATH")),
            (None, Some(_)) => return Err(ConfigError::Missing("JWT_PRIVATE_KEY_PATH")),
            (None, None) => {
                let secret = env.require("JWT_SECRET")?;
                if secret.len() < MIN_JWT_SECRET_LEN {
                    return Err(ConfigError::Invalid {
                        key: "JWT_SECRET",
                        reason: format!("최소 {}바이트 이상이어야 합니다", MIN_JWT_SECRET_LEN),
                    });
                }
                SigningKeySource::Hmac { secret }
            }
        };

        Ok(Self {
            signing,
            issuer: env.get("JWT_ISSUER").unwrap_or_else(|| "jamlink-auth".to_string()),
            recheck_verification_on_refresh: env.flag("AUTH_REFRESH_RECHECK_VERIFICATION", false)?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct GoogleOAuthConfig {
    /// ID 토큰의 `aud` 로 기대하는 OAuth 클라이언트 ID
    pub client_id: String,
    /// Google 서명 키(JWKS) 주소
    pub certs_uri: String,
    pub http_timeout: Duration,
}

impl GoogleOAuthConfig {
    pub fn from_lookup(env: &EnvLookup) -> Result<Self, ConfigError> {
        Ok(Self {
            client_id: env.require("GOOGLE_CLIENT_ID")?,
            certs_uri: env
                .get("GOOGLE_CERTS_URI")
                .unwrap_or_else(|| DEFAULT_GOOGLE_CERTS_URI.to_string()),
            http_timeout: Duration::from_secs(env.parse_or("GOOGLE_HTTP_TIMEOUT_SECS", 5)?),
        })
    }
}

/// 인증 프로바이더
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    /// 이메일/비밀번호
    Local,
    /// Google ID 토큰
    Google,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    #[test]
    fn test_auth_provider_serialization() {
        let json = serde_json::to_string(&AuthProvider::Google).unwrap();
        assert_eq!(json, "\"google\"");

        let deserialized: AuthProvider = serde_json::from_str("\"local\"").unwrap();
        assert_eq!(deserialized, AuthProvider::Local);
        assert!(serde_json::from_str::<AuthProvider>("\"twitter\"").is_err());
    }

    #[test]
    fn test_jwt_secret_is_required() {
        let err = JwtConfig::from_lookup(&EnvLookup::from_pairs(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("JWT_SECRET")));
    }

    #[test]
    fn test_short_jwt_secret_is_rejected() {
        let env = EnvLookup::from_pairs(&[("JWT_SECRET", "short")]);
        assert!(matches!(
            JwtConfig::from_lookup(&env),
            Err(ConfigError::Invalid { key: "JWT_SECRET", .. })
        ));
    }

    #[test]
    fn test_rsa_paths_take_precedence() {
        let env = EnvLookup::from_pairs(&[
            ("JWT_SECRET", SECRET),
            ("JWT_PRIVATE_KEY_PATH", "/keys/private.pem"),
            ("JWT_PUBLIC_KEY_PATH", "/keys/public.pem"),
        ]);
        let config = JwtConfig::from_lookup(&env).unwrap();

        match config.signing {
            SigningKeySource::Rsa { key_id, .. } => assert_eq!(key_id, "jamlink-auth-key-1"),
            SigningKeySource::Hmac { .. } => panic!("Expected RSA signing"),
        }
    }

    #[test]
    fn test_half_configured_rsa_is_rejected() {
        let env = EnvLookup::from_pairs(&[("JWT_PRIVATE_KEY_PATH", "/keys/private.pem")]);
        assert!(matches!(
            JwtConfig::from_lookup(&env),
            Err(ConfigError::Missing("JWT_PUBLIC_KEY_PATH"))
        ));
    }

    #[test]
    fn test_refresh_recheck_flag() {
        let env = EnvLookup::from_pairs(&[
            ("JWT_SECRET", SECRET),
            ("AUTH_REFRESH_RECHECK_VERIFICATION", "true"),
        ]);
        assert!(JwtConfig::from_lookup(&env).unwrap().recheck_verification_on_refresh);
    }

    #[test]
    fn test_secret_is_not_debug_printed() {
        let source = SigningKeySource::Hmac { secret: SECRET.to_string() };
        assert!(!format!("{:?}", source).contains(SECRET));
    }

    #[test]
    fn test_google_client_id_is_required() {
        let err = GoogleOAuthConfig::from_lookup(&EnvLookup::from_pairs(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("GOOGLE_CLIENT_ID")));

        let config = GoogleOAuthConfig::from_lookup(&EnvLookup::from_pairs(&[
            ("GOOGLE_CLIENT_ID", "client.apps.googleusercontent.com"),
        ]))
        .unwrap();
        assert_eq!(config.certs_uri, DEFAULT_GOOGLE_CERTS_URI);
        assert_eq!(config.http_timeout, Duration::from_secs(5));
    }
}
