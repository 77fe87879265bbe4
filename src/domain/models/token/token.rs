//! JWT 인증 토큰 구조체 및 페어링 된 세트
//!
//! RFC 7519 JWT 표준 클레임과 용도별 토큰 2개를 함께 발급한 정보를 표현합니다.

use std::time::Duration;
use serde::{Deserialize, Serialize};

/// 액세스 토큰 수명 (15분)
pub const ACCESS_TOKEN_LIFETIME: Duration = Duration::from_secs(15 * 60);

/// 리프레시 토큰 수명 (7일)
pub const REFRESH_TOKEN_LIFETIME: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// 토큰 용도
///
/// 토큰은 자신의 용도와 일치하는 작업에만 사용할 수 있습니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenPurpose {
    /// 액세스 토큰
    #[serde(rename = "login")]
    Login,
    /// 리프레시 토큰
    #[serde(rename = "refresh_token")]
    RefreshToken,
}

impl TokenPurpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenPurpose::Login => "login",
            TokenPurpose::RefreshToken => "refresh_token",
        }
    }

    /// 용도별 고정 수명
    pub fn lifetime(&self) -> Duration {
        match self {
            TokenPurpose::Login => ACCESS_TOKEN_LIFETIME,
            TokenPurpose::RefreshToken => REFRESH_TOKEN_LIFETIME,
        }
    }
}

/// JWT 토큰의 클레임(Payload) 구조체
///
/// ## 클레임 구성
///
/// - `sub`: 토큰의 주체 (사용자 ID)
/// - `purpose`: 토큰 용도 (`login` / `refresh_token`)
/// - `iat`, `exp`: 발급/만료 시간 (Unix timestamp, 초)
/// - `iss`: 발급자
/// - `jti`: 토큰 고유 ID
/// - `isVerified`: 발급 시점의 계정 인증 상태
/// - `extra`: 선택적 추가 클레임
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub purpose: TokenPurpose,
    pub iat: i64,
    pub exp: i64,
    pub iss: String,
    pub jti: String,
    /// 없으면 미인증으로 취급합니다.
    #[serde(rename = "isVerified", default)]
    pub is_verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<String>,
}

/// 함께 발급된 액세스/리프레시 토큰 쌍
///
/// 두 토큰은 항상 같은 `sub` 과 `isVerified` 를 가집니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    #[serde(rename = "token")]
    pub access_token: String,
    pub refresh_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifetime_ratio_is_fixed() {
        assert_eq!(
            REFRESH_TOKEN_LIFETIME.as_secs() / ACCESS_TOKEN_LIFETIME.as_secs(),
            672
        );
        assert_eq!(TokenPurpose::Login.lifetime(), ACCESS_TOKEN_LIFETIME);
        assert_eq!(TokenPurpose::RefreshToken.lifetime(), REFRESH_TOKEN_LIFETIME);
    }

    #[test]
    fn test_purpose_wire_names() {
        assert_eq!(serde_json::to_string(&TokenPurpose::Login).unwrap(), "\"login\"");
        assert_eq!(
            serde_json::to_string(&TokenPurpose::RefreshToken).unwrap(),
            "\"refresh_token\""
        );
        assert!(serde_json::from_str::<TokenPurpose>("\"admin\"").is_err());
    }

    #[test]
    fn test_token_pair_wire_names() {
        let pair = TokenPair {
            access_token: "a".to_string(),
            refresh_token: "r".to_string(),
        };
        let json = serde_json::to_value(&pair).unwrap();

        assert_eq!(json, serde_json::json!({ "token": "a", "refreshToken": "r" }));
    }
}
