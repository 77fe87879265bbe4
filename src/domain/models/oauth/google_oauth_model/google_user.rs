//! # Google ID 토큰 클레임 모델
//!
//! Google Identity Services 가 발급하는 ID 토큰(JWT)의 페이로드를 매핑합니다.
//! 서명/발급자/대상(aud) 검증이 끝난 뒤에만 이 값을 신뢰합니다.

use serde::Deserialize;
use crate::domain::models::oauth::ExternalIdentity;
use crate::errors::AppError;

/// Google ID 토큰이 가질 수 있는 발급자 값
pub const GOOGLE_ISSUERS: [&str; 2] = ["accounts.google.com", "https://accounts.google.com"];

#[derive(Debug, Deserialize)]
pub struct GoogleIdTokenClaims {
    /// Google 계정 고유 ID
    pub sub: String,

    pub email: Option<String>,

    /// Google 은 문자열 "true" 로 보내는 경우가 있어 둘 다 허용합니다.
    #[serde(default, deserialize_with = "bool_or_string")]
    pub email_verified: bool,
}

impl GoogleIdTokenClaims {
    /// 검증된 클레임을 외부 신원으로 변환
    ///
    /// # Errors
    ///
    /// * `AppError::InvalidExternalToken` - email 클레임 누락
    pub fn into_identity(self) -> Result<ExternalIdentity, AppError> {
        let email = self
            .email
            .filter(|e| !e.trim().is_empty())
            .ok_or_else(|| AppError::InvalidExternalToken("email not found in Google token".to_string()))?;

        Ok(ExternalIdentity {
            subject: self.sub,
            email,
            email_verified: self.email_verified,
        })
    }
}

fn bool_or_string<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        String(String),
    }

    Ok(match BoolOrString::deserialize(deserializer)? {
        BoolOrString::Bool(b) => b,
        BoolOrString::String(s) => s.eq_ignore_ascii_case("true"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_verified_accepts_both_forms() {
        let claims: GoogleIdTokenClaims = serde_json::from_value(serde_json::json!({
            "sub": "1", "email": "a@x.com", "email_verified": "true"
        }))
        .unwrap();
        assert!(claims.email_verified);

        let claims: GoogleIdTokenClaims = serde_json::from_value(serde_json::json!({
            "sub": "1", "email": "a@x.com", "email_verified": false
        }))
        .unwrap();
        assert!(!claims.email_verified);
    }

    #[test]
    fn test_missing_email_is_invalid_external_token() {
        let claims: GoogleIdTokenClaims =
            serde_json::from_value(serde_json::json!({ "sub": "1" })).unwrap();

        assert!(matches!(
            claims.into_identity(),
            Err(AppError::InvalidExternalToken(_))
        ));
    }

    #[test]
    fn test_into_identity() {
        let claims: GoogleIdTokenClaims = serde_json::from_value(serde_json::json!({
            "sub": "108", "email": "a@x.com", "email_verified": true, "name": "A"
        }))
        .unwrap();
        let identity = claims.into_identity().unwrap();

        assert_eq!(identity.subject, "108");
        assert_eq!(identity.email, "a@x.com");
        assert!(identity.email_verified);
    }
}
