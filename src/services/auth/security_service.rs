//! # Security Service
//!
//! 비밀번호 해싱/검증, 보안 난수 생성, 토큰 발급/검증을 담당합니다.
//! 내부 상태는 불변 서명 키와 설정값뿐이므로 `Arc` 로 자유롭게 공유됩니다.
//!
//! bcrypt 연산은 CPU 를 오래 점유하므로 async 컨텍스트에서는
//! `web::block` 안에서 호출해야 합니다.
//!
//! ## 만료 규칙
//!
//! `exp` 는 초 단위(발급 시각을 초로 내림 + 수명)로 저장되고, 검증은 밀리초로
//! 비교해 `now < exp` 일 때만 통과합니다. 만료 시각 정각에 검증하면 실패합니다.

use std::time::Duration;
use base64::{Engine as _, engine::general_purpose};
use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, Validation};
use rand::{rngs::OsRng, RngCore};
use uuid::Uuid;
use crate::domain::entities::users::user::User;
use crate::domain::models::token::{TokenClaims, TokenPair, TokenPurpose};
use crate::errors::{AppError, ErrorContext};
use super::SigningKey;

/// Google 가입자에게 부여하는 무작위 비밀번호 길이 (바이트)
pub const PROVISIONED_PASSWORD_BYTES: usize = 32;

pub struct SecurityService {
    signing_key: SigningKey,
    issuer: String,
    bcrypt_cost: u32,
    /// 존재하지 않는 이메일 로그인에도 한 번의 bcrypt 검증을 수행하기 위한 해시
    dummy_hash: String,
}

impl SecurityService {
    pub fn new(signing_key: SigningKey, issuer: impl Into<String>, bcrypt_cost: u32) -> Result<Self, AppError> {
        let dummy_secret = generate_random_string(PROVISIONED_PASSWORD_BYTES)?;
        let dummy_hash = bcrypt::hash(dummy_secret, bcrypt_cost)
            .context("더미 해시 생성 실패")?;

        Ok(Self {
            signing_key,
            issuer: issuer.into(),
            bcrypt_cost,
            dummy_hash,
        })
    }

    pub fn signing_key(&self) -> &SigningKey {
        &self.signing_key
    }

    pub fn hash_password(&self, password: &str) -> Result<String, AppError> {
        bcrypt::hash(password, self.bcrypt_cost).context("비밀번호 해싱 실패")
    }

    /// 비교는 bcrypt 내부에서 상수 시간으로 수행됩니다. 잘못된 해시는 `false`.
    pub fn check_password(&self, password: &str, hash: &str) -> bool {
        bcrypt::verify(password, hash).unwrap_or(false)
    }

    /// 결과는 버리고 비용만 지불합니다.
    pub fn verify_dummy_password(&self, password: &str) {
        let _ = bcrypt::verify(password, &self.dummy_hash);
    }

    pub fn generate_secure_random_string(&self, byte_length: usize) -> Result<String, AppError> {
        generate_random_string(byte_length)
    }

    pub fn generate_token(
        &self,
        subject: &str,
        extra: Option<String>,
        lifetime: Duration,
        purpose: TokenPurpose,
        is_verified: bool,
    ) -> Result<String, AppError> {
        self.generate_token_at(subject, extra, lifetime, purpose, is_verified, Utc::now())
    }

    pub fn generate_token_at(
        &self,
        subject: &str,
        extra: Option<String>,
        lifetime: Duration,
        purpose: TokenPurpose,
        is_verified: bool,
        now: DateTime<Utc>,
    ) -> Result<String, AppError> {
        let iat = now.timestamp();
        let lifetime_secs = i64::try_from(lifetime.as_secs())
            .map_err(|_| AppError::InternalError("토큰 수명이 너무 깁니다".to_string()))?;

        let claims = TokenClaims {
            sub: subject.to_string(),
            purpose,
            iat,
            exp: iat + lifetime_secs,
            iss: self.issuer.clone(),
            jti: Uuid::new_v4().to_string(),
            is_verified,
            extra,
        };

        encode(&self.signing_key.header(), &claims, self.signing_key.encoding_key())
            .context("토큰 서명 실패")
    }

    pub fn validate_token(&self, token: &str) -> Result<TokenClaims, AppError> {
        self.validate_token_at(token, Utc::now())
    }

    /// 모든 실패(서명, 형식, 알고리즘, 발급자, 만료)는 `InvalidToken` 하나로 보고합니다.
    pub fn validate_token_at(&self, token: &str, now: DateTime<Utc>) -> Result<TokenClaims, AppError> {
        let claims = decode::<TokenClaims>(token, self.signing_key.decoding_key(), &self.validation())
            .map(|data| data.claims)
            .map_err(|e| {
                log::debug!("토큰 검증 실패: {}", e);
                AppError::InvalidToken
            })?;

        let expires_at_ms = claims.exp.saturating_mul(1000);
        if now.timestamp_millis() >= expires_at_ms {
            log::debug!("만료된 토큰: sub={}, exp={}", claims.sub, claims.exp);
            return Err(AppError::InvalidToken);
        }

        Ok(claims)
    }

    /// 같은 `sub`, `isVerified` 로 액세스/리프레시 토큰을 함께 발급
    pub fn issue_token_pair(&self, user: &User) -> Result<TokenPair, AppError> {
        let subject = user
            .id_string()
            .ok_or_else(|| AppError::InternalError("사용자 ID가 없습니다".to_string()))?;
        let is_verified = user.is_verified();

        let access_token = self.generate_token(
            &subject,
            None,
            TokenPurpose::Login.lifetime(),
            TokenPurpose::Login,
            is_verified,
        )?;
        let refresh_token = self.generate_token(
            &subject,
            None,
            TokenPurpose::RefreshToken.lifetime(),
            TokenPurpose::RefreshToken,
            is_verified,
        )?;

        Ok(TokenPair { access_token, refresh_token })
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(self.signing_key.algorithm());
        validation.set_issuer(&[self.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "sub", "iss"]);
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation
    }
}

fn generate_random_string(byte_length: usize) -> Result<String, AppError> {
    let mut bytes = vec![0u8; byte_length];
    OsRng
        .try_fill_bytes(&mut bytes)
        .context("보안 난수 생성 실패")?;

    Ok(general_purpose::URL_SAFE_NO_PAD.encode(bytes))
}


#[cfg(test)]
mod tests {
    use super::*;
    use super::test_support::{hmac_service, TEST_ISSUER, TEST_SECRET};
    use crate::config::AuthProvider;
    use crate::domain::entities::users::user::Verification;
    use crate::domain::models::token::{ACCESS_TOKEN_LIFETIME, REFRESH_TOKEN_LIFETIME};
    use crate::services::auth::signing_key::test_keys::{PRIVATE_PEM, PUBLIC_PEM};
    use chrono::TimeZone;
    use mongodb::bson::oid::ObjectId;

    fn b64(value: &serde_json::Value) -> String {
        general_purpose::URL_SAFE_NO_PAD.encode(serde_json::to_vec(value).unwrap())
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.timestamp_millis_opt(1_700_000_000_500).unwrap()
    }

    fn stored_user(verified: bool) -> User {
        let verification = if verified { Verification::verified_now() } else { Verification::default() };
        let mut user = User::create("a@x.com", "$2b$04$hash".to_string(), None, AuthProvider::Local, verification)
            .unwrap();
        user.id = Some(ObjectId::new());
        user
    }

    #[test]
    fn test_password_hash_and_check() {
        let service = hmac_service();
        let hash = service.hash_password("correct horse").unwrap();

        assert_ne!(hash, "correct horse");
        assert!(service.check_password("correct horse", &hash));
        assert!(!service.check_password("wrong horse", &hash));
    }

    #[test]
    fn test_check_password_malformed_hash_is_false() {
        let service = hmac_service();

        assert!(!service.check_password("anything", "not-a-bcrypt-hash"));
        assert!(!service.check_password("anything", ""));
    }

    #[test]
    fn test_secure_random_string() {
        let service = hmac_service();
        let a = service.generate_secure_random_string(32).unwrap();
        let b = service.generate_secure_random_string(32).unwrap();

        assert_eq!(a.len(), 43);
        assert_ne!(a, b);
        assert_eq!(general_purpose::URL_SAFE_NO_PAD.decode(&a).unwrap().len(), 32);
    }

    #[test]
    fn test_token_round_trip() {
        let service = hmac_service();
        let token = service
            .generate_token("user-1", Some("x".to_string()), ACCESS_TOKEN_LIFETIME, TokenPurpose::Login, true)
            .unwrap();

        let claims = service.validate_token(&token).unwrap();

        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.purpose, TokenPurpose::Login);
        assert!(claims.is_verified);
        assert_eq!(claims.extra.as_deref(), Some("x"));
        assert_eq!(claims.iss, TEST_ISSUER);
        assert_eq!(claims.exp - claims.iat, 15 * 60);
    }

    #[test]
    fn test_exp_is_truncated_issue_time_plus_lifetime() {
        let service = hmac_service();
        let now = fixed_now();
        let token = service
            .generate_token_at("u", None, REFRESH_TOKEN_LIFETIME, TokenPurpose::RefreshToken, false, now)
            .unwrap();

        let claims = service.validate_token_at(&token, now).unwrap();

        assert_eq!(claims.iat, 1_700_000_000);
        assert_eq!(claims.exp, 1_700_000_000 + 7 * 24 * 60 * 60);
    }

    #[test]
    fn test_expiry_boundary() {
        let service = hmac_service();
        let now = fixed_now();
        let token = service
            .generate_token_at("u", None, ACCESS_TOKEN_LIFETIME, TokenPurpose::Login, true, now)
            .unwrap();
        let exp_ms = (1_700_000_000 + 15 * 60) * 1000;

        let just_before = Utc.timestamp_millis_opt(exp_ms - 1).unwrap();
        let exactly_at = Utc.timestamp_millis_opt(exp_ms).unwrap();

        assert!(service.validate_token_at(&token, just_before).is_ok());
        assert!(matches!(service.validate_token_at(&token, exactly_at), Err(AppError::InvalidToken)));
    }

    #[test]
    fn test_tampered_payload_is_invalid() {
        let service = hmac_service();
        let token = service
            .generate_token("u", None, ACCESS_TOKEN_LIFETIME, TokenPurpose::Login, false)
            .unwrap();

        let parts: Vec<&str> = token.split('.').collect();
        let mut payload: serde_json::Value =
            serde_json::from_slice(&general_purpose::URL_SAFE_NO_PAD.decode(parts[1]).unwrap()).unwrap();
        payload["isVerified"] = serde_json::Value::Bool(true);
        let forged = format!("{}.{}.{}", parts[0], b64(&payload), parts[2]);

        assert!(matches!(service.validate_token(&forged), Err(AppError::InvalidToken)));
    }

    #[test]
    fn test_foreign_secret_is_invalid() {
        let foreign = SecurityService::new(
            SigningKey::hmac(b"another-secret-0123456789-abcdefg"),
            TEST_ISSUER,
            4,
        )
        .unwrap();
        let token = foreign
            .generate_token("u", None, ACCESS_TOKEN_LIFETIME, TokenPurpose::Login, true)
            .unwrap();

        assert!(matches!(hmac_service().validate_token(&token), Err(AppError::InvalidToken)));
    }

    #[test]
    fn test_wrong_issuer_is_invalid() {
        let other = SecurityService::new(SigningKey::hmac(TEST_SECRET), "someone-else", 4).unwrap();
        let token = other
            .generate_token("u", None, ACCESS_TOKEN_LIFETIME, TokenPurpose::Login, true)
            .unwrap();

        assert!(matches!(hmac_service().validate_token(&token), Err(AppError::InvalidToken)));
    }

    #[test]
    fn test_alg_none_and_unknown_alg_are_invalid() {
        let service = hmac_service();
        let payload = serde_json::json!({
            "sub": "u", "purpose": "login", "iat": 1, "exp": 4_000_000_000i64,
            "iss": TEST_ISSUER, "jti": "j", "isVerified": true
        });

        let none_token = format!("{}.{}.", b64(&serde_json::json!({"alg": "none", "typ": "JWT"})), b64(&payload));
        let unknown_token = format!("{}.{}.c2ln", b64(&serde_json::json!({"alg": "HS999", "typ": "JWT"})), b64(&payload));

        assert!(matches!(service.validate_token(&none_token), Err(AppError::InvalidToken)));
        assert!(matches!(service.validate_token(&unknown_token), Err(AppError::InvalidToken)));
    }

    #[test]
    fn test_garbage_is_invalid() {
        let service = hmac_service();

        assert!(matches!(service.validate_token(""), Err(AppError::InvalidToken)));
        assert!(matches!(service.validate_token("a.b.c"), Err(AppError::InvalidToken)));
    }

    #[test]
    fn test_rsa_round_trip_and_alg_downgrade() {
        let rsa = SecurityService::new(
            SigningKey::rsa_from_pem(PRIVATE_PEM, PUBLIC_PEM, "kid-1").unwrap(),
            TEST_ISSUER,
            4,
        )
        .unwrap();

        let token = rsa
            .generate_token("u", None, ACCESS_TOKEN_LIFETIME, TokenPurpose::Login, true)
            .unwrap();
        let header = jsonwebtoken::decode_header(&token).unwrap();
        assert_eq!(header.kid.as_deref(), Some("kid-1"));
        assert_eq!(rsa.validate_token(&token).unwrap().sub, "u");

        let hs_token = hmac_service()
            .generate_token("u", None, ACCESS_TOKEN_LIFETIME, TokenPurpose::Login, true)
            .unwrap();
        assert!(matches!(rsa.validate_token(&hs_token), Err(AppError::InvalidToken)));
    }

    #[test]
    fn test_issue_token_pair_shares_subject_and_verification() {
        let service = hmac_service();
        let user = stored_user(true);

        let pair = service.issue_token_pair(&user).unwrap();
        let access = service.validate_token(&pair.access_token).unwrap();
        let refresh = service.validate_token(&pair.refresh_token).unwrap();

        assert_eq!(access.sub, user.id_string().unwrap());
        assert_eq!(access.sub, refresh.sub);
        assert_eq!(access.purpose, TokenPurpose::Login);
        assert_eq!(refresh.purpose, TokenPurpose::RefreshToken);
        assert!(access.is_verified && refresh.is_verified);
        assert_eq!(refresh.exp - refresh.iat, 672 * (access.exp - access.iat));
        assert_ne!(access.jti, refresh.jti);
    }

    #[test]
    fn test_issue_token_pair_requires_persisted_user() {
        let service = hmac_service();
        let mut user = stored_user(false);
        user.id = None;

        assert!(matches!(service.issue_token_pair(&user), Err(AppError::InternalError(_))));
    }
}
