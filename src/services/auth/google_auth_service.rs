//! # Google ID 토큰 검증
//!
//! 클라이언트가 Google Identity Services 에서 받은 ID 토큰을 Google 의 공개키
//! (JWKS) 로 직접 검증합니다. 검증 항목은 RS256 서명, `aud` (우리 client id),
//! `iss` (accounts.google.com), `exp` 입니다.
//!
//! 공개키는 메모리에 캐시하고, 처음 보는 `kid` 가 오면 한 번 다시 받아옵니다.
//! 다시 받아오기는 [`JWKS_MIN_REFETCH_INTERVAL`] 에 한 번으로 제한하며, 그 사이의
//! 알 수 없는 `kid` 는 캐시된 집합 기준으로 거부합니다.
//! 캐시 잠금은 네트워크 요청 동안 잡고 있지 않습니다.

use std::sync::RwLock;
use std::time::Duration;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, decode_header, jwk::{Jwk, JwkSet}, Algorithm, DecodingKey, Validation};
use crate::config::GoogleOAuthConfig;
use crate::domain::models::oauth::ExternalIdentity;
use crate::domain::models::oauth::google_oauth_model::{GoogleIdTokenClaims, GOOGLE_ISSUERS};
use crate::errors::AppError;

/// 캐시된 JWKS 를 다시 받아오기까지의 최대 시간
const JWKS_MAX_AGE: Duration = Duration::from_secs(60 * 60);

/// 알 수 없는 `kid` 로 인한 재요청 사이의 최소 간격
pub const JWKS_MIN_REFETCH_INTERVAL: Duration = Duration::from_secs(60);

/// 외부 프로바이더 ID 토큰 검증기
#[async_trait]
pub trait ExternalIdentityVerifier: Send + Sync {
    /// # Errors
    ///
    /// * `AppError::InvalidExternalToken` - 서명, 대상, 발급자, 만료, 형식, email 누락
    /// * `AppError::ExternalServiceError` - 프로바이더 공개키를 가져오지 못함
    async fn validate(&self, raw_token: &str, audience: &str) -> Result<ExternalIdentity, AppError>;
}

struct CachedKeys {
    keys: JwkSet,
    fetched_at: DateTime<Utc>,
}

enum CacheLookup {
    Hit(Jwk),
    /// 최근에 받아온 집합에 없는 키
    UnknownKid,
    Refetch,
}

pub struct GoogleIdTokenVerifier {
    http: reqwest::Client,
    certs_uri: String,
    cache: RwLock<Option<CachedKeys>>,
}

impl GoogleIdTokenVerifier {
    pub fn new(config: &GoogleOAuthConfig) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()
            .map_err(|e| AppError::InternalError(format!("HTTP 클라이언트 생성 실패: {}", e)))?;

        Ok(Self {
            http,
            certs_uri: config.certs_uri.clone(),
            cache: RwLock::new(None),
        })
    }

    fn lookup(&self, kid: &str) -> CacheLookup {
        let cache = match self.cache.read() {
            Ok(cache) => cache,
            Err(e) => {
                log::warn!("Google 공개키 캐시 잠금 오류, 다시 받아옵니다: {}", e);
                return CacheLookup::Refetch;
            }
        };
        let Some(cached) = cache.as_ref() else {
            return CacheLookup::Refetch;
        };

        let age = (Utc::now() - cached.fetched_at).to_std().unwrap_or(Duration::ZERO);
        if age > JWKS_MAX_AGE {
            return CacheLookup::Refetch;
        }

        match cached.keys.find(kid) {
            Some(jwk) => CacheLookup::Hit(jwk.clone()),
            None if age < JWKS_MIN_REFETCH_INTERVAL => CacheLookup::UnknownKid,
            None => CacheLookup::Refetch,
        }
    }

    async fn fetch_keys(&self) -> Result<JwkSet, AppError> {
        log::debug!("Google 공개키 요청: {}", self.certs_uri);

        let response = self
            .http
            .get(&self.certs_uri)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Google 공개키 요청 실패: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::ExternalServiceError(format!(
                "Google 공개키 조회 실패: HTTP {}",
                response.status()
            )));
        }

        response
            .json::<JwkSet>()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Google 공개키 파싱 실패: {}", e)))
    }

    async fn key_for(&self, kid: &str) -> Result<Jwk, AppError> {
        match self.lookup(kid) {
            CacheLookup::Hit(jwk) => return Ok(jwk),
            CacheLookup::UnknownKid => return Err(unknown_kid(kid)),
            CacheLookup::Refetch => {}
        }

        let keys = self.fetch_keys().await?;
        let jwk = keys.find(kid).cloned();

        match self.cache.write() {
            Ok(mut cache) => *cache = Some(CachedKeys { keys, fetched_at: Utc::now() }),
            Err(e) => log::warn!("Google 공개키 캐시 갱신 실패: {}", e),
        }

        jwk.ok_or_else(|| unknown_kid(kid))
    }

    /// `fetched_ago` 전에 받아온 것처럼 키 집합을 미리 채워 둡니다.
    #[cfg(test)]
    fn with_keys(certs_uri: &str, keys: JwkSet, fetched_ago: Duration) -> Self {
        let fetched_at = Utc::now() - chrono::Duration::from_std(fetched_ago).unwrap();
        Self {
            http: reqwest::Client::new(),
            certs_uri: certs_uri.to_string(),
            cache: RwLock::new(Some(CachedKeys { keys, fetched_at })),
        }
    }
}

#[async_trait]
impl ExternalIdentityVerifier for GoogleIdTokenVerifier {
    async fn validate(&self, raw_token: &str, audience: &str) -> Result<ExternalIdentity, AppError> {
        let kid = token_kid(raw_token)?;
        let jwk = self.key_for(&kid).await?;
        verify_with_jwk(raw_token, audience, &jwk)
    }
}

fn unknown_kid(kid: &str) -> AppError {
    AppError::InvalidExternalToken(format!("알 수 없는 서명 키: {}", kid))
}

fn token_kid(raw_token: &str) -> Result<String, AppError> {
    let header = decode_header(raw_token)
        .map_err(|e| AppError::InvalidExternalToken(format!("형식 오류: {}", e)))?;

    if header.alg != Algorithm::RS256 {
        return Err(AppError::InvalidExternalToken(format!("지원하지 않는 알고리즘: {:?}", header.alg)));
    }

    header
        .kid
        .ok_or_else(|| AppError::InvalidExternalToken("kid 헤더 없음".to_string()))
}

/// 주어진 키 집합으로 ID 토큰을 검증합니다. 네트워크를 사용하지 않습니다.
pub fn verify_with_keys(raw_token: &str, audience: &str, keys: &JwkSet) -> Result<ExternalIdentity, AppError> {
    let kid = token_kid(raw_token)?;
    let jwk = keys.find(&kid).ok_or_else(|| unknown_kid(&kid))?;

    verify_with_jwk(raw_token, audience, jwk)
}

fn verify_with_jwk(raw_token: &str, audience: &str, jwk: &Jwk) -> Result<ExternalIdentity, AppError> {
    let key = DecodingKey::from_jwk(jwk)
        .map_err(|e| AppError::ExternalServiceError(format!("Google 공개키 변환 실패: {}", e)))?;

    let mut validation = Validation::new(Algorithm::RS256);
    validation.set_audience(&[audience]);
    validation.set_issuer(&GOOGLE_ISSUERS);
    validation.set_required_spec_claims(&["exp", "sub", "aud", "iss"]);

    let claims = decode::<GoogleIdTokenClaims>(raw_token, &key, &validation)
        .map_err(|e| AppError::InvalidExternalToken(e.to_string()))?
        .claims;

    claims.into_identity()
}
