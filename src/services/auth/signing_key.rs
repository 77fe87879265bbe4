//! # 토큰 서명 키
//!
//! 프로세스 전체에서 하나의 서명 키를 사용합니다. 시작 시 설정으로부터
//! 한 번 만들어진 뒤 변경되지 않으며 [`SecurityService`](super::SecurityService)
//! 가 소유합니다.
//!
//! - HMAC 모드: `JWT_SECRET` 으로 HS256 서명
//! - RSA 모드: PEM 키 쌍으로 RS256 서명, 헤더에 `kid` 를 넣고 JWKS 로 공개키를 배포

use std::fs;
use base64::{Engine as _, engine::general_purpose};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header};
use rsa::{
    pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey},
    pkcs8::{DecodePrivateKey, DecodePublicKey},
    traits::PublicKeyParts,
    RsaPrivateKey, RsaPublicKey,
};
use crate::config::SigningKeySource;
use crate::errors::{AppError, ErrorContext};

pub struct SigningKey {
    algorithm: Algorithm,
    encoding: EncodingKey,
    decoding: DecodingKey,
    key_id: Option<String>,
    public_key: Option<RsaPublicKey>,
}

impl SigningKey {
    pub fn hmac(secret: &[u8]) -> Self {
        Self {
            algorithm: Algorithm::HS256,
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            key_id: None,
            public_key: None,
        }
    }

    /// PEM 문자열로부터 RSA 키 생성
    ///
    /// 개인키는 PKCS#1 / PKCS#8, 공개키는 SPKI / PKCS#1 을 받습니다.
    /// 두 키가 한 쌍이 아니면 서명한 토큰을 검증할 수 없으므로 거부합니다.
    pub fn rsa_from_pem(private_pem: &str, public_pem: &str, key_id: impl Into<String>) -> Result<Self, AppError> {
        let private_key = RsaPrivateKey::from_pkcs1_pem(private_pem)
            .or_else(|_| RsaPrivateKey::from_pkcs8_pem(private_pem))
            .context("RSA 개인키 파싱 실패")?;
        let public_key = RsaPublicKey::from_public_key_pem(public_pem)
            .or_else(|_| RsaPublicKey::from_pkcs1_pem(public_pem))
            .context("RSA 공개키 파싱 실패")?;

        if private_key.to_public_key() != public_key {
            return Err(AppError::InternalError("RSA 공개키가 개인키와 짝이 맞지 않습니다".to_string()));
        }

        let encoding = EncodingKey::from_rsa_pem(private_pem.as_bytes())
            .context("RS256 서명 키 생성 실패")?;
        let decoding = DecodingKey::from_rsa_pem(public_pem.as_bytes())
            .context("RS256 검증 키 생성 실패")?;

        Ok(Self {
            algorithm: Algorithm::RS256,
            encoding,
            decoding,
            key_id: Some(key_id.into()),
            public_key: Some(public_key),
        })
    }

    pub fn from_source(source: &SigningKeySource) -> Result<Self, AppError> {
        match source {
            SigningKeySource::Hmac { secret } => Ok(Self::hmac(secret.as_bytes())),
            SigningKeySource::Rsa { private_key_path, public_key_path, key_id } => {
                let private_pem = fs::read_to_string(private_key_path)
                    .with_context(|| format!("개인키 파일 '{}' 읽기 실패", private_key_path))?;
                let public_pem = fs::read_to_string(public_key_path)
                    .with_context(|| format!("공개키 파일 '{}' 읽기 실패", public_key_path))?;

                log::info!("🔑 RSA 서명 키 로드: kid={}", key_id);
                Self::rsa_from_pem(&private_pem, &public_pem, key_id.clone())
            }
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn key_id(&self) -> Option<&str> {
        self.key_id.as_deref()
    }

    pub(crate) fn header(&self) -> Header {
        let mut header = Header::new(self.algorithm);
        header.kid = self.key_id.clone();
        header
    }

    pub(crate) fn encoding_key(&self) -> &EncodingKey {
        &self.encoding
    }

    pub(crate) fn decoding_key(&self) -> &DecodingKey {
        &self.decoding
    }

    /// RSA 모드의 공개키 JWKS. HMAC 모드에서는 공개할 키가 없으므로 `None`.
    pub fn jwks(&self) -> Option<serde_json::Value> {
        let public_key = self.public_key.as_ref()?;

        let n = general_purpose::URL_SAFE_NO_PAD.encode(public_key.n().to_bytes_be());
        let e = general_purpose::URL_SAFE_NO_PAD.encode(public_key.e().to_bytes_be());

        Some(serde_json::json!({
            "keys": [{
                "kty": "RSA",
                "use": "sig",
                "kid": self.key_id,
                "n": n,
                "e": e,
                "alg": "RS256"
            }]
        }))
    }
}

#[cfg(test)]
pub(crate) mod test_keys {
    pub const PRIVATE_PEM: &str = include_str!("../../../tests/fixtures/test_rsa_private.pem");
    pub const PUBLIC_PEM: &str = include_str!("../../../tests/fixtures/test_rsa_public.pem");
}
