//! 인증 및 보안 서비스 모듈
//!
//! - [`SigningKey`] - HS256 / RS256 서명 키와 JWKS
//! - [`SecurityService`] - 비밀번호 해싱, 보안 난수, 토큰 발급/검증
//! - [`GoogleIdTokenVerifier`] - Google ID 토큰 검증 ([`ExternalIdentityVerifier`] 구현)
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::auth::{SecurityService, SigningKey};
//!
//! let security = SecurityService::new(SigningKey::hmac(secret), "jamlink-auth", 12)?;
//! let pair = security.issue_token_pair(&user)?;
//! let claims = security.validate_token(&pair.access_token)?;
//! ```

pub mod google_auth_service;
pub mod security_service;
pub mod signing_key;

pub use google_auth_service::*;
pub use security_service::*;
pub use signing_key::*;
