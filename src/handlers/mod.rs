//! HTTP 요청 핸들러
//!
//! - [`auth`] - 회원가입, 로그인, Google 로그인, 토큰 갱신
//! - [`users`] - 현재 사용자 프로필 (보호됨)
//! - [`rsa`] - JWKS 공개키

pub mod auth;
pub mod rsa;
pub mod users;
