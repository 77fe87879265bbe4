//! # Domain Models Module
//!
//! 영속화되지 않는 도메인 모델을 정의합니다.
//!
//! - [`token`] - JWT 클레임, 토큰 용도, 토큰 쌍
//! - [`auth`] - 인증 미들웨어가 주입하는 인증 사용자
//! - [`oauth`] - 외부 프로바이더 신원 모델

pub mod auth;
pub mod oauth;
pub mod token;
