//! # Google 로그인 모델
//!
//! Google ID 토큰 검증 결과를 표현하는 모델을 제공합니다.

pub mod google_user;

pub use google_user::*;
