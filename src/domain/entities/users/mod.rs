//! Users Entity Module
//!
//! 사용자 도메인의 핵심 엔티티를 정의하는 모듈입니다.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use crate::domain::entities::users::{User, Verification};
//! use crate::config::AuthProvider;
//!
//! // 로컬 사용자 생성 (인증 전 상태)
//! let user = User::create(
//!     "user@example.com",
//!     hashed_password,
//!     Some("ko".to_string()),
//!     AuthProvider::Local,
//!     Verification::default(),
//! )?;
//! ```

pub mod user;

pub use user::*;
