//! # Domain Layer
//!
//! 인증 서비스의 도메인 계층입니다.
//!
//! ```text
//! domain/
//! ├── entities/   - 영속화되는 엔티티 (User)
//! ├── models/     - 토큰 클레임, 인증 사용자, 외부 신원
//! └── dto/        - HTTP 요청/응답 DTO
//! ```

pub mod entities;
pub mod dto;
pub mod models;
