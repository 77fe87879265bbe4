//! # Domain Entities Module
//!
//! 비즈니스 도메인의 핵심 엔티티들을 정의합니다.
//! MongoDB 문서와 직접 매핑되는 데이터 구조체들을 포함합니다.
//!
//! ```text
//! Domain Layer
//! ├── entities/     ← 이 모듈 (핵심 비즈니스 엔티티)
//! ├── models/       ← 토큰 클레임, 인증 사용자, 외부 신원
//! └── dto/          ← 데이터 전송 객체
//! ```
//!
//! 모든 엔티티는 `serde` 를 통해 BSON/JSON 으로 직렬화되며,
//! `_id` 필드는 MongoDB `ObjectId` 와 매핑됩니다.

pub mod users;
