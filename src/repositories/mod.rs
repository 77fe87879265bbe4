//! 영속성 계층
//!
//! 유스케이스가 의존하는 저장소 trait 과 그 구현체를 제공합니다.

pub mod users;
