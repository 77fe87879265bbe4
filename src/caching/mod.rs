//! 캐시 계층
//!
//! 사용자 조회 결과를 Redis에 TTL과 함께 저장합니다.
//! `REDIS_URL` 이 설정되지 않으면 캐시 없이 동작합니다.

pub mod redis;
