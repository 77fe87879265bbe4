//! 공통 유틸리티 함수 모듈
//!
//! # Modules
//!
//! - [`string_utils`] - 이메일 정규화, 선택 필드 정리, Bearer 토큰 파싱
//! - [`deadline`] - 요청 단위 처리 시간 제한

pub mod deadline;
pub mod string_utils;
