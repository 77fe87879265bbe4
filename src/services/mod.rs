//! 서비스 계층 모듈
//!
//! 요청 상태를 갖지 않는 보안/외부 연동 서비스를 제공합니다.
//! 서비스는 시작 시 한 번 생성되어 `Arc` 로 유스케이스와 미들웨어에 주입됩니다.

pub mod auth;
