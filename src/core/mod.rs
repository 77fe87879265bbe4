//! 애플리케이션 조립 계층
//!
//! 설정으로부터 서비스와 유스케이스를 만들어 HTTP 계층에 넘깁니다.

pub mod container;

pub use container::*;
