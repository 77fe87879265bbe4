//! # Data Transfer Objects (DTO) Module
//!
//! API 경계에서 주고받는 요청/응답 객체를 정의합니다.
//! 입력값 검증은 `validator` crate 로, JSON 필드 매핑은 `serde` 로 처리합니다.
//!
//! ```text
//! dto/
//! ├── users/
//! │   ├── request/    # RegisterRequest, LocalLoginRequest, GoogleLoginRequest
//! │   └── response/   # UserResponse
//! └── tokens/
//!     ├── request.rs  # RefreshTokenRequest
//!     └── response.rs # TokenResponse
//! ```
//!
//! 엔티티는 직접 직렬화해 응답하지 않습니다. `UserResponse` 처럼 노출할
//! 필드만 가진 DTO 로 변환합니다.

pub mod tokens;
pub mod users;
