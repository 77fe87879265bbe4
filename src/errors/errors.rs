//! 애플리케이션 전역에서 사용하는 에러 시스템
//!
//! 인증 서비스를 위한 통합 에러 처리 시스템입니다.
//! `thiserror`와 `actix_web::ResponseError`를 사용하여 타입 안전하고
//! 일관된 에러 처리를 제공합니다.
//!
//! ## 클라이언트 노출 정책
//!
//! 자격 증명/토큰 검증 실패는 어떤 검사가 실패했는지 구분할 수 없는
//! 일반 메시지로만 응답합니다. 예외는 `Unverified` 하나이며, 이 경우에만
//! "your account is not verified" 라는 별도 사유를 돌려줍니다.
//! 의존성 실패(DB, Redis, 외부 서비스, 내부 오류)는 상세 내용을 로그에만
//! 남기고 클라이언트에는 `internal server error` 로 응답합니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::errors::AppError;
//!
//! async fn find(repo: &dyn UserRepository, email: &str) -> Result<User, AppError> {
//!     repo.find_by_email(email)
//!         .await?
//!         .ok_or(AppError::InvalidCredentials)
//! }
//! ```

use actix_web::http::StatusCode;
use thiserror::Error;

/// 응답 본문에 사용되는 고정 메시지
pub const MSG_INVALID_CREDENTIALS: &str = "invalid email or password";
pub const MSG_INVALID_TOKEN: &str = "invalid token";
pub const MSG_MISSING_AUTH_HEADER: &str = "authorization header missing or invalid";
pub const MSG_UNVERIFIED: &str = "your account is not verified";
pub const MSG_INTERNAL: &str = "internal server error";
pub const MSG_TIMEOUT: &str = "request timed out";

/// 애플리케이션 전역 에러 타입
///
/// 인증 서비스에서 발생할 수 있는 모든 종류의 에러를 포괄하는 열거형입니다.
/// 자동으로 HTTP 응답으로 변환되어 클라이언트에게 전달됩니다.
#[derive(Error, Debug)]
pub enum AppError {
    /// 이메일/비밀번호 불일치 또는 존재하지 않는 이메일 (401)
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// 외부 ID 토큰(Google) 검증 실패 (401)
    #[error("Invalid external token: {0}")]
    InvalidExternalToken(String),

    /// 서명/만료/형식 검증 실패 (401)
    #[error("Invalid token")]
    InvalidToken,

    /// 액세스/리프레시 토큰이 잘못된 용도로 사용됨 (401)
    #[error("Wrong token purpose")]
    WrongTokenPurpose,

    /// 유효한 토큰이지만 인증되지 않은 계정 (401)
    #[error("Account not verified")]
    Unverified,

    /// 입력값 검증 에러 (400 Bad Request)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 리소스 찾을 수 없음 에러 (404 Not Found)
    #[error("Not found: {0}")]
    NotFound(String),

    /// 충돌/중복 에러 (409 Conflict)
    #[error("Conflict error: {0}")]
    ConflictError(String),

    /// 호출자가 지정한 마감 시간 초과 (504 Gateway Timeout)
    #[error("Deadline exceeded: {0}")]
    Timeout(String),

    /// 데이터베이스 관련 에러 (500 Internal Server Error)
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Redis 캐시 관련 에러 (500 Internal Server Error)
    #[error("Redis error: {0}")]
    RedisError(String),

    /// 외부 서비스 에러 (500 Internal Server Error)
    #[error("External service error: {0}")]
    ExternalServiceError(String),

    /// 내부 서버 에러: 해싱, 난수 생성, 토큰 서명 실패 등 (500)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// 해싱/난수/영속화 등 의존성 실패인지 확인
    ///
    /// 이 그룹의 에러는 유스케이스에서 재시도하지 않고 서버 오류로 전파됩니다.
    pub fn is_dependency_failure(&self) -> bool {
        matches!(
            self,
            AppError::DatabaseError(_)
                | AppError::RedisError(_)
                | AppError::ExternalServiceError(_)
                | AppError::InternalError(_)
        )
    }

    /// 클라이언트에게 보여줄 메시지
    pub fn public_message(&self) -> String {
        match self {
            AppError::InvalidCredentials => MSG_INVALID_CREDENTIALS.to_string(),
            AppError::InvalidExternalToken(_)
            | AppError::InvalidToken
            | AppError::WrongTokenPurpose => MSG_INVALID_TOKEN.to_string(),
            AppError::Unverified => MSG_UNVERIFIED.to_string(),
            AppError::ValidationError(msg)
            | AppError::NotFound(msg)
            | AppError::ConflictError(msg) => msg.clone(),
            AppError::Timeout(_) => MSG_TIMEOUT.to_string(),
            _ => MSG_INTERNAL.to_string(),
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidCredentials
            | AppError::InvalidExternalToken(_)
            | AppError::InvalidToken
            | AppError::WrongTokenPurpose
            | AppError::Unverified => StatusCode::UNAUTHORIZED,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ConflictError(_) => StatusCode::CONFLICT,
            AppError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// HTTP 에러 응답을 생성합니다.
    ///
    /// 각 에러 타입을 적절한 HTTP 상태 코드와 JSON 응답으로 변환합니다.
    /// 상세 원인은 로그에만 남깁니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        if self.is_dependency_failure() {
            log::error!("요청 처리 중 서버 오류: {}", self);
        } else {
            log::debug!("요청 거부: {}", self);
        }

        actix_web::HttpResponse::build(self.status_code())
            .json(serde_json::json!({
                "error": self.public_message()
            }))
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 외부 라이브러리 에러를 AppError로 변환하는 확장 trait
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 에러를 변환합니다.
    fn context(self, msg: &str) -> AppResult<T>;

    /// 클로저를 사용하여 지연 평가된 컨텍스트를 제공합니다.
    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", f(), e)))
    }
}

impl From<actix_web::error::BlockingError> for AppError {
    fn from(e: actix_web::error::BlockingError) -> Self {
        AppError::InternalError(format!("블로킹 작업 실패: {}", e))
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(e: mongodb::error::Error) -> Self {
        AppError::DatabaseError(e.to_string())
    }
}

impl From<redis::RedisError> for AppError {
    fn from(e: redis::RedisError) -> Self {
        AppError::RedisError(e.to_string())
    }
}
