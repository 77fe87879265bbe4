//! 회원가입 요청 DTO

use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::utils::string_utils::deserialize_optional_string;

/// 로컬 계정 생성 요청
///
/// ```json
/// { "email": "a@x.com", "password": "hunter2hunter2", "preferredLanguage": "en" }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    /// 해싱 후 저장되므로 평문으로 유지하지 않음
    #[validate(length(
        min = 8,
        max = 128,
        message = "비밀번호는 8-128자 사이여야 합니다"
    ))]
    pub password: String,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 5, message = "언어 코드는 5자 이하여야 합니다"))]
    pub preferred_language: Option<String>,
}
