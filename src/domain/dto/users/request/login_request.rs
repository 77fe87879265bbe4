use serde::Deserialize;
use validator::Validate;
use crate::utils::string_utils::deserialize_optional_string;

/// 이메일/비밀번호 로그인 요청
#[derive(Debug, Deserialize, Validate)]
pub struct LocalLoginRequest {
    #[validate(length(min = 1, message = "이메일을 입력해주세요"))]
    pub email: String,

    #[validate(length(min = 1, message = "비밀번호를 입력해주세요"))]
    pub password: String,
}

/// Google ID 토큰 로그인 요청
///
/// 클라이언트가 Google Identity Services 로부터 받은 ID 토큰을 그대로 전달합니다.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GoogleLoginRequest {
    #[validate(length(min = 1, message = "ID 토큰이 필요합니다"))]
    pub id_token: String,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 5, message = "언어 코드는 5자 이하여야 합니다"))]
    pub preferred_language: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_google_login_request_field_names() {
        let req: GoogleLoginRequest =
            serde_json::from_str(r#"{"idToken":"abc"}"#).unwrap();

        assert_eq!(req.id_token, "abc");
        assert!(req.preferred_language.is_none());
    }

    #[test]
    fn test_empty_password_fails_validation() {
        let req = LocalLoginRequest {
            email: "a@x.com".to_string(),
            password: String::new(),
        };

        assert!(req.validate().is_err());
    }
}
