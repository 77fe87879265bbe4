//! # 문자열 유틸리티
//!
//! 이메일 정규화, 선택 필드 정리, Authorization 헤더 파싱 등
//! 여러 계층에서 공통으로 쓰는 문자열 처리 함수입니다.

use serde::Deserialize;

/// 이메일 정규화
///
/// 앞뒤 공백을 제거하고 소문자로 변환합니다. 저장과 조회 양쪽에서
/// 같은 함수를 거치므로 `Alice@X.com` 과 `alice@x.com` 은 같은 계정입니다.
///
/// # 예제
/// ```rust,ignore
/// assert_eq!(normalize_email("  Alice@Example.COM "), "alice@example.com");
/// ```
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// 선택적 문자열 필드 정리
///
/// None 이거나 공백뿐인 값은 None, 그 외에는 trim 한 값을 반환합니다.
///
/// # 예제
/// ```rust,ignore
/// assert_eq!(clean_optional_string(Some("  en  ".to_string())), Some("en".to_string()));
/// assert_eq!(clean_optional_string(Some("   ".to_string())), None);
/// ```
pub fn clean_optional_string(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// 선택적 문자열 필드를 위한 serde deserializer
///
/// `#[serde(default, deserialize_with = "deserialize_optional_string")]` 와 함께 사용합니다.
/// 빈 문자열과 null 은 모두 None 이 됩니다.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(clean_optional_string(opt))
}

/// `Authorization` 헤더 값에서 Bearer 토큰 추출
///
/// 스킴은 대소문자를 구분하지 않습니다. 토큰이 비어 있으면 None 입니다.
pub fn extract_bearer_token(header_value: &str) -> Option<&str> {
    let (scheme, token) = header_value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    if token.is_empty() { None } else { Some(token) }
}
