use serde::Serialize;

/// 액세스 토큰만 담는 응답
///
/// Google 로그인과 토큰 갱신에 사용됩니다. 리프레시 토큰은 쿠키로 전달됩니다.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

impl TokenResponse {
    pub fn new(token: impl Into<String>) -> Self {
        Self { token: token.into() }
    }
}
