use serde::Deserialize;

/// 토큰 갱신 요청
///
/// 본문이 비어 있으면 `refresh_token` 쿠키를 사용합니다.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    pub refresh_token: Option<String>,
}
